//! Direct3D 8 vocabulary shared by the capability layer and its consumers.
//!
//! This crate is intentionally free of any platform or driver access. It provides:
//! - the logical surface/depth formats (`D3DFORMAT`) and their channel layouts,
//! - device/resource/usage enums used by the capability queries,
//! - the caps bitflag sets and the aggregate [`DeviceCaps`] record,
//! - display-mode and adapter-identifier output records,
//! - the [`D3dError`] result type returned by every query.
#![forbid(unsafe_code)]

mod adapter;
mod caps;
mod device;
mod error;
mod format;
mod shader;
mod texture;

pub use adapter::{AdapterIdentifier, DisplayMode, ADAPTER_DEFAULT_REFRESH, ENUM_NO_WHQL_LEVEL};
pub use caps::{
    AddressCaps, BlendCaps, Caps, Caps2, Caps3, CmpCaps, CursorCaps, DevCaps, DeviceCaps, FilterCaps,
    FvfCaps, LineCaps, PresentIntervals, PrimitiveMiscCaps, RasterCaps, ShadeCaps, StencilCaps,
    TextureCaps, TextureOpCaps, VertexProcessingCaps, MAX_STREAMS, MAX_USER_CLIP_PLANES,
};
pub use device::{DevType, MultiSampleType, ResourceType, Usage};
pub use error::{D3dError, D3dResult};
pub use format::{ChannelSizes, D3DFormat, DepthStencilSizes};
pub use shader::{ps_version, vs_version, PS_VERSION_NONE, VS_VERSION_NONE};
pub use texture::{MipFilter, TextureAddress, TextureFilter};
