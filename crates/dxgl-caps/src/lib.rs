//! Direct3D 8 adapter capability reporting on top of an OpenGL driver.
//!
//! The crate answers the `IDirect3D8` adapter queries (identity, display modes, format checks and
//! device caps) by inspecting the host GL driver:
//!
//! - [`context`] brings up a throwaway GL context when none is current,
//! - [`scan`] fills a [`GlInfo`] from the driver's strings, limits and extensions,
//! - [`lookup`] derives the sampler-state translation tables,
//! - [`direct3d`] is the façade tying these together behind one lock.
//!
//! All driver, windowing-system and OS access goes through the traits in [`platform`].
#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod context;
pub mod device_caps;
pub mod direct3d;
pub mod extensions;
pub mod format;
pub mod gl_info;
pub mod lookup;
pub mod modes;
pub mod platform;
pub mod procs;
/// Recorded-driver replay used by tests and the probe tool.
pub mod profile;
pub mod scan;
pub mod version;

pub use config::{CapsConfig, ShaderMode};
pub use context::{ContextCache, ContextError, ContextGuard, ContextLease};
pub use direct3d::{Direct3D, ADAPTER_COUNT};
pub use format::FormatPolicy;
pub use gl_info::{
    Degradation, Feature, FeatureSet, GlCard, GlInfo, GlLimits, GlVendor, ShaderVersion,
    ShaderVersions,
};
pub use lookup::{GlFilter, GlWrap, LookupTables};
pub use platform::{DisplayModeSource, FbConfig, GlPlatform, NullDisplayModes, NullPlatform};
pub use procs::{GlProc, ProcRegistry};
pub use profile::{DriverProfile, ScriptedDisplayModes, ScriptedPlatform};
pub use version::{DriverVersion, VersionParseError};
