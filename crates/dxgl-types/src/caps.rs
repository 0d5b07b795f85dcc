//! Device capability bits (`D3DCAPS8`) and the aggregate caps record.
//!
//! Bit values follow the D3D8 SDK headers so a caller can hand `.bits()` straight to code that
//! expects the raw `DWORD` fields.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::DevType;

/// `D3DMAXUSERCLIPPLANES`.
pub const MAX_USER_CLIP_PLANES: u32 = 32;

/// Number of vertex streams advertised.
pub const MAX_STREAMS: u32 = 16;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Caps: u32 {
        const READ_SCANLINE = 0x0002_0000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Caps2: u32 {
        const NO2DDURING3DSCENE = 0x0000_0002;
        const FULLSCREENGAMMA = 0x0002_0000;
        const CANRENDERWINDOWED = 0x0008_0000;
        const CANCALIBRATEGAMMA = 0x0010_0000;
        const CANMANAGERESOURCE = 0x1000_0000;
        const DYNAMICTEXTURES = 0x2000_0000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Caps3: u32 {
        const ALPHA_FULLSCREEN_FLIP_OR_DISCARD = 0x0000_0020;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct PresentIntervals: u32 {
        const ONE = 0x0000_0001;
        const TWO = 0x0000_0002;
        const THREE = 0x0000_0004;
        const FOUR = 0x0000_0008;
        const IMMEDIATE = 0x8000_0000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct CursorCaps: u32 {
        const COLOR = 0x0000_0001;
        const LOWRES = 0x0000_0002;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct DevCaps: u32 {
        const EXECUTESYSTEMMEMORY = 0x0000_0010;
        const EXECUTEVIDEOMEMORY = 0x0000_0020;
        const TLVERTEXSYSTEMMEMORY = 0x0000_0040;
        const TLVERTEXVIDEOMEMORY = 0x0000_0080;
        const TEXTURESYSTEMMEMORY = 0x0000_0100;
        const TEXTUREVIDEOMEMORY = 0x0000_0200;
        const DRAWPRIMTLVERTEX = 0x0000_0400;
        const CANRENDERAFTERFLIP = 0x0000_0800;
        const TEXTURENONLOCALVIDMEM = 0x0000_1000;
        const DRAWPRIMITIVES2 = 0x0000_2000;
        const SEPARATETEXTUREMEMORIES = 0x0000_4000;
        const DRAWPRIMITIVES2EX = 0x0000_8000;
        const HWTRANSFORMANDLIGHT = 0x0001_0000;
        const CANBLTSYSTONONLOCAL = 0x0002_0000;
        const HWRASTERIZATION = 0x0008_0000;
        const PUREDEVICE = 0x0010_0000;
        const QUINTICRTPATCHES = 0x0020_0000;
        const RTPATCHES = 0x0040_0000;
        const RTPATCHHANDLEZERO = 0x0080_0000;
        const NPATCHES = 0x0100_0000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct PrimitiveMiscCaps: u32 {
        const MASKZ = 0x0000_0002;
        const LINEPATTERNREP = 0x0000_0004;
        const CULLNONE = 0x0000_0010;
        const CULLCW = 0x0000_0020;
        const CULLCCW = 0x0000_0040;
        const COLORWRITEENABLE = 0x0000_0080;
        const CLIPPLANESCALEDPOINTS = 0x0000_0100;
        const CLIPTLVERTS = 0x0000_0200;
        const TSSARGTEMP = 0x0000_0400;
        const BLENDOP = 0x0000_0800;
        const NULLREFERENCE = 0x0000_1000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct RasterCaps: u32 {
        const DITHER = 0x0000_0001;
        const PAT = 0x0000_0008;
        const ZTEST = 0x0000_0010;
        const FOGVERTEX = 0x0000_0080;
        const FOGTABLE = 0x0000_0100;
        const ANTIALIASEDGES = 0x0000_1000;
        const MIPMAPLODBIAS = 0x0000_2000;
        const ZBIAS = 0x0000_4000;
        const ZBUFFERLESSHSR = 0x0000_8000;
        const FOGRANGE = 0x0001_0000;
        const ANISOTROPY = 0x0002_0000;
        const WBUFFER = 0x0004_0000;
        const WFOG = 0x0010_0000;
        const ZFOG = 0x0020_0000;
        const COLORPERSPECTIVE = 0x0040_0000;
        const STRETCHBLTMULTISAMPLE = 0x0080_0000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct CmpCaps: u32 {
        const NEVER = 0x0000_0001;
        const LESS = 0x0000_0002;
        const EQUAL = 0x0000_0004;
        const LESSEQUAL = 0x0000_0008;
        const GREATER = 0x0000_0010;
        const NOTEQUAL = 0x0000_0020;
        const GREATEREQUAL = 0x0000_0040;
        const ALWAYS = 0x0000_0080;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct BlendCaps: u32 {
        const ZERO = 0x0000_0001;
        const ONE = 0x0000_0002;
        const SRCCOLOR = 0x0000_0004;
        const INVSRCCOLOR = 0x0000_0008;
        const SRCALPHA = 0x0000_0010;
        const INVSRCALPHA = 0x0000_0020;
        const DESTALPHA = 0x0000_0040;
        const INVDESTALPHA = 0x0000_0080;
        const DESTCOLOR = 0x0000_0100;
        const INVDESTCOLOR = 0x0000_0200;
        const SRCALPHASAT = 0x0000_0400;
        const BOTHSRCALPHA = 0x0000_0800;
        const BOTHINVSRCALPHA = 0x0000_1000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ShadeCaps: u32 {
        const COLORGOURAUDRGB = 0x0000_0008;
        const SPECULARGOURAUDRGB = 0x0000_0200;
        const ALPHAGOURAUDBLEND = 0x0000_4000;
        const FOGGOURAUD = 0x0008_0000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct TextureCaps: u32 {
        const PERSPECTIVE = 0x0000_0001;
        const POW2 = 0x0000_0002;
        const ALPHA = 0x0000_0004;
        const SQUAREONLY = 0x0000_0020;
        const TEXREPEATNOTSCALEDBYSIZE = 0x0000_0040;
        const ALPHAPALETTE = 0x0000_0080;
        const NONPOW2CONDITIONAL = 0x0000_0100;
        const PROJECTED = 0x0000_0400;
        const CUBEMAP = 0x0000_0800;
        const VOLUMEMAP = 0x0000_2000;
        const MIPMAP = 0x0000_4000;
        const MIPVOLUMEMAP = 0x0000_8000;
        const MIPCUBEMAP = 0x0001_0000;
        const CUBEMAP_POW2 = 0x0002_0000;
        const VOLUMEMAP_POW2 = 0x0004_0000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct FilterCaps: u32 {
        const MINFPOINT = 0x0000_0100;
        const MINFLINEAR = 0x0000_0200;
        const MINFANISOTROPIC = 0x0000_0400;
        const MIPFPOINT = 0x0001_0000;
        const MIPFLINEAR = 0x0002_0000;
        const MAGFPOINT = 0x0100_0000;
        const MAGFLINEAR = 0x0200_0000;
        const MAGFANISOTROPIC = 0x0400_0000;
        const MAGFAFLATCUBIC = 0x0800_0000;
        const MAGFGAUSSIANCUBIC = 0x1000_0000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct AddressCaps: u32 {
        const WRAP = 0x0000_0001;
        const MIRROR = 0x0000_0002;
        const CLAMP = 0x0000_0004;
        const BORDER = 0x0000_0008;
        const INDEPENDENTUV = 0x0000_0010;
        const MIRRORONCE = 0x0000_0020;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct LineCaps: u32 {
        const TEXTURE = 0x0000_0001;
        const ZTEST = 0x0000_0002;
        const BLEND = 0x0000_0004;
        const ALPHACMP = 0x0000_0008;
        const FOG = 0x0000_0010;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct StencilCaps: u32 {
        const KEEP = 0x0000_0001;
        const ZERO = 0x0000_0002;
        const REPLACE = 0x0000_0004;
        const INCRSAT = 0x0000_0008;
        const DECRSAT = 0x0000_0010;
        const INVERT = 0x0000_0020;
        const INCR = 0x0000_0040;
        const DECR = 0x0000_0080;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct FvfCaps: u32 {
        const TEXCOORDCOUNTMASK = 0x0000_ffff;
        const DONOTSTRIPELEMENTS = 0x0008_0000;
        const PSIZE = 0x0010_0000;

        const _ = !0;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct TextureOpCaps: u32 {
        const DISABLE = 0x0000_0001;
        const SELECTARG1 = 0x0000_0002;
        const SELECTARG2 = 0x0000_0004;
        const MODULATE = 0x0000_0008;
        const MODULATE2X = 0x0000_0010;
        const MODULATE4X = 0x0000_0020;
        const ADD = 0x0000_0040;
        const ADDSIGNED = 0x0000_0080;
        const ADDSIGNED2X = 0x0000_0100;
        const SUBTRACT = 0x0000_0200;
        const ADDSMOOTH = 0x0000_0400;
        const BLENDDIFFUSEALPHA = 0x0000_0800;
        const BLENDTEXTUREALPHA = 0x0000_1000;
        const BLENDFACTORALPHA = 0x0000_2000;
        const BLENDTEXTUREALPHAPM = 0x0000_4000;
        const BLENDCURRENTALPHA = 0x0000_8000;
        const PREMODULATE = 0x0001_0000;
        const MODULATEALPHA_ADDCOLOR = 0x0002_0000;
        const MODULATECOLOR_ADDALPHA = 0x0004_0000;
        const MODULATEINVALPHA_ADDCOLOR = 0x0008_0000;
        const MODULATEINVCOLOR_ADDALPHA = 0x0010_0000;
        const BUMPENVMAP = 0x0020_0000;
        const BUMPENVMAPLUMINANCE = 0x0040_0000;
        const DOTPRODUCT3 = 0x0080_0000;
        const MULTIPLYADD = 0x0100_0000;
        const LERP = 0x0200_0000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct VertexProcessingCaps: u32 {
        const TEXGEN = 0x0000_0001;
        const MATERIALSOURCE7 = 0x0000_0002;
        const DIRECTIONALLIGHTS = 0x0000_0008;
        const POSITIONALLIGHTS = 0x0000_0010;
        const LOCALVIEWER = 0x0000_0020;
        const TWEENING = 0x0000_0040;
        const NO_VSDT_UBYTE4 = 0x0000_0080;
    }
}

impl FvfCaps {
    /// Caps advertising `count` texture coordinate sets.
    pub fn with_texcoord_count(self, count: u16) -> Self {
        (self - Self::TEXCOORDCOUNTMASK) | Self::from_bits_retain(u32::from(count))
    }

    pub fn texcoord_count(self) -> u16 {
        (self.bits() & Self::TEXCOORDCOUNTMASK.bits()) as u16
    }
}

/// Aggregate device capabilities (`D3DCAPS8`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCaps {
    pub device_type: DevType,
    pub adapter_ordinal: u32,

    pub caps: Caps,
    pub caps2: Caps2,
    pub caps3: Caps3,
    pub presentation_intervals: PresentIntervals,
    pub cursor_caps: CursorCaps,
    pub dev_caps: DevCaps,
    pub primitive_misc_caps: PrimitiveMiscCaps,
    pub raster_caps: RasterCaps,
    pub z_cmp_caps: CmpCaps,
    pub src_blend_caps: BlendCaps,
    pub dest_blend_caps: BlendCaps,
    pub alpha_cmp_caps: CmpCaps,
    pub shade_caps: ShadeCaps,
    pub texture_caps: TextureCaps,
    pub texture_filter_caps: FilterCaps,
    pub cube_texture_filter_caps: FilterCaps,
    pub volume_texture_filter_caps: FilterCaps,
    pub texture_address_caps: AddressCaps,
    pub volume_texture_address_caps: AddressCaps,
    pub line_caps: LineCaps,

    pub max_texture_width: u32,
    pub max_texture_height: u32,
    pub max_volume_extent: u32,
    pub max_texture_repeat: u32,
    pub max_texture_aspect_ratio: u32,
    pub max_anisotropy: u32,
    pub max_vertex_w: f32,

    pub guard_band_left: f32,
    pub guard_band_top: f32,
    pub guard_band_right: f32,
    pub guard_band_bottom: f32,
    pub extents_adjust: f32,

    pub stencil_caps: StencilCaps,
    pub fvf_caps: FvfCaps,
    pub texture_op_caps: TextureOpCaps,
    pub max_texture_blend_stages: u32,
    pub max_simultaneous_textures: u32,

    pub vertex_processing_caps: VertexProcessingCaps,
    pub max_active_lights: u32,
    pub max_user_clip_planes: u32,
    pub max_vertex_blend_matrices: u32,
    pub max_vertex_blend_matrix_index: u32,

    pub max_point_size: f32,
    pub max_primitive_count: u32,
    pub max_vertex_index: u32,
    pub max_streams: u32,
    pub max_stream_stride: u32,

    pub vertex_shader_version: u32,
    pub max_vertex_shader_const: u32,
    pub pixel_shader_version: u32,
    pub max_pixel_shader_value: f32,
}

impl DeviceCaps {
    /// Whether a device created from these caps may request hardware vertex processing.
    pub fn supports_hardware_vertex_processing(&self) -> bool {
        self.dev_caps.contains(DevCaps::HWTRANSFORMANDLIGHT)
    }

    pub fn supports_pure_device(&self) -> bool {
        self.supports_hardware_vertex_processing() && self.dev_caps.contains(DevCaps::PUREDEVICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fvf_texcoord_count_occupies_low_word() {
        let caps = FvfCaps::PSIZE.with_texcoord_count(8);
        assert_eq!(caps.texcoord_count(), 8);
        assert!(caps.contains(FvfCaps::PSIZE));
        assert_eq!(caps.bits(), 0x0010_0008);

        let caps = caps.with_texcoord_count(2);
        assert_eq!(caps.texcoord_count(), 2);
    }
}
