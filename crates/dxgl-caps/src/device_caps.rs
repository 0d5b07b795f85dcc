//! `D3DCAPS8` derivation from a scanned [`GlInfo`].

use dxgl_types::{
    ps_version, vs_version, AddressCaps, BlendCaps, Caps, Caps2, Caps3, CmpCaps, CursorCaps,
    DevCaps, DevType, DeviceCaps, FilterCaps, FvfCaps, LineCaps, PresentIntervals,
    PrimitiveMiscCaps, RasterCaps, ShadeCaps, StencilCaps, TextureCaps, TextureOpCaps,
    VertexProcessingCaps, MAX_STREAMS, PS_VERSION_NONE, VS_VERSION_NONE,
};

use crate::config::CapsConfig;
use crate::gl_info::{Feature, GlInfo, GlVendor, ShaderVersion};

/// Texture coordinate sets per vertex.
const MAX_TEXCOORDS: u16 = 8;

const MAX_TEXTURE_REPEAT: u32 = 32768;
const MAX_TEXTURE_ASPECT_RATIO: u32 = 32768;
const MAX_STREAM_STRIDE: u32 = 1024;
const MAX_VERTEX_W: f32 = 1e10;

/// Vertex shader constant registers. Software GL stacks reserve one for position fixup.
const VS_CONSTANTS: u32 = 96;
const VS_CONSTANTS_SOFTWARE: u32 = 95;

pub fn device_caps(
    info: &GlInfo,
    adapter: u32,
    device_type: DevType,
    config: &CapsConfig,
) -> DeviceCaps {
    let has = |feature| info.supports(feature);
    let limits = &info.limits;

    let mut raster_caps = RasterCaps::DITHER | RasterCaps::PAT | RasterCaps::FOGRANGE;
    let mut texture_caps = TextureCaps::ALPHA
        | TextureCaps::ALPHAPALETTE
        | TextureCaps::POW2
        | TextureCaps::VOLUMEMAP
        | TextureCaps::MIPMAP
        | TextureCaps::PROJECTED;
    let mut filter_caps = FilterCaps::MINFPOINT
        | FilterCaps::MINFLINEAR
        | FilterCaps::MAGFPOINT
        | FilterCaps::MAGFLINEAR
        | FilterCaps::MIPFPOINT
        | FilterCaps::MIPFLINEAR;
    let mut address_caps = AddressCaps::WRAP | AddressCaps::CLAMP;
    let mut stencil_caps = StencilCaps::KEEP
        | StencilCaps::ZERO
        | StencilCaps::REPLACE
        | StencilCaps::INCRSAT
        | StencilCaps::DECRSAT
        | StencilCaps::INVERT;
    let mut texture_op_caps = TextureOpCaps::DISABLE
        | TextureOpCaps::SELECTARG1
        | TextureOpCaps::SELECTARG2
        | TextureOpCaps::MODULATE
        | TextureOpCaps::MODULATE2X
        | TextureOpCaps::MODULATE4X
        | TextureOpCaps::ADD
        | TextureOpCaps::ADDSIGNED
        | TextureOpCaps::ADDSIGNED2X;

    if has(Feature::ExtTextureFilterAnisotropic) {
        raster_caps |= RasterCaps::ANISOTROPY;
        filter_caps |= FilterCaps::MINFANISOTROPIC | FilterCaps::MAGFANISOTROPIC;
    }
    if has(Feature::ExtTextureLodBias) {
        raster_caps |= RasterCaps::MIPMAPLODBIAS;
    }

    let mut cube_filter_caps = FilterCaps::empty();
    if has(Feature::ArbTextureCubeMap) {
        texture_caps |= TextureCaps::CUBEMAP | TextureCaps::MIPCUBEMAP | TextureCaps::CUBEMAP_POW2;
        cube_filter_caps = filter_caps;
    }

    if has(Feature::ArbTextureBorderClamp) {
        address_caps |= AddressCaps::BORDER;
    }
    if has(Feature::ArbTextureMirroredRepeat) {
        address_caps |= AddressCaps::MIRROR;
    }
    if has(Feature::AtiTextureMirrorOnce) {
        address_caps |= AddressCaps::MIRRORONCE;
    }

    if has(Feature::ExtStencilWrap) {
        stencil_caps |= StencilCaps::INCR | StencilCaps::DECR;
    }

    if has(Feature::ArbTextureEnvCombine) || has(Feature::ExtTextureEnvCombine) {
        texture_op_caps |= TextureOpCaps::BLENDDIFFUSEALPHA
            | TextureOpCaps::BLENDTEXTUREALPHA
            | TextureOpCaps::BLENDFACTORALPHA
            | TextureOpCaps::BLENDCURRENTALPHA
            | TextureOpCaps::LERP
            | TextureOpCaps::SUBTRACT;
    }
    if has(Feature::ArbTextureEnvDot3) || has(Feature::ExtTextureEnvDot3) {
        texture_op_caps |= TextureOpCaps::DOTPRODUCT3;
    }
    if has(Feature::NvTextureEnvCombine4) {
        texture_op_caps |= TextureOpCaps::ADDSMOOTH
            | TextureOpCaps::MULTIPLYADD
            | TextureOpCaps::MODULATEALPHA_ADDCOLOR
            | TextureOpCaps::MODULATECOLOR_ADDALPHA
            | TextureOpCaps::MODULATEINVALPHA_ADDCOLOR
            | TextureOpCaps::MODULATEINVCOLOR_ADDALPHA;
    }

    let (vertex_shader_version, max_vertex_shader_const) = vertex_shader(info, device_type, config);
    let pixel_shader_version = pixel_shader(info, device_type, config);

    DeviceCaps {
        device_type,
        adapter_ordinal: adapter,

        caps: Caps::empty(),
        caps2: Caps2::CANRENDERWINDOWED,
        caps3: Caps3::empty(),
        presentation_intervals: PresentIntervals::IMMEDIATE,
        cursor_caps: CursorCaps::empty(),
        dev_caps: DevCaps::DRAWPRIMTLVERTEX | DevCaps::HWTRANSFORMANDLIGHT | DevCaps::PUREDEVICE,
        primitive_misc_caps: PrimitiveMiscCaps::CULLCCW
            | PrimitiveMiscCaps::CULLCW
            | PrimitiveMiscCaps::COLORWRITEENABLE
            | PrimitiveMiscCaps::CLIPTLVERTS
            | PrimitiveMiscCaps::CLIPPLANESCALEDPOINTS
            | PrimitiveMiscCaps::MASKZ,
        raster_caps,
        z_cmp_caps: CmpCaps::all(),
        src_blend_caps: BlendCaps::all(),
        dest_blend_caps: BlendCaps::all(),
        alpha_cmp_caps: CmpCaps::all(),
        shade_caps: ShadeCaps::SPECULARGOURAUDRGB | ShadeCaps::COLORGOURAUDRGB,
        texture_caps,
        texture_filter_caps: filter_caps,
        cube_texture_filter_caps: cube_filter_caps,
        volume_texture_filter_caps: FilterCaps::empty(),
        texture_address_caps: address_caps,
        volume_texture_address_caps: AddressCaps::empty(),
        line_caps: LineCaps::TEXTURE | LineCaps::ZTEST,

        max_texture_width: limits.max_texture_size,
        max_texture_height: limits.max_texture_size,
        max_volume_extent: 0,
        max_texture_repeat: MAX_TEXTURE_REPEAT,
        max_texture_aspect_ratio: MAX_TEXTURE_ASPECT_RATIO,
        max_anisotropy: limits.max_anisotropy,
        max_vertex_w: MAX_VERTEX_W,

        guard_band_left: 0.0,
        guard_band_top: 0.0,
        guard_band_right: 0.0,
        guard_band_bottom: 0.0,
        extents_adjust: 0.0,

        stencil_caps,
        fvf_caps: FvfCaps::PSIZE.with_texcoord_count(MAX_TEXCOORDS),
        texture_op_caps,
        max_texture_blend_stages: limits.max_textures,
        max_simultaneous_textures: limits.max_textures,

        vertex_processing_caps: VertexProcessingCaps::TEXGEN
            | VertexProcessingCaps::MATERIALSOURCE7
            | VertexProcessingCaps::DIRECTIONALLIGHTS
            | VertexProcessingCaps::POSITIONALLIGHTS
            | VertexProcessingCaps::LOCALVIEWER,
        max_active_lights: limits.max_lights,
        max_user_clip_planes: limits.max_clip_planes,
        max_vertex_blend_matrices: limits.max_blends,
        max_vertex_blend_matrix_index: 1,

        max_point_size: limits.max_point_size,
        max_primitive_count: 0xFFFF_FFFF,
        max_vertex_index: 0xFFFF_FFFF,
        max_streams: MAX_STREAMS,
        max_stream_stride: MAX_STREAM_STRIDE,

        vertex_shader_version,
        max_vertex_shader_const,
        pixel_shader_version,
        max_pixel_shader_value: 1.0,
    }
}

/// Advertised vertex shader version and constant count.
///
/// Only HAL devices running shaders on the GPU advertise a version, capped at 1.1 since
/// nothing above it can be translated.
fn vertex_shader(info: &GlInfo, device_type: DevType, config: &CapsConfig) -> (u32, u32) {
    let best = info.shaders.best_vertex();
    if device_type != DevType::Hal
        || !config.vertex_shader_mode.advertises_version()
        || !best.is_supported()
    {
        return (VS_VERSION_NONE, 0);
    }
    let version = best.min(ShaderVersion::V1_1);
    let constants = match info.vendor {
        GlVendor::Mesa | GlVendor::Wine => VS_CONSTANTS_SOFTWARE,
        _ => VS_CONSTANTS,
    };
    (vs_version(version.major(), version.minor()), constants)
}

fn pixel_shader(info: &GlInfo, device_type: DevType, config: &CapsConfig) -> u32 {
    let best = info.shaders.best_pixel();
    if device_type != DevType::Hal
        || !config.pixel_shader_mode.advertises_version()
        || !best.is_supported()
    {
        return PS_VERSION_NONE;
    }
    ps_version(best.major(), best.minor())
}
