//! The cached description of what the GL driver can do.

use std::fmt;

use bitflags::bitflags;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::version::DriverVersion;

/// GPU vendor, discriminant is the PCI vendor id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u32)]
pub enum GlVendor {
    /// Unrecognized vendor string.
    #[default]
    Wine = 0x0000,
    Mesa = 0x0001,
    Ati = 0x1002,
    Nvidia = 0x10de,
    Intel = 0x8086,
}

impl GlVendor {
    pub fn pci_id(self) -> u32 {
        self as u32
    }
}

/// Known adapter models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GlCard {
    /// Placeholder for vendors without a card table.
    #[default]
    Generic,

    AtiRadeon8500,
    AtiRadeon9700Pro,
    AtiRadeon9800Pro,

    NvidiaGeForce4Ti4600,
    NvidiaGeForceFx5900Ultra,
    NvidiaQuadroFx3000,
    NvidiaGeForce6800Ultra,
    NvidiaQuadroFx4000,
    NvidiaGeForce7800Ultra,

    IntelI830G,
    IntelI855G,
    IntelI865G,
    IntelI915G,
    IntelI915Gm,
}

impl GlCard {
    pub fn pci_id(self) -> u32 {
        match self {
            Self::Generic => 0x0000,
            Self::AtiRadeon8500 => 0x514c,
            Self::AtiRadeon9700Pro => 0x4e44,
            Self::AtiRadeon9800Pro => 0x4e48,
            Self::NvidiaGeForce4Ti4600 => 0x0250,
            Self::NvidiaGeForceFx5900Ultra => 0x0330,
            Self::NvidiaQuadroFx3000 => 0x0338,
            Self::NvidiaGeForce6800Ultra => 0x0040,
            Self::NvidiaQuadroFx4000 => 0x004e,
            Self::NvidiaGeForce7800Ultra => 0x0090,
            Self::IntelI830G => 0x3577,
            Self::IntelI855G => 0x3582,
            Self::IntelI865G => 0x2572,
            Self::IntelI915G => 0x2582,
            Self::IntelI915Gm => 0x2592,
        }
    }
}

macro_rules! features {
    ($($variant:ident => $name:literal,)*) => {
        /// GL extensions the capability layer recognizes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[repr(u8)]
        pub enum Feature {
            $($variant,)*
        }

        impl Feature {
            pub const ALL: &'static [Feature] = &[$(Feature::$variant,)*];

            /// The extension name as it appears in the driver's extension string.
            pub fn extension_name(self) -> &'static str {
                match self {
                    $(Feature::$variant => $name,)*
                }
            }
        }
    };
}

features! {
    ArbFragmentProgram => "GL_ARB_fragment_program",
    ArbMultisample => "GL_ARB_multisample",
    ArbMultitexture => "GL_ARB_multitexture",
    ArbOcclusionQuery => "GL_ARB_occlusion_query",
    ArbPointParameters => "GL_ARB_point_parameters",
    ArbPointSprite => "GL_ARB_point_sprite",
    ArbTextureBorderClamp => "GL_ARB_texture_border_clamp",
    ArbTextureCompression => "GL_ARB_texture_compression",
    ArbTextureCubeMap => "GL_ARB_texture_cube_map",
    ArbTextureEnvAdd => "GL_ARB_texture_env_add",
    ArbTextureEnvCombine => "GL_ARB_texture_env_combine",
    ArbTextureEnvDot3 => "GL_ARB_texture_env_dot3",
    ArbTextureMirroredRepeat => "GL_ARB_texture_mirrored_repeat",
    ArbVertexBlend => "GL_ARB_vertex_blend",
    ArbVertexProgram => "GL_ARB_vertex_program",

    ExtFogCoord => "GL_EXT_fog_coord",
    ExtFramebufferObject => "GL_EXT_framebuffer_object",
    ExtPalettedTexture => "GL_EXT_paletted_texture",
    ExtPointParameters => "GL_EXT_point_parameters",
    ExtSecondaryColor => "GL_EXT_secondary_color",
    ExtStencilTwoSide => "GL_EXT_stencil_two_side",
    ExtStencilWrap => "GL_EXT_stencil_wrap",
    ExtTextureCompressionS3tc => "GL_EXT_texture_compression_s3tc",
    ExtTextureEnvAdd => "GL_EXT_texture_env_add",
    ExtTextureEnvCombine => "GL_EXT_texture_env_combine",
    ExtTextureEnvDot3 => "GL_EXT_texture_env_dot3",
    ExtTextureFilterAnisotropic => "GL_EXT_texture_filter_anisotropic",
    ExtTextureLod => "GL_EXT_texture_lod",
    ExtTextureLodBias => "GL_EXT_texture_lod_bias",
    ExtVertexShader => "GL_EXT_vertex_shader",
    ExtVertexWeighting => "GL_EXT_vertex_weighting",

    NvFogDistance => "GL_NV_fog_distance",
    NvFragmentProgram => "GL_NV_fragment_program",
    NvRegisterCombiners => "GL_NV_register_combiners",
    NvRegisterCombiners2 => "GL_NV_register_combiners2",
    NvTexgenReflection => "GL_NV_texgen_reflection",
    NvTextureEnvCombine4 => "GL_NV_texture_env_combine4",
    NvTextureShader => "GL_NV_texture_shader",
    NvTextureShader2 => "GL_NV_texture_shader2",
    NvTextureShader3 => "GL_NV_texture_shader3",
    NvVertexProgram => "GL_NV_vertex_program",

    AtiTextureEnvCombine3 => "GL_ATI_texture_env_combine3",
    AtiTextureMirrorOnce => "GL_ATI_texture_mirror_once",
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension_name())
    }
}

/// Set of [`Feature`]s, one bit per variant.
///
/// Indexed by the `Feature` enum so the extension table, entry-point gates and serialization
/// share one list of names; `bitflags` would need a second, hand-kept constant per extension.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FeatureSet(u64);

impl FeatureSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    fn bit(feature: Feature) -> u64 {
        1 << feature as u8
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0 & Self::bit(feature) != 0
    }

    pub fn insert(&mut self, feature: Feature) {
        self.0 |= Self::bit(feature);
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL.iter().copied().filter(|f| self.contains(*f))
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut set = Self::empty();
        for feature in iter {
            set.insert(feature);
        }
        set
    }
}

impl fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for feature in self.iter() {
            seq.serialize_element(feature.extension_name())?;
        }
        seq.end()
    }
}

/// Shader model level exposed by one GL programmability extension, `0xMm` encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct ShaderVersion(u8);

impl ShaderVersion {
    pub const NOT_SUPPORTED: Self = Self(0);
    pub const V1_0: Self = Self(0x10);
    pub const V1_1: Self = Self(0x11);
    pub const V1_4: Self = Self(0x14);
    pub const V2_0: Self = Self(0x20);
    pub const V3_0: Self = Self(0x30);

    pub fn is_supported(self) -> bool {
        self != Self::NOT_SUPPORTED
    }

    pub fn major(self) -> u8 {
        self.0 >> 4
    }

    pub fn minor(self) -> u8 {
        self.0 & 0xf
    }
}

impl fmt::Display for ShaderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_supported() {
            write!(f, "{}.{}", self.major(), self.minor())
        } else {
            f.write_str("none")
        }
    }
}

/// Shader levels per programmability extension family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ShaderVersions {
    pub vs_arb: ShaderVersion,
    pub vs_nv: ShaderVersion,
    pub vs_ati: ShaderVersion,
    pub ps_arb: ShaderVersion,
    pub ps_nv: ShaderVersion,
}

impl ShaderVersions {
    pub fn best_vertex(&self) -> ShaderVersion {
        self.vs_arb.max(self.vs_nv).max(self.vs_ati)
    }

    pub fn best_pixel(&self) -> ShaderVersion {
        self.ps_arb.max(self.ps_nv)
    }
}

/// Numeric driver limits. Defaults are the minima every GL 1.1 implementation guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlLimits {
    pub max_textures: u32,
    pub max_samplers: u32,
    pub max_clip_planes: u32,
    pub max_lights: u32,
    pub max_texture_size: u32,
    pub max_point_size: f32,
    pub max_anisotropy: u32,
    pub max_blends: u32,
}

impl Default for GlLimits {
    fn default() -> Self {
        Self {
            max_textures: 1,
            max_samplers: 1,
            max_clip_planes: 6,
            max_lights: 8,
            max_texture_size: 64,
            max_point_size: 1.0,
            max_anisotropy: 1,
            max_blends: 1,
        }
    }
}

bitflags! {
    /// Reasons a scan produced a usable but non-authoritative record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
    pub struct Degradation: u8 {
        /// Scanned without a display connection; windowing queries were skipped.
        const NO_DISPLAY = 1 << 0;
        /// The driver returned no extension string.
        const NO_EXTENSIONS = 1 << 1;
    }
}

/// Everything learned about the GL driver in one scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GlInfo {
    /// Set once a scan ran against a current context. Never cleared except by invalidation.
    pub valid: bool,
    pub degraded: Degradation,

    pub vendor: GlVendor,
    pub card: GlCard,
    pub driver_version: DriverVersion,
    /// Windowing-extension version, zero when scanned without a display.
    pub window_system_version: DriverVersion,

    pub vendor_string: String,
    pub renderer_string: String,
    pub version_string: String,

    pub features: FeatureSet,
    /// Recognized windowing-system extensions.
    pub window_system_extensions: Vec<&'static str>,
    pub shaders: ShaderVersions,
    pub limits: GlLimits,
}

impl GlInfo {
    pub fn supports(&self, feature: Feature) -> bool {
        self.features.contains(feature)
    }

    /// Whether the scan had full access to the windowing system and driver strings.
    pub fn is_authoritative(&self) -> bool {
        self.valid && self.degraded.is_empty()
    }
}
