//! Extension-string tokens and what each recognized token contributes to a [`GlInfo`].

use tracing::{debug, trace};

use crate::gl_info::{Feature, GlInfo, ShaderVersion};
use crate::platform::{GlParam, GlPlatform};

/// Hard cap on texture units exposed to D3D, regardless of what the driver reports.
pub const MAX_TEXTURE_UNITS: u32 = 8;

/// Hard cap on fragment samplers.
pub const MAX_SAMPLERS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    Exact,
    /// Token starts with the name; used for families with numbered revisions.
    Prefix,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    None,
    ArbFragmentProgram,
    ArbMultitexture,
    ArbVertexBlend,
    ArbVertexProgram,
    ExtAnisotropy,
    ExtVertexShader,
    NvFragmentProgram,
    NvVertexProgram,
}

struct Entry {
    feature: Feature,
    matching: Match,
    implies: &'static [Feature],
    action: Action,
}

const fn exact(feature: Feature) -> Entry {
    Entry {
        feature,
        matching: Match::Exact,
        implies: &[],
        action: Action::None,
    }
}

const fn with_action(feature: Feature, matching: Match, action: Action) -> Entry {
    Entry {
        feature,
        matching,
        implies: &[],
        action,
    }
}

const GL_EXTENSIONS: &[Entry] = &[
    with_action(Feature::ArbFragmentProgram, Match::Exact, Action::ArbFragmentProgram),
    exact(Feature::ArbMultisample),
    with_action(Feature::ArbMultitexture, Match::Exact, Action::ArbMultitexture),
    exact(Feature::ArbOcclusionQuery),
    exact(Feature::ArbPointParameters),
    exact(Feature::ArbPointSprite),
    exact(Feature::ArbTextureBorderClamp),
    exact(Feature::ArbTextureCompression),
    Entry {
        feature: Feature::ArbTextureCubeMap,
        matching: Match::Exact,
        implies: &[Feature::NvTexgenReflection],
        action: Action::None,
    },
    exact(Feature::ArbTextureEnvAdd),
    exact(Feature::ArbTextureEnvCombine),
    exact(Feature::ArbTextureEnvDot3),
    exact(Feature::ArbTextureMirroredRepeat),
    with_action(Feature::ArbVertexBlend, Match::Exact, Action::ArbVertexBlend),
    with_action(Feature::ArbVertexProgram, Match::Prefix, Action::ArbVertexProgram),
    exact(Feature::ExtFogCoord),
    exact(Feature::ExtFramebufferObject),
    exact(Feature::ExtPalettedTexture),
    exact(Feature::ExtPointParameters),
    exact(Feature::ExtSecondaryColor),
    exact(Feature::ExtStencilTwoSide),
    exact(Feature::ExtStencilWrap),
    exact(Feature::ExtTextureCompressionS3tc),
    exact(Feature::ExtTextureEnvAdd),
    exact(Feature::ExtTextureEnvCombine),
    exact(Feature::ExtTextureEnvDot3),
    with_action(Feature::ExtTextureFilterAnisotropic, Match::Exact, Action::ExtAnisotropy),
    exact(Feature::ExtTextureLod),
    exact(Feature::ExtTextureLodBias),
    with_action(Feature::ExtVertexShader, Match::Exact, Action::ExtVertexShader),
    exact(Feature::ExtVertexWeighting),
    with_action(Feature::NvFogDistance, Match::Prefix, Action::None),
    with_action(Feature::NvFragmentProgram, Match::Prefix, Action::NvFragmentProgram),
    exact(Feature::NvRegisterCombiners),
    exact(Feature::NvRegisterCombiners2),
    exact(Feature::NvTexgenReflection),
    exact(Feature::NvTextureEnvCombine4),
    exact(Feature::NvTextureShader),
    exact(Feature::NvTextureShader2),
    exact(Feature::NvTextureShader3),
    with_action(Feature::NvVertexProgram, Match::Prefix, Action::NvVertexProgram),
    exact(Feature::AtiTextureEnvCombine3),
    exact(Feature::AtiTextureMirrorOnce),
];

/// Windowing-system extensions worth reporting. None of them gate a capability yet.
const WINDOW_SYSTEM_EXTENSIONS: &[&str] = &[
    "GLX_ARB_get_proc_address",
    "GLX_ARB_multisample",
    "GLX_EXT_visual_info",
    "GLX_EXT_visual_rating",
    "GLX_SGI_swap_control",
    "GLX_SGIX_fbconfig",
    "GLX_SGIX_pbuffer",
];

impl Entry {
    fn matches(&self, token: &str) -> bool {
        let name = self.feature.extension_name();
        match self.matching {
            Match::Exact => token == name,
            Match::Prefix => token.starts_with(name),
        }
    }
}

/// A recognized GL extension: its name, its own feature and any features it also grants.
pub fn recognized_extensions() -> impl Iterator<Item = (&'static str, Feature, &'static [Feature])> {
    GL_EXTENSIONS
        .iter()
        .map(|e| (e.feature.extension_name(), e.feature, e.implies))
}

/// Space-separated tokens, tolerating runs of whitespace.
pub(crate) fn tokens(list: &str) -> impl Iterator<Item = &str> {
    list.split_ascii_whitespace()
}

/// Applies every recognized token of `extensions` to `info`, querying dependent limits.
pub(crate) fn apply_gl_extensions(
    platform: &mut dyn GlPlatform,
    extensions: &str,
    info: &mut GlInfo,
) {
    for token in tokens(extensions) {
        let Some(entry) = GL_EXTENSIONS.iter().find(|e| e.matches(token)) else {
            trace!(token, "ignoring unrecognized GL extension");
            continue;
        };
        debug!(token, feature = %entry.feature, "GL extension supported");
        info.features.insert(entry.feature);
        for implied in entry.implies {
            info.features.insert(*implied);
        }
        apply_action(platform, entry.action, token, info);
    }
}

fn apply_action(platform: &mut dyn GlPlatform, action: Action, token: &str, info: &mut GlInfo) {
    let shaders = &mut info.shaders;
    let limits = &mut info.limits;
    match action {
        Action::None => {}
        Action::ArbFragmentProgram => {
            shaders.ps_arb = ShaderVersion::V1_4;
            if let Some(units) = query_positive(platform, GlParam::MaxTextureImageUnitsArb) {
                limits.max_samplers = units.min(MAX_SAMPLERS);
                debug!(max_samplers = limits.max_samplers, "fragment program samplers");
            }
        }
        Action::ArbMultitexture => {
            if let Some(units) = query_positive(platform, GlParam::MaxTextureUnitsArb) {
                limits.max_textures = units.min(MAX_TEXTURE_UNITS);
                debug!(max_textures = limits.max_textures, "texture units");
            }
        }
        Action::ArbVertexBlend => {
            if let Some(units) = query_positive(platform, GlParam::MaxVertexUnitsArb) {
                limits.max_blends = units;
                debug!(max_blends = units, "vertex blend units");
            }
        }
        Action::ArbVertexProgram => shaders.vs_arb = ShaderVersion::V1_1,
        Action::ExtAnisotropy => {
            if let Some(max) = query_positive(platform, GlParam::MaxTextureMaxAnisotropyExt) {
                limits.max_anisotropy = max;
                debug!(max_anisotropy = max, "anisotropic filtering");
            }
        }
        Action::ExtVertexShader => shaders.vs_ati = ShaderVersion::V1_1,
        Action::NvFragmentProgram => shaders.ps_nv = shaders.ps_nv.max(ShaderVersion::V1_1),
        Action::NvVertexProgram => {
            let revision = &token[Feature::NvVertexProgram.extension_name().len()..];
            let version = if revision.starts_with('3') {
                ShaderVersion::V3_0
            } else if revision.starts_with('2') {
                ShaderVersion::V2_0
            } else if revision.starts_with("1_1") {
                ShaderVersion::V1_1
            } else {
                ShaderVersion::V1_0
            };
            shaders.vs_nv = shaders.vs_nv.max(version);
        }
    }
}

fn query_positive(platform: &mut dyn GlPlatform, param: GlParam) -> Option<u32> {
    platform
        .get_integer(param)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v > 0)
}

/// Records recognized windowing-system extensions.
pub(crate) fn apply_window_system_extensions(extensions: &str, info: &mut GlInfo) {
    for token in tokens(extensions) {
        if let Some(name) = WINDOW_SYSTEM_EXTENSIONS.iter().find(|n| **n == token) {
            debug!(token, "windowing extension supported");
            info.window_system_extensions.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NullPlatform;

    fn scan(extensions: &str) -> GlInfo {
        let mut info = GlInfo::default();
        apply_gl_extensions(&mut NullPlatform, extensions, &mut info);
        info
    }

    #[test]
    fn every_feature_has_a_table_entry() {
        for feature in Feature::ALL {
            assert!(
                GL_EXTENSIONS.iter().any(|e| e.feature == *feature),
                "{feature} has no entry"
            );
        }
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        let info = scan("GL_SGIS_generate_mipmap  GL_ARB_texture_cube_map_extra GL_foo");
        assert!(info.features.is_empty());
    }

    #[test]
    fn cube_map_implies_texgen_reflection() {
        let info = scan("GL_ARB_texture_cube_map");
        assert!(info.supports(Feature::ArbTextureCubeMap));
        assert!(info.supports(Feature::NvTexgenReflection));
        assert_eq!(info.features.len(), 2);
    }

    #[test]
    fn nv_vertex_program_revisions_never_downgrade() {
        let info = scan("GL_NV_vertex_program2 GL_NV_vertex_program GL_NV_vertex_program1_1");
        assert_eq!(info.shaders.vs_nv, ShaderVersion::V2_0);
        assert!(info.supports(Feature::NvVertexProgram));

        let info = scan("GL_NV_vertex_program GL_NV_vertex_program1_1");
        assert_eq!(info.shaders.vs_nv, ShaderVersion::V1_1);

        let info = scan("GL_NV_vertex_program");
        assert_eq!(info.shaders.vs_nv, ShaderVersion::V1_0);
    }

    #[test]
    fn nv_vertex_program_revision_uses_leading_digit() {
        let info = scan("GL_NV_vertex_program3");
        assert_eq!(info.shaders.vs_nv, ShaderVersion::V3_0);

        let info = scan("GL_NV_vertex_program2_option");
        assert_eq!(info.shaders.vs_nv, ShaderVersion::V2_0);

        let info = scan("GL_NV_vertex_program1_1 GL_NV_vertex_program3 GL_NV_vertex_program2");
        assert_eq!(info.shaders.vs_nv, ShaderVersion::V3_0);
    }

    #[test]
    fn shader_extensions_set_versions() {
        let info = scan("GL_ARB_vertex_program GL_ARB_fragment_program GL_EXT_vertex_shader GL_NV_fragment_program");
        assert_eq!(info.shaders.vs_arb, ShaderVersion::V1_1);
        assert_eq!(info.shaders.vs_ati, ShaderVersion::V1_1);
        assert_eq!(info.shaders.ps_arb, ShaderVersion::V1_4);
        assert_eq!(info.shaders.ps_nv, ShaderVersion::V1_1);
    }

    #[test]
    fn limit_queries_keep_defaults_when_driver_is_silent() {
        let info = scan("GL_ARB_multitexture GL_ARB_fragment_program GL_EXT_texture_filter_anisotropic");
        assert_eq!(info.limits.max_textures, 1);
        assert_eq!(info.limits.max_samplers, 1);
        assert_eq!(info.limits.max_anisotropy, 1);
    }

    #[test]
    fn window_system_tokens_are_recorded_without_features() {
        let mut info = GlInfo::default();
        apply_window_system_extensions("GLX_ARB_multisample GLX_MESA_unknown GLX_SGIX_fbconfig", &mut info);
        assert_eq!(
            info.window_system_extensions,
            vec!["GLX_ARB_multisample", "GLX_SGIX_fbconfig"]
        );
        assert!(info.features.is_empty());
    }
}
