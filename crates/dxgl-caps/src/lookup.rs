//! D3D sampler state -> GL enum translation tables.
//!
//! Built once from a valid [`GlInfo`]; entries whose preferred GL mode needs an absent
//! extension hold the nearest core fallback instead.

use dxgl_types::{MipFilter, TextureAddress, TextureFilter};
use serde::Serialize;

use crate::gl_info::{Feature, GlInfo};

/// GL texture wrap modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GlWrap {
    Repeat,
    ClampToEdge,
    ClampToBorder,
    MirroredRepeat,
    MirrorClampToEdgeAti,
}

impl GlWrap {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Repeat => 0x2901,
            Self::ClampToEdge => 0x812F,
            Self::ClampToBorder => 0x812D,
            Self::MirroredRepeat => 0x8370,
            Self::MirrorClampToEdgeAti => 0x8743,
        }
    }
}

/// GL texture filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GlFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl GlFilter {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Nearest => 0x2600,
            Self::Linear => 0x2601,
            Self::NearestMipmapNearest => 0x2700,
            Self::LinearMipmapNearest => 0x2701,
            Self::NearestMipmapLinear => 0x2702,
            Self::LinearMipmapLinear => 0x2703,
        }
    }
}

const ADDRESS_MODES: usize = TextureAddress::ALL.len();
const FILTERS: usize = TextureFilter::ALL.len();
const MIP_FILTERS: usize = MipFilter::ALL.len();

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupTables {
    wrap: [GlWrap; ADDRESS_MODES],
    mag: [GlFilter; FILTERS],
    min_mip: [[GlFilter; MIP_FILTERS]; FILTERS],
}

impl LookupTables {
    pub fn build(info: &GlInfo) -> Self {
        let has = |feature| info.supports(feature);
        let aniso = has(Feature::ExtTextureFilterAnisotropic);

        let wrap = TextureAddress::ALL.map(|mode| match mode {
            TextureAddress::Wrap => GlWrap::Repeat,
            TextureAddress::Clamp => GlWrap::ClampToEdge,
            TextureAddress::Border if has(Feature::ArbTextureBorderClamp) => GlWrap::ClampToBorder,
            TextureAddress::Mirror if has(Feature::ArbTextureMirroredRepeat) => {
                GlWrap::MirroredRepeat
            }
            TextureAddress::MirrorOnce if has(Feature::AtiTextureMirrorOnce) => {
                GlWrap::MirrorClampToEdgeAti
            }
            TextureAddress::Border | TextureAddress::Mirror | TextureAddress::MirrorOnce => {
                GlWrap::Repeat
            }
        });

        let mag = TextureFilter::ALL.map(|filter| match filter {
            TextureFilter::None | TextureFilter::Point => GlFilter::Nearest,
            TextureFilter::Linear => GlFilter::Linear,
            TextureFilter::Anisotropic if aniso => GlFilter::Linear,
            TextureFilter::Anisotropic => GlFilter::Nearest,
        });

        let min_mip = TextureFilter::ALL.map(|min| {
            MipFilter::ALL.map(|mip| match (min, mip) {
                (TextureFilter::None, _) => GlFilter::Linear,
                (TextureFilter::Point, MipFilter::None) => GlFilter::Nearest,
                (TextureFilter::Point, MipFilter::Point) => GlFilter::NearestMipmapNearest,
                (TextureFilter::Point, MipFilter::Linear) => GlFilter::NearestMipmapLinear,
                (TextureFilter::Linear, MipFilter::None) => GlFilter::Linear,
                (TextureFilter::Linear, MipFilter::Point) => GlFilter::LinearMipmapNearest,
                (TextureFilter::Linear, MipFilter::Linear) => GlFilter::LinearMipmapLinear,
                (TextureFilter::Anisotropic, _) if aniso => GlFilter::LinearMipmapLinear,
                (TextureFilter::Anisotropic, _) => GlFilter::Linear,
            })
        });

        Self { wrap, mag, min_mip }
    }

    pub fn wrap(&self, mode: TextureAddress) -> GlWrap {
        self.wrap[mode.index()]
    }

    pub fn mag_filter(&self, filter: TextureFilter) -> GlFilter {
        self.mag[filter.index()]
    }

    pub fn min_mip_filter(&self, min: TextureFilter, mip: MipFilter) -> GlFilter {
        self.min_mip[min.index()][mip.index()]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn info_with(features: &[Feature]) -> GlInfo {
        GlInfo {
            valid: true,
            features: features.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn core_only_falls_back_to_repeat_and_plain_filters() {
        let tables = LookupTables::build(&info_with(&[]));
        assert_eq!(tables.wrap(TextureAddress::Wrap), GlWrap::Repeat);
        assert_eq!(tables.wrap(TextureAddress::Clamp), GlWrap::ClampToEdge);
        assert_eq!(tables.wrap(TextureAddress::Border), GlWrap::Repeat);
        assert_eq!(tables.wrap(TextureAddress::Mirror), GlWrap::Repeat);
        assert_eq!(tables.wrap(TextureAddress::MirrorOnce), GlWrap::Repeat);
        assert_eq!(tables.mag_filter(TextureFilter::Anisotropic), GlFilter::Nearest);
        assert_eq!(
            tables.min_mip_filter(TextureFilter::Anisotropic, MipFilter::Linear),
            GlFilter::Linear
        );
    }

    #[test]
    fn extensions_upgrade_entries() {
        let tables = LookupTables::build(&info_with(&[
            Feature::ArbTextureBorderClamp,
            Feature::ArbTextureMirroredRepeat,
            Feature::AtiTextureMirrorOnce,
            Feature::ExtTextureFilterAnisotropic,
        ]));
        assert_eq!(tables.wrap(TextureAddress::Border), GlWrap::ClampToBorder);
        assert_eq!(tables.wrap(TextureAddress::Mirror), GlWrap::MirroredRepeat);
        assert_eq!(
            tables.wrap(TextureAddress::MirrorOnce),
            GlWrap::MirrorClampToEdgeAti
        );
        assert_eq!(tables.mag_filter(TextureFilter::Anisotropic), GlFilter::Linear);
        for mip in MipFilter::ALL {
            assert_eq!(
                tables.min_mip_filter(TextureFilter::Anisotropic, mip),
                GlFilter::LinearMipmapLinear
            );
        }
    }

    #[test]
    fn min_mip_grid() {
        let tables = LookupTables::build(&info_with(&[]));
        let row = |min| MipFilter::ALL.map(|mip| tables.min_mip_filter(min, mip));
        assert_eq!(row(TextureFilter::None), [GlFilter::Linear; 3]);
        assert_eq!(
            row(TextureFilter::Point),
            [
                GlFilter::Nearest,
                GlFilter::NearestMipmapNearest,
                GlFilter::NearestMipmapLinear
            ]
        );
        assert_eq!(
            row(TextureFilter::Linear),
            [
                GlFilter::Linear,
                GlFilter::LinearMipmapNearest,
                GlFilter::LinearMipmapLinear
            ]
        );
    }

    #[test]
    fn gl_enums_match_headers() {
        assert_eq!(GlWrap::Repeat.gl_enum(), 0x2901);
        assert_eq!(GlWrap::MirrorClampToEdgeAti.gl_enum(), 0x8743);
        assert_eq!(GlFilter::LinearMipmapLinear.gl_enum(), 0x2703);
    }
}
