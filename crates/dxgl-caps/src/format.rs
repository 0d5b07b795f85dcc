//! Matching D3D surface formats against driver framebuffer configurations.

use std::fmt;
use std::str::FromStr;

use dxgl_types::D3DFormat;
use serde::{Deserialize, Serialize};

use crate::platform::FbConfig;

/// Color formats that may back a render target or back buffer.
pub const RENDER_TARGET_FORMATS: [D3DFormat; 8] = [
    D3DFormat::X8R8G8B8,
    D3DFormat::R8G8B8,
    D3DFormat::A8R8G8B8,
    D3DFormat::X1R5G5B5,
    D3DFormat::A1R5G5B5,
    D3DFormat::R5G6B5,
    D3DFormat::R3G3B2,
    D3DFormat::A4R4G4B4,
];

pub const DEPTH_STENCIL_FORMATS: [D3DFormat; 7] = [
    D3DFormat::D16,
    D3DFormat::D16Lockable,
    D3DFormat::D32,
    D3DFormat::D15S1,
    D3DFormat::D24S8,
    D3DFormat::D24X8,
    D3DFormat::D24X4S4,
];

/// How strictly a format must agree with a driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatPolicy {
    /// Any config accepts any allowlisted format; the driver converts on the fly.
    #[default]
    Permissive,
    /// Channel and depth/stencil sizes must match the config exactly.
    Strict,
}

impl FormatPolicy {
    pub fn is_render_target_format(format: D3DFormat) -> bool {
        RENDER_TARGET_FORMATS.contains(&format)
    }

    pub fn is_depth_stencil_format(format: D3DFormat) -> bool {
        DEPTH_STENCIL_FORMATS.contains(&format)
    }

    /// Whether `config` can back a color surface of `format`.
    pub fn color_matches(self, config: &FbConfig, format: D3DFormat) -> bool {
        if !Self::is_render_target_format(format) {
            return false;
        }
        match self {
            Self::Permissive => true,
            Self::Strict => {
                let Some(want) = format.channel_sizes() else {
                    return false;
                };
                config.red == want.red
                    && config.green == want.green
                    && config.blue == want.blue
                    && (want.alpha == 0 || config.alpha == want.alpha)
            }
        }
    }

    /// Whether `config` can back a depth/stencil surface of `format`.
    pub fn depth_matches(self, config: &FbConfig, format: D3DFormat) -> bool {
        if !Self::is_depth_stencil_format(format) {
            return false;
        }
        match self {
            Self::Permissive => true,
            Self::Strict => {
                let Some(want) = format.depth_stencil_sizes() else {
                    return false;
                };
                config.depth == want.depth && (want.stencil == 0 || config.stencil == want.stencil)
            }
        }
    }
}

impl fmt::Display for FormatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        })
    }
}

impl FromStr for FormatPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown format policy {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RGBA8_D24S8: FbConfig = FbConfig {
        red: 8,
        green: 8,
        blue: 8,
        alpha: 8,
        depth: 24,
        stencil: 8,
        samples: 0,
    };

    const RGB565_D16: FbConfig = FbConfig {
        red: 5,
        green: 6,
        blue: 5,
        alpha: 0,
        depth: 16,
        stencil: 0,
        samples: 0,
    };

    #[test]
    fn permissive_accepts_every_allowlisted_format() {
        let policy = FormatPolicy::Permissive;
        for format in RENDER_TARGET_FORMATS {
            assert!(policy.color_matches(&RGB565_D16, format), "{format}");
        }
        for format in DEPTH_STENCIL_FORMATS {
            assert!(policy.depth_matches(&RGB565_D16, format), "{format}");
        }
    }

    #[test]
    fn non_allowlisted_formats_never_match() {
        for policy in [FormatPolicy::Permissive, FormatPolicy::Strict] {
            assert!(!policy.color_matches(&RGBA8_D24S8, D3DFormat::P8));
            assert!(!policy.color_matches(&RGBA8_D24S8, D3DFormat::D24S8));
            assert!(!policy.depth_matches(&RGBA8_D24S8, D3DFormat::X8R8G8B8));
        }
    }

    #[test]
    fn strict_compares_sizes() {
        let policy = FormatPolicy::Strict;
        assert!(policy.color_matches(&RGBA8_D24S8, D3DFormat::A8R8G8B8));
        assert!(policy.color_matches(&RGBA8_D24S8, D3DFormat::X8R8G8B8));
        assert!(!policy.color_matches(&RGBA8_D24S8, D3DFormat::R5G6B5));
        assert!(policy.color_matches(&RGB565_D16, D3DFormat::R5G6B5));
        assert!(!policy.color_matches(&RGB565_D16, D3DFormat::A8R8G8B8));

        assert!(policy.depth_matches(&RGBA8_D24S8, D3DFormat::D24S8));
        assert!(policy.depth_matches(&RGBA8_D24S8, D3DFormat::D24X8));
        assert!(!policy.depth_matches(&RGBA8_D24S8, D3DFormat::D24X4S4));
        assert!(!policy.depth_matches(&RGBA8_D24S8, D3DFormat::D16));
        assert!(policy.depth_matches(&RGB565_D16, D3DFormat::D16Lockable));
    }

    #[test]
    fn parses_names() {
        assert_eq!("Strict".parse(), Ok(FormatPolicy::Strict));
        assert_eq!(" permissive ".parse(), Ok(FormatPolicy::Permissive));
        assert!("lenient".parse::<FormatPolicy>().is_err());
    }
}
