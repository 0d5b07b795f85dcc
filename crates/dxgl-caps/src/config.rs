//! Behavior knobs, normally read from the environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::format::FormatPolicy;

pub const FORMAT_POLICY_ENV: &str = "DXGL_FORMAT_POLICY";
pub const VERTEX_SHADER_MODE_ENV: &str = "DXGL_VERTEX_SHADER_MODE";
pub const PIXEL_SHADER_MODE_ENV: &str = "DXGL_PIXEL_SHADER_MODE";
/// Truthy value forces both shader modes to [`ShaderMode::Disabled`].
pub const DISABLE_SHADERS_ENV: &str = "DXGL_DISABLE_SHADERS";

/// How shaders of one stage are executed, which decides whether a version is advertised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShaderMode {
    /// Translated to a GL program; the driver's shader level is advertised.
    Hardware,
    /// Emulated on the CPU; no version is advertised.
    Emulated,
    Disabled,
}

impl ShaderMode {
    pub fn advertises_version(self) -> bool {
        self == Self::Hardware
    }
}

impl fmt::Display for ShaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hardware => "hardware",
            Self::Emulated => "emulated",
            Self::Disabled => "disabled",
        })
    }
}

impl FromStr for ShaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hardware" | "hw" => Ok(Self::Hardware),
            "emulated" | "emulation" | "sw" => Ok(Self::Emulated),
            "disabled" | "none" | "off" => Ok(Self::Disabled),
            other => Err(format!("unknown shader mode {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsConfig {
    pub format_policy: FormatPolicy,
    pub vertex_shader_mode: ShaderMode,
    pub pixel_shader_mode: ShaderMode,
}

impl Default for CapsConfig {
    fn default() -> Self {
        Self {
            format_policy: FormatPolicy::Permissive,
            vertex_shader_mode: ShaderMode::Hardware,
            pixel_shader_mode: ShaderMode::Hardware,
        }
    }
}

impl CapsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from a variable lookup. Unparsable values are logged and ignored.
    pub fn from_lookup(mut lookup: impl FnMut(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(policy) = parse_var(&mut lookup, FORMAT_POLICY_ENV) {
            config.format_policy = policy;
        }
        if let Some(mode) = parse_var(&mut lookup, VERTEX_SHADER_MODE_ENV) {
            config.vertex_shader_mode = mode;
        }
        if let Some(mode) = parse_var(&mut lookup, PIXEL_SHADER_MODE_ENV) {
            config.pixel_shader_mode = mode;
        }
        if lookup(DISABLE_SHADERS_ENV).is_some_and(|v| truthy(&v)) {
            config.vertex_shader_mode = ShaderMode::Disabled;
            config.pixel_shader_mode = ShaderMode::Disabled;
        }
        config
    }
}

fn parse_var<T>(lookup: &mut impl FnMut(&str) -> Option<String>, name: &str) -> Option<T>
where
    T: FromStr<Err = String>,
{
    let raw = lookup(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(var = name, %err, "ignoring invalid value");
            None
        }
    }
}

fn truthy(raw: &str) -> bool {
    let v = raw.trim();
    v == "1"
        || v.eq_ignore_ascii_case("true")
        || v.eq_ignore_ascii_case("yes")
        || v.eq_ignore_ascii_case("on")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> CapsConfig {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        CapsConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(config(&[]), CapsConfig::default());
        assert_eq!(CapsConfig::default().format_policy, FormatPolicy::Permissive);
    }

    #[test]
    fn reads_each_variable() {
        let cfg = config(&[
            (FORMAT_POLICY_ENV, "strict"),
            (VERTEX_SHADER_MODE_ENV, "emulated"),
            (PIXEL_SHADER_MODE_ENV, "off"),
        ]);
        assert_eq!(cfg.format_policy, FormatPolicy::Strict);
        assert_eq!(cfg.vertex_shader_mode, ShaderMode::Emulated);
        assert_eq!(cfg.pixel_shader_mode, ShaderMode::Disabled);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let cfg = config(&[(VERTEX_SHADER_MODE_ENV, "turbo")]);
        assert_eq!(cfg.vertex_shader_mode, ShaderMode::Hardware);
    }

    #[test]
    fn disable_shaders_overrides_modes() {
        let cfg = config(&[(VERTEX_SHADER_MODE_ENV, "hardware"), (DISABLE_SHADERS_ENV, "Yes")]);
        assert_eq!(cfg.vertex_shader_mode, ShaderMode::Disabled);
        assert_eq!(cfg.pixel_shader_mode, ShaderMode::Disabled);

        let cfg = config(&[(DISABLE_SHADERS_ENV, "0")]);
        assert_eq!(cfg.vertex_shader_mode, ShaderMode::Hardware);
    }
}
