//! Shader version tokens as reported in device caps.

pub const VS_VERSION_NONE: u32 = 0;
pub const PS_VERSION_NONE: u32 = 0;

/// `D3DVS_VERSION(major, minor)`.
pub const fn vs_version(major: u8, minor: u8) -> u32 {
    0xFFFE_0000 | ((major as u32) << 8) | minor as u32
}

/// `D3DPS_VERSION(major, minor)`.
pub const fn ps_version(major: u8, minor: u8) -> u32 {
    0xFFFF_0000 | ((major as u32) << 8) | minor as u32
}
