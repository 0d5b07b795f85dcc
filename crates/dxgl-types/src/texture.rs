use serde::{Deserialize, Serialize};

/// Texture addressing mode (`D3DTEXTUREADDRESS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum TextureAddress {
    Wrap = 1,
    Mirror = 2,
    Clamp = 3,
    Border = 4,
    MirrorOnce = 5,
}

impl TextureAddress {
    pub const ALL: [TextureAddress; 5] = [
        Self::Wrap,
        Self::Mirror,
        Self::Clamp,
        Self::Border,
        Self::MirrorOnce,
    ];

    /// Dense `0..5` index, used by lookup tables.
    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw.checked_sub(1)? as usize).copied()
    }
}

/// Minification/magnification filter (`D3DTEXTUREFILTERTYPE`, restricted to the kinds the
/// capability layer translates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum TextureFilter {
    None = 0,
    Point = 1,
    Linear = 2,
    Anisotropic = 3,
}

impl TextureFilter {
    pub const ALL: [TextureFilter; 4] = [Self::None, Self::Point, Self::Linear, Self::Anisotropic];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Mip filter. Anisotropy is not a meaningful mip filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum MipFilter {
    None = 0,
    Point = 1,
    Linear = 2,
}

impl MipFilter {
    pub const ALL: [MipFilter; 3] = [Self::None, Self::Point, Self::Linear];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_indices_are_dense() {
        for (i, mode) in TextureAddress::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
            assert_eq!(TextureAddress::from_raw(*mode as u32), Some(*mode));
        }
        assert_eq!(TextureAddress::from_raw(0), None);
        assert_eq!(TextureAddress::from_raw(6), None);
    }
}
