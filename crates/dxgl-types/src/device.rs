use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Requested logical device type (`D3DDEVTYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum DevType {
    /// Hardware-accelerated path.
    Hal = 1,
    /// Reference rasterizer.
    Ref = 2,
    /// Pluggable software rasterizer.
    Sw = 3,
}

impl DevType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Hal),
            2 => Some(Self::Ref),
            3 => Some(Self::Sw),
            _ => None,
        }
    }

    pub fn is_hardware(self) -> bool {
        self == Self::Hal
    }
}

/// Multisample count (`D3DMULTISAMPLE_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiSampleType(u32);

impl MultiSampleType {
    pub const NONE: Self = Self(0);
    pub const MAX_SAMPLES: u32 = 16;

    /// `None` for counts outside `0` and `2..=16`.
    pub fn new(samples: u32) -> Option<Self> {
        match samples {
            0 => Some(Self::NONE),
            2..=Self::MAX_SAMPLES => Some(Self(samples)),
            _ => None,
        }
    }

    pub fn samples(self) -> u32 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Resource kind a format check is performed for (`D3DRESOURCETYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ResourceType {
    Surface = 1,
    Volume = 2,
    Texture = 3,
    VolumeTexture = 4,
    CubeTexture = 5,
    VertexBuffer = 6,
    IndexBuffer = 7,
}

bitflags! {
    /// Resource usage flags (`D3DUSAGE_*`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Usage: u32 {
        const RENDERTARGET = 0x0000_0001;
        const DEPTHSTENCIL = 0x0000_0002;
        const WRITEONLY = 0x0000_0008;
        const SOFTWAREPROCESSING = 0x0000_0010;
        const DONOTCLIP = 0x0000_0020;
        const POINTS = 0x0000_0040;
        const RTPATCHES = 0x0000_0080;
        const NPATCHES = 0x0000_0100;
        const DYNAMIC = 0x0000_0200;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multisample_counts_are_validated() {
        assert_eq!(MultiSampleType::new(0), Some(MultiSampleType::NONE));
        assert_eq!(MultiSampleType::new(4).map(MultiSampleType::samples), Some(4));
        assert_eq!(MultiSampleType::new(1), None);
        assert_eq!(MultiSampleType::new(17), None);
    }

    #[test]
    fn dev_type_raw_values() {
        assert_eq!(DevType::from_raw(1), Some(DevType::Hal));
        assert_eq!(DevType::from_raw(2), Some(DevType::Ref));
        assert_eq!(DevType::from_raw(0), None);
        assert!(DevType::Hal.is_hardware());
        assert!(!DevType::Ref.is_hardware());
    }
}
