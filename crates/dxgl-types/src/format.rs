use std::fmt;

use serde::{Deserialize, Serialize};

const fn fourcc(tag: &[u8; 4]) -> u32 {
    (tag[0] as u32) | ((tag[1] as u32) << 8) | ((tag[2] as u32) << 16) | ((tag[3] as u32) << 24)
}

/// Logical surface formats (`D3DFORMAT`).
///
/// Discriminants are the raw SDK values so callers holding a raw `u32` can round-trip through
/// [`D3DFormat::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum D3DFormat {
    Unknown = 0,

    R8G8B8 = 20,
    A8R8G8B8 = 21,
    X8R8G8B8 = 22,
    R5G6B5 = 23,
    X1R5G5B5 = 24,
    A1R5G5B5 = 25,
    A4R4G4B4 = 26,
    R3G3B2 = 27,
    A8 = 28,
    A8R3G3B2 = 29,
    X4R4G4B4 = 30,
    A2B10G10R10 = 31,
    G16R16 = 34,

    A8P8 = 40,
    P8 = 41,

    L8 = 50,
    A8L8 = 51,
    A4L4 = 52,

    V8U8 = 60,
    L6V5U5 = 61,
    X8L8V8U8 = 62,
    Q8W8V8U8 = 63,
    V16U16 = 64,
    W11V11U10 = 65,
    A2W10V10U10 = 67,

    Uyvy = fourcc(b"UYVY"),
    Yuy2 = fourcc(b"YUY2"),
    Dxt1 = fourcc(b"DXT1"),
    Dxt2 = fourcc(b"DXT2"),
    Dxt3 = fourcc(b"DXT3"),
    Dxt4 = fourcc(b"DXT4"),
    Dxt5 = fourcc(b"DXT5"),

    D16Lockable = 70,
    D32 = 71,
    D15S1 = 73,
    D24S8 = 75,
    D24X8 = 77,
    D24X4S4 = 79,
    D16 = 80,

    VertexData = 100,
    Index16 = 101,
    Index32 = 102,
}

/// Per-channel color bit sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelSizes {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// Depth and stencil bit sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepthStencilSizes {
    pub depth: u8,
    pub stencil: u8,
}

impl D3DFormat {
    const ALL: [D3DFormat; 43] = [
        Self::Unknown,
        Self::R8G8B8,
        Self::A8R8G8B8,
        Self::X8R8G8B8,
        Self::R5G6B5,
        Self::X1R5G5B5,
        Self::A1R5G5B5,
        Self::A4R4G4B4,
        Self::R3G3B2,
        Self::A8,
        Self::A8R3G3B2,
        Self::X4R4G4B4,
        Self::A2B10G10R10,
        Self::G16R16,
        Self::A8P8,
        Self::P8,
        Self::L8,
        Self::A8L8,
        Self::A4L4,
        Self::V8U8,
        Self::L6V5U5,
        Self::X8L8V8U8,
        Self::Q8W8V8U8,
        Self::V16U16,
        Self::W11V11U10,
        Self::A2W10V10U10,
        Self::Uyvy,
        Self::Yuy2,
        Self::Dxt1,
        Self::Dxt2,
        Self::Dxt3,
        Self::Dxt4,
        Self::Dxt5,
        Self::D16Lockable,
        Self::D32,
        Self::D15S1,
        Self::D24S8,
        Self::D24X8,
        Self::D24X4S4,
        Self::D16,
        Self::VertexData,
        Self::Index16,
        Self::Index32,
    ];

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| *f as u32 == raw)
    }

    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Color channel sizes for render-target capable formats.
    ///
    /// Returns `None` for formats that have no meaningful RGBA layout (paletted, luminance,
    /// bump-map, YUV, compressed, depth and buffer formats).
    pub fn channel_sizes(self) -> Option<ChannelSizes> {
        let (red, green, blue, alpha) = match self {
            Self::R8G8B8 | Self::X8R8G8B8 => (8, 8, 8, 0),
            Self::A8R8G8B8 => (8, 8, 8, 8),
            Self::R5G6B5 => (5, 6, 5, 0),
            Self::X1R5G5B5 => (5, 5, 5, 0),
            Self::A1R5G5B5 => (5, 5, 5, 1),
            Self::A4R4G4B4 => (4, 4, 4, 4),
            Self::X4R4G4B4 => (4, 4, 4, 0),
            Self::R3G3B2 => (3, 3, 2, 0),
            Self::A8R3G3B2 => (3, 3, 2, 8),
            Self::A2B10G10R10 => (10, 10, 10, 2),
            _ => return None,
        };
        Some(ChannelSizes {
            red,
            green,
            blue,
            alpha,
        })
    }

    /// Depth/stencil sizes for depth-buffer formats, `None` otherwise.
    pub fn depth_stencil_sizes(self) -> Option<DepthStencilSizes> {
        let (depth, stencil) = match self {
            Self::D16 | Self::D16Lockable => (16, 0),
            Self::D32 => (32, 0),
            Self::D15S1 => (15, 1),
            Self::D24S8 => (24, 8),
            Self::D24X8 => (24, 0),
            Self::D24X4S4 => (24, 4),
            _ => return None,
        };
        Some(DepthStencilSizes { depth, stencil })
    }

    pub fn is_depth_stencil(self) -> bool {
        self.depth_stencil_sizes().is_some()
    }

    pub fn is_block_compressed(self) -> bool {
        matches!(
            self,
            Self::Dxt1 | Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5
        )
    }

    /// Storage size of one pixel in bits, `0` for block-compressed and unknown formats.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::A8R8G8B8
            | Self::X8R8G8B8
            | Self::A2B10G10R10
            | Self::G16R16
            | Self::X8L8V8U8
            | Self::Q8W8V8U8
            | Self::V16U16
            | Self::W11V11U10
            | Self::A2W10V10U10
            | Self::D32
            | Self::D24S8
            | Self::D24X8
            | Self::D24X4S4
            | Self::Index32 => 32,
            Self::R8G8B8 => 24,
            Self::R5G6B5
            | Self::X1R5G5B5
            | Self::A1R5G5B5
            | Self::A4R4G4B4
            | Self::A8R3G3B2
            | Self::X4R4G4B4
            | Self::A8P8
            | Self::A8L8
            | Self::V8U8
            | Self::L6V5U5
            | Self::Uyvy
            | Self::Yuy2
            | Self::D16Lockable
            | Self::D15S1
            | Self::D16
            | Self::Index16 => 16,
            Self::R3G3B2 | Self::A8 | Self::P8 | Self::L8 | Self::A4L4 => 8,
            _ => 0,
        }
    }
}

impl fmt::Display for D3DFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fourcc_formats_use_sdk_codes() {
        assert_eq!(D3DFormat::Dxt1.raw(), 0x3154_5844);
        assert_eq!(D3DFormat::Yuy2.raw(), 0x3259_5559);
    }

    #[test]
    fn from_raw_round_trips_known_codes() {
        assert_eq!(D3DFormat::from_raw(22), Some(D3DFormat::X8R8G8B8));
        assert_eq!(D3DFormat::from_raw(75), Some(D3DFormat::D24S8));
        assert_eq!(D3DFormat::from_raw(0x3554_5844), Some(D3DFormat::Dxt5));
        assert_eq!(D3DFormat::from_raw(9999), None);
    }

    #[test]
    fn channel_layouts() {
        assert_eq!(
            D3DFormat::R5G6B5.channel_sizes(),
            Some(ChannelSizes {
                red: 5,
                green: 6,
                blue: 5,
                alpha: 0,
            })
        );
        assert!(D3DFormat::P8.channel_sizes().is_none());
        assert!(D3DFormat::D24S8.channel_sizes().is_none());

        let d24s8 = D3DFormat::D24S8.depth_stencil_sizes().unwrap();
        assert_eq!((d24s8.depth, d24s8.stencil), (24, 8));
        assert!(!D3DFormat::X8R8G8B8.is_depth_stencil());
    }
}
