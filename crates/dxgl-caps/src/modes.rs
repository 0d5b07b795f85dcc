//! Display mode classification.
//!
//! The current mode and enumerated modes are classified by two different rules: a 24-bit
//! desktop reports as `A8R8G8B8`, while an enumerated 24-bit mode reports as `R8G8B8`.

use dxgl_types::{D3DFormat, DisplayMode, ADAPTER_DEFAULT_REFRESH};

use crate::platform::RawDisplayMode;

/// Format of the active desktop mode.
pub fn current_mode_format(bits_per_pixel: u32) -> D3DFormat {
    match bits_per_pixel {
        8 => D3DFormat::R3G3B2,
        16 => D3DFormat::R5G6B5,
        24 | 32 => D3DFormat::A8R8G8B8,
        _ => D3DFormat::Unknown,
    }
}

/// Format of an enumerated mode whose depth was already clamped to the desktop's.
pub fn enumerated_mode_format(bits_per_pixel: u32) -> D3DFormat {
    match bits_per_pixel {
        8 => D3DFormat::R3G3B2,
        16 => D3DFormat::R5G6B5,
        24 => D3DFormat::R8G8B8,
        32 => D3DFormat::A8R8G8B8,
        _ => D3DFormat::Unknown,
    }
}

/// Whether an enumerated mode of `mode_format` passes a caller's format filter.
///
/// [`D3DFormat::Unknown`] passes everything; otherwise the pixel sizes must agree.
pub fn format_filter_accepts(filter: D3DFormat, mode_format: D3DFormat) -> bool {
    filter == D3DFormat::Unknown || filter.bits_per_pixel() == mode_format.bits_per_pixel()
}

pub(crate) fn current_display_mode(raw: RawDisplayMode) -> DisplayMode {
    DisplayMode {
        width: raw.width,
        height: raw.height,
        refresh_rate: raw.refresh_rate.unwrap_or(ADAPTER_DEFAULT_REFRESH),
        format: current_mode_format(raw.bits_per_pixel),
    }
}

/// Classifies an enumerated mode, clamping its depth to `desktop_bpp` when known.
pub(crate) fn enumerated_display_mode(raw: RawDisplayMode, desktop_bpp: Option<u32>) -> DisplayMode {
    let bpp = desktop_bpp.map_or(raw.bits_per_pixel, |d| raw.bits_per_pixel.min(d));
    DisplayMode {
        width: raw.width,
        height: raw.height,
        refresh_rate: raw.refresh_rate.unwrap_or(ADAPTER_DEFAULT_REFRESH),
        format: enumerated_mode_format(bpp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(bpp: u32, refresh: Option<u32>) -> RawDisplayMode {
        RawDisplayMode {
            width: 1024,
            height: 768,
            bits_per_pixel: bpp,
            refresh_rate: refresh,
        }
    }

    #[test]
    fn current_and_enumerated_disagree_on_24_bit() {
        assert_eq!(current_mode_format(24), D3DFormat::A8R8G8B8);
        assert_eq!(enumerated_mode_format(24), D3DFormat::R8G8B8);
        assert_eq!(current_mode_format(32), D3DFormat::A8R8G8B8);
        assert_eq!(current_mode_format(15), D3DFormat::Unknown);
        assert_eq!(enumerated_mode_format(4), D3DFormat::Unknown);
    }

    #[test]
    fn enumerated_depth_is_clamped_to_desktop() {
        let mode = enumerated_display_mode(raw(32, Some(75)), Some(16));
        assert_eq!(mode.format, D3DFormat::R5G6B5);
        assert_eq!(mode.refresh_rate, 75);

        let mode = enumerated_display_mode(raw(16, None), Some(32));
        assert_eq!(mode.format, D3DFormat::R5G6B5);
        assert_eq!(mode.refresh_rate, ADAPTER_DEFAULT_REFRESH);
    }

    #[test]
    fn filter_compares_pixel_size() {
        assert!(format_filter_accepts(D3DFormat::Unknown, D3DFormat::R3G3B2));
        assert!(format_filter_accepts(D3DFormat::X8R8G8B8, D3DFormat::A8R8G8B8));
        assert!(format_filter_accepts(D3DFormat::X1R5G5B5, D3DFormat::R5G6B5));
        assert!(!format_filter_accepts(D3DFormat::R5G6B5, D3DFormat::A8R8G8B8));
    }
}
