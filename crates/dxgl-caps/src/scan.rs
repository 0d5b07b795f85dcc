//! One-shot population of a [`GlInfo`] from the current GL context.

use tracing::{debug, trace, warn};

use crate::classify::{classify_card, classify_vendor};
use crate::extensions::{apply_gl_extensions, apply_window_system_extensions};
use crate::gl_info::{Degradation, GlInfo};
use crate::platform::{DisplayHandle, GlParam, GlPlatform, GlString};
use crate::version::{parse_driver_version, DriverVersion};
use dxgl_types::MAX_USER_CLIP_PLANES;

/// Populates `info` from the context current on `platform`.
///
/// A record that is already valid is returned untouched without talking to the driver. Without
/// a `display` the windowing-system queries are skipped and the record is marked degraded.
///
/// Returns whether the resulting record is authoritative.
pub fn scan(platform: &mut dyn GlPlatform, display: Option<DisplayHandle>, info: &mut GlInfo) -> bool {
    if info.valid {
        trace!("GL capabilities already scanned");
        return info.is_authoritative();
    }
    *info = GlInfo::default();

    let mut client_vendor = None;
    match display {
        Some(display) => {
            if let Some((major, minor)) = platform.query_version(display) {
                info.window_system_version = DriverVersion::new(major, minor);
            }
            client_vendor = platform.client_vendor(display);
        }
        None => {
            warn!("scanning GL capabilities without a display connection");
            info.degraded |= Degradation::NO_DISPLAY;
        }
    }

    let gl_vendor = platform.get_string(GlString::Vendor);
    info.vendor_string = client_vendor.or(gl_vendor).unwrap_or_default();
    info.renderer_string = platform.get_string(GlString::Renderer).unwrap_or_default();
    info.version_string = platform.get_string(GlString::Version).unwrap_or_default();

    info.vendor = classify_vendor(&info.vendor_string, &info.renderer_string);
    info.driver_version = parse_driver_version(info.vendor, &info.version_string);
    info.card = classify_card(info.vendor, &info.renderer_string);

    query_core_limits(platform, info);

    match platform.get_string(GlString::Extensions) {
        Some(extensions) => apply_gl_extensions(platform, &extensions, info),
        None => {
            warn!("driver returned no extension string");
            info.degraded |= Degradation::NO_EXTENSIONS;
        }
    }

    if let Some(display) = display {
        if let Some(extensions) = platform.window_system_extensions(display) {
            apply_window_system_extensions(&extensions, info);
        }
    }

    info.valid = true;
    debug!(
        vendor = ?info.vendor,
        card = ?info.card,
        driver_version = format_args!("{}.{}", info.driver_version.major, info.driver_version.minor),
        features = info.features.len(),
        max_textures = info.limits.max_textures,
        vertex_shader = %info.shaders.best_vertex(),
        pixel_shader = %info.shaders.best_pixel(),
        degraded = ?info.degraded,
        "scanned GL capabilities"
    );
    info.is_authoritative()
}

fn query_core_limits(platform: &mut dyn GlPlatform, info: &mut GlInfo) {
    let mut positive = |param| {
        platform
            .get_integer(param)
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
    };
    let limits = &mut info.limits;
    if let Some(planes) = positive(GlParam::MaxClipPlanes) {
        limits.max_clip_planes = planes.min(MAX_USER_CLIP_PLANES);
    }
    if let Some(lights) = positive(GlParam::MaxLights) {
        limits.max_lights = lights;
    }
    if let Some(size) = positive(GlParam::MaxTextureSize) {
        limits.max_texture_size = size;
    }
    if let Some([_, max]) = platform.get_float2(GlParam::PointSizeRange) {
        if max.is_finite() && max > 0.0 {
            limits.max_point_size = max;
        }
    }
}
