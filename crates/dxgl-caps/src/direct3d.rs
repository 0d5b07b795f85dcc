//! The `IDirect3D8` capability surface.
//!
//! [`Direct3D`] owns the process-wide capability state: the temporary-context cache, the scanned
//! [`GlInfo`], the resolved entry points and the sampler lookup tables. All of it is built lazily
//! on first use, under one lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use dxgl_types::{
    AdapterIdentifier, D3DFormat, D3dError, D3dResult, DevType, DeviceCaps, DisplayMode,
    MultiSampleType, ResourceType, Usage, ENUM_NO_WHQL_LEVEL,
};
use tracing::{debug, trace, warn};

use crate::config::CapsConfig;
use crate::context::{ContextCache, ContextGuard};
use crate::device_caps::device_caps;
use crate::format::FormatPolicy;
use crate::gl_info::{Feature, GlCard, GlInfo, GlVendor};
use crate::lookup::LookupTables;
use crate::modes::{current_display_mode, enumerated_display_mode, format_filter_accepts};
use crate::platform::{DisplayModeSource, FbConfig, GlPlatform, MonitorHandle, ProcAddress};
use crate::procs::{GlProc, ProcRegistry};
use crate::profile::DriverProfile;
use crate::scan::scan;

/// Only the primary display adapter is modeled.
pub const ADAPTER_COUNT: u32 = 1;

pub const DRIVER_NAME: &str = "Display";
pub const DRIVER_DESCRIPTION: &str = "Direct3D HAL";
/// High dword of the reported driver version.
pub const DRIVER_PRODUCT_VERSION: u32 = 0xa;

/// Identity reported when the driver could not be scanned.
pub const FALLBACK_VENDOR: GlVendor = GlVendor::Nvidia;
pub const FALLBACK_CARD: GlCard = GlCard::NvidiaGeForce4Ti4600;

/// Upper bound on OS mode indices walked during enumeration.
const MAX_MODES: u32 = 4096;

struct State {
    platform: Box<dyn GlPlatform + Send>,
    displays: Box<dyn DisplayModeSource + Send>,
    contexts: ContextCache,
    gl_info: GlInfo,
    procs: ProcRegistry,
    tables: Option<LookupTables>,
}

pub struct Direct3D {
    config: CapsConfig,
    state: Mutex<State>,
}

impl Direct3D {
    pub fn new(
        platform: impl GlPlatform + Send + 'static,
        displays: impl DisplayModeSource + Send + 'static,
        config: CapsConfig,
    ) -> Self {
        Self {
            config,
            state: Mutex::new(State {
                platform: Box::new(platform),
                displays: Box::new(displays),
                contexts: ContextCache::new(),
                gl_info: GlInfo::default(),
                procs: ProcRegistry::default(),
                tables: None,
            }),
        }
    }

    /// A façade replaying `profile`.
    pub fn from_profile(profile: DriverProfile, config: CapsConfig) -> Self {
        let (platform, displays) = profile.into_platforms();
        Self::new(platform, displays, config)
    }

    pub fn config(&self) -> &CapsConfig {
        &self.config
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_adapter(adapter: u32) -> D3dResult<()> {
        if adapter >= ADAPTER_COUNT {
            debug!(adapter, "adapter out of range");
            return Err(D3dError::InvalidCall);
        }
        Ok(())
    }

    pub fn adapter_count(&self) -> u32 {
        ADAPTER_COUNT
    }

    pub fn adapter_monitor(&self, adapter: u32) -> D3dResult<MonitorHandle> {
        Self::check_adapter(adapter)?;
        Ok(self.state().displays.primary_monitor())
    }

    pub fn adapter_mode_count(&self, adapter: u32, format: D3DFormat) -> D3dResult<u32> {
        Self::check_adapter(adapter)?;
        let count = self.state().enumerated_modes(format).len();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    pub fn enum_adapter_modes(
        &self,
        adapter: u32,
        format: D3DFormat,
        index: u32,
    ) -> D3dResult<DisplayMode> {
        Self::check_adapter(adapter)?;
        let modes = self.state().enumerated_modes(format);
        modes.get(index as usize).copied().ok_or_else(|| {
            debug!(index, available = modes.len(), "display mode index out of range");
            D3dError::InvalidCall
        })
    }

    pub fn adapter_display_mode(&self, adapter: u32) -> D3dResult<DisplayMode> {
        Self::check_adapter(adapter)?;
        let raw = self.state().displays.current_mode().ok_or_else(|| {
            warn!("OS reported no current display mode");
            D3dError::NotAvailable
        })?;
        Ok(current_display_mode(raw))
    }

    pub fn adapter_identifier(&self, adapter: u32, flags: u32) -> D3dResult<AdapterIdentifier> {
        Self::check_adapter(adapter)?;
        let mut state = self.state();
        let (vendor_id, device_id, driver_version) = if state.ensure_scanned() {
            let info = &state.gl_info;
            (info.vendor.pci_id(), info.card.pci_id(), info.driver_version.packed())
        } else {
            (FALLBACK_VENDOR.pci_id(), FALLBACK_CARD.pci_id(), 0)
        };
        Ok(AdapterIdentifier {
            driver: DRIVER_NAME.to_owned(),
            description: DRIVER_DESCRIPTION.to_owned(),
            driver_version: (u64::from(DRIVER_PRODUCT_VERSION) << 32) | u64::from(driver_version),
            vendor_id,
            device_id,
            subsys_id: 0,
            revision: 0,
            device_identifier: [0; 16],
            whql_level: if flags & ENUM_NO_WHQL_LEVEL != 0 { 0 } else { 1 },
        })
    }

    pub fn check_device_type(
        &self,
        adapter: u32,
        device_type: DevType,
        display_format: D3DFormat,
        back_buffer_format: D3DFormat,
        windowed: bool,
    ) -> D3dResult<()> {
        Self::check_adapter(adapter)?;
        let back_buffer_format = match back_buffer_format {
            D3DFormat::Unknown if windowed => display_format,
            format => format,
        };
        for format in [display_format, back_buffer_format] {
            if !FormatPolicy::is_render_target_format(format) {
                debug!(?device_type, %format, "not a displayable format");
                return Err(D3dError::NotAvailable);
            }
        }
        let policy = self.config.format_policy;
        self.state().probe_configs("device type", |config| {
            policy.color_matches(config, back_buffer_format)
        })
    }

    pub fn check_device_format(
        &self,
        adapter: u32,
        device_type: DevType,
        adapter_format: D3DFormat,
        usage: Usage,
        resource_type: ResourceType,
        check_format: D3DFormat,
    ) -> D3dResult<()> {
        Self::check_adapter(adapter)?;
        trace!(?device_type, %adapter_format, ?usage, ?resource_type, %check_format, "check device format");
        let mut state = self.state();

        if check_format.is_block_compressed() {
            if usage.intersects(Usage::RENDERTARGET | Usage::DEPTHSTENCIL) {
                debug!(%check_format, ?usage, "block-compressed formats are texture-only");
                return Err(D3dError::NotAvailable);
            }
            state.ensure_scanned();
            return if state.gl_info.supports(Feature::ExtTextureCompressionS3tc) {
                Ok(())
            } else {
                debug!(%check_format, "block compression unsupported");
                Err(D3dError::NotAvailable)
            };
        }

        let policy = self.config.format_policy;
        if usage.contains(Usage::DEPTHSTENCIL) {
            if !FormatPolicy::is_depth_stencil_format(check_format) {
                return Err(D3dError::NotAvailable);
            }
            return state.probe_configs("depth format", |config| {
                policy.depth_matches(config, check_format)
            });
        }

        if !FormatPolicy::is_render_target_format(check_format) {
            debug!(%check_format, "format outside the supported set");
            return Err(D3dError::NotAvailable);
        }
        state.probe_configs("color format", |config| {
            policy.color_matches(config, check_format)
        })
    }

    pub fn check_device_format_conversion(
        &self,
        adapter: u32,
        device_type: DevType,
        source_format: D3DFormat,
        target_format: D3DFormat,
    ) -> D3dResult<()> {
        Self::check_adapter(adapter)?;
        for format in [source_format, target_format] {
            if !FormatPolicy::is_render_target_format(format) {
                debug!(?device_type, %format, "conversion format outside the supported set");
                return Err(D3dError::NotAvailable);
            }
        }
        let policy = self.config.format_policy;
        self.state().probe_configs("format conversion", |config| {
            policy.color_matches(config, target_format)
        })
    }

    pub fn check_device_multi_sample_type(
        &self,
        adapter: u32,
        device_type: DevType,
        surface_format: D3DFormat,
        windowed: bool,
        multi_sample: MultiSampleType,
    ) -> D3dResult<()> {
        Self::check_adapter(adapter)?;
        if multi_sample.is_none() {
            return Ok(());
        }
        let mut state = self.state();
        if !state.ensure_scanned() {
            warn!(samples = multi_sample.samples(), "cannot verify multisampling, assuming compatible");
            return Ok(());
        }
        if !state.gl_info.supports(Feature::ArbMultisample) {
            debug!(?device_type, windowed, samples = multi_sample.samples(), "multisampling unsupported");
            return Err(D3dError::NotAvailable);
        }

        let policy = self.config.format_policy;
        let samples = multi_sample.samples();
        let format_ok: fn(FormatPolicy, &FbConfig, D3DFormat) -> bool =
            if surface_format.is_depth_stencil() {
                FormatPolicy::depth_matches
            } else {
                FormatPolicy::color_matches
            };
        state.probe_configs("multisample", |config| {
            u32::from(config.samples) >= samples && format_ok(policy, config, surface_format)
        })
    }

    pub fn check_depth_stencil_match(
        &self,
        adapter: u32,
        device_type: DevType,
        adapter_format: D3DFormat,
        render_target_format: D3DFormat,
        depth_stencil_format: D3DFormat,
    ) -> D3dResult<()> {
        Self::check_adapter(adapter)?;
        trace!(?device_type, %adapter_format, %render_target_format, %depth_stencil_format, "check depth stencil match");
        if !FormatPolicy::is_render_target_format(render_target_format)
            || !FormatPolicy::is_depth_stencil_format(depth_stencil_format)
        {
            return Err(D3dError::NotAvailable);
        }
        let policy = self.config.format_policy;
        self.state().probe_configs("depth stencil match", |config| {
            policy.color_matches(config, render_target_format)
                && policy.depth_matches(config, depth_stencil_format)
        })
    }

    pub fn device_caps(&self, adapter: u32, device_type: DevType) -> D3dResult<DeviceCaps> {
        Self::check_adapter(adapter)?;
        let mut state = self.state();
        state.ensure_scanned();
        Ok(device_caps(&state.gl_info, adapter, device_type, &self.config))
    }

    /// The scanned capability record, or the minimal defaults if no context could be made.
    pub fn gl_info(&self) -> GlInfo {
        let mut state = self.state();
        state.ensure_scanned();
        state.gl_info.clone()
    }

    /// Sampler translation tables; `None` until a scan has succeeded.
    pub fn lookup_tables(&self) -> Option<LookupTables> {
        let mut state = self.state();
        state.ensure_scanned();
        state.tables.clone()
    }

    pub fn proc_address(&self, proc: GlProc) -> Option<ProcAddress> {
        let mut state = self.state();
        state.ensure_scanned();
        state.procs.get(proc)
    }

    /// Forgets everything learned from the driver; the next query scans again.
    pub fn invalidate(&self) {
        let mut state = self.state();
        state.gl_info = GlInfo::default();
        state.procs.clear();
        state.tables = None;
        debug!("capability cache invalidated");
    }
}

impl State {
    /// Scans once per validity period. Returns whether a scanned record is available.
    fn ensure_scanned(&mut self) -> bool {
        if self.gl_info.valid {
            return true;
        }
        let Self {
            platform,
            contexts,
            gl_info,
            procs,
            tables,
            ..
        } = self;
        let mut guard = match ContextGuard::acquire(contexts, platform.as_mut()) {
            Ok(guard) => guard,
            Err(err) => {
                warn!(%err, "no GL context for capability scan, using defaults");
                return false;
            }
        };
        let display = guard.display();
        scan(guard.platform(), display, gl_info);
        *procs = ProcRegistry::resolve(guard.platform(), gl_info.features);
        *tables = Some(LookupTables::build(gl_info));
        true
    }

    /// Succeeds if any framebuffer config satisfies `accept`.
    ///
    /// Answers optimistically when the configs cannot be enumerated at all.
    fn probe_configs(
        &mut self,
        check: &'static str,
        accept: impl Fn(&FbConfig) -> bool,
    ) -> D3dResult<()> {
        let mut guard = match ContextGuard::acquire(&mut self.contexts, self.platform.as_mut()) {
            Ok(guard) => guard,
            Err(err) => {
                warn!(check, %err, "cannot verify against driver configs, assuming compatible");
                return Ok(());
            }
        };
        let Some(display) = guard.display() else {
            debug!(check, "no display connection, assuming compatible");
            return Ok(());
        };
        let configs = guard.platform().fb_configs(display);
        if configs.is_empty() {
            debug!(check, "no framebuffer configs enumerable, assuming compatible");
            return Ok(());
        }
        match configs.iter().position(accept) {
            Some(index) => {
                trace!(check, index, "framebuffer config matches");
                Ok(())
            }
            None => {
                warn!(check, configs = configs.len(), "no framebuffer config matches");
                Err(D3dError::NotAvailable)
            }
        }
    }

    /// OS modes after depth clamping, filtered by `filter`.
    fn enumerated_modes(&mut self, filter: D3DFormat) -> Vec<DisplayMode> {
        let desktop_bpp = self.displays.desktop_bits_per_pixel();
        (0..MAX_MODES)
            .map_while(|index| self.displays.mode(index))
            .map(|raw| enumerated_display_mode(raw, desktop_bpp))
            .filter(|mode| format_filter_accepts(filter, mode.format))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{NullDisplayModes, NullPlatform};

    fn null() -> Direct3D {
        Direct3D::new(NullPlatform, NullDisplayModes, CapsConfig::default())
    }

    #[test]
    fn fallback_identity_without_context() {
        let d3d = null();
        let id = d3d.adapter_identifier(0, 0).unwrap();
        assert_eq!(id.vendor_id, 0x10de);
        assert_eq!(id.device_id, 0x0250);
        assert_eq!(id.driver, "Display");
        assert_eq!(id.description, "Direct3D HAL");
        assert_eq!(id.driver_version_high(), 0xa);
        assert_eq!(id.whql_level, 1);
        assert_eq!(d3d.adapter_identifier(0, ENUM_NO_WHQL_LEVEL).unwrap().whql_level, 0);
    }

    #[test]
    fn checks_are_optimistic_without_context() {
        let d3d = null();
        assert_eq!(
            d3d.check_device_type(0, DevType::Hal, D3DFormat::X8R8G8B8, D3DFormat::Unknown, true),
            Ok(())
        );
        assert_eq!(
            d3d.check_depth_stencil_match(
                0,
                DevType::Hal,
                D3DFormat::X8R8G8B8,
                D3DFormat::X8R8G8B8,
                D3DFormat::D24S8
            ),
            Ok(())
        );
    }

    #[test]
    fn no_lookup_tables_without_a_scan() {
        let d3d = null();
        assert_eq!(d3d.lookup_tables(), None);
        assert!(!d3d.gl_info().valid);
        assert_eq!(d3d.proc_address(GlProc::ActiveTextureArb), None);
    }

    #[test]
    fn display_mode_needs_a_current_mode() {
        assert_eq!(null().adapter_display_mode(0), Err(D3dError::NotAvailable));
        assert_eq!(null().adapter_mode_count(0, D3DFormat::Unknown), Ok(0));
    }
}
