//! Replaying a recorded driver: a [`DriverProfile`] describes what a machine's windowing system
//! and GL driver answer, and [`ScriptedPlatform`] / [`ScriptedDisplayModes`] serve those answers
//! through the platform traits.
//!
//! Profiles are plain serde data so they can be captured once on real hardware and replayed in
//! tests or through the `dxgl-caps-probe` tool.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::platform::{
    DisplayHandle, DisplayModeSource, Drawable, FbConfig, GlParam, GlPlatform, GlString,
    MonitorHandle, NativeContext, ProcAddress, RawDisplayMode, VisualId,
};

pub const DISPLAY: DisplayHandle = DisplayHandle(1);
pub const DEFAULT_DRAWABLE: Drawable = Drawable(0x100);
pub const DESKTOP_DRAWABLE: Drawable = Drawable(0x200);
pub const FOREIGN_CONTEXT: NativeContext = NativeContext(0xf00);
const VISUAL: VisualId = VisualId(0x21);
const PROC_BASE: usize = 0x7f00_0000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverProfile {
    pub display_available: bool,
    pub desktop_drawable: bool,
    pub visual_available: bool,
    pub context_creation: bool,
    pub make_current: bool,
    /// Another context is already current when capability queries start.
    pub context_already_current: bool,

    pub window_system_version: Option<(u32, u32)>,
    pub client_vendor: Option<String>,
    pub window_system_extensions: Option<String>,

    pub vendor: Option<String>,
    pub renderer: Option<String>,
    pub version: Option<String>,
    pub extensions: Option<String>,
    pub integers: BTreeMap<GlParam, i32>,
    pub point_size_range: Option<[f32; 2]>,
    /// Entry points the driver fails to export even though the extension is advertised.
    pub missing_procs: Vec<String>,

    pub fb_configs: Vec<FbConfig>,

    pub modes: Vec<RawDisplayMode>,
    pub current_mode: Option<RawDisplayMode>,
    pub monitor: u64,
}

impl Default for DriverProfile {
    fn default() -> Self {
        Self {
            display_available: true,
            desktop_drawable: true,
            visual_available: true,
            context_creation: true,
            make_current: true,
            context_already_current: false,
            window_system_version: None,
            client_vendor: None,
            window_system_extensions: None,
            vendor: None,
            renderer: None,
            version: None,
            extensions: None,
            integers: BTreeMap::new(),
            point_size_range: None,
            missing_procs: Vec::new(),
            fb_configs: Vec::new(),
            modes: Vec::new(),
            current_mode: None,
            monitor: 1,
        }
    }
}

impl DriverProfile {
    /// A machine with no windowing system at all.
    pub fn headless() -> Self {
        Self {
            display_available: false,
            ..Self::default()
        }
    }

    pub fn with_integer(mut self, param: GlParam, value: i32) -> Self {
        self.integers.insert(param, value);
        self
    }

    pub fn into_platforms(self) -> (ScriptedPlatform, ScriptedDisplayModes) {
        let displays = ScriptedDisplayModes {
            modes: self.modes.clone(),
            current: self.current_mode,
            monitor: MonitorHandle(self.monitor),
        };
        (ScriptedPlatform::new(self), displays)
    }
}

/// Call counts, shared with the platform so they stay observable after it is boxed away.
#[derive(Debug, Default)]
pub struct QueryCounters {
    displays_opened: AtomicU32,
    displays_closed: AtomicU32,
    contexts_created: AtomicU32,
    contexts_destroyed: AtomicU32,
    driver_queries: AtomicU32,
    config_queries: AtomicU32,
    proc_lookups: AtomicU32,
}

impl QueryCounters {
    fn bump(counter: &AtomicU32) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn displays_opened(&self) -> u32 {
        self.displays_opened.load(Ordering::Relaxed)
    }

    pub fn displays_closed(&self) -> u32 {
        self.displays_closed.load(Ordering::Relaxed)
    }

    pub fn contexts_created(&self) -> u32 {
        self.contexts_created.load(Ordering::Relaxed)
    }

    pub fn contexts_destroyed(&self) -> u32 {
        self.contexts_destroyed.load(Ordering::Relaxed)
    }

    /// String, integer and float queries against the current context.
    pub fn driver_queries(&self) -> u32 {
        self.driver_queries.load(Ordering::Relaxed)
    }

    pub fn config_queries(&self) -> u32 {
        self.config_queries.load(Ordering::Relaxed)
    }

    pub fn proc_lookups(&self) -> u32 {
        self.proc_lookups.load(Ordering::Relaxed)
    }
}

/// [`GlPlatform`] answering from a [`DriverProfile`].
///
/// Driver queries return `None` unless a context is current, like a real driver would.
#[derive(Debug)]
pub struct ScriptedPlatform {
    profile: DriverProfile,
    current: Option<NativeContext>,
    bound_drawable: Option<Drawable>,
    next_context: u64,
    counters: Arc<QueryCounters>,
}

impl ScriptedPlatform {
    pub fn new(profile: DriverProfile) -> Self {
        let current = profile.context_already_current.then_some(FOREIGN_CONTEXT);
        Self {
            profile,
            current,
            bound_drawable: None,
            next_context: 1,
            counters: Arc::default(),
        }
    }

    pub fn counters(&self) -> Arc<QueryCounters> {
        Arc::clone(&self.counters)
    }

    /// Drawable the last successful `make_current` bound, cleared on release.
    pub fn bound_drawable(&self) -> Option<Drawable> {
        self.bound_drawable
    }

    fn driver_query<T>(&self, answer: impl FnOnce(&DriverProfile) -> Option<T>) -> Option<T> {
        QueryCounters::bump(&self.counters.driver_queries);
        self.current?;
        answer(&self.profile)
    }
}

impl GlPlatform for ScriptedPlatform {
    fn current_context(&mut self) -> Option<NativeContext> {
        self.current
    }

    fn open_display(&mut self) -> Option<DisplayHandle> {
        if !self.profile.display_available {
            return None;
        }
        QueryCounters::bump(&self.counters.displays_opened);
        Some(DISPLAY)
    }

    fn close_display(&mut self, _display: DisplayHandle) {
        QueryCounters::bump(&self.counters.displays_closed);
    }

    fn desktop_drawable(&mut self, _display: DisplayHandle) -> Option<Drawable> {
        self.profile.desktop_drawable.then_some(DESKTOP_DRAWABLE)
    }

    fn default_drawable(&mut self, _display: DisplayHandle) -> Drawable {
        DEFAULT_DRAWABLE
    }

    fn choose_visual(&mut self, _display: DisplayHandle, _drawable: Drawable) -> Option<VisualId> {
        self.profile.visual_available.then_some(VISUAL)
    }

    fn create_context(&mut self, _display: DisplayHandle, _visual: VisualId) -> Option<NativeContext> {
        if !self.profile.context_creation {
            return None;
        }
        QueryCounters::bump(&self.counters.contexts_created);
        let context = NativeContext(self.next_context);
        self.next_context += 1;
        Some(context)
    }

    fn make_current(
        &mut self,
        _display: DisplayHandle,
        drawable: Drawable,
        context: NativeContext,
    ) -> bool {
        if !self.profile.make_current {
            return false;
        }
        self.current = Some(context);
        self.bound_drawable = Some(drawable);
        true
    }

    fn release_current(&mut self, _display: DisplayHandle) {
        self.current = None;
        self.bound_drawable = None;
    }

    fn destroy_context(&mut self, _display: DisplayHandle, _context: NativeContext) {
        QueryCounters::bump(&self.counters.contexts_destroyed);
    }

    fn query_version(&mut self, _display: DisplayHandle) -> Option<(u32, u32)> {
        self.profile.window_system_version
    }

    fn client_vendor(&mut self, _display: DisplayHandle) -> Option<String> {
        self.profile.client_vendor.clone()
    }

    fn window_system_extensions(&mut self, _display: DisplayHandle) -> Option<String> {
        self.profile.window_system_extensions.clone()
    }

    fn fb_configs(&mut self, _display: DisplayHandle) -> Vec<FbConfig> {
        QueryCounters::bump(&self.counters.config_queries);
        self.profile.fb_configs.clone()
    }

    fn get_string(&mut self, name: GlString) -> Option<String> {
        self.driver_query(|p| match name {
            GlString::Vendor => p.vendor.clone(),
            GlString::Renderer => p.renderer.clone(),
            GlString::Version => p.version.clone(),
            GlString::Extensions => p.extensions.clone(),
        })
    }

    fn get_integer(&mut self, param: GlParam) -> Option<i32> {
        self.driver_query(|p| p.integers.get(&param).copied())
    }

    fn get_float2(&mut self, param: GlParam) -> Option<[f32; 2]> {
        self.driver_query(|p| match param {
            GlParam::PointSizeRange => p.point_size_range,
            _ => None,
        })
    }

    fn get_proc_address(&mut self, name: &str) -> Option<ProcAddress> {
        QueryCounters::bump(&self.counters.proc_lookups);
        self.current?;
        if self.profile.missing_procs.iter().any(|m| m == name) {
            return None;
        }
        ProcAddress::new(PROC_BASE + name.len())
    }
}

/// [`DisplayModeSource`] answering from a [`DriverProfile`].
#[derive(Debug, Clone)]
pub struct ScriptedDisplayModes {
    modes: Vec<RawDisplayMode>,
    current: Option<RawDisplayMode>,
    monitor: MonitorHandle,
}

impl DisplayModeSource for ScriptedDisplayModes {
    fn mode(&mut self, index: u32) -> Option<RawDisplayMode> {
        self.modes.get(index as usize).copied()
    }

    fn current_mode(&mut self) -> Option<RawDisplayMode> {
        self.current
    }

    fn primary_monitor(&mut self) -> MonitorHandle {
        self.monitor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_deserializes_with_defaults() {
        let profile: DriverProfile = serde_json::from_str(
            r#"{
                "vendor": "NVIDIA Corporation",
                "integers": { "MaxTextureUnitsArb": 4 },
                "fb_configs": [{ "red": 8, "green": 8, "blue": 8, "depth": 24 }]
            }"#,
        )
        .unwrap();
        assert!(profile.display_available);
        assert_eq!(profile.vendor.as_deref(), Some("NVIDIA Corporation"));
        assert_eq!(profile.integers.get(&GlParam::MaxTextureUnitsArb), Some(&4));
        assert_eq!(profile.fb_configs[0].stencil, 0);
    }

    #[test]
    fn driver_queries_need_a_current_context() {
        let mut platform = ScriptedPlatform::new(DriverProfile {
            vendor: Some("Mesa".into()),
            ..DriverProfile::default()
        });
        assert_eq!(platform.get_string(GlString::Vendor), None);

        let context = platform.create_context(DISPLAY, VISUAL).unwrap();
        assert!(platform.make_current(DISPLAY, DEFAULT_DRAWABLE, context));
        assert_eq!(platform.get_string(GlString::Vendor).as_deref(), Some("Mesa"));
        assert_eq!(platform.counters().driver_queries(), 2);
    }

    #[test]
    fn missing_procs_do_not_resolve() {
        let mut platform = ScriptedPlatform::new(DriverProfile {
            context_already_current: true,
            missing_procs: vec!["glActiveTextureARB".into()],
            ..DriverProfile::default()
        });
        assert_eq!(platform.get_proc_address("glActiveTextureARB"), None);
        assert!(platform.get_proc_address("glClientActiveTextureARB").is_some());
    }
}
