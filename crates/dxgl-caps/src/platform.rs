//! Seams to the windowing system, the GL driver and the OS display enumeration.
//!
//! The capability layer never talks to a driver directly. Hosts provide a [`GlPlatform`] (context
//! management plus string/limit queries against the current context) and a
//! [`DisplayModeSource`] (primary display mode enumeration).
//!
//! Implementations must be tolerant: every query returns `Option`/`bool` and a missing answer is
//! treated as "unknown", never as a reason to panic.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Opaque windowing-system display connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayHandle(pub u64);

/// Native drawable a context can be bound against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Drawable(pub u64);

/// Visual / pixel-format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualId(pub u64);

/// Native rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeContext(pub u64);

/// OS monitor handle for the primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorHandle(pub u64);

/// Resolved, non-null extension entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcAddress(NonZeroUsize);

impl ProcAddress {
    pub fn new(addr: usize) -> Option<Self> {
        NonZeroUsize::new(addr).map(Self)
    }

    pub fn addr(self) -> usize {
        self.0.get()
    }
}

/// Implementation strings readable from a current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlString {
    Vendor,
    Renderer,
    Version,
    Extensions,
}

impl GlString {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Vendor => 0x1F00,
            Self::Renderer => 0x1F01,
            Self::Version => 0x1F02,
            Self::Extensions => 0x1F03,
        }
    }
}

/// Scalar/range state queried from a current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GlParam {
    MaxClipPlanes,
    MaxLights,
    MaxTextureSize,
    /// Two floats: smallest and largest supported point size.
    PointSizeRange,
    MaxTextureUnitsArb,
    MaxTextureImageUnitsArb,
    MaxVertexUnitsArb,
    MaxTextureMaxAnisotropyExt,
}

impl GlParam {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::MaxClipPlanes => 0x0D32,
            Self::MaxLights => 0x0D31,
            Self::MaxTextureSize => 0x0D33,
            Self::PointSizeRange => 0x0B12,
            Self::MaxTextureUnitsArb => 0x84E2,
            Self::MaxTextureImageUnitsArb => 0x8872,
            Self::MaxVertexUnitsArb => 0x86A4,
            Self::MaxTextureMaxAnisotropyExt => 0x84FF,
        }
    }
}

/// Attributes of one framebuffer configuration offered by the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FbConfig {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    pub depth: u8,
    pub stencil: u8,
    pub samples: u8,
}

/// A display mode as reported by the OS, before format classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDisplayMode {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    /// `None` when the OS does not report a frequency for this mode.
    #[serde(default)]
    pub refresh_rate: Option<u32>,
}

/// Windowing-system + GL driver access.
///
/// Context-management calls (`open_display` .. `destroy_context`) are only made by the context
/// bootstrapper. String and limit queries are only made while a context is current.
pub trait GlPlatform {
    /// The context current on the calling thread, if any.
    fn current_context(&mut self) -> Option<NativeContext>;

    fn open_display(&mut self) -> Option<DisplayHandle>;

    /// Closes a connection returned by [`GlPlatform::open_display`].
    fn close_display(&mut self, display: DisplayHandle);

    /// A pre-existing desktop-level drawable, when the windowing glue publishes one.
    fn desktop_drawable(&mut self, display: DisplayHandle) -> Option<Drawable>;

    /// The default screen's root drawable.
    fn default_drawable(&mut self, display: DisplayHandle) -> Drawable;

    fn choose_visual(&mut self, display: DisplayHandle, drawable: Drawable) -> Option<VisualId>;

    fn create_context(&mut self, display: DisplayHandle, visual: VisualId) -> Option<NativeContext>;

    fn make_current(
        &mut self,
        display: DisplayHandle,
        drawable: Drawable,
        context: NativeContext,
    ) -> bool;

    /// Unbind whatever context is current on `display`.
    fn release_current(&mut self, display: DisplayHandle);

    fn destroy_context(&mut self, display: DisplayHandle, context: NativeContext);

    /// Windowing-extension version as `(major, minor)`.
    fn query_version(&mut self, display: DisplayHandle) -> Option<(u32, u32)>;

    /// Windowing-system client vendor string.
    fn client_vendor(&mut self, display: DisplayHandle) -> Option<String>;

    /// Space-separated windowing-system extension list.
    fn window_system_extensions(&mut self, display: DisplayHandle) -> Option<String>;

    fn fb_configs(&mut self, display: DisplayHandle) -> Vec<FbConfig>;

    fn get_string(&mut self, name: GlString) -> Option<String>;

    fn get_integer(&mut self, param: GlParam) -> Option<i32>;

    fn get_float2(&mut self, param: GlParam) -> Option<[f32; 2]>;

    fn get_proc_address(&mut self, name: &str) -> Option<ProcAddress>;
}

/// OS display-mode enumeration for the primary display.
pub trait DisplayModeSource {
    /// Mode `index` of the ordered mode list; `None` past the end.
    fn mode(&mut self, index: u32) -> Option<RawDisplayMode>;

    /// The active mode.
    fn current_mode(&mut self) -> Option<RawDisplayMode>;

    /// Color depth of the active mode.
    fn desktop_bits_per_pixel(&mut self) -> Option<u32> {
        self.current_mode().map(|mode| mode.bits_per_pixel)
    }

    fn primary_monitor(&mut self) -> MonitorHandle;
}

/// A platform with no display and no GL: every capability query falls back to defaults.
#[derive(Debug, Default)]
pub struct NullPlatform;

impl GlPlatform for NullPlatform {
    fn current_context(&mut self) -> Option<NativeContext> {
        None
    }

    fn open_display(&mut self) -> Option<DisplayHandle> {
        None
    }

    fn close_display(&mut self, _display: DisplayHandle) {}

    fn desktop_drawable(&mut self, _display: DisplayHandle) -> Option<Drawable> {
        None
    }

    fn default_drawable(&mut self, _display: DisplayHandle) -> Drawable {
        Drawable(0)
    }

    fn choose_visual(&mut self, _display: DisplayHandle, _drawable: Drawable) -> Option<VisualId> {
        None
    }

    fn create_context(&mut self, _display: DisplayHandle, _visual: VisualId) -> Option<NativeContext> {
        None
    }

    fn make_current(
        &mut self,
        _display: DisplayHandle,
        _drawable: Drawable,
        _context: NativeContext,
    ) -> bool {
        false
    }

    fn release_current(&mut self, _display: DisplayHandle) {}

    fn destroy_context(&mut self, _display: DisplayHandle, _context: NativeContext) {}

    fn query_version(&mut self, _display: DisplayHandle) -> Option<(u32, u32)> {
        None
    }

    fn client_vendor(&mut self, _display: DisplayHandle) -> Option<String> {
        None
    }

    fn window_system_extensions(&mut self, _display: DisplayHandle) -> Option<String> {
        None
    }

    fn fb_configs(&mut self, _display: DisplayHandle) -> Vec<FbConfig> {
        Vec::new()
    }

    fn get_string(&mut self, _name: GlString) -> Option<String> {
        None
    }

    fn get_integer(&mut self, _param: GlParam) -> Option<i32> {
        None
    }

    fn get_float2(&mut self, _param: GlParam) -> Option<[f32; 2]> {
        None
    }

    fn get_proc_address(&mut self, _name: &str) -> Option<ProcAddress> {
        None
    }
}

/// A display source that knows no modes.
#[derive(Debug, Default)]
pub struct NullDisplayModes;

impl DisplayModeSource for NullDisplayModes {
    fn mode(&mut self, _index: u32) -> Option<RawDisplayMode> {
        None
    }

    fn current_mode(&mut self) -> Option<RawDisplayMode> {
        None
    }

    fn primary_monitor(&mut self) -> MonitorHandle {
        MonitorHandle(0)
    }
}
