//! Temporary GL context used to answer capability queries before any device exists.

use thiserror::Error;
use tracing::{debug, warn};

use crate::platform::{DisplayHandle, Drawable, GlPlatform, NativeContext, VisualId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("no display connection available")]
    NoDisplay,
    #[error("no visual matches the drawable")]
    NoVisual,
    #[error("context creation failed")]
    CreateFailed,
    #[error("context could not be made current")]
    MakeCurrentFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FakeContext {
    display: DisplayHandle,
    drawable: Drawable,
    visual: VisualId,
    context: NativeContext,
}

/// What a successful [`ContextCache::acquire`] handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextLease {
    /// The cache's own context; counted, destroyed when the last lease is released.
    Owned { display: DisplayHandle },
    /// A context the caller already had current. Release leaves it alone and only closes the
    /// display connection opened for the lease.
    Reused { display: Option<DisplayHandle> },
}

impl ContextLease {
    pub fn display(&self) -> Option<DisplayHandle> {
        match *self {
            Self::Owned { display } => Some(display),
            Self::Reused { display } => display,
        }
    }
}

/// Reference-counted throwaway context.
#[derive(Debug, Default)]
pub struct ContextCache {
    fake: Option<FakeContext>,
    refs: u32,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding owned leases.
    pub fn refs(&self) -> u32 {
        self.refs
    }

    pub fn is_active(&self) -> bool {
        self.fake.is_some()
    }

    /// Makes a GL context current, creating one if nothing is current.
    pub fn acquire(&mut self, platform: &mut dyn GlPlatform) -> Result<ContextLease, ContextError> {
        if let Some(current) = platform.current_context() {
            if let Some(fake) = self.fake.filter(|f| f.context == current && self.refs > 0) {
                self.refs += 1;
                return Ok(ContextLease::Owned {
                    display: fake.display,
                });
            }
            debug!("reusing the context already current on this thread");
            return Ok(ContextLease::Reused {
                display: platform.open_display(),
            });
        }

        let fake = Self::create(platform)?;
        debug!(
            display = fake.display.0,
            drawable = fake.drawable.0,
            visual = fake.visual.0,
            "created temporary GL context"
        );
        self.fake = Some(fake);
        self.refs = 1;
        Ok(ContextLease::Owned {
            display: fake.display,
        })
    }

    fn create(platform: &mut dyn GlPlatform) -> Result<FakeContext, ContextError> {
        let display = platform.open_display().ok_or(ContextError::NoDisplay)?;
        Self::create_on(platform, display).inspect_err(|err| {
            debug!(%err, "temporary GL context bring-up failed, closing display");
            platform.close_display(display);
        })
    }

    fn create_on(
        platform: &mut dyn GlPlatform,
        display: DisplayHandle,
    ) -> Result<FakeContext, ContextError> {
        let drawable = match platform.desktop_drawable(display) {
            Some(drawable) => drawable,
            None => platform.default_drawable(display),
        };
        let visual = platform
            .choose_visual(display, drawable)
            .ok_or(ContextError::NoVisual)?;
        let context = platform
            .create_context(display, visual)
            .ok_or(ContextError::CreateFailed)?;
        if !platform.make_current(display, drawable, context) {
            platform.destroy_context(display, context);
            return Err(ContextError::MakeCurrentFailed);
        }
        Ok(FakeContext {
            display,
            drawable,
            visual,
            context,
        })
    }

    /// Returns a lease. The owned context and its display are torn down with the last one.
    pub fn release(&mut self, platform: &mut dyn GlPlatform, lease: ContextLease) {
        if let ContextLease::Reused { display } = lease {
            if let Some(display) = display {
                platform.close_display(display);
            }
            return;
        }
        if self.refs == 0 {
            warn!("context released more often than acquired");
            return;
        }
        self.refs -= 1;
        if self.refs > 0 {
            return;
        }
        if let Some(fake) = self.fake.take() {
            platform.release_current(fake.display);
            platform.destroy_context(fake.display, fake.context);
            platform.close_display(fake.display);
            debug!("destroyed temporary GL context");
        }
    }
}

/// Scoped context: current while the guard lives, released on drop.
pub struct ContextGuard<'a> {
    cache: &'a mut ContextCache,
    platform: &'a mut dyn GlPlatform,
    lease: ContextLease,
}

impl<'a> ContextGuard<'a> {
    pub fn acquire(
        cache: &'a mut ContextCache,
        platform: &'a mut dyn GlPlatform,
    ) -> Result<Self, ContextError> {
        let lease = cache.acquire(platform)?;
        Ok(Self {
            cache,
            platform,
            lease,
        })
    }

    pub fn display(&self) -> Option<DisplayHandle> {
        self.lease.display()
    }

    /// The platform, with this guard's context current.
    pub fn platform(&mut self) -> &mut dyn GlPlatform {
        &mut *self.platform
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.cache.release(&mut *self.platform, self.lease);
    }
}
