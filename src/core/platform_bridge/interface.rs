//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Only window-level events cross the thread boundary: the screen system
// needs the window itself (to build a renderer on), the drawable size and
// the shutdown signal, nothing else.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use winit::window::Window;

//=== WindowHandle ========================================================

/// Shared handle to the engine window, as given to renderer factories.
pub type WindowHandle = Arc<Window>;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over the bounded channel.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Window created; sent once, before any `Resized`.
    WindowReady(WindowHandle),

    /// Drawable area changed size, in physical pixels.
    Resized { width: u32, height: u32 },

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop the engine cannot run.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Failed to create event loop (OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop terminated abnormally.
    EventLoopExecution(winit::error::EventLoopError),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
