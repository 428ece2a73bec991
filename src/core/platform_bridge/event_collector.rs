//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side platform event collector with bounded polling and shutdown
// detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → pending resize → TickControl
//
// Resizes are coalesced: only the latest size seen during a tick is kept.
// The core loop paces itself, so an empty queue returns immediately.
//
// Before the first tick the core may block in `wait_for_window()` until the
// platform has a window to build the renderer on.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{PlatformEvent, WindowHandle};

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains platform events once per tick.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    resize: Option<(u32, u32)>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self { receiver, resize: None }
    }

    /// Collects pending platform events (bounded to prevent starvation).
    ///
    /// Returns [`TickControl::Exit`] on `WindowClosed` or once the platform
    /// side of the channel is gone.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Blocks until the platform reports its window.
    ///
    /// Resizes seen while waiting are kept for the first tick. Returns
    /// `None` if the window is closed or the platform goes away first.
    pub(crate) fn wait_for_window(&mut self) -> Option<WindowHandle> {
        while let Ok(event) = self.receiver.recv() {
            match event {
                PlatformEvent::WindowReady(window) => return Some(window),
                PlatformEvent::Resized { width, height } => self.resize = Some((width, height)),
                PlatformEvent::WindowClosed => return None,
            }
        }
        None
    }

    /// Takes the most recent window size reported since the last call.
    pub(crate) fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.resize.take()
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::WindowReady(_) => {
                debug!("Window handle ignored, renderer already built");
                TickControl::Continue
            }
            PlatformEvent::Resized { width, height } => {
                trace!("Resize to {}x{} queued", width, height);
                self.resize = Some((width, height));
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
