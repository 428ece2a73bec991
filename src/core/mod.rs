//=========================================================================
// Core Systems Orchestrator
//
// Runs the screen system on the logic (non-platform) thread.
//
// Responsibilities:
// - Own the ScreenManager and the renderer it draws with, building both
//   on the logic thread from the platform window when asked to
// - Drain platform events from the bounded channel each tick
// - Drive update/draw with a deterministic fixed-step clock (TPS)
// - Dispose every screen when the loop ends
//
// Notes:
// The orchestrator runs independently from the platform layer. The clock
// it hands to screens advances by exactly one step per tick, regardless
// of how long the tick took on the wall clock, so transition timing is
// reproducible. Wall-clock time is used only to pace the loop.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{error, info};

//=== Public Modules ======================================================

pub mod error;
pub mod history;
pub mod render;
pub mod screen;
pub mod time;
pub mod transition;

pub(crate) mod platform_bridge;

//=== Public Exports ======================================================

pub use error::{ErrorKind, ScreenError};
pub use history::HistoryLog;
pub use render::{Color, RecordingRenderer, Rect, RenderBackend, TextureId, Viewport};
pub use screen::{Phase, Screen, ScreenContext, ScreenKey, ScreenManager, ScreenSlot};
pub use time::GameTime;
pub use transition::{Transition, TransitionEffect, TransitionKind, TransitionMode};

//=== Internal Modules ====================================================

use platform_bridge::{EventCollector, PlatformEvent, TickControl};
pub use platform_bridge::WindowHandle;

//=== Setup Types =========================================================

/// Builds the renderer once the platform window exists.
pub(crate) type RendererFactory<R> = Box<dyn FnOnce(WindowHandle) -> R + Send>;

/// User setup deferred until the manager exists.
pub(crate) type SetupFn<K, R> = Box<dyn FnOnce(&mut ScreenManager<K, R>) + Send>;

//=== ManagerStage ========================================================
//
// A manager is either built up front around a ready renderer, or waits on
// the logic thread for the window its renderer draws to.
//
enum ManagerStage<K: ScreenKey, R: RenderBackend + 'static> {
    Ready(ScreenManager<K, R>),
    AwaitingWindow {
        factory: RendererFactory<R>,
        history_depth: usize,
        setup: Vec<SetupFn<K, R>>,
    },
}

//=== CoreSystemsOrchestrator =============================================
//
// Owns the screen manager (or the recipe for it) until the logic thread
// takes it over.
//
pub(crate) struct CoreSystemsOrchestrator<K: ScreenKey, R: RenderBackend + 'static> {
    stage: ManagerStage<K, R>,
}

impl<K: ScreenKey, R: RenderBackend + 'static> CoreSystemsOrchestrator<K, R> {
    //--- Construction -----------------------------------------------------

    pub fn new(manager: ScreenManager<K, R>) -> Self {
        Self {
            stage: ManagerStage::Ready(manager),
        }
    }

    /// Defers manager construction until the platform window is ready.
    pub fn awaiting_window(factory: RendererFactory<R>, history_depth: usize) -> Self {
        Self {
            stage: ManagerStage::AwaitingWindow {
                factory,
                history_depth,
                setup: Vec::new(),
            },
        }
    }

    //--- init_systems() ---------------------------------------------------
    //
    // Hands the manager to user setup code (registration, initial change).
    // Runs immediately when the manager exists, otherwise on the logic
    // thread right after the renderer is built, in call order.
    //
    pub fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut ScreenManager<K, R>) + Send + 'static,
    {
        match &mut self.stage {
            ManagerStage::Ready(manager) => init_fn(manager),
            ManagerStage::AwaitingWindow { setup, .. } => setup.push(Box::new(init_fn)),
        }
    }

    #[cfg(test)]
    pub(crate) fn manager(&self) -> Option<&ScreenManager<K, R>> {
        match &self.stage {
            ManagerStage::Ready(manager) => Some(manager),
            ManagerStage::AwaitingWindow { .. } => None,
        }
    }

    //--- realize() --------------------------------------------------------
    //
    // Produces the manager, blocking for the window if needed. `None` means
    // the platform closed before a window appeared.
    //
    fn realize(stage: ManagerStage<K, R>, collector: &mut EventCollector) -> Option<ScreenManager<K, R>> {
        match stage {
            ManagerStage::Ready(manager) => Some(manager),
            ManagerStage::AwaitingWindow {
                factory,
                history_depth,
                setup,
            } => {
                let window = collector.wait_for_window()?;
                info!("Window received, building renderer");

                let mut manager = ScreenManager::new(factory(window)).with_history_depth(history_depth);
                for init_fn in setup {
                    init_fn(&mut manager);
                }
                Some(manager)
            }
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread ticking the screen system at `tps`.
    //
    // A deferred manager is built first, once the window arrives.
    //
    // Each tick:
    //  1. Collects platform events, exiting on close or disconnect
    //  2. Applies the latest window size to the renderer
    //  3. Advances the clock one step, then updates and draws
    //  4. Sleeps to maintain fixed pacing
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            let Some(mut manager) = Self::realize(self.stage, &mut collector) else {
                info!("Core thread exiting before the window opened.");
                return;
            };
            let mut time = manager.last_time();

            loop {
                let frame_start = Instant::now();

                if Self::tick(&mut manager, &mut collector, &mut time, frame_duration)
                    == TickControl::Exit
                {
                    info!("Core thread exiting.");
                    break;
                }

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            manager.dispose();
        })
    }

    //--- tick() -----------------------------------------------------------
    //
    // Runs one logic tick. Update errors are contract violations in screen
    // code, so they stop the loop.
    //
    fn tick(
        manager: &mut ScreenManager<K, R>,
        collector: &mut EventCollector,
        time: &mut GameTime,
        step: Duration,
    ) -> TickControl {
        if collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        if let Some((width, height)) = collector.take_resize() {
            info!("Viewport resized to {}x{}", width, height);
            manager.renderer_mut().resize(width, height);
        }

        *time = time.advance(step);

        if let Err(e) = manager.update(*time) {
            error!("Screen update failed at {:?}: {}", time.total, e);
            return TickControl::Exit;
        }

        manager.draw(*time);
        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use crossbeam_channel::unbounded;

    use super::*;
    use crate::core::render::DrawCommand;
    use crate::core::screen::test_support::{HookLog, HookScreen};
    use crate::core::screen::ScreenRequest;

    type Manager = ScreenManager<&'static str, RecordingRenderer>;

    const STEP: Duration = Duration::from_millis(20);

    fn manager_with_fade(log: &HookLog) -> Manager {
        let mut manager = Manager::new(RecordingRenderer::new(320, 240));
        manager.register_screen(
            "intro",
            ScreenSlot::new(HookScreen::new("intro", log))
                .with_entry(Transition::fade(Color::WHITE, Duration::from_millis(40))),
            false,
            false,
        );
        manager
    }

    #[test]
    fn tick_advances_clock_by_fixed_step() {
        let log = HookLog::default();
        let mut manager = manager_with_fade(&log);
        let (_tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut time = GameTime::ZERO;

        for _ in 0..2 {
            let control = CoreSystemsOrchestrator::tick(&mut manager, &mut collector, &mut time, STEP);
            assert_eq!(control, TickControl::Continue);
        }

        assert_eq!(time.total, Duration::from_millis(40));
        assert_eq!(time.elapsed, STEP);
        assert_eq!(manager.last_time(), time);
        assert_eq!(manager.current_screen().unwrap().phase(), Phase::Active);
    }

    #[test]
    fn tick_applies_resize_before_drawing() {
        let log = HookLog::default();
        let mut manager = manager_with_fade(&log);
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut time = GameTime::ZERO;

        tx.send(PlatformEvent::Resized { width: 64, height: 32 }).unwrap();
        CoreSystemsOrchestrator::tick(&mut manager, &mut collector, &mut time, STEP);

        match manager.renderer().commands() {
            [DrawCommand::DrawTexture { dest, .. }] => {
                assert_eq!((dest.width, dest.height), (64, 32));
            }
            other => panic!("Expected one fade draw, got {:?}", other),
        }
    }

    #[test]
    fn tick_exits_on_window_closed() {
        let log = HookLog::default();
        let mut manager = manager_with_fade(&log);
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut time = GameTime::ZERO;

        tx.send(PlatformEvent::WindowClosed).unwrap();

        let control = CoreSystemsOrchestrator::tick(&mut manager, &mut collector, &mut time, STEP);

        assert_eq!(control, TickControl::Exit);
        assert_eq!(time, GameTime::ZERO);
    }

    #[test]
    fn tick_exits_on_update_error() {
        let log = HookLog::default();
        let mut manager = Manager::new(RecordingRenderer::default());
        manager.register_screen(
            "broken",
            ScreenSlot::new(
                HookScreen::new("broken", &log).requesting(ScreenRequest::Change("missing")),
            ),
            false,
            false,
        );
        let (_tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut time = GameTime::ZERO;

        let control = CoreSystemsOrchestrator::tick(&mut manager, &mut collector, &mut time, STEP);

        assert_eq!(control, TickControl::Exit);
    }

    #[test]
    fn core_thread_disposes_manager_on_exit() {
        let log = HookLog::default();
        let mut orchestrator = CoreSystemsOrchestrator::new(manager_with_fade(&log));
        orchestrator.init_systems(|manager| manager.initialize());
        assert_eq!(orchestrator.manager().unwrap().current_key(), Some(&"intro"));

        let (tx, rx) = unbounded();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        orchestrator.spawn_core_thread(rx, 1000.0).join().unwrap();

        assert_eq!(log.take(), vec!["intro:initialize", "intro:unload", "intro:teardown"]);
    }

    #[test]
    fn deferred_setup_waits_for_window() {
        let log = HookLog::default();
        let built = Arc::new(AtomicBool::new(false));
        let factory_built = Arc::clone(&built);
        let mut orchestrator = CoreSystemsOrchestrator::<&'static str, RecordingRenderer>::awaiting_window(
            Box::new(move |_window| {
                factory_built.store(true, Ordering::SeqCst);
                RecordingRenderer::default()
            }),
            2,
        );

        let setup_log = log.clone();
        orchestrator.init_systems(move |manager| {
            manager.register_screen("intro", ScreenSlot::new(HookScreen::new("intro", &setup_log)), true, false);
        });

        assert!(orchestrator.manager().is_none());
        assert!(log.take().is_empty());

        let (tx, rx) = unbounded();
        tx.send(PlatformEvent::Resized { width: 640, height: 480 }).unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        orchestrator.spawn_core_thread(rx, 1000.0).join().unwrap();

        assert!(!built.load(Ordering::SeqCst), "Renderer must not be built without a window");
        assert!(log.take().is_empty());
    }
}
