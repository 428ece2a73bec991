//=========================================================================
// Aetheric Engine
//
// Main entry point and coordinator for the screen runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(renderer)──────>  Engine  ──run()──>  [Runtime]
//         │          ──build_with(|window| …)─>   │
//         ├─ with_tps()                           ├─ init(|manager| …)
//         ├─ with_channel_capacity()              └─ spawns logic thread,
//         ├─ with_history_depth()                    runs platform,
//         ├─ with_title()                            blocks until exit
//         └─ with_window_size()
// ```
//
// `build` takes a renderer that needs no window (recording, headless).
// `build_with` defers the renderer until the platform window exists; the
// factory and every `init` closure then run on the logic thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformEvent;
use crate::core::screen::DEFAULT_HISTORY_DEPTH;
use crate::core::{CoreSystemsOrchestrator, RenderBackend, ScreenKey, ScreenManager, WindowHandle};
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **History depth**: 2 screens
/// - **Window**: "Aetheric Engine", 800x600
///
/// # Examples
///
/// ```no_run
/// use aetheric_screens::EngineBuilder;
/// use aetheric_screens::core::RecordingRenderer;
///
/// EngineBuilder::<&'static str, RecordingRenderer>::new()
///     .with_tps(120.0)
///     .with_title("Screens")
///     .with_window_size(1280, 720)
///     .build(RecordingRenderer::new(1280, 720))
///     .run();
/// ```
pub struct EngineBuilder<K: ScreenKey, R: RenderBackend + 'static> {
    tps: f64,
    channel_capacity: usize,
    history_depth: usize,
    window: WindowConfig,
    _phantom: std::marker::PhantomData<(K, R)>,
}

impl<K: ScreenKey, R: RenderBackend + 'static> EngineBuilder<K, R> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            history_depth: DEFAULT_HISTORY_DEPTH,
            window: WindowConfig::default(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Screens see a clock that advances by exactly `1 / tps` per tick, so
    /// this also sets the time resolution of transitions.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets how many superseded screens the manager remembers.
    ///
    /// Default: 2
    ///
    /// # Panics
    ///
    /// Panics if `depth == 0`.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0, "History depth must be positive");
        self.history_depth = depth;
        self
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Builds the engine around `renderer`.
    ///
    /// The renderer moves to the logic thread with the screen manager.
    /// Call [`Engine::init`] to register screens before [`Engine::run`].
    pub fn build(self, renderer: R) -> Engine<K, R> {
        self.log_build();
        let manager = ScreenManager::new(renderer).with_history_depth(self.history_depth);
        self.into_engine(CoreSystemsOrchestrator::new(manager))
    }

    /// Builds the engine with a renderer created from the engine window.
    ///
    /// `factory` runs once on the logic thread, after the platform opens
    /// the window and before the first tick. Setup passed to
    /// [`Engine::init`] runs right after it. If the window closes before
    /// it ever opened, neither runs.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aetheric_screens::EngineBuilder;
    /// use aetheric_screens::core::RecordingRenderer;
    ///
    /// EngineBuilder::<&'static str, RecordingRenderer>::new()
    ///     .build_with(|window| {
    ///         let size = window.inner_size();
    ///         RecordingRenderer::new(size.width, size.height)
    ///     })
    ///     .run();
    /// ```
    pub fn build_with<F>(self, factory: F) -> Engine<K, R>
    where
        F: FnOnce(WindowHandle) -> R + Send + 'static,
    {
        self.log_build();
        let history_depth = self.history_depth;
        self.into_engine(CoreSystemsOrchestrator::awaiting_window(Box::new(factory), history_depth))
    }

    fn log_build(&self) {
        info!(
            "Building engine (TPS: {}, channel: {}, history: {})",
            self.tps, self.channel_capacity, self.history_depth
        );
    }

    fn into_engine(self, orchestrator: CoreSystemsOrchestrator<K, R>) -> Engine<K, R> {
        Engine {
            orchestrator,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<K: ScreenKey, R: RenderBackend + 'static> Default for EngineBuilder<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Aetheric screen runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► ScreenManager<K, R>
///   │
///   └─► Platform (Event Loop)
///         └─► Window, resize/close events
///
/// Communication: crossbeam channel (PlatformEvent)
/// ```
pub struct Engine<K: ScreenKey, R: RenderBackend + 'static> {
    orchestrator: CoreSystemsOrchestrator<K, R>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl<K: ScreenKey, R: RenderBackend + 'static> Engine<K, R> {
    //--- Initialization ---------------------------------------------------

    /// Gives setup code access to the [`ScreenManager`] before the engine
    /// starts running.
    ///
    /// The first screen registered becomes current. With
    /// [`EngineBuilder::build`] this runs immediately; with
    /// [`EngineBuilder::build_with`] it runs on the logic thread once the
    /// renderer exists.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use aetheric_screens::prelude::*;
    /// # use std::time::Duration;
    /// # struct Title;
    /// # impl Screen<&'static str> for Title {
    /// #     fn update(&mut self, _ctx: &mut ScreenContext<&'static str>) {}
    /// #     fn draw(&mut self, _time: GameTime, _renderer: &mut dyn RenderBackend) {}
    /// # }
    /// EngineBuilder::<&'static str, RecordingRenderer>::new()
    ///     .build(RecordingRenderer::default())
    ///     .init(|manager| {
    ///         let fade = Transition::fade(Color::BLACK, Duration::from_millis(250));
    ///         manager.register_screen("title", ScreenSlot::new(Title).with_exit(fade), true, true);
    ///     })
    ///     .run();
    /// ```
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut ScreenManager<K, R>) + Send + 'static,
    {
        info!("Initializing screen manager");

        self.orchestrator.init_systems(init_fn);

        info!("Engine initialization complete");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded channel for platform → core communication
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here); the window it opens
    ///    is handed to the logic thread
    /// 4. On window close: platform exits → logic thread disposes the
    ///    screens and terminates
    /// 5. The window is released on the main thread, after the renderer
    ///    that drew to it
    ///
    /// If the logic thread stops early (a screen error), the platform keeps
    /// running so the window can still be closed normally.
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        info!("Platform channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let mut platform = Platform::new(tx, self.window);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        drop(platform);
        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
