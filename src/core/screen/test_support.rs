//=========================================================================
// Screen Test Support
//=========================================================================
//
// Test screen that records every hook call into a shared log, so tests
// can assert dispatch order across several screens.
//
//=========================================================================

use std::sync::{Arc, Mutex};

use super::{Screen, ScreenContext, ScreenRequest};
use crate::core::render::RenderBackend;
use crate::core::time::GameTime;

//--- HookLog -------------------------------------------------------------

/// Shared, ordered record of `"<screen>:<hook>"` entries.
#[derive(Debug, Clone, Default)]
pub(crate) struct HookLog(Arc<Mutex<Vec<String>>>);

impl HookLog {
    fn record(&self, name: &str, hook: &str) {
        self.0.lock().unwrap().push(format!("{}:{}", name, hook));
    }

    /// Returns and clears all recorded entries.
    pub(crate) fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }

    /// Count of recorded entries equal to `"<name>:<hook>"`.
    pub(crate) fn count(&self, entry: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == entry).count()
    }
}

//--- HookScreen ----------------------------------------------------------

/// Screen whose hooks only record themselves.
pub(crate) struct HookScreen {
    name: &'static str,
    log: HookLog,
    on_update: Option<ScreenRequest<&'static str>>,
}

impl HookScreen {
    pub(crate) fn new(name: &'static str, log: &HookLog) -> Self {
        Self {
            name,
            log: log.clone(),
            on_update: None,
        }
    }

    /// Queues `request` the first time `update` runs.
    pub(crate) fn requesting(mut self, request: ScreenRequest<&'static str>) -> Self {
        self.on_update = Some(request);
        self
    }
}

impl Screen<&'static str> for HookScreen {
    fn initialize(&mut self) {
        self.log.record(self.name, "initialize");
    }

    fn load(&mut self) {
        self.log.record(self.name, "load");
    }

    fn unload(&mut self) {
        self.log.record(self.name, "unload");
    }

    fn update(&mut self, ctx: &mut ScreenContext<&'static str>) {
        self.log.record(self.name, "update");
        if let Some(request) = self.on_update.take() {
            ctx.requests.push(request);
        }
    }

    fn transition_in_update(&mut self, _ctx: &mut ScreenContext<&'static str>) {
        self.log.record(self.name, "transition_in_update");
    }

    fn transition_out_update(&mut self, _ctx: &mut ScreenContext<&'static str>) {
        self.log.record(self.name, "transition_out_update");
    }

    fn draw(&mut self, _time: GameTime, _renderer: &mut dyn RenderBackend) {
        self.log.record(self.name, "draw");
    }

    fn transition_in_draw(&mut self, _time: GameTime, _renderer: &mut dyn RenderBackend) {
        self.log.record(self.name, "transition_in_draw");
    }

    fn transition_out_draw(&mut self, _time: GameTime, _renderer: &mut dyn RenderBackend) {
        self.log.record(self.name, "transition_out_draw");
    }

    fn teardown(&mut self) {
        self.log.record(self.name, "teardown");
    }
}
