//=========================================================================
// Screen Manager
//=========================================================================
//
// Manages screen registration, the change protocol, and per-tick dispatch.
//
// Screens are stored in a HashMap by key. One screen is current; while a
// change is in flight, the screen being left is tracked as `outgoing` and
// plays its exit transition before the current screen may enter.
//
// Change protocol:
//   change_screen(new)
//     ├─ outgoing has exit transition → outgoing: TransitioningOut
//     │                                  new:      Inactive (waits)
//     │     … update() ticks outgoing until Inactive
//     │     → unload outgoing, new enters (entry armed at that tick)
//     └─ otherwise                     → outgoing: Inactive + unload
//                                        new:      TransitioningIn | Active
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Phase, ScreenContext, ScreenKey, ScreenRequest, ScreenSlot};
use crate::core::error::ScreenError;
use crate::core::history::HistoryLog;
use crate::core::render::RenderBackend;
use crate::core::time::GameTime;

/// History retained when none is configured.
pub const DEFAULT_HISTORY_DEPTH: usize = 2;

//=== Screen Manager ======================================================

/// Owns the registered screens, the renderer they draw with, and the
/// history of superseded screens.
///
/// The manager is driven by the host: call [`ScreenManager::update`] then
/// [`ScreenManager::draw`] once per tick with a non-decreasing [`GameTime`].
/// Screens request changes through the [`ScreenContext`] they receive; the
/// requests are applied at the end of `update`.
///
/// Undisposed screens are unloaded and disposed when the manager is
/// dropped.
pub struct ScreenManager<K: ScreenKey, R: RenderBackend> {
    screens: HashMap<K, ScreenSlot<K>>,
    current: Option<K>,
    outgoing: Option<K>,
    history: HistoryLog<K>,
    last_time: GameTime,
    renderer: R,
    disposed: bool,
}

impl<K: ScreenKey, R: RenderBackend> ScreenManager<K, R> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty manager drawing through `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            screens: HashMap::new(),
            current: None,
            outgoing: None,
            history: HistoryLog::new(DEFAULT_HISTORY_DEPTH),
            last_time: GameTime::ZERO,
            renderer,
            disposed: false,
        }
    }

    /// Sets how many superseded screens the history keeps.
    ///
    /// Default: 2
    ///
    /// # Panics
    ///
    /// Panics if `depth == 0`.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0, "History depth must be positive");
        self.history = HistoryLog::new(depth);
        self
    }

    //--- Registration -----------------------------------------------------

    /// Registers a screen under `key`.
    ///
    /// The first screen registered becomes current and enters immediately.
    /// Transition resources are allocated against the manager's renderer.
    /// `auto_initialize` and `auto_load` run the matching hooks right away.
    ///
    /// Registering over an existing key unloads and disposes the old screen
    /// first. If the old screen was current, the new one takes its place.
    pub fn register_screen(
        &mut self,
        key: K,
        mut slot: ScreenSlot<K>,
        auto_initialize: bool,
        auto_load: bool,
    ) {
        slot.attach(&mut self.renderer);

        let mut outgoing_replaced = false;
        if let Some(mut old) = self.screens.remove(&key) {
            warn!("Screen {:?} was already registered and has been replaced", key);
            if !old.is_disposed() {
                old.unload();
                old.dispose(&mut self.renderer);
            }
            if self.outgoing.as_ref() == Some(&key) {
                self.outgoing = None;
                outgoing_replaced = true;
            }
        }

        let becomes_current = match &self.current {
            None => true,
            Some(current) => *current == key,
        };

        self.screens.insert(key.clone(), slot);
        debug!("Registered screen {:?}", key);

        if becomes_current {
            debug!("Screen {:?} is now current", key);
            self.current = Some(key.clone());
        }
        if becomes_current || outgoing_replaced {
            self.promote_current(self.last_time);
        }

        if let Some(slot) = self.screens.get_mut(&key) {
            if auto_initialize {
                slot.initialize();
            }
            if auto_load {
                slot.load();
            }
        }
    }

    /// Unloads and disposes the screen under `key`.
    ///
    /// The disposed screen stays registered so that later attempts to change
    /// into it are rejected.
    ///
    /// # Errors
    ///
    /// - [`ScreenError::UnknownScreen`] if `key` is not registered
    /// - [`ScreenError::RemoveCurrentScreen`] if `key` is the current screen
    /// - [`ScreenError::DisposedScreen`] if it was already disposed
    pub fn remove_screen(&mut self, key: &K) -> Result<(), ScreenError> {
        let slot = self.screens.get(key).ok_or_else(|| ScreenError::unknown(key))?;

        if self.current.as_ref() == Some(key) {
            return Err(ScreenError::remove_current(key));
        }
        if slot.is_disposed() {
            return Err(ScreenError::disposed(key));
        }

        if self.outgoing.as_ref() == Some(key) {
            debug!("Removing screen {:?} mid-exit", key);
            self.outgoing = None;
            if let Some(slot) = self.screens.get_mut(key) {
                slot.set_phase(Phase::Inactive);
            }
            self.promote_current(self.last_time);
        }

        if let Some(slot) = self.screens.get_mut(key) {
            slot.unload();
            slot.dispose(&mut self.renderer);
        }

        debug!("Removed screen {:?}", key);
        Ok(())
    }

    /// Initializes every live screen.
    pub fn initialize(&mut self) {
        for slot in self.screens.values_mut().filter(|slot| !slot.is_disposed()) {
            slot.initialize();
        }
    }

    //--- Change Protocol --------------------------------------------------

    /// Makes `key` the current screen.
    ///
    /// The screen being left is pushed onto the history. If it has an exit
    /// transition, it plays that first and `key` waits in
    /// [`Phase::Inactive`] until a later [`ScreenManager::update`] sees the
    /// exit finish. Otherwise the switch is immediate. Transitions are armed
    /// at the last time passed to `update`.
    ///
    /// A change issued while another exit is still running finishes that
    /// exit at once (unloading its screen) before proceeding. Changing to
    /// the screen that is already current does nothing.
    ///
    /// # Errors
    ///
    /// - [`ScreenError::UnknownScreen`] if `key` is not registered
    /// - [`ScreenError::DisposedScreen`] if the screen has been disposed
    pub fn change_screen(&mut self, key: K) -> Result<(), ScreenError> {
        let target = self.screens.get(&key).ok_or_else(|| ScreenError::unknown(&key))?;
        if target.is_disposed() {
            return Err(ScreenError::disposed(&key));
        }

        if self.current.as_ref() == Some(&key) {
            debug!("Screen {:?} is already current, ignoring change", key);
            return Ok(());
        }

        self.finish_outgoing();

        let time = self.last_time;
        let previous = self.current.replace(key.clone());
        if let Some(previous) = &previous {
            self.history.push(previous.clone());
        }
        debug!("Changing screen {:?} -> {:?}", previous, key);

        if let Some(slot) = self.screens.get_mut(&key) {
            slot.load();
        }

        // A screen still waiting to enter has nothing to animate out.
        let exiting = previous
            .as_ref()
            .and_then(|previous| self.screens.get_mut(previous))
            .map_or(false, |slot| slot.phase().is_forward() && slot.begin_exit(time));

        if exiting {
            if let Some(slot) = self.screens.get_mut(&key) {
                slot.set_phase(Phase::Inactive);
            }
            self.outgoing = previous;
            return Ok(());
        }

        if let Some(slot) = self.screens.get_mut(&key) {
            slot.enter(time);
        }
        if let Some(slot) = previous.as_ref().and_then(|previous| self.screens.get_mut(previous)) {
            slot.set_phase(Phase::Inactive);
            slot.unload();
        }

        Ok(())
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the outgoing and current screens by one tick.
    ///
    /// The outgoing screen (if still transitioning out) is dispatched first;
    /// once its exit completes it is unloaded and the waiting current screen
    /// enters, with its entry transition armed at `time`. The current screen
    /// is then dispatched. Requests queued by hooks are applied last.
    ///
    /// # Errors
    ///
    /// Propagates errors from transitions and from queued requests.
    pub fn update(&mut self, time: GameTime) -> Result<(), ScreenError> {
        let mut ctx = ScreenContext::new(time);

        if let Some(key) = self.outgoing.clone() {
            let finished = match self.screens.get_mut(&key) {
                Some(slot) if slot.phase() == Phase::TransitioningOut => {
                    slot.update_internal(&mut ctx)?;
                    if slot.phase() == Phase::Inactive {
                        slot.unload();
                        true
                    } else {
                        false
                    }
                }
                _ => true,
            };

            if finished {
                trace!("Screen {:?} finished exiting", key);
                self.outgoing = None;
                self.promote_current(time);
            }
        }

        if let Some(slot) = self.current.as_ref().and_then(|key| self.screens.get_mut(key)) {
            slot.update_internal(&mut ctx)?;
        }

        self.last_time = time;

        self.apply_requests(ctx.requests.take())
    }

    /// Draws the outgoing screen (while transitioning out), then the
    /// current screen.
    pub fn draw(&mut self, time: GameTime) {
        if let Some(slot) = self.outgoing.as_ref().and_then(|key| self.screens.get_mut(key)) {
            if slot.phase() == Phase::TransitioningOut {
                slot.draw_internal(time, &mut self.renderer);
            }
        }

        if let Some(slot) = self.current.as_ref().and_then(|key| self.screens.get_mut(key)) {
            slot.draw_internal(time, &mut self.renderer);
        }
    }

    //--- Teardown ---------------------------------------------------------

    /// Unloads and disposes every live screen.
    ///
    /// In-flight transitions are discarded. Calling this more than once has
    /// no further effect; it also runs automatically on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        debug!("Disposing screen manager ({} screens)", self.screens.len());
        for slot in self.screens.values_mut().filter(|slot| !slot.is_disposed()) {
            slot.unload();
            slot.dispose(&mut self.renderer);
        }

        self.outgoing = None;
        self.disposed = true;
    }

    //--- Accessors --------------------------------------------------------

    pub fn current_key(&self) -> Option<&K> {
        self.current.as_ref()
    }

    pub fn current_screen(&self) -> Option<&ScreenSlot<K>> {
        self.current.as_ref().and_then(|key| self.screens.get(key))
    }

    /// Oldest retained history entry.
    ///
    /// With a history depth above one this is the least recently
    /// superseded screen, not necessarily the one left last. Use
    /// [`ScreenManager::history`] for the newest entry.
    pub fn previous_key(&self) -> Option<&K> {
        self.history.oldest()
    }

    /// Screen under [`ScreenManager::previous_key`].
    pub fn previous_screen(&self) -> Option<&ScreenSlot<K>> {
        self.previous_key().and_then(|key| self.screens.get(key))
    }

    /// Screen currently playing its exit transition, if any.
    pub fn outgoing_key(&self) -> Option<&K> {
        self.outgoing.as_ref()
    }

    pub fn history(&self) -> &HistoryLog<K> {
        &self.history
    }

    pub fn screen(&self, key: &K) -> Option<&ScreenSlot<K>> {
        self.screens.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.screens.contains_key(key)
    }

    /// Keys of all registered screens, disposed ones included. Order is
    /// unspecified.
    pub fn screen_keys(&self) -> Vec<K> {
        self.screens.keys().cloned().collect()
    }

    /// Iterates over all registered screens.
    pub fn screens(&self) -> impl Iterator<Item = (&K, &ScreenSlot<K>)> {
        self.screens.iter()
    }

    /// Time passed to the last successful [`ScreenManager::update`].
    pub fn last_time(&self) -> GameTime {
        self.last_time
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    //--- Internal Helpers -------------------------------------------------

    /// Lets a waiting current screen enter at `time`. No-op if it is
    /// already showing or an exit is still running.
    fn promote_current(&mut self, time: GameTime) {
        if self.outgoing.is_some() {
            return;
        }
        if let Some(slot) = self.current.as_ref().and_then(|key| self.screens.get_mut(key)) {
            if slot.phase() == Phase::Inactive {
                slot.enter(time);
            }
        }
    }

    /// Cuts a running exit short: the outgoing screen goes inactive and is
    /// unloaded without playing the rest of its transition.
    fn finish_outgoing(&mut self) {
        let Some(key) = self.outgoing.take() else {
            return;
        };

        if let Some(slot) = self.screens.get_mut(&key) {
            if slot.phase() == Phase::TransitioningOut {
                debug!("Finishing in-flight exit of {:?}", key);
                slot.set_phase(Phase::Inactive);
                slot.unload();
            }
        }
    }

    fn apply_requests(&mut self, requests: Vec<ScreenRequest<K>>) -> Result<(), ScreenError> {
        for request in requests {
            debug!("Applying queued {:?}", request);
            match request {
                ScreenRequest::Change(key) => self.change_screen(key)?,
                ScreenRequest::Remove(key) => self.remove_screen(&key)?,
            }
        }
        Ok(())
    }
}

impl<K: ScreenKey, R: RenderBackend> Drop for ScreenManager<K, R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
