//=========================================================================
// Screen Slot
//=========================================================================
//
// Registry entry wrapping a `Screen` with its lifecycle state.
//
// The slot owns the phase, the optional entry/exit transitions, and the
// disposed flag. Its dispatchers map the phase to exactly one update hook
// and one draw hook per tick.
//
//   phase            update dispatch                     draw dispatch
//   TransitioningIn  transition_in_update + entry        transition_in_draw + entry
//   Active           update                              draw
//   TransitioningOut transition_out_update + exit        transition_out_draw + exit
//   Inactive         -                                   -
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::{Phase, Screen, ScreenContext, ScreenKey};
use crate::core::error::ScreenError;
use crate::core::render::RenderBackend;
use crate::core::time::GameTime;
use crate::core::transition::{Transition, TransitionMode};

//=== ScreenSlot ==========================================================

/// A screen plus the state the manager drives it with.
///
/// # Example
///
/// ```rust
/// # use std::time::Duration;
/// # use aetheric_screens::prelude::*;
/// # struct Menu;
/// # impl Screen<&'static str> for Menu {
/// #     fn update(&mut self, _ctx: &mut ScreenContext<&'static str>) {}
/// #     fn draw(&mut self, _time: GameTime, _renderer: &mut dyn RenderBackend) {}
/// # }
/// let slot = ScreenSlot::new(Menu)
///     .with_entry(Transition::fade(Color::BLACK, Duration::from_millis(300)))
///     .with_exit(Transition::fade(Color::BLACK, Duration::from_millis(300)))
///     .with_batched_draws(true);
/// ```
pub struct ScreenSlot<K: ScreenKey> {
    screen: Box<dyn Screen<K>>,
    phase: Phase,
    entry: Option<Transition>,
    exit: Option<Transition>,
    batch_draws: bool,
    disposed: bool,
}

impl<K: ScreenKey> ScreenSlot<K> {
    //--- Construction -----------------------------------------------------

    /// Wraps a screen with no transitions. The screen is boxed for storage.
    pub fn new<S>(screen: S) -> Self
    where
        S: Screen<K> + 'static,
    {
        Self {
            screen: Box::new(screen),
            phase: Phase::Inactive,
            entry: None,
            exit: None,
            batch_draws: false,
            disposed: false,
        }
    }

    /// Attaches the transition played while this screen becomes current.
    pub fn with_entry(mut self, mut transition: Transition) -> Self {
        transition.set_mode(TransitionMode::Entry);
        self.entry = Some(transition);
        self
    }

    /// Attaches the transition played while this screen is left.
    pub fn with_exit(mut self, mut transition: Transition) -> Self {
        transition.set_mode(TransitionMode::Exit);
        self.exit = Some(transition);
        self
    }

    /// Brackets every draw dispatch in `begin_batch`/`end_batch`.
    pub fn with_batched_draws(mut self, enabled: bool) -> Self {
        self.batch_draws = enabled;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn entry_transition(&self) -> Option<&Transition> {
        self.entry.as_ref()
    }

    pub fn exit_transition(&self) -> Option<&Transition> {
        self.exit.as_ref()
    }

    //--- Phase Control ----------------------------------------------------

    pub(crate) fn set_phase(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_become(next),
            "Illegal phase change {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }

    /// Starts showing the screen: arms the entry transition at `now`, or
    /// goes straight to `Active` when there is none.
    pub(crate) fn enter(&mut self, now: GameTime) {
        match self.entry.as_mut() {
            Some(entry) => {
                entry.start(now);
                self.set_phase(Phase::TransitioningIn);
            }
            None => self.set_phase(Phase::Active),
        }
    }

    /// Arms the exit transition at `now`.
    ///
    /// Returns false, leaving the phase untouched, if there is no exit
    /// transition.
    pub(crate) fn begin_exit(&mut self, now: GameTime) -> bool {
        let Some(exit) = self.exit.as_mut() else {
            return false;
        };
        exit.start(now);
        self.set_phase(Phase::TransitioningOut);
        true
    }

    /// Allocates transition resources against the owning manager's renderer.
    pub(crate) fn attach(&mut self, renderer: &mut dyn RenderBackend) {
        for transition in self.entry.iter_mut().chain(self.exit.iter_mut()) {
            transition.setup(renderer);
        }
    }

    //--- Lifecycle Hooks --------------------------------------------------

    pub(crate) fn initialize(&mut self) {
        self.screen.initialize();
    }

    pub(crate) fn load(&mut self) {
        self.screen.load();
    }

    pub(crate) fn unload(&mut self) {
        self.screen.unload();
    }

    //--- Dispatch ---------------------------------------------------------

    /// Runs the update hook for the current phase and advances the
    /// phase's transition, promoting the phase once it completes.
    ///
    /// # Errors
    ///
    /// Propagates [`ScreenError::TransitionModeUnset`] from the transition.
    pub(crate) fn update_internal(&mut self, ctx: &mut ScreenContext<K>) -> Result<(), ScreenError> {
        let transition = match self.phase {
            Phase::TransitioningIn => {
                self.screen.transition_in_update(ctx);
                self.entry.as_mut()
            }
            Phase::TransitioningOut => {
                self.screen.transition_out_update(ctx);
                self.exit.as_mut()
            }
            Phase::Active => {
                self.screen.update(ctx);
                return Ok(());
            }
            Phase::Inactive => return Ok(()),
        };

        let finished = match transition {
            Some(transition) => {
                transition.update(ctx.time)?;
                transition.is_done()
            }
            None => true,
        };

        if finished {
            if let Some(next) = self.phase.advance() {
                trace!("Screen phase {:?} -> {:?}", self.phase, next);
                self.set_phase(next);
            }
        }

        Ok(())
    }

    /// Runs the draw hook for the current phase followed by the phase's
    /// transition effect.
    pub(crate) fn draw_internal(&mut self, time: GameTime, renderer: &mut dyn RenderBackend) {
        if self.batch_draws {
            renderer.begin_batch();
        }

        match self.phase {
            Phase::TransitioningIn => {
                self.screen.transition_in_draw(time, renderer);
                if let Some(entry) = &self.entry {
                    entry.draw(renderer);
                }
            }
            Phase::Active => self.screen.draw(time, renderer),
            Phase::TransitioningOut => {
                self.screen.transition_out_draw(time, renderer);
                if let Some(exit) = &self.exit {
                    exit.draw(renderer);
                }
            }
            Phase::Inactive => {}
        }

        if self.batch_draws {
            renderer.end_batch();
        }
    }

    //--- Disposal ---------------------------------------------------------

    /// Marks the slot disposed, releases transition resources, then calls
    /// the screen's `teardown`.
    pub(crate) fn dispose(&mut self, renderer: &mut dyn RenderBackend) {
        self.disposed = true;
        for transition in self.entry.iter_mut().chain(self.exit.iter_mut()) {
            transition.release(renderer);
        }
        self.screen.teardown();
    }
}

impl<K: ScreenKey> std::fmt::Debug for ScreenSlot<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenSlot")
            .field("phase", &self.phase)
            .field("entry", &self.entry)
            .field("exit", &self.exit)
            .field("batch_draws", &self.batch_draws)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::render::{Color, DrawCommand, RecordingRenderer};
    use crate::core::screen::test_support::{HookLog, HookScreen};

    fn ms(value: u64) -> GameTime {
        GameTime::at(Duration::from_millis(value))
    }

    fn fade(lifespan_ms: u64) -> Transition {
        Transition::fade(Color::BLACK, Duration::from_millis(lifespan_ms))
    }

    fn tick(slot: &mut ScreenSlot<&'static str>, at: u64) {
        let mut ctx = ScreenContext::new(ms(at));
        slot.update_internal(&mut ctx).unwrap();
    }

    //--- Construction -----------------------------------------------------

    #[test]
    fn new_slot_is_inactive_and_live() {
        let slot = ScreenSlot::new(HookScreen::new("a", &HookLog::default()));
        assert_eq!(slot.phase(), Phase::Inactive);
        assert!(!slot.is_disposed());
        assert!(slot.entry_transition().is_none());
        assert!(slot.exit_transition().is_none());
    }

    #[test]
    fn builders_fix_transition_modes() {
        let slot = ScreenSlot::new(HookScreen::new("a", &HookLog::default()))
            .with_entry(fade(10))
            .with_exit(fade(20));

        assert_eq!(slot.entry_transition().unwrap().mode(), Some(TransitionMode::Entry));
        assert_eq!(slot.exit_transition().unwrap().mode(), Some(TransitionMode::Exit));
    }

    //--- Update Dispatch --------------------------------------------------

    #[test]
    fn transitioning_in_without_entry_promotes_immediately() {
        let log = HookLog::default();
        let mut slot = ScreenSlot::new(HookScreen::new("a", &log));
        slot.set_phase(Phase::TransitioningIn);

        tick(&mut slot, 0);

        assert_eq!(slot.phase(), Phase::Active);
        assert_eq!(log.take(), vec!["a:transition_in_update"]);
    }

    #[test]
    fn entry_transition_holds_phase_until_done() {
        let log = HookLog::default();
        let mut slot = ScreenSlot::new(HookScreen::new("a", &log)).with_entry(fade(100));
        slot.enter(ms(0));
        assert_eq!(slot.phase(), Phase::TransitioningIn);

        tick(&mut slot, 50);
        assert_eq!(slot.phase(), Phase::TransitioningIn);

        tick(&mut slot, 100);
        assert_eq!(slot.phase(), Phase::Active);

        tick(&mut slot, 116);
        assert_eq!(
            log.take(),
            vec!["a:transition_in_update", "a:transition_in_update", "a:update"]
        );
    }

    #[test]
    fn exit_transition_ends_inactive() {
        let log = HookLog::default();
        let mut slot = ScreenSlot::new(HookScreen::new("a", &log)).with_exit(fade(30));
        slot.enter(ms(0));
        assert!(slot.begin_exit(ms(10)));
        assert_eq!(slot.phase(), Phase::TransitioningOut);

        tick(&mut slot, 20);
        assert_eq!(slot.phase(), Phase::TransitioningOut);

        tick(&mut slot, 40);
        assert_eq!(slot.phase(), Phase::Inactive);

        tick(&mut slot, 50);
        assert_eq!(
            log.take(),
            vec!["a:transition_out_update", "a:transition_out_update"]
        );
    }

    #[test]
    fn transitioning_out_without_exit_promotes_immediately() {
        let log = HookLog::default();
        let mut slot = ScreenSlot::new(HookScreen::new("a", &log));
        slot.enter(ms(0));
        slot.set_phase(Phase::TransitioningOut);

        tick(&mut slot, 0);

        assert_eq!(slot.phase(), Phase::Inactive);
    }

    #[test]
    fn begin_exit_without_transition_is_refused() {
        let mut slot = ScreenSlot::new(HookScreen::new("a", &HookLog::default()));
        slot.enter(ms(0));
        assert!(!slot.begin_exit(ms(0)));
        assert_eq!(slot.phase(), Phase::Active);
    }

    //--- Draw Dispatch ----------------------------------------------------

    #[test]
    fn draw_pairs_hook_with_transition() {
        let log = HookLog::default();
        let mut renderer = RecordingRenderer::new(8, 8);
        let mut slot = ScreenSlot::new(HookScreen::new("a", &log)).with_entry(fade(100));
        slot.attach(&mut renderer);
        slot.enter(ms(0));
        tick(&mut slot, 0);
        log.take();

        slot.draw_internal(ms(0), &mut renderer);

        assert_eq!(log.take(), vec!["a:transition_in_draw"]);
        assert!(matches!(renderer.commands(), [DrawCommand::DrawTexture { .. }]));
    }

    #[test]
    fn batched_draw_is_bracketed() {
        let log = HookLog::default();
        let mut renderer = RecordingRenderer::new(8, 8);
        let mut slot = ScreenSlot::new(HookScreen::new("a", &log)).with_batched_draws(true);
        slot.enter(ms(0));

        slot.draw_internal(ms(0), &mut renderer);

        assert_eq!(log.take(), vec!["a:draw"]);
        assert_eq!(renderer.commands(), &[DrawCommand::BeginBatch, DrawCommand::EndBatch]);
    }

    #[test]
    fn inactive_draws_nothing() {
        let log = HookLog::default();
        let mut renderer = RecordingRenderer::new(8, 8);
        let mut slot = ScreenSlot::new(HookScreen::new("a", &log));

        slot.draw_internal(ms(0), &mut renderer);

        assert!(log.take().is_empty());
        assert!(renderer.commands().is_empty());
    }

    //--- Disposal ---------------------------------------------------------

    #[test]
    fn dispose_releases_textures_then_tears_down() {
        let log = HookLog::default();
        let mut renderer = RecordingRenderer::default();
        let mut slot = ScreenSlot::new(HookScreen::new("a", &log))
            .with_entry(fade(10))
            .with_exit(fade(10));
        slot.attach(&mut renderer);
        assert_eq!(renderer.live_textures(), 2);

        slot.dispose(&mut renderer);

        assert!(slot.is_disposed());
        assert_eq!(renderer.live_textures(), 0);
        assert_eq!(log.take(), vec!["a:teardown"]);
    }
}
