//=========================================================================
// Transitions
//=========================================================================
//
// Timed visual effects bridging two screens.
//
// A `Transition` owns the timing (start, lifespan, progress, completion)
// and delegates pixel output to a `TransitionEffect`. Each transition is
// moved into exactly one screen slot role (entry or exit), which fixes its
// mode for life.
//
// Progress law:
//   Entry: progress = 1 - elapsed / lifespan   (1 → 0)
//   Exit:  progress = elapsed / lifespan       (0 → 1)
//   done once elapsed >= lifespan
//
//=========================================================================

//=== Module Declarations =================================================

mod fade;

//=== External Dependencies ===============================================

use std::time::Duration;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::error::ScreenError;
use crate::core::render::{Color, RenderBackend};
use crate::core::time::GameTime;

//=== Public API ==========================================================

pub use fade::FadeEffect;

//=== TransitionMode ======================================================

/// Role a transition plays on its owning screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionMode {
    /// Plays while the screen becomes active.
    Entry,

    /// Plays while the screen is being left.
    Exit,
}

//=== TransitionKind ======================================================

/// Built-in effect family, reported for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionKind {
    /// User-supplied effect.
    #[default]
    Custom,

    /// Full-screen color fade.
    Fade,
}

//=== TransitionEffect ====================================================

/// Pixel output of a transition.
///
/// Only `draw` is required. Effects that hold backend resources allocate
/// them in `setup` and free them in `release`; `release` may be called on
/// an effect that was never set up and must tolerate repeated calls.
pub trait TransitionEffect: Send {
    /// Allocates backend resources. Called when the owning screen is
    /// registered with a manager.
    fn setup(&mut self, _renderer: &mut dyn RenderBackend) {}

    /// Renders the effect for a progress value in `[0, 1]`.
    fn draw(&self, progress: f32, renderer: &mut dyn RenderBackend);

    /// Frees backend resources.
    fn release(&mut self, _renderer: &mut dyn RenderBackend) {}

    fn kind(&self) -> TransitionKind {
        TransitionKind::Custom
    }
}

//=== Transition ==========================================================

/// Timed effect with a progress value and completion flag.
pub struct Transition {
    lifespan: Duration,
    mode: Option<TransitionMode>,
    start_time: Duration,
    progress: f64,
    done: bool,
    effect: Box<dyn TransitionEffect>,
}

impl Transition {
    //--- Construction -----------------------------------------------------

    /// Creates an unattached transition driving `effect` over `lifespan`.
    pub fn new<E>(lifespan: Duration, effect: E) -> Self
    where
        E: TransitionEffect + 'static,
    {
        Self {
            lifespan,
            mode: None,
            start_time: Duration::ZERO,
            progress: 0.0,
            done: false,
            effect: Box::new(effect),
        }
    }

    /// Full-screen fade to or from `color`.
    pub fn fade(color: Color, lifespan: Duration) -> Self {
        Self::new(lifespan, FadeEffect::new(color))
    }

    /// Fixes the transition's role. Called by the owning screen slot.
    pub(crate) fn set_mode(&mut self, mode: TransitionMode) {
        self.mode = Some(mode);
    }

    //--- Accessors --------------------------------------------------------

    pub fn lifespan(&self) -> Duration {
        self.lifespan
    }

    pub fn mode(&self) -> Option<TransitionMode> {
        self.mode
    }

    pub fn kind(&self) -> TransitionKind {
        self.effect.kind()
    }

    /// Host time at which the transition was last armed.
    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    /// Raw progress from the last update. Not clamped: the completing tick
    /// may overshoot `[0, 1]` slightly.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    //--- Timing -----------------------------------------------------------

    /// Arms the transition at `now`.
    pub fn start(&mut self, now: GameTime) {
        self.start_time = now.total;
        self.done = false;
    }

    /// Recomputes progress for `now` and flags completion.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::TransitionModeUnset`] if the transition has
    /// not been attached to a screen as an entry or exit effect.
    pub fn update(&mut self, now: GameTime) -> Result<(), ScreenError> {
        let mode = self.mode.ok_or(ScreenError::TransitionModeUnset)?;
        let elapsed = now.since(self.start_time);

        let ratio = if self.lifespan.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.lifespan.as_secs_f64()
        };

        self.progress = match mode {
            TransitionMode::Entry => 1.0 - ratio,
            TransitionMode::Exit => ratio,
        };

        if elapsed >= self.lifespan {
            trace!("{:?} transition complete after {:?}", mode, elapsed);
            self.done = true;
        }

        Ok(())
    }

    //--- Rendering --------------------------------------------------------

    /// Draws the effect with progress clamped to `[0, 1]`.
    pub fn draw(&self, renderer: &mut dyn RenderBackend) {
        self.effect.draw(self.progress.clamp(0.0, 1.0) as f32, renderer);
    }

    pub(crate) fn setup(&mut self, renderer: &mut dyn RenderBackend) {
        self.effect.setup(renderer);
    }

    pub(crate) fn release(&mut self, renderer: &mut dyn RenderBackend) {
        self.effect.release(renderer);
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("lifespan", &self.lifespan)
            .field("mode", &self.mode)
            .field("kind", &self.kind())
            .field("start_time", &self.start_time)
            .field("progress", &self.progress)
            .field("done", &self.done)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{DrawCommand, RecordingRenderer};

    fn ms(value: u64) -> GameTime {
        GameTime::at(Duration::from_millis(value))
    }

    fn attached(mode: TransitionMode, lifespan_ms: u64) -> Transition {
        let mut transition = Transition::fade(Color::BLACK, Duration::from_millis(lifespan_ms));
        transition.set_mode(mode);
        transition
    }

    //--- Progress Law -----------------------------------------------------

    #[test]
    fn exit_progress_runs_zero_to_one() {
        let mut transition = attached(TransitionMode::Exit, 100);
        transition.start(ms(1_000));

        transition.update(ms(1_000)).unwrap();
        assert_eq!(transition.progress(), 0.0);
        assert!(!transition.is_done());

        transition.update(ms(1_050)).unwrap();
        assert!((transition.progress() - 0.5).abs() < 1e-9);
        assert!(!transition.is_done());

        transition.update(ms(1_100)).unwrap();
        assert_eq!(transition.progress(), 1.0);
        assert!(transition.is_done());
    }

    #[test]
    fn entry_progress_runs_one_to_zero() {
        let mut transition = attached(TransitionMode::Entry, 100);
        transition.start(ms(0));

        transition.update(ms(0)).unwrap();
        assert_eq!(transition.progress(), 1.0);
        assert!(!transition.is_done());

        transition.update(ms(100)).unwrap();
        assert_eq!(transition.progress(), 0.0);
        assert!(transition.is_done());
    }

    #[test]
    fn completing_tick_may_overshoot() {
        let mut transition = attached(TransitionMode::Exit, 100);
        transition.start(ms(0));
        transition.update(ms(116)).unwrap();

        assert!(transition.progress() > 1.0);
        assert!(transition.is_done());
    }

    #[test]
    fn restart_clears_completion() {
        let mut transition = attached(TransitionMode::Exit, 10);
        transition.start(ms(0));
        transition.update(ms(10)).unwrap();
        assert!(transition.is_done());

        transition.start(ms(500));
        assert!(!transition.is_done());
        assert_eq!(transition.start_time(), Duration::from_millis(500));

        transition.update(ms(505)).unwrap();
        assert!(!transition.is_done());
    }

    #[test]
    fn zero_lifespan_completes_immediately() {
        let mut exit = attached(TransitionMode::Exit, 0);
        exit.start(ms(5));
        exit.update(ms(5)).unwrap();
        assert!(exit.is_done());
        assert_eq!(exit.progress(), 1.0);

        let mut entry = attached(TransitionMode::Entry, 0);
        entry.start(ms(5));
        entry.update(ms(5)).unwrap();
        assert!(entry.is_done());
        assert_eq!(entry.progress(), 0.0);
    }

    #[test]
    fn progress_is_zero_before_first_start() {
        let transition = attached(TransitionMode::Exit, 100);
        assert_eq!(transition.progress(), 0.0);
        assert!(!transition.is_done());
    }

    //--- Mode -------------------------------------------------------------

    #[test]
    fn update_without_mode_is_argument_range_error() {
        let mut transition = Transition::fade(Color::BLACK, Duration::from_millis(100));
        transition.start(ms(0));

        assert_eq!(transition.update(ms(10)), Err(ScreenError::TransitionModeUnset));
        assert_eq!(transition.mode(), None);
    }

    #[test]
    fn fade_reports_fade_kind() {
        let transition = Transition::fade(Color::WHITE, Duration::from_secs(1));
        assert_eq!(transition.kind(), TransitionKind::Fade);
    }

    //--- Rendering --------------------------------------------------------

    #[test]
    fn draw_clamps_progress_for_the_effect() {
        let mut renderer = RecordingRenderer::new(4, 4);
        let mut transition = attached(TransitionMode::Exit, 100);
        transition.setup(&mut renderer);
        transition.start(ms(0));
        transition.update(ms(150)).unwrap();

        transition.draw(&mut renderer);

        match renderer.commands() {
            [DrawCommand::DrawTexture { tint, .. }] => assert_eq!(tint.a, 1.0),
            other => panic!("Expected one draw, got {:?}", other),
        }
    }
}
