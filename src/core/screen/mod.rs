//=========================================================================
// Screen System
//=========================================================================
//
// Manages mutually exclusive screens and the handoff between them.
//
// Architecture:
//   ScreenManager
//     ├─ screens: HashMap<K, ScreenSlot<K>>
//     │     └─ ScreenSlot { Box<dyn Screen<K>>, Phase, entry, exit }
//     ├─ current / outgoing: Option<K>
//     └─ history: HistoryLog<K>
//
// Flow:
//   update() → outgoing.update_internal() → current.update_internal()
//            → apply ScreenContext.requests (RequestQueue<K>, one per tick)
//   draw()   → outgoing.draw_internal()   → current.draw_internal()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::render::RenderBackend;
use crate::core::time::GameTime;

//=== Module Declarations =================================================

mod manager;
mod phase;
mod request_queue;
mod slot;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use manager::{ScreenManager, DEFAULT_HISTORY_DEPTH};
pub use phase::Phase;
pub use request_queue::{RequestQueue, ScreenRequest};
pub use slot::ScreenSlot;

//=== Screen Key Trait ====================================================

/// Marker trait for screen identifiers.
///
/// Keys uniquely identify screens in the ScreenManager's HashMap.
/// Typically implemented by game-specific enums; string keys work out of
/// the box.
pub trait ScreenKey: Clone + Eq + Hash + Debug + Send + 'static {}

impl ScreenKey for &'static str {}
impl ScreenKey for String {}

//=== ScreenContext =======================================================

/// Per-tick data handed to screen update hooks.
///
/// Hooks read the tick time here and queue screen changes through
/// `requests`; the manager applies them once the tick's dispatch is done.
#[derive(Debug)]
pub struct ScreenContext<K: ScreenKey> {
    /// Time of the tick being dispatched.
    pub time: GameTime,

    /// Screen changes requested during this tick.
    pub requests: RequestQueue<K>,
}

impl<K: ScreenKey> ScreenContext<K> {
    pub fn new(time: GameTime) -> Self {
        Self {
            time,
            requests: RequestQueue::new(),
        }
    }
}

//=== Screen Trait ========================================================

/// Behavior of a single screen (menu, level, loading view...).
///
/// Screens are wrapped in a [`ScreenSlot`] and registered with a
/// [`ScreenManager`], which calls exactly one update hook and one draw hook
/// per tick depending on the slot's [`Phase`].
///
/// # Minimal Implementation
///
/// Only `update()` and `draw()` are required. Lifecycle and transition
/// hooks have default empty implementations:
///
/// ```rust
/// # use aetheric_screens::prelude::*;
/// struct TitleScreen;
///
/// impl Screen<&'static str> for TitleScreen {
///     fn update(&mut self, ctx: &mut ScreenContext<&'static str>) {
///         // ctx.requests.change_to("level_1");
///     }
///
///     fn draw(&mut self, _time: GameTime, _renderer: &mut dyn RenderBackend) {}
/// }
/// ```
pub trait Screen<K: ScreenKey>: Send {
    /// One-time setup. Called by [`ScreenManager::initialize`] or at
    /// registration when auto-initialize is requested.
    fn initialize(&mut self) {}

    /// Called each time the screen becomes current.
    fn load(&mut self) {}

    /// Called once the screen has fully left (or is removed).
    fn unload(&mut self) {}

    /// Called every tick while the screen is [`Phase::Active`].
    fn update(&mut self, ctx: &mut ScreenContext<K>);

    /// Called every tick while the screen is [`Phase::TransitioningIn`].
    fn transition_in_update(&mut self, _ctx: &mut ScreenContext<K>) {}

    /// Called every tick while the screen is [`Phase::TransitioningOut`].
    fn transition_out_update(&mut self, _ctx: &mut ScreenContext<K>) {}

    /// Draws the screen while [`Phase::Active`].
    fn draw(&mut self, time: GameTime, renderer: &mut dyn RenderBackend);

    /// Draws the screen underneath its entry transition.
    fn transition_in_draw(&mut self, _time: GameTime, _renderer: &mut dyn RenderBackend) {}

    /// Draws the screen underneath its exit transition.
    fn transition_out_draw(&mut self, _time: GameTime, _renderer: &mut dyn RenderBackend) {}

    /// Releases custom resources. Called once, at the end of disposal.
    fn teardown(&mut self) {}
}
