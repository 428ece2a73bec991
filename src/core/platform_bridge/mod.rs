//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the core tick loop.
//
// The platform thread only ever talks to the core through these types, so
// the windowing backend can change without touching the screen system.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side event draining and resize coalescing
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent};
pub use interface::WindowHandle;
