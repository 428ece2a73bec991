//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_screens::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Screen system
pub use crate::core::screen::{
    Phase, RequestQueue, Screen, ScreenContext, ScreenKey, ScreenManager, ScreenRequest, ScreenSlot,
};

// Transitions
pub use crate::core::transition::{FadeEffect, Transition, TransitionEffect, TransitionKind};

// Rendering and time
pub use crate::core::render::{Color, RecordingRenderer, Rect, RenderBackend, TextureId, Viewport};
pub use crate::core::time::GameTime;

// Errors
pub use crate::core::error::{ErrorKind, ScreenError};
