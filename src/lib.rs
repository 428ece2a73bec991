//=========================================================================
// Aetheric Screens — Library Root
//
// Screen manager with timed entry/exit transitions, driven by a fixed-rate
// logic thread.
//
// Responsibilities:
// - Expose the screen system (`core::screen`, `core::transition`)
// - Expose the runtime facade (`Engine`, `EngineBuilder`)
// - Keep the windowing layer (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use aetheric_screens::prelude::*;
//
// fn main() {
//     EngineBuilder::<&'static str, RecordingRenderer>::new()
//         .build(RecordingRenderer::default())
//         .init(|manager| { /* register screens */ })
//         .run();
// }
// ```
//
// Hosts with their own loop can skip the engine and drive a
// `ScreenManager` directly with `update`/`draw`.
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the screen system and its supporting types. `prelude`
// re-exports what screen implementations usually need.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and event loop. `engine` wires the
// platform to the logic thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
