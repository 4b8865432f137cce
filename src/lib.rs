//=========================================================================
// Lumen Engine Library Root
//
// This crate defines the public API surface of the Lumen Engine.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose `core` (input, scenes, window contract, game loop) for games
//   and for driving the loop headless
// - Keep the winit/gilrs integration (`platform`) private, apart from
//   the `Surface` render target scenes receive
//
// Typical usage:
// ```no_run
// use lumen_engine::prelude::*;
//
// fn main() -> Result<(), EngineError> {
//     EngineBuilder::new()
//         .build()
//         .init(|scenes| {
//             scenes.add_scene("main", SceneRegistration::of::<EmptyScene>());
//             scenes.change_scene("main");
//         })
//         .run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the backend-independent engine systems. Normal game
// code reaches it through the prelude.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit event loop, window and gamepad polling.
// `engine` defines the main entry point and initialization logic.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
pub use platform::Surface;
