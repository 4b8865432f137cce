//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use lumen_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::platform::Surface;
pub use crate::core::platform_bridge::EngineError;

// Configuration and window
pub use crate::core::config::{Color, GameConfig, Size};
pub use crate::core::window::Window;

// Game context
pub use crate::core::context::GameContext;

// Input system
pub use crate::core::input::{
    GamepadAxis, GamepadButton, InputQuery, KeyCode, Modifiers, MouseButton,
};

// Scene system
pub use crate::core::scene::{
    EmptyScene, Scene, SceneManager, SceneManagerHandle, SceneRegistration, TransitionPhase,
};
