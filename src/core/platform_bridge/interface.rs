//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Defines the contract between the platform layer and the game loop.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::config::Size;
use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform layer to the game loop.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    /// Batched input events for a frame.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// The window was resized by the platform.
    Resized(Size),

    /// Window close requested.
    ///
    /// For drivers that own no event loop. The winit platform marks the
    /// context as quitting directly instead, since a bounded channel may
    /// be full.
    WindowClosed,
}

//=== EngineError =========================================================

/// Engine initialization and runtime errors.
#[derive(Debug)]
pub enum EngineError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop execution error.
    EventLoopExecution(String),

    /// The window could not be created.
    WindowCreation(String),

    /// `run` was called without any scene started.
    NoActiveScene,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::NoActiveScene => write!(f, "No active scene: call change_scene before run"),
        }
    }
}

impl std::error::Error for EngineError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            EngineError::WindowCreation(String::from("no display")).to_string(),
            "Window creation failed: no display"
        );
        assert!(EngineError::NoActiveScene.to_string().contains("change_scene"));
    }
}
