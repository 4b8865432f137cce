//=========================================================================
// Core Systems
//=========================================================================
//
// Backend-independent engine systems: configuration, input tracking,
// scenes, the window contract and the per-tick game loop.
//
// Responsibilities:
// - Track keyboard, mouse and joystick input with tick accuracy
// - Run the scene lifecycle state machine (exit → swap → enter)
// - Orchestrate one tick: clean, input, update, render, present
//
// Notes:
// Nothing in `core` depends on winit or gilrs. The platform layer feeds
// decoded `PlatformEvent`s through a crossbeam channel, which lets tests
// drive the whole loop headless.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod context;
pub mod frame_limiter;
pub mod game_loop;
pub mod input;
pub mod platform_bridge;
pub mod scene;
pub mod window;

//=== Public API ==========================================================

pub use config::{Color, GameConfig, Size, WindowConfig};
pub use context::GameContext;
pub use frame_limiter::FrameLimiter;
pub use game_loop::GameLoop;
pub use window::{Window, WindowState};
