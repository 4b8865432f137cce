//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit + gilrs) with the game loop.
//
// This module defines the contract between platform implementations and
// core logic, so the game loop can be driven by any backend that feeds
// `PlatformEvent`s into a channel, including tests.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side event collection and buffering
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::EventCollector;
pub use event_collector::TickControl;
pub use interface::{EngineError, PlatformEvent};
