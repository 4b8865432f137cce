//=========================================================================
// Lumen Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                          │                    │
//         ├─ with_tps()              └─ owns the          └─ runs platform
//         ├─ with_title()               SceneManager         (window + ticks)
//         └─ with_window_size()                              blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::config::{Color, GameConfig, Size};
use crate::core::platform_bridge::EngineError;
use crate::core::scene::SceneManager;
use crate::platform::{Platform, Surface};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (ticks per second, one tick per frame)
/// - **Channel capacity**: 128 events
/// - **Window**: 800x600, titled "Lumen", windowed, not resizable
/// - **Clean color**: black
///
/// # Examples
///
/// ```no_run
/// use lumen_engine::prelude::*;
///
/// EngineBuilder::new()
///     .with_title("Demo")
///     .with_window_size(1280, 720)
///     .with_tps(120.0)
///     .build()
///     .init(|scenes| {
///         scenes.add_scene("main", SceneRegistration::of::<EmptyScene>());
///         scenes.change_scene("main");
///     })
///     .run()
///     .expect("engine failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: GameConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target ticks per second.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.target_tps = Some(tps);
        self
    }

    /// Runs one tick per redraw without sleeping.
    pub fn without_frame_limit(mut self) -> Self {
        self.config.target_tps = None;
        self
    }

    /// Sets the channel capacity for platform → game loop communication.
    ///
    /// Input and resize events sent while the channel is full are dropped.
    /// Window close requests do not use the channel.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.window.title = title.into();
        self
    }

    /// Sets the initial windowed size, in physical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.window.window_size = Size::new(width, height);
        self
    }

    /// Extra selectable sizes, merged with the monitor modes.
    pub fn with_available_sizes(mut self, sizes: impl IntoIterator<Item = Size>) -> Self {
        self.config.window.available_sizes = sizes.into_iter().collect();
        self
    }

    /// Color the window is cleaned with at the start of every tick.
    pub fn with_clean_color(mut self, color: Color) -> Self {
        self.config.clean_color = color;
        self
    }

    /// Starts in fullscreen (ignored when fullscreen is not allowed).
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.config.window.start_fullscreen = fullscreen;
        self
    }

    /// Lets the window be resized freely, by the user and by `change_size`.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.config.window.can_resize = resizable;
        self
    }

    pub fn with_fullscreen_allowed(mut self, allowed: bool) -> Self {
        self.config.window.can_fullscreen = allowed;
        self
    }

    /// Builds the engine with an empty scene registry.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {:?}, channel: {}, window: {})",
            self.config.target_tps,
            self.config.channel_capacity,
            self.config.window.window_size
        );

        Engine {
            config: self.config,
            scene_manager: SceneManager::new(),
        }
    }
}

//=== Engine ==============================================================

/// Lumen Engine runtime.
///
/// Create via [`EngineBuilder`], register and start scenes in
/// [`Engine::init`], then call [`Engine::run`].
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   └─► Platform (winit event loop)
///         ├─► Window, keyboard/mouse, gilrs gamepads
///         └─► GameLoop::tick on every redraw
///               └─► SceneManager → active Scene
/// ```
pub struct Engine {
    config: GameConfig,
    scene_manager: SceneManager<Surface>,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Registers scenes and starts the first one.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use lumen_engine::prelude::*;
    /// EngineBuilder::new()
    ///     .build()
    ///     .init(|scenes| {
    ///         scenes.add_scene("menu", SceneRegistration::of::<EmptyScene>());
    ///         scenes.change_scene("menu");
    ///     });
    /// ```
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut SceneManager<Surface>),
    {
        info!("Initializing scenes");

        init_fn(&mut self.scene_manager);

        info!(
            "Scene initialization complete ({} registered, active: {:?})",
            self.scene_manager.scenes_names().len(),
            self.scene_manager.active_scene_name()
        );
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene_manager(&self) -> &SceneManager<Surface> {
        &self.scene_manager
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and runs the game until it quits or is closed.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NoActiveScene`] if no scene was started in `init`
    /// - platform errors (event loop or window creation)
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on macOS/iOS (winit requirement).
    pub fn run(self) -> Result<(), EngineError> {
        if !self.scene_manager.has_active_scene() {
            error!("Engine run without an active scene");
            return Err(EngineError::NoActiveScene);
        }

        info!("Starting engine runtime (TPS: {:?})", self.config.target_tps);

        let platform = Platform::new(self.config, self.scene_manager);
        let result = platform.run();

        match &result {
            Ok(()) => info!("Engine shutdown complete"),
            Err(e) => error!("Platform error: {}", e),
        }
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{EmptyScene, SceneRegistration};

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.config.target_tps, Some(60.0));
        assert_eq!(builder.config.channel_capacity, 128);
        assert_eq!(builder.config.window.window_size, Size::new(800, 600));
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.config.target_tps, Some(120.0));
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    fn builder_without_frame_limit() {
        let builder = EngineBuilder::new().with_tps(30.0).without_frame_limit();
        assert_eq!(builder.config.target_tps, None);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.config.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_window_options() {
        let engine = EngineBuilder::new()
            .with_title("Lumen Test")
            .with_window_size(640, 360)
            .with_available_sizes([Size::new(1280, 720)])
            .with_clean_color(Color::WHITE)
            .with_fullscreen(true)
            .with_resizable(true)
            .with_fullscreen_allowed(false)
            .build();

        let config = engine.config();
        assert_eq!(config.window.title, "Lumen Test");
        assert_eq!(config.window.window_size, Size::new(640, 360));
        assert_eq!(config.window.available_sizes, vec![Size::new(1280, 720)]);
        assert_eq!(config.clean_color, Color::WHITE);
        assert!(config.window.start_fullscreen);
        assert!(config.window.can_resize);
        assert!(!config.window.can_fullscreen);
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_registers_and_starts_scenes() {
        let engine = EngineBuilder::new().build().init(|scenes| {
            scenes.add_scene("main", SceneRegistration::of::<EmptyScene>());
            scenes.change_scene("main");
        });

        assert!(engine.scene_manager().has_scene("main"));
        assert_eq!(engine.scene_manager().active_scene_name(), Some("main"));
    }

    #[test]
    fn run_without_active_scene_fails_before_opening_a_window() {
        let engine = EngineBuilder::new().build().init(|scenes| {
            scenes.add_scene("main", SceneRegistration::of::<EmptyScene>());
        });

        assert!(matches!(engine.run(), Err(EngineError::NoActiveScene)));
    }
}
