//=========================================================================
// Game Configuration
//=========================================================================
//
// Plain configuration values produced by `EngineBuilder` and read by the
// window backend, the frame limiter and scenes (via `GameContext`).
//
//=========================================================================

use std::fmt;

//=== Size ================================================================

/// Pixel dimensions of a window or render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` if either dimension is zero (e.g. a minimized window).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

//=== WindowConfig ========================================================

/// Window creation and sizing policy.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Initial windowed size.
    pub window_size: Size,

    /// Extra sizes offered besides the monitor modes.
    pub available_sizes: Vec<Size>,

    pub title: String,
    pub start_fullscreen: bool,

    /// Whether `toggle_fullscreen` is honored.
    pub can_fullscreen: bool,

    /// Whether arbitrary `change_size` requests are honored.
    pub can_resize: bool,

    /// Ratio between the window and the render surface (1.0 = same size).
    pub scale_factor: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: Size::new(800, 600),
            available_sizes: Vec::new(),
            title: String::from("Lumen"),
            start_fullscreen: false,
            can_fullscreen: true,
            can_resize: false,
            scale_factor: 1.0,
        }
    }
}

//=== GameConfig ==========================================================

/// Complete runtime configuration.
///
/// # Default Values
///
/// - **TPS**: 60.0
/// - **Channel capacity**: 128 events
/// - **Clean color**: black
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window: WindowConfig,

    /// Color the window is cleared to before each tick renders.
    pub clean_color: Color,

    /// Target ticks per second, `None` for an unlimited frame rate.
    pub target_tps: Option<f64>,

    /// Capacity of the platform → core event channel.
    pub channel_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clean_color: Color::BLACK,
            target_tps: Some(60.0),
            channel_capacity: 128,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();

        assert_eq!(config.target_tps, Some(60.0));
        assert_eq!(config.channel_capacity, 128);
        assert_eq!(config.window.window_size, Size::new(800, 600));
        assert!(config.window.can_fullscreen);
        assert!(!config.window.can_resize);
    }

    #[test]
    fn size_helpers() {
        assert!(Size::new(0, 600).is_empty());
        assert!(!Size::new(1, 1).is_empty());
        assert_eq!(Size::from((640, 480)).to_string(), "640x480");
    }

    #[test]
    fn color_with_alpha() {
        assert_eq!(Color::WHITE.with_alpha(10), Color::rgba(255, 255, 255, 10));
    }
}
