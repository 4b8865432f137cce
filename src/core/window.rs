//=========================================================================
// Window Contract
//=========================================================================
//
// The game loop only talks to the window through the `Window` trait, so
// the core stays independent of the windowing backend and can be driven
// headless in tests.
//
// `WindowState` holds the backend-independent sizing policy: the list of
// selectable sizes, fullscreen bookkeeping and the resize rules. Backends
// consult it and only apply what it accepts.
//
//=========================================================================

use log::{debug, warn};

use crate::core::config::{Color, Size, WindowConfig};

//=== Window Trait ========================================================

/// Collaborator contract between the game loop and a window backend.
///
/// `Target` is what scenes render into. The winit backend hands out its
/// [`Surface`](crate::Surface); tests can use any type.
pub trait Window {
    /// Render target handed to scenes.
    type Target;

    /// Render target for the current tick.
    fn display(&mut self) -> &mut Self::Target;

    /// Clears the frame to `color` before scenes render.
    ///
    /// The winit backend does no drawing of its own: it records `color`
    /// for the renderer to read back through `Surface::clear_color`.
    fn clean(&mut self, color: Color);

    /// Presents the rendered frame.
    ///
    /// For the winit backend this only signals the compositor and asks
    /// for the next redraw.
    fn present(&mut self);

    /// Switches between fullscreen and the previous windowed size.
    ///
    /// Returns `true` iff the mode changed. Returns `false` when
    /// fullscreen is disabled by configuration.
    fn toggle_fullscreen(&mut self) -> bool;

    /// Requests a new window size. Returns `true` iff the size changed.
    fn change_size(&mut self, size: Size) -> bool;

    /// Window size in physical pixels.
    fn current_size(&self) -> Size;

    /// Size of the render target; equals the window size unless the
    /// backend renders to a scaled intermediate surface.
    fn display_size(&self) -> Size {
        self.current_size()
    }

    fn is_fullscreen(&self) -> bool;

    fn set_title(&mut self, title: &str);

    /// Called when the platform reports that the window was resized.
    fn notify_resized(&mut self, size: Size);
}

//=== WindowState =========================================================

/// Backend-independent window sizing policy.
///
/// # Size List
///
/// Monitor sizes, configured extra sizes and the configured window size
/// are merged, deduplicated and sorted by width (largest first). The
/// first entry is the size used for fullscreen.
///
/// # Resize Rules
///
/// - `can_resize`: every `change_size` request is honored.
/// - otherwise: only the configured window size or the fullscreen size,
///   and only when fullscreen is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    sizes: Vec<Size>,
    configured: Size,
    current: Size,
    previous: Size,
    fullscreen: bool,
    can_fullscreen: bool,
    can_resize: bool,
    scale_factor: f32,
}

impl WindowState {
    /// Builds the sizing state from configuration and the monitor modes.
    pub fn new(config: &WindowConfig, monitor_sizes: &[Size]) -> Self {
        let mut sizes: Vec<Size> = monitor_sizes
            .iter()
            .chain(config.available_sizes.iter())
            .chain(std::iter::once(&config.window_size))
            .copied()
            .filter(|size| !size.is_empty())
            .collect();
        sizes.sort_by(|a, b| b.width.cmp(&a.width).then(b.height.cmp(&a.height)));
        sizes.dedup();
        if sizes.is_empty() {
            sizes.push(config.window_size);
        }

        let fullscreen = config.start_fullscreen && config.can_fullscreen;
        let current = if fullscreen {
            sizes[0]
        } else {
            config.window_size
        };

        Self {
            sizes,
            configured: config.window_size,
            current,
            previous: config.window_size,
            fullscreen,
            can_fullscreen: config.can_fullscreen,
            can_resize: config.can_resize,
            scale_factor: config.scale_factor.max(1.0),
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Selectable sizes, largest first.
    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    /// Size used when fullscreen.
    pub fn fullscreen_size(&self) -> Size {
        self.sizes[0]
    }

    pub fn current_size(&self) -> Size {
        self.current
    }

    /// Size the window returns to when leaving fullscreen.
    pub fn previous_size(&self) -> Size {
        self.previous
    }

    /// Window size divided by the configured scale factor.
    pub fn display_size(&self) -> Size {
        Size::new(
            (self.current.width as f32 / self.scale_factor) as u32,
            (self.current.height as f32 / self.scale_factor) as u32,
        )
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    //--- Policy -----------------------------------------------------------

    /// Whether a windowed resize to `size` is permitted.
    pub fn can_change_to(&self, size: Size) -> bool {
        self.can_resize
            || (self.can_fullscreen && (size == self.configured || size == self.fullscreen_size()))
    }

    /// Applies a windowed resize. Returns `true` iff the state changed.
    pub fn change_size(&mut self, size: Size) -> bool {
        if !self.can_change_to(size) {
            warn!("Window resize to {size} refused by configuration");
            return false;
        }
        if size == self.current && !self.fullscreen {
            return false;
        }

        debug!("Window size {} -> {}", self.current, size);
        self.previous = self.current;
        self.current = size;
        self.fullscreen = false;
        true
    }

    /// Enters fullscreen at the largest size, or returns to the previous
    /// windowed size. Returns `true` iff the mode changed.
    pub fn toggle_fullscreen(&mut self) -> bool {
        if !self.can_fullscreen {
            debug!("Fullscreen toggle ignored: disabled by configuration");
            return false;
        }

        if self.fullscreen {
            let windowed = self.previous;
            self.previous = self.current;
            self.current = windowed;
        } else {
            self.previous = self.current;
            self.current = self.fullscreen_size();
        }
        self.fullscreen = !self.fullscreen;
        debug!("Fullscreen: {} ({})", self.fullscreen, self.current);
        true
    }

    /// Records a size reported by the platform (user drag, OS snap).
    ///
    /// Returns `true` iff the size differs from the tracked one.
    pub fn notify_resized(&mut self, size: Size) -> bool {
        if size.is_empty() || size == self.current {
            return false;
        }
        self.current = size;
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    const MONITOR: Size = Size::new(1920, 1080);

    fn config(can_resize: bool, can_fullscreen: bool) -> WindowConfig {
        WindowConfig {
            window_size: Size::new(800, 600),
            available_sizes: vec![Size::new(1280, 720), Size::new(800, 600)],
            can_resize,
            can_fullscreen,
            ..WindowConfig::default()
        }
    }

    //=====================================================================
    // Size List Tests
    //=====================================================================

    #[test]
    fn sizes_merged_sorted_and_deduplicated() {
        let state = WindowState::new(&config(false, true), &[MONITOR]);

        assert_eq!(
            state.sizes(),
            &[MONITOR, Size::new(1280, 720), Size::new(800, 600)]
        );
        assert_eq!(state.fullscreen_size(), MONITOR);
        assert_eq!(state.current_size(), Size::new(800, 600));
        assert!(!state.is_fullscreen());
    }

    #[test]
    fn start_fullscreen_uses_largest_size() {
        let mut cfg = config(false, true);
        cfg.start_fullscreen = true;
        let state = WindowState::new(&cfg, &[MONITOR]);

        assert!(state.is_fullscreen());
        assert_eq!(state.current_size(), MONITOR);
    }

    #[test]
    fn start_fullscreen_ignored_when_disallowed() {
        let mut cfg = config(false, false);
        cfg.start_fullscreen = true;
        let state = WindowState::new(&cfg, &[MONITOR]);

        assert!(!state.is_fullscreen());
    }

    //=====================================================================
    // Resize Policy Tests
    //=====================================================================

    #[test]
    fn resize_refused_without_permission() {
        let mut state = WindowState::new(&config(false, true), &[MONITOR]);

        assert!(!state.change_size(Size::new(1280, 720)));
        assert_eq!(state.current_size(), Size::new(800, 600));
    }

    #[test]
    fn fullscreen_size_allowed_when_fullscreen_enabled() {
        let mut state = WindowState::new(&config(false, true), &[MONITOR]);

        assert!(state.change_size(MONITOR));
        assert_eq!(state.previous_size(), Size::new(800, 600));
        assert!(state.change_size(Size::new(800, 600)));
    }

    #[test]
    fn resize_refused_when_both_disabled() {
        let mut state = WindowState::new(&config(false, false), &[MONITOR]);

        assert!(!state.change_size(MONITOR));
    }

    #[test]
    fn resize_to_same_size_is_not_a_change() {
        let mut state = WindowState::new(&config(true, true), &[MONITOR]);

        assert!(!state.change_size(Size::new(800, 600)));
        assert!(state.change_size(Size::new(1024, 768)));
    }

    //=====================================================================
    // Fullscreen Toggle Tests
    //=====================================================================

    #[test]
    fn toggle_round_trips_to_previous_size() {
        let mut state = WindowState::new(&config(true, true), &[MONITOR]);
        state.change_size(Size::new(1280, 720));

        assert!(state.toggle_fullscreen());
        assert!(state.is_fullscreen());
        assert_eq!(state.current_size(), MONITOR);

        assert!(state.toggle_fullscreen());
        assert!(!state.is_fullscreen());
        assert_eq!(state.current_size(), Size::new(1280, 720));
    }

    #[test]
    fn toggle_disabled_returns_false() {
        let mut state = WindowState::new(&config(true, false), &[MONITOR]);

        assert!(!state.toggle_fullscreen());
        assert!(!state.is_fullscreen());
    }

    //=====================================================================
    // Platform Notifications
    //=====================================================================

    #[test]
    fn notify_resized_tracks_platform_size() {
        let mut state = WindowState::new(&config(false, true), &[MONITOR]);

        assert!(state.notify_resized(Size::new(1000, 700)));
        assert!(!state.notify_resized(Size::new(1000, 700)));
        assert!(!state.notify_resized(Size::new(0, 0)), "minimized");
        assert_eq!(state.current_size(), Size::new(1000, 700));
    }

    #[test]
    fn display_size_applies_scale_factor() {
        let mut cfg = config(false, true);
        cfg.scale_factor = 2.0;
        let state = WindowState::new(&cfg, &[MONITOR]);

        assert_eq!(state.display_size(), Size::new(400, 300));
    }
}
