//=========================================================================
// Winit Window
//=========================================================================
//
// `Window` implementation over a winit window.
//
// Sizing decisions go through `WindowState`; this type only applies the
// accepted ones to the OS window. Scenes render into a `Surface`, which
// exposes the raw winit window and the color of the current frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};
use winit::{
    dpi::PhysicalSize,
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window as OsWindow, WindowAttributes},
};

//=== Internal Dependencies ===============================================

use crate::core::config::{Color, Size, WindowConfig};
use crate::core::platform_bridge::EngineError;
use crate::core::window::{Window, WindowState};

//=== Surface =============================================================

/// Render target handed to scenes by the winit backend.
///
/// Nothing is drawn by the engine itself. Scenes (or a renderer they
/// own) draw into [`Surface::window`] and clear with
/// [`Surface::clear_color`].
pub struct Surface {
    window: OsWindow,
    clear_color: Color,
}

impl Surface {
    /// The underlying winit window (for renderers and title updates).
    pub fn window(&self) -> &OsWindow {
        &self.window
    }

    /// Color the current frame was cleaned with.
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Inner size in physical pixels.
    pub fn size(&self) -> Size {
        let size = self.window.inner_size();
        Size::new(size.width, size.height)
    }
}

//=== WinitWindow =========================================================

pub(crate) struct WinitWindow {
    surface: Surface,
    state: WindowState,
}

impl WinitWindow {
    /// Creates the OS window described by `config`.
    pub(crate) fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, EngineError> {
        let monitor_sizes: Vec<Size> = event_loop
            .available_monitors()
            .map(|monitor| {
                let size = monitor.size();
                Size::new(size.width, size.height)
            })
            .collect();
        let state = WindowState::new(config, &monitor_sizes);

        let mut attrs = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(to_physical(state.current_size()))
            .with_resizable(config.can_resize);
        if state.is_fullscreen() {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| EngineError::WindowCreation(e.to_string()))?;

        info!(
            target: "platform",
            "Window created: {} @ {}x DPI (fullscreen: {})",
            state.current_size(),
            window.scale_factor(),
            state.is_fullscreen()
        );

        Ok(Self {
            surface: Surface {
                window,
                clear_color: Color::default(),
            },
            state,
        })
    }

    /// Schedules the next `RedrawRequested`.
    pub(crate) fn request_redraw(&self) {
        self.surface.window.request_redraw();
    }
}

fn to_physical(size: Size) -> PhysicalSize<u32> {
    PhysicalSize::new(size.width, size.height)
}

//=== Window Implementation ===============================================

impl Window for WinitWindow {
    type Target = Surface;

    fn display(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn clean(&mut self, color: Color) {
        self.surface.clear_color = color;
    }

    fn present(&mut self) {
        self.surface.window.pre_present_notify();
        self.surface.window.request_redraw();
    }

    fn toggle_fullscreen(&mut self) -> bool {
        if !self.state.toggle_fullscreen() {
            return false;
        }

        let window = &self.surface.window;
        if self.state.is_fullscreen() {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        } else {
            window.set_fullscreen(None);
            let _ = window.request_inner_size(to_physical(self.state.current_size()));
        }
        true
    }

    fn change_size(&mut self, size: Size) -> bool {
        let was_fullscreen = self.state.is_fullscreen();
        if !self.state.change_size(size) {
            return false;
        }

        let window = &self.surface.window;
        if was_fullscreen {
            window.set_fullscreen(None);
        }
        // Applied later on some platforms; the `Resized` event confirms it.
        let _ = window.request_inner_size(to_physical(size));
        true
    }

    fn current_size(&self) -> Size {
        self.state.current_size()
    }

    fn display_size(&self) -> Size {
        self.state.display_size()
    }

    fn is_fullscreen(&self) -> bool {
        self.state.is_fullscreen()
    }

    fn set_title(&mut self, title: &str) {
        self.surface.window.set_title(title);
    }

    fn notify_resized(&mut self, size: Size) {
        if self.state.notify_resized(size) {
            debug!(target: "platform", "Window resized by platform to {}", size);
        }
    }
}
