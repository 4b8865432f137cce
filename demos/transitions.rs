//=========================================================================
// Transitions Demo
//=========================================================================
//
// Two scenes that fade in and out of each other.
//
// Controls:
//   Space   switch scene
//   F11     toggle fullscreen
//   Escape  quit
//
// The fade progress is shown in the window title.
//
// Run with: RUST_LOG=debug cargo run --example transitions
//
//=========================================================================

use lumen_engine::prelude::*;

//=== Fade ================================================================

const FADE_SECONDS: f32 = 0.6;

/// Scene with timed enter/exit fades.
struct FadeScene {
    label: &'static str,
    next: &'static str,
    manager: Option<SceneManagerHandle>,
    fade: f32,
    shown_percent: Option<u32>,
}

impl FadeScene {
    fn new(label: &'static str, next: &'static str) -> Self {
        Self {
            label,
            next,
            manager: None,
            fade: 0.0,
            shown_percent: None,
        }
    }

    fn advance(&mut self, delta: f32) -> bool {
        self.fade = (self.fade + delta / FADE_SECONDS).min(1.0);
        self.fade >= 1.0
    }

    /// Updates the title only when the displayed percentage changes.
    fn show(&mut self, surface: &mut Surface, state: &str, percent: u32) {
        if self.shown_percent != Some(percent) {
            self.shown_percent = Some(percent);
            surface
                .window()
                .set_title(&format!("{} ({} {}%)", self.label, state, percent));
        }
    }
}

impl Scene<Surface> for FadeScene {
    fn attach_manager(&mut self, manager: SceneManagerHandle) {
        self.manager = Some(manager);
    }

    fn update(&mut self, _delta: f32, context: &mut GameContext<Surface>) {
        if context.keyboard.just_pressed(KeyCode::Escape) {
            context.quit();
        }
        if context.keyboard.just_pressed(KeyCode::F11) {
            let changed = context.window.toggle_fullscreen();
            log::info!("Fullscreen toggled: {}", changed);
        }
        if context.keyboard.just_pressed(KeyCode::Space) {
            if let Some(manager) = &self.manager {
                manager.change_scene(self.next);
            }
        }
    }

    fn render(&mut self, surface: &mut Surface) {
        if self.shown_percent.is_some() && self.fade >= 1.0 {
            self.shown_percent = None;
            surface.window().set_title(self.label);
        }
    }

    fn on_enter_update(&mut self, delta: f32, _context: &mut GameContext<Surface>) -> bool {
        let done = self.advance(delta);
        if done {
            log::debug!("{} entered", self.label);
        }
        done
    }

    fn on_exit_update(&mut self, delta: f32, _context: &mut GameContext<Surface>) -> bool {
        if self.fade >= 1.0 {
            self.fade = 0.0;
        }
        self.advance(delta)
    }

    fn on_enter_render(&mut self, surface: &mut Surface) {
        let percent = (self.fade * 100.0) as u32;
        self.show(surface, "fading in", percent);
    }

    fn on_exit_render(&mut self, surface: &mut Surface) {
        let percent = 100 - (self.fade * 100.0) as u32;
        self.show(surface, "fading out", percent);
    }
}

//=== Main ================================================================

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    EngineBuilder::new()
        .with_title("Lumen Transitions")
        .with_window_size(960, 540)
        .with_clean_color(Color::rgb(24, 24, 32))
        .with_resizable(true)
        .build()
        .init(|scenes| {
            scenes.add_scene("menu", SceneRegistration::new(|| FadeScene::new("Menu", "level")));
            scenes.add_scene("level", SceneRegistration::new(|| FadeScene::new("Level", "menu")));
            scenes.change_scene("menu");
        })
        .run()
}
