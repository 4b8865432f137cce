//=========================================================================
// Scene Registration
//=========================================================================
//
// A registration is a factory: the manager builds a fresh scene from it
// every time the scene becomes active, and drops the instance once a
// transition away from it completes.
//
//=========================================================================

use std::fmt;
use std::rc::Rc;

use super::Scene;

//=== SceneRegistration ===================================================

type SceneFactory<T> = dyn Fn() -> Box<dyn Scene<T>>;

/// Factory for a named scene.
///
/// # Examples
///
/// ```rust
/// # use lumen_engine::prelude::*;
/// # use lumen_engine::core::scene::SceneRegistration;
/// #[derive(Default)]
/// struct Menu;
/// # impl<T> Scene<T> for Menu {
/// #     fn update(&mut self, _d: f32, _c: &mut GameContext<T>) {}
/// #     fn render(&mut self, _t: &mut T) {}
/// # }
/// struct Level { number: u32 }
/// # impl<T> Scene<T> for Level {
/// #     fn update(&mut self, _d: f32, _c: &mut GameContext<T>) {}
/// #     fn render(&mut self, _t: &mut T) {}
/// # }
///
/// let mut scenes = SceneManager::<()>::new();
/// scenes.add_scene("menu", SceneRegistration::of::<Menu>());
/// scenes.add_scene("level", SceneRegistration::with_args(|n: &u32| Level { number: *n }, 1));
/// ```
pub struct SceneRegistration<T> {
    factory: Rc<SceneFactory<T>>,
}

impl<T: 'static> SceneRegistration<T> {
    /// Registration built from a closure.
    pub fn new<S, F>(factory: F) -> Self
    where
        S: Scene<T> + 'static,
        F: Fn() -> S + 'static,
    {
        Self {
            factory: Rc::new(move || Box::new(factory()) as Box<dyn Scene<T>>),
        }
    }

    /// Registration whose closure receives the captured `args` on every
    /// instantiation.
    pub fn with_args<S, A, F>(factory: F, args: A) -> Self
    where
        S: Scene<T> + 'static,
        A: 'static,
        F: Fn(&A) -> S + 'static,
    {
        Self::new(move || factory(&args))
    }

    /// Registration that builds `S::default()`.
    pub fn of<S>() -> Self
    where
        S: Scene<T> + Default + 'static,
    {
        Self::new(S::default)
    }

    /// Builds a new scene instance.
    pub(crate) fn instantiate(&self) -> Box<dyn Scene<T>> {
        (self.factory)()
    }
}

//--- Trait Implementations -----------------------------------------------

impl<T> Clone for SceneRegistration<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for SceneRegistration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneRegistration").finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::GameContext;
    use std::cell::Cell;

    struct Counter;

    impl Scene<()> for Counter {
        fn update(&mut self, _delta: f32, _context: &mut GameContext<()>) {}
        fn render(&mut self, _target: &mut ()) {}
    }

    #[test]
    fn each_instantiation_calls_factory() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let registration = SceneRegistration::<()>::new(move || {
            seen.set(seen.get() + 1);
            Counter
        });

        registration.instantiate();
        registration.clone().instantiate();

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn with_args_passes_captured_arguments() {
        let built = Rc::new(Cell::new(0));
        let seen = Rc::clone(&built);
        let registration = SceneRegistration::<()>::with_args(
            move |start: &u32| {
                seen.set(*start);
                Counter
            },
            42,
        );

        registration.instantiate();
        assert_eq!(built.get(), 42);
    }
}
