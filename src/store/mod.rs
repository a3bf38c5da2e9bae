pub mod favorites;
pub mod theme;

pub use favorites::{Favorites, FavoritesAction};
pub use theme::{Theme, ThemeAction};

/// A state value with a pure transition function.
pub trait Reducer: Default {
    type Action;

    fn reduce(self, action: Self::Action) -> Self;
}

/// Owns one reducer state. Handlers get a store handed to them; there is no
/// global instance.
#[derive(Debug, Clone, Default)]
pub struct Store<S: Reducer> {
    state: S,
}

impl<S: Reducer> Store<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn dispatch(&mut self, action: S::Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }
}
