use std::collections::BTreeSet;

use super::{Reducer, Store};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    Add(String),
    Remove(String),
}

impl Favorites {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl Reducer for Favorites {
    type Action = FavoritesAction;

    fn reduce(mut self, action: FavoritesAction) -> Self {
        match action {
            FavoritesAction::Add(id) => {
                self.ids.insert(id);
            }
            FavoritesAction::Remove(id) => {
                self.ids.remove(&id);
            }
        }
        self
    }
}

impl Store<Favorites> {
    pub fn add_favorite(&mut self, id: impl Into<String>) {
        self.dispatch(FavoritesAction::Add(id.into()));
    }

    pub fn remove_favorite(&mut self, id: impl Into<String>) {
        self.dispatch(FavoritesAction::Remove(id.into()));
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state().contains(id)
    }

    /// Remove if present, add otherwise. Returns the new membership.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        if self.is_favorite(id) {
            self.remove_favorite(id);
            false
        } else {
            self.add_favorite(id);
            true
        }
    }
}
