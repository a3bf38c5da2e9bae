use askama::Template;

use super::search_view::{Grid, SearchView, ViewStatus};
use crate::store::{Favorites, Store, Theme};

pub struct Card {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub year: String,
    pub favorite: bool,
    pub toggle_path: String,
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub theme: &'static str,
    pub theme_label: &'static str,
    pub query: String,
    pub message: Option<String>,
    pub error: bool,
    pub loading: bool,
    pub skeletons: Vec<usize>,
    pub cards: Vec<Card>,
    pub favorite_count: usize,
}

impl PageTemplate {
    pub fn new(view: &SearchView, favorites: &Store<Favorites>, theme: &Store<Theme>) -> Self {
        let (loading, skeletons, cards): (bool, Vec<usize>, Vec<Card>) = match view.grid() {
            Grid::Skeletons(n) => (true, (0..n).collect(), Vec::new()),
            Grid::Movies(movies) => {
                let cards = movies
                    .iter()
                    .map(|movie| Card {
                        id: movie.id.clone(),
                        title: movie.title.clone(),
                        poster: movie.poster.clone(),
                        year: movie.year.clone(),
                        favorite: favorites.is_favorite(&movie.id),
                        toggle_path: format!("/favorites/{}", urlencoding::encode(&movie.id)),
                    })
                    .collect();
                (false, Vec::new(), cards)
            }
        };

        let theme = theme.theme();
        Self {
            theme: theme.as_str(),
            theme_label: match theme {
                Theme::Light => "Dark mode",
                Theme::Dark => "Light mode",
            },
            query: view.query().to_string(),
            message: view.message(),
            error: view.status() == ViewStatus::Error,
            loading,
            skeletons,
            cards,
            favorite_count: favorites.state().len(),
        }
    }
}
