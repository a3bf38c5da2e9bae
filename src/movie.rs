use serde::{Deserialize, Serialize};

use crate::watchmode::SearchResult;

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub year: String,
    pub streaming: Vec<String>,
}

/// Placeholder poster carrying the title as its caption.
pub fn placeholder_poster(title: &str) -> String {
    format!("{}?text={}", PLACEHOLDER_POSTER, urlencoding::encode(title))
}

impl From<SearchResult> for Movie {
    fn from(result: SearchResult) -> Self {
        let poster = result
            .image_url
            .unwrap_or_else(|| placeholder_poster(&result.title));

        Movie {
            id: result.id,
            poster,
            year: result.year.unwrap_or_else(|| "Unknown".to_string()),
            title: result.title,
            streaming: Vec::new(),
        }
    }
}

pub fn to_movies(results: Vec<SearchResult>) -> Vec<Movie> {
    results.into_iter().map(Movie::from).collect()
}
