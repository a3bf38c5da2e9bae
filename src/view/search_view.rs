use tracing::{debug, error};

use super::backend::SearchError;
use crate::movie::{to_movies, Movie};
use crate::watchmode::SearchResult;

/// Placeholders shown while a search is in flight.
pub const SKELETON_COUNT: usize = 6;
pub const SEARCH_FAILED: &str = "Failed to search movies. Please try again.";
pub const EMPTY_PROMPT: &str = "Start searching for movies";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Searching,
    Results,
    NoResults,
    Error,
}

/// Handed out by `submit`, given back to `complete`. Only the ticket of the
/// latest submit is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the grid area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grid<'a> {
    Skeletons(usize),
    Movies(&'a [Movie]),
}

/// The search page state machine:
/// idle -> searching -> results | no results | error, and back to
/// searching on every submit.
#[derive(Debug, Clone)]
pub struct SearchView {
    query: String,
    movies: Vec<Movie>,
    status: ViewStatus,
    generation: u64,
}

impl SearchView {
    pub fn new(initial: Vec<Movie>) -> Self {
        Self {
            query: String::new(),
            movies: initial,
            status: ViewStatus::Idle,
            generation: 0,
        }
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_idle(&self) -> bool {
        self.status == ViewStatus::Idle
    }

    pub fn loading(&self) -> bool {
        self.status == ViewStatus::Searching
    }

    /// Replace the listing shown before the first search. Ignored once a
    /// search has been submitted.
    pub fn show_initial(&mut self, movies: Vec<Movie>) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.movies = movies;
        true
    }

    /// Start a search. Blank input is rejected and leaves the view as is.
    pub fn submit(&mut self, input: &str) -> Option<SearchTicket> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }

        self.generation += 1;
        self.query = query.to_string();
        self.status = ViewStatus::Searching;

        Some(SearchTicket {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Apply the outcome of a search. Returns false when the ticket was
    /// superseded by a later submit, in which case nothing changes.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<SearchResult>, SearchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                query = %ticket.query,
                generation = ticket.generation,
                current = self.generation,
                "Discarding superseded search"
            );
            return false;
        }

        match outcome {
            Ok(results) => {
                self.movies = to_movies(results);
                self.status = if self.movies.is_empty() {
                    ViewStatus::NoResults
                } else {
                    ViewStatus::Results
                };
            }
            Err(e) => {
                error!(query = %ticket.query, error = %e, "Error searching movies");
                self.status = ViewStatus::Error;
            }
        }
        true
    }

    pub fn grid(&self) -> Grid<'_> {
        if self.loading() {
            Grid::Skeletons(SKELETON_COUNT)
        } else {
            Grid::Movies(&self.movies)
        }
    }

    /// Text shown above the grid, if any.
    pub fn message(&self) -> Option<String> {
        match self.status {
            ViewStatus::Searching => None,
            ViewStatus::Error => Some(SEARCH_FAILED.to_string()),
            ViewStatus::NoResults => Some(format!("No movies found for \"{}\"", self.query)),
            ViewStatus::Idle | ViewStatus::Results => {
                if self.movies.is_empty() && self.query.is_empty() {
                    Some(EMPTY_PROMPT.to_string())
                } else {
                    None
                }
            }
        }
    }
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, title: &str) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: title.to_string(),
            year: Some("2005".to_string()),
            kind: Some("movie".to_string()),
            result_type: Some("title".to_string()),
            image_url: None,
        }
    }

    fn initial() -> Vec<Movie> {
        to_movies(vec![result("1", "Alien")])
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut view = SearchView::new(initial());
        assert_eq!(view.submit(""), None);
        assert_eq!(view.submit("   \t"), None);
        assert_eq!(view.status(), ViewStatus::Idle);
        assert_eq!(view.movies(), initial().as_slice());
        assert_eq!(view.query(), "");
    }

    #[test]
    fn test_search_shows_results() {
        let mut view = SearchView::new(initial());
        let ticket = view.submit("  batman ").unwrap();
        assert_eq!(ticket.query(), "batman");
        assert!(view.loading());
        assert_eq!(view.grid(), Grid::Skeletons(SKELETON_COUNT));
        assert_eq!(view.message(), None);

        assert!(view.complete(ticket, Ok(vec![result("5", "Batman Begins")])));
        assert_eq!(view.status(), ViewStatus::Results);
        assert!(!view.loading());
        match view.grid() {
            Grid::Movies(movies) => {
                assert_eq!(movies.len(), 1);
                assert_eq!(movies[0].title, "Batman Begins");
                assert_eq!(movies[0].year, "2005");
            }
            other => panic!("unexpected grid {:?}", other),
        }
    }

    #[test]
    fn test_no_results_is_not_an_error() {
        let mut view = SearchView::default();
        let ticket = view.submit("zzzz").unwrap();
        view.complete(ticket, Ok(Vec::new()));
        assert_eq!(view.status(), ViewStatus::NoResults);
        assert_eq!(view.message().as_deref(), Some("No movies found for \"zzzz\""));
    }

    #[test]
    fn test_error_keeps_previous_movies() {
        let mut view = SearchView::new(initial());
        let ticket = view.submit("batman").unwrap();
        view.complete(ticket, Err(SearchError::Status(503)));
        assert_eq!(view.status(), ViewStatus::Error);
        assert!(!view.loading());
        assert_eq!(view.message().as_deref(), Some(SEARCH_FAILED));
        assert_eq!(view.movies(), initial().as_slice());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut view = SearchView::default();
        let first = view.submit("alien").unwrap();
        let second = view.submit("aliens").unwrap();
        assert!(second.generation() > first.generation());

        assert!(view.complete(second, Ok(vec![result("2", "Aliens")])));
        assert!(!view.complete(first, Ok(vec![result("1", "Alien")])));

        assert_eq!(view.movies()[0].title, "Aliens");
        assert_eq!(view.query(), "aliens");
    }

    #[test]
    fn test_empty_prompt() {
        let view = SearchView::default();
        assert_eq!(view.message().as_deref(), Some(EMPTY_PROMPT));
        assert_eq!(SearchView::new(initial()).message(), None);
    }

    #[test]
    fn test_initial_listing_only_while_idle() {
        let mut view = SearchView::default();
        assert!(view.show_initial(initial()));
        view.submit("x");
        assert!(!view.show_initial(Vec::new()));
        assert_eq!(view.movies().len(), 1);
    }
}
