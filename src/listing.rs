use tracing::{error, info};

use crate::movie::{to_movies, Movie};
use crate::watchmode::{ProviderError, WatchmodeClient};

/// Fetch the titles shown before any search. Never fails: every provider
/// error is logged and turned into an empty list so the page still renders.
pub async fn load_initial_movies(client: &WatchmodeClient, limit: u32, types: &str) -> Vec<Movie> {
    match client.list_titles(limit, types).await {
        Ok(listing) => {
            let movies = to_movies(listing.into_titles());
            info!(count = movies.len(), "Loaded initial titles");
            movies
        }
        Err(ProviderError::MissingApiKey) => {
            error!("WATCHMODE_API_KEY is not set");
            Vec::new()
        }
        Err(e) => {
            error!(error = %e, "Error fetching initial movies");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WatchmodeConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, key: Option<&str>) -> WatchmodeClient {
        let config = WatchmodeConfig {
            base_url: format!("{}/v1", server.uri()),
            ..Default::default()
        };
        WatchmodeClient::with_api_key(&config, key.map(str::to_string)).unwrap()
    }

    #[tokio::test]
    async fn test_maps_listing_into_movies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/list-titles/"))
            .and(query_param("apiKey", "k"))
            .and(query_param("limit", "6"))
            .and(query_param("types", "movie"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "titles": [
                    { "id": 3173903, "title": "The Dark Knight", "year": 2008, "type": "movie" },
                    { "unexpected": true }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let movies = load_initial_movies(&client_for(&server, Some("k")), 6, "movie").await;
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, "3173903");
        assert_eq!(movies[0].year, "2008");
        assert_eq!(
            movies[0].poster,
            "https://via.placeholder.com/300x450?text=The%20Dark%20Knight"
        );
    }

    #[tokio::test]
    async fn test_failures_yield_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        assert!(load_initial_movies(&client_for(&server, None), 6, "movie").await.is_empty());
        assert!(load_initial_movies(&client_for(&server, Some("k")), 6, "movie").await.is_empty());
    }
}
