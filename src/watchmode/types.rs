use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Ids and years arrive as numbers from some endpoints and as strings from
/// others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// One title as the provider returns it. The search and listing endpoints
/// use different schemas, anything else is kept raw so it can be logged.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProviderTitle {
    Search(SearchTitle),
    Listing(ListedTitle),
    Unrecognized(serde_json::Value),
}

/// Search endpoint shape: `name`, `result_type`, `image_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchTitle {
    pub id: Scalar,
    pub name: String,
    #[serde(default)]
    pub year: Option<Scalar>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(alias = "resultType", default)]
    pub result_type: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Listing endpoint shape: `title`, `poster`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListedTitle {
    pub id: Scalar,
    pub title: String,
    #[serde(default)]
    pub year: Option<Scalar>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
}

/// A provider title normalized to a single schema. This is what the search
/// proxy hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl SearchResult {
    pub fn is_person(&self) -> bool {
        self.result_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("person"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn year_string(year: Option<Scalar>) -> Option<String> {
    match year {
        Some(Scalar::Int(0)) | None => None,
        Some(other) => non_empty(Some(other.to_string())),
    }
}

impl ProviderTitle {
    /// Map either schema onto `SearchResult`. Unrecognized shapes are logged
    /// and dropped.
    pub fn normalize(self) -> Option<SearchResult> {
        match self {
            ProviderTitle::Search(t) => Some(SearchResult {
                id: t.id.to_string(),
                title: t.name,
                year: year_string(t.year),
                kind: t.kind,
                result_type: t.result_type,
                image_url: non_empty(t.image_url),
            }),
            ProviderTitle::Listing(t) => Some(SearchResult {
                id: t.id.to_string(),
                title: t.title,
                year: year_string(t.year),
                kind: t.kind,
                result_type: None,
                image_url: non_empty(t.poster),
            }),
            ProviderTitle::Unrecognized(value) => {
                warn!(item = %value, "Skipping unrecognized provider title");
                None
            }
        }
    }
}

/// Body of `/search/`. Current responses split `title_results` from
/// `people_results`; older ones had a single `results` list.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderSearchResponse {
    #[serde(default)]
    pub title_results: Vec<ProviderTitle>,
    #[serde(default)]
    pub people_results: Vec<ProviderTitle>,
    #[serde(default)]
    pub results: Vec<ProviderTitle>,
}

impl ProviderSearchResponse {
    /// Normalized titles with every person result removed.
    pub fn into_titles(self) -> Vec<SearchResult> {
        self.title_results
            .into_iter()
            .chain(self.results)
            .filter_map(ProviderTitle::normalize)
            .filter(|r| !r.is_person())
            .collect()
    }
}

/// Body of `/list-titles/`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTitlesResponse {
    #[serde(default)]
    pub titles: Vec<ProviderTitle>,
}

impl ListTitlesResponse {
    pub fn into_titles(self) -> Vec<SearchResult> {
        self.titles
            .into_iter()
            .filter_map(ProviderTitle::normalize)
            .collect()
    }
}

/// Body returned by `GET /api/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_shape() {
        let item: ProviderTitle = serde_json::from_value(json!({
            "resultType": "title",
            "id": 3173903,
            "name": "The Dark Knight",
            "type": "movie",
            "year": 2008,
            "imdb_id": "tt0468569",
            "image_url": "https://cdn.watchmode.com/posters/03173903_poster_w185.jpg"
        }))
        .unwrap();

        let result = item.normalize().unwrap();
        assert_eq!(result.id, "3173903");
        assert_eq!(result.title, "The Dark Knight");
        assert_eq!(result.year.as_deref(), Some("2008"));
        assert_eq!(result.kind.as_deref(), Some("movie"));
        assert_eq!(result.result_type.as_deref(), Some("title"));
        assert!(result.image_url.is_some());
    }

    #[test]
    fn test_listing_shape() {
        let item: ProviderTitle = serde_json::from_value(json!({
            "id": 1295258,
            "title": "Inception",
            "year": 2010,
            "type": "movie",
            "tmdb_id": 27205
        }))
        .unwrap();

        let result = item.normalize().unwrap();
        assert_eq!(result.id, "1295258");
        assert_eq!(result.title, "Inception");
        assert_eq!(result.image_url, None);
        assert_eq!(result.result_type, None);
    }

    #[test]
    fn test_string_ids_and_missing_year() {
        let item: ProviderTitle =
            serde_json::from_value(json!({ "id": "abc", "name": "Untitled", "year": null }))
                .unwrap();
        let result = item.normalize().unwrap();
        assert_eq!(result.id, "abc");
        assert_eq!(result.year, None);
    }

    #[test]
    fn test_unrecognized_shape_is_dropped() {
        let item: ProviderTitle =
            serde_json::from_value(json!({ "slug": "no-id-or-name" })).unwrap();
        assert!(matches!(item, ProviderTitle::Unrecognized(_)));
        assert_eq!(item.normalize(), None);
    }

    #[test]
    fn test_search_response_drops_people() {
        let response: ProviderSearchResponse = serde_json::from_value(json!({
            "title_results": [
                { "id": 1, "name": "Batman", "type": "movie", "result_type": "title", "year": 1989 },
                { "id": 2, "name": "Batman", "result_type": "person" }
            ],
            "people_results": [
                { "id": 7110004, "name": "Christian Bale", "result_type": "person" }
            ]
        }))
        .unwrap();

        let titles = response.into_titles();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].id, "1");
    }

    #[test]
    fn test_legacy_results_list() {
        let response: ProviderSearchResponse = serde_json::from_value(json!({
            "results": [{ "id": "42", "name": "Heat", "year": 1995, "type": "movie" }]
        }))
        .unwrap();
        assert_eq!(response.into_titles()[0].title, "Heat");
    }
}
