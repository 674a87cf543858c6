use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

#[cfg(any(test, feature = "mocks"))]
use mockall::{automock, predicate::*};

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait MovieRepository: Debug {
    async fn get_movie(&self, movie_id: u64) -> Result<Option<Movie>, String>;
    /// Deletes the movie and returns the record that was stored, or `None`
    /// when no record existed under that id.
    async fn delete_movie(&self, movie_id: u64) -> Result<Option<Movie>, String>;
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait CastRepository: Debug {
    async fn list_cast_members(&self, movie_id: u64) -> Result<Vec<CastMember>, String>;
}

/// A movie record. Only the key is typed; the descriptive attributes are
/// defined by an external schema and pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Movie {
    pub fn new(id: u64, attributes: Map<String, Value>) -> Self {
        Self { id, attributes }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(rename = "movieId")]
    pub movie_id: u64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl CastMember {
    pub fn new(movie_id: u64, attributes: Map<String, Value>) -> Self {
        Self {
            movie_id,
            attributes,
        }
    }
}

/// Parses a `movieId` path parameter. An id of `0` reads as missing, the
/// same as a non-numeric or absent value.
pub fn parse_movie_id(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|&id| id != 0)
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

impl MessageResponse {
    pub fn missing_movie_id() -> Self {
        Self {
            message: "Missing movie Id".to_string(),
        }
    }

    pub fn invalid_movie_id() -> Self {
        Self {
            message: "Invalid movie Id".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteMovieResponse {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "deletedItem")]
    pub deleted_item: Movie,
}

impl DeleteMovieResponse {
    pub fn new(deleted_item: Movie) -> Self {
        Self {
            message: "Movie deleted successfully".to_string(),
            deleted_item,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub movie: Movie,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastMember>>,
}

impl MovieResponse {
    pub fn new(movie: Movie) -> Self {
        Self { movie, cast: None }
    }

    pub fn with_cast(movie: Movie, cast: Vec<CastMember>) -> Self {
        Self {
            movie,
            cast: Some(cast),
        }
    }
}

/// Stable 500 body. Store failures are logged in full and never serialized
/// back to the caller.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn internal() -> Self {
        Self {
            error: "Internal Server Error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn when_movie_id_is_numeric_should_parse() {
        assert_eq!(parse_movie_id("42"), Some(42));
        assert_eq!(parse_movie_id("1"), Some(1));
    }

    #[test]
    fn when_movie_id_is_zero_should_read_as_missing() {
        assert_eq!(parse_movie_id("0"), None);
    }

    #[test]
    fn when_movie_id_is_not_numeric_should_read_as_missing() {
        assert_eq!(parse_movie_id(""), None);
        assert_eq!(parse_movie_id("abc"), None);
        assert_eq!(parse_movie_id("42abc"), None);
        assert_eq!(parse_movie_id("-3"), None);
        assert_eq!(parse_movie_id("4.2"), None);
    }

    #[test]
    fn when_serializing_delete_response_should_match_wire_shape() {
        let mut attributes = Map::new();
        attributes.insert("title".to_string(), json!("Example"));
        let response = DeleteMovieResponse::new(Movie::new(42, attributes));

        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(
            body,
            json!({
                "Message": "Movie deleted successfully",
                "deletedItem": { "id": 42, "title": "Example" }
            })
        );
    }

    #[test]
    fn when_cast_is_absent_should_omit_the_key() {
        let response = MovieResponse::new(Movie::new(7, Map::new()));

        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body, json!({ "movie": { "id": 7 } }));
    }

    #[test]
    fn when_cast_is_empty_should_keep_the_key() {
        let response = MovieResponse::with_cast(Movie::new(7, Map::new()), vec![]);

        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body, json!({ "movie": { "id": 7 }, "cast": [] }));
    }
}
