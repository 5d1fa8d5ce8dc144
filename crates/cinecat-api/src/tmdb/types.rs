//! TMDB API response types.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// TMDB movie ID.
pub type MovieId = u64;

/// TMDB genre ID.
pub type GenreId = u32;

// --- Paged lists ---

/// One page of a paged TMDB list endpoint.
///
/// Shared by `movie/popular`, `search/movie` and `discover/movie`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    /// Current page number (1-based).
    pub page: u32,
    /// Results on this page, in server order.
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

// --- Movie ---

/// A movie as returned by list and detail endpoints.
///
/// List endpoints fill `genre_ids`; the detail endpoint fills `genres` instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: MovieId,
    /// Localized title.
    pub title: String,
    /// Synopsis.
    #[serde(default)]
    pub overview: String,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    /// Resolved genres (detail endpoint only).
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
}

impl Movie {
    /// Returns the release year, if the release date is present and valid.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

// --- Genre ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: GenreId,
    /// Genre name.
    pub name: String,
}

/// Response from `genre/movie/list` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    /// All movie genres.
    pub genres: Vec<Genre>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    #[allow(dead_code)]
    pub success: bool,
}
