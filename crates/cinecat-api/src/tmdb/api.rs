//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{Genre, GenreId, Movie, MovieId, Page};

/// Read-only movie catalog API.
///
/// Abstracts the remote catalog for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// implementors provide `CatalogApi` and get `LocalCatalogApi` for free.
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches one page of popular movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular_movies(&self, page: u32) -> Result<Page<Movie>>;

    /// Fetches one page of movies matching a free-text query.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movies(&self, query: &str, page: u32) -> Result<Page<Movie>>;

    /// Fetches one page of movies tagged with the given genre.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movies(&self, genre_id: GenreId, page: u32) -> Result<Page<Movie>>;

    /// Fetches full details for one movie, including resolved genres.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails,
    /// including when the movie does not exist.
    async fn movie_details(&self, movie_id: MovieId) -> Result<Movie>;

    /// Fetches the list of movie genres.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn genres(&self) -> Result<Vec<Genre>>;
}
