//! TMDB API client module.
//!
//! Handles read-only HTTP requests to the TMDB API v3 movie endpoints
//! and builds image asset URLs from the returned paths.

mod api;
mod client;
mod image;
mod rate_limiter;
mod types;

pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use image::{IMAGE_BASE_URL, ImageSize, image_url};
pub use types::{Genre, GenreId, GenreList, Movie, MovieId, Page};
