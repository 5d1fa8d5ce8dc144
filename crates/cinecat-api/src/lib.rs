//! Catalog client library for cinecat.
//!
//! Provides a read-only client for the TMDB movie API.

/// TMDB API client.
pub mod tmdb;
