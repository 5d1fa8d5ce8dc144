//! Single-movie details loader.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use cinecat_api::tmdb::{CatalogApi, Movie, MovieId};

/// User-facing message shown when movie details fail to load.
pub const DETAILS_ERROR_MESSAGE: &str = "failed to load movie details";

/// Observable details state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsState {
    /// Loaded movie.
    pub movie: Option<Movie>,
    /// A request is in flight.
    pub loading: bool,
    /// User-facing error of the last failed load.
    pub error: Option<String>,
}

/// Handle for an issued details load.
#[derive(Debug)]
#[must_use = "pass the ticket to `DetailsLoader::finish` to release the loading flag"]
pub struct DetailsTicket {
    generation: u64,
    movie_id: MovieId,
}

impl DetailsTicket {
    /// Movie to fetch.
    pub const fn movie_id(&self) -> MovieId {
        self.movie_id
    }
}

/// Loads one movie for the details view.
#[derive(Debug, Default)]
pub struct DetailsLoader {
    state: DetailsState,
    generation: u64,
    movie_id: Option<MovieId>,
}

impl DetailsLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &DetailsState {
        &self.state
    }

    /// Movie the loader was last asked for.
    #[must_use]
    pub const fn movie_id(&self) -> Option<MovieId> {
        self.movie_id
    }

    /// Issues a load for `movie_id`, superseding any load in flight.
    ///
    /// A movie other than the displayed one is cleared right away.
    pub fn begin(&mut self, movie_id: MovieId) -> DetailsTicket {
        self.generation = self.generation.wrapping_add(1);
        if self.state.movie.as_ref().is_some_and(|m| m.id != movie_id) {
            self.state.movie = None;
        }
        self.state.loading = true;
        self.state.error = None;
        self.movie_id = Some(movie_id);
        DetailsTicket {
            generation: self.generation,
            movie_id,
        }
    }

    /// Re-issues the load for the last requested movie.
    pub fn begin_retry(&mut self) -> Option<DetailsTicket> {
        let movie_id = self.movie_id?;
        Some(self.begin(movie_id))
    }

    /// Drops the displayed movie and invalidates any load in flight.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state = DetailsState::default();
        self.movie_id = None;
    }

    /// Applies a fetch result. Returns `false` if the ticket was superseded.
    pub fn finish(&mut self, ticket: DetailsTicket, result: Result<Movie>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(movie_id = ticket.movie_id, "discarding stale details response");
            return false;
        }
        self.state.loading = false;
        match result {
            Ok(movie) => {
                self.state.movie = Some(movie);
                self.state.error = None;
            }
            Err(err) => {
                tracing::warn!(movie_id = ticket.movie_id, error = %err, "failed to load movie details");
                self.state.error = Some(String::from(DETAILS_ERROR_MESSAGE));
            }
        }
        true
    }

    /// Loads `movie_id` inline.
    pub async fn load<A: CatalogApi>(&mut self, api: &A, movie_id: MovieId) -> bool {
        let ticket = self.begin(movie_id);
        let result = api.movie_details(ticket.movie_id()).await;
        self.finish(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use anyhow::anyhow;

    use super::*;
    use crate::testing::{Call, ScriptedCatalog, movie};

    #[tokio::test]
    async fn test_load_success() {
        // Arrange
        let api = ScriptedCatalog::default();
        api.push_details(Ok(movie(42)));
        let mut loader = DetailsLoader::new();

        // Act
        let applied = loader.load(&api, 42).await;

        // Assert
        assert!(applied);
        let state = loader.state();
        assert_eq!(state.movie.as_ref().map(|m| m.id), Some(42));
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(api.calls(), vec![Call::Details(42)]);
    }

    #[tokio::test]
    async fn test_not_found_collapses_to_generic_message() {
        // Arrange
        let api = ScriptedCatalog::default();
        api.push_details(Err(anyhow!("TMDB API error (HTTP 404 Not Found): code=34")));
        let mut loader = DetailsLoader::new();

        // Act
        loader.load(&api, 1).await;

        // Assert
        assert_eq!(loader.state().error.as_deref(), Some(DETAILS_ERROR_MESSAGE));
        assert!(loader.state().movie.is_none());
        assert!(!loader.state().loading);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_displayed_movie() {
        // Arrange
        let api = ScriptedCatalog::default();
        api.push_details(Ok(movie(5)))
            .push_details(Err(anyhow!("offline")));
        let mut loader = DetailsLoader::new();
        loader.load(&api, 5).await;

        // Act
        let ticket = loader.begin_retry().unwrap();
        let result = api.movie_details(ticket.movie_id()).await;
        loader.finish(ticket, result);

        // Assert
        assert_eq!(loader.state().movie.as_ref().map(|m| m.id), Some(5));
        assert!(loader.state().error.is_some());
    }

    #[test]
    fn test_switching_movie_discards_late_response() {
        // Arrange
        let mut loader = DetailsLoader::new();
        let first = loader.begin(1);
        let second = loader.begin(2);

        // Act
        let second_applied = loader.finish(second, Ok(movie(2)));
        let first_applied = loader.finish(first, Ok(movie(1)));

        // Assert
        assert!(second_applied);
        assert!(!first_applied);
        assert_eq!(loader.state().movie.as_ref().map(|m| m.id), Some(2));
    }

    #[test]
    fn test_begin_other_movie_clears_display() {
        // Arrange
        let mut loader = DetailsLoader::new();
        let ticket = loader.begin(1);
        loader.finish(ticket, Ok(movie(1)));

        // Act
        let _ticket = loader.begin(2);

        // Assert
        assert!(loader.state().movie.is_none());
        assert!(loader.state().loading);
    }

    #[test]
    fn test_clear_invalidates_in_flight() {
        // Arrange
        let mut loader = DetailsLoader::new();
        let ticket = loader.begin(3);

        // Act
        loader.clear();
        let applied = loader.finish(ticket, Ok(movie(3)));

        // Assert
        assert!(!applied);
        assert_eq!(loader.state(), &DetailsState::default());
        assert!(loader.begin_retry().is_none());
    }
}
