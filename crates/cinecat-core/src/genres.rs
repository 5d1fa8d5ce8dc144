//! Session genre catalog.
#![allow(clippy::future_not_send)]

use anyhow::Result;
use cinecat_api::tmdb::{CatalogApi, Genre, GenreId};

use crate::criteria::GenreFilter;

/// Genre list fetched once per session.
///
/// A failed fetch degrades to an empty list and is not retried.
#[derive(Debug, Default)]
pub struct GenreCatalog {
    genres: Option<Vec<Genre>>,
}

impl GenreCatalog {
    /// Creates an unloaded catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch has completed (successfully or not).
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.genres.is_some()
    }

    /// Cached genres (empty until loaded or after a failed fetch).
    #[must_use]
    pub fn genres(&self) -> &[Genre] {
        self.genres.as_deref().unwrap_or_default()
    }

    /// Stores a fetch result, swallowing failures.
    pub fn apply(&mut self, result: Result<Vec<Genre>>) {
        let genres = result.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load genres, genre filter disabled");
            Vec::new()
        });
        tracing::debug!(count = genres.len(), "genres cached");
        self.genres = Some(genres);
    }

    /// Fetches the genre list unless it was already fetched this session.
    pub async fn ensure_loaded<A: CatalogApi>(&mut self, api: &A) -> &[Genre] {
        if !self.is_loaded() {
            let result = api.genres().await;
            self.apply(result);
        }
        self.genres()
    }

    /// Display name of a genre.
    #[must_use]
    pub fn name_of(&self, id: GenreId) -> Option<&str> {
        self.genres()
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }

    /// Display names for a list of genre IDs; unknown IDs are skipped.
    #[must_use]
    pub fn names_for(&self, ids: &[GenreId]) -> Vec<&str> {
        ids.iter().filter_map(|&id| self.name_of(id)).collect()
    }

    /// Label for a genre filter.
    #[must_use]
    pub fn label(&self, filter: GenreFilter) -> String {
        match filter {
            GenreFilter::All => String::from("All genres"),
            GenreFilter::Genre(id) => self
                .name_of(id)
                .map_or_else(|| format!("Genre {id}"), String::from),
        }
    }

    /// Next filter in the cycle `All → first → … → last → All`.
    ///
    /// Returns `All` when the catalog is empty or `current` is unknown.
    #[must_use]
    pub fn next_filter(&self, current: GenreFilter) -> GenreFilter {
        let genres = self.genres();
        let next = match current {
            GenreFilter::All => genres.first(),
            GenreFilter::Genre(id) => genres
                .iter()
                .position(|g| g.id == id)
                .and_then(|idx| genres.get(idx.saturating_add(1))),
        };
        next.map_or(GenreFilter::All, |g| GenreFilter::Genre(g.id))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::testing::{Call, ScriptedCatalog};

    fn sample() -> Vec<Genre> {
        vec![
            Genre {
                id: 28,
                name: String::from("Action"),
            },
            Genre {
                id: 16,
                name: String::from("Animation"),
            },
        ]
    }

    #[tokio::test]
    async fn test_fetches_once_per_session() {
        // Arrange
        let api = ScriptedCatalog::default();
        api.push_genres(Ok(sample()));
        let mut catalog = GenreCatalog::new();

        // Act
        catalog.ensure_loaded(&api).await;
        let genres = catalog.ensure_loaded(&api).await;

        // Assert
        assert_eq!(genres.len(), 2);
        assert_eq!(api.calls(), vec![Call::Genres]);
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty_and_is_not_retried() {
        // Arrange
        let api = ScriptedCatalog::default();
        api.push_genres(Err(anyhow!("unauthorized")));
        let mut catalog = GenreCatalog::new();

        // Act
        catalog.ensure_loaded(&api).await;
        catalog.ensure_loaded(&api).await;

        // Assert
        assert!(catalog.is_loaded());
        assert!(catalog.genres().is_empty());
        assert_eq!(api.calls(), vec![Call::Genres]);
        assert_eq!(catalog.next_filter(GenreFilter::All), GenreFilter::All);
    }

    #[test]
    fn test_name_lookup() {
        // Arrange
        let mut catalog = GenreCatalog::new();
        catalog.apply(Ok(sample()));

        // Act & Assert
        assert_eq!(catalog.name_of(16), Some("Animation"));
        assert_eq!(catalog.names_for(&[16, 99, 28]), vec!["Animation", "Action"]);
        assert_eq!(catalog.label(GenreFilter::All), "All genres");
        assert_eq!(catalog.label(GenreFilter::Genre(28)), "Action");
        assert_eq!(catalog.label(GenreFilter::Genre(99)), "Genre 99");
    }

    #[test]
    fn test_filter_cycle_wraps_to_all() {
        // Arrange
        let mut catalog = GenreCatalog::new();
        catalog.apply(Ok(sample()));

        // Act
        let first = catalog.next_filter(GenreFilter::All);
        let second = catalog.next_filter(first);
        let third = catalog.next_filter(second);

        // Assert
        assert_eq!(first, GenreFilter::Genre(28));
        assert_eq!(second, GenreFilter::Genre(16));
        assert_eq!(third, GenreFilter::All);
    }
}
