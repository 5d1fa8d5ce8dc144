//! Filter criteria and endpoint selection.

use std::fmt;

use cinecat_api::tmdb::GenreId;

/// Genre filter selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenreFilter {
    /// No genre restriction.
    #[default]
    All,
    /// Only movies tagged with this genre.
    Genre(GenreId),
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Genre(id) => write!(f, "{id}"),
        }
    }
}

/// Search and filter parameters for the movie list.
///
/// Changing either field invalidates the accumulated list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free-text search, untrimmed as typed.
    pub search_text: String,
    /// Genre filter.
    pub genre: GenreFilter,
}

/// The remote list a set of criteria resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Popular movies.
    Popular,
    /// Free-text search (already trimmed).
    Search(String),
    /// Movies of a single genre.
    Genre(GenreId),
}

impl FilterCriteria {
    /// Creates criteria from raw search text and a genre filter.
    pub fn new(search_text: impl Into<String>, genre: GenreFilter) -> Self {
        Self {
            search_text: search_text.into(),
            genre,
        }
    }

    /// Resolves which endpoint serves these criteria.
    ///
    /// Non-blank search text wins over the genre filter.
    #[must_use]
    pub fn query(&self) -> CatalogQuery {
        let text = self.search_text.trim();
        if !text.is_empty() {
            return CatalogQuery::Search(String::from(text));
        }
        match self.genre {
            GenreFilter::All => CatalogQuery::Popular,
            GenreFilter::Genre(id) => CatalogQuery::Genre(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves_to_popular() {
        // Arrange & Act & Assert
        assert_eq!(FilterCriteria::default().query(), CatalogQuery::Popular);
    }

    #[test]
    fn test_blank_search_falls_through_to_genre() {
        // Arrange
        let criteria = FilterCriteria::new("   ", GenreFilter::Genre(16));

        // Act & Assert
        assert_eq!(criteria.query(), CatalogQuery::Genre(16));
    }

    #[test]
    fn test_search_text_is_trimmed() {
        // Arrange
        let criteria = FilterCriteria::new("  dune ", GenreFilter::All);

        // Act & Assert
        assert_eq!(criteria.query(), CatalogQuery::Search(String::from("dune")));
    }

    #[test]
    fn test_search_overrides_genre() {
        // Arrange
        let criteria = FilterCriteria::new("dune", GenreFilter::Genre(16));

        // Act & Assert
        assert_eq!(criteria.query(), CatalogQuery::Search(String::from("dune")));
    }

    #[test]
    fn test_genre_filter_display() {
        // Arrange & Act & Assert
        assert_eq!(GenreFilter::All.to_string(), "all");
        assert_eq!(GenreFilter::Genre(28).to_string(), "28");
    }
}
