//! Image asset URLs.

/// TMDB image CDN base URL.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Rendition width requested from the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Cards and posters.
    W300,
    /// Banners.
    W1280,
}

impl ImageSize {
    /// CDN path segment for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W300 => "w300",
            Self::W1280 => "w1280",
        }
    }
}

/// Builds the CDN URL for an image path returned by the API.
///
/// Returns `None` when the path is absent or empty, in which case no image
/// should be rendered.
#[must_use]
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    Some(format!("{IMAGE_BASE_URL}{}{path}", size.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url() {
        // Arrange & Act
        let url = image_url(Some("/abc.jpg"), ImageSize::W300);

        // Assert
        assert_eq!(
            url.as_deref(),
            Some("https://image.tmdb.org/t/p/w300/abc.jpg")
        );
    }

    #[test]
    fn test_banner_url() {
        // Arrange & Act
        let url = image_url(Some("/bg.jpg"), ImageSize::W1280);

        // Assert
        assert_eq!(
            url.as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/bg.jpg")
        );
    }

    #[test]
    fn test_missing_path_has_no_url() {
        // Arrange & Act & Assert
        assert!(image_url(None, ImageSize::W300).is_none());
        assert!(image_url(Some(""), ImageSize::W1280).is_none());
    }
}
