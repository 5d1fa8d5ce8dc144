//! `TmdbClient` - TMDB API client implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::rate_limiter::RequestPacer;
use super::types::{Genre, GenreId, GenreList, Movie, MovieId, Page, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
///
/// A failed request surfaces directly to the caller; there are no retries.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token (v4 read access token).
    api_token: Option<String>,
    /// v3 API key, sent as the `api_key` query parameter.
    api_key: Option<String>,
    /// Response language (e.g. "en-US").
    language: Option<String>,
    /// Request pacer.
    pacer: Arc<Mutex<RequestPacer>>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    api_key: Option<String>,
    language: Option<String>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            api_key: None,
            language: None,
            user_agent: None,
            min_interval: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the v3 API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the response language. Omitted from requests when unset.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Builds the client.
    ///
    /// Credentials are optional: a client without them is valid and its
    /// requests fail with the server's authentication error.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };

        let pacer = self
            .min_interval
            .map_or_else(RequestPacer::default_interval, RequestPacer::new);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token: self.api_token,
            api_key: self.api_key,
            language: self.language,
            pacer: Arc::new(Mutex::new(pacer)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a paced GET request carrying the configured credentials and
    /// decodes the JSON body.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.pacer.lock().await.wait().await;

        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut builder = self.http_client.get(url).query(query);
        if let Some(ref key) = self.api_key {
            builder = builder.query(&[("api_key", key)]);
        }
        if let Some(ref language) = self.language {
            builder = builder.query(&[("language", language)]);
        }
        if let Some(ref token) = self.api_token {
            builder = builder.bearer_auth(token);
        }
        let request = builder
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(path, "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        serde_json::from_str(&body).with_context(|| format!("failed to decode JSON response: {path}"))
    }
}

impl CatalogApi for TmdbClient {
    #[instrument(skip_all, fields(page = page))]
    async fn popular_movies(&self, page: u32) -> Result<Page<Movie>> {
        let query = [("page", page.to_string())];
        self.get_json("movie/popular", &query).await
    }

    #[instrument(skip_all, fields(page = page))]
    async fn search_movies(&self, query: &str, page: u32) -> Result<Page<Movie>> {
        let query = [("query", String::from(query)), ("page", page.to_string())];
        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all, fields(genre_id = genre_id, page = page))]
    async fn discover_movies(&self, genre_id: GenreId, page: u32) -> Result<Page<Movie>> {
        let query = [
            ("with_genres", genre_id.to_string()),
            ("page", page.to_string()),
        ];
        self.get_json("discover/movie", &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_details(&self, movie_id: MovieId) -> Result<Movie> {
        let path = format!("movie/{movie_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn genres(&self) -> Result<Vec<Genre>> {
        let list: GenreList = self.get_json("genre/movie/list", &[]).await?;
        Ok(list.genres)
    }
}
