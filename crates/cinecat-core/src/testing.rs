//! Scripted catalog used by the unit tests.
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};
use cinecat_api::tmdb::{CatalogApi, Genre, GenreId, Movie, MovieId, Page};

/// A request observed by [`ScriptedCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Popular(u32),
    Search(String, u32),
    Discover(GenreId, u32),
    Details(MovieId),
    Genres,
}

/// Replays queued responses in order and records every call.
#[derive(Debug, Default)]
pub struct ScriptedCatalog {
    pages: Mutex<VecDeque<Result<Page<Movie>>>>,
    details: Mutex<VecDeque<Result<Movie>>>,
    genres: Mutex<VecDeque<Result<Vec<Genre>>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedCatalog {
    pub fn push_page(&self, page: Page<Movie>) -> &Self {
        self.pages.lock().unwrap().push_back(Ok(page));
        self
    }

    pub fn push_page_error(&self, message: &str) -> &Self {
        self.pages.lock().unwrap().push_back(Err(anyhow!("{message}")));
        self
    }

    pub fn push_details(&self, result: Result<Movie>) -> &Self {
        self.details.lock().unwrap().push_back(result);
        self
    }

    pub fn push_genres(&self, result: Result<Vec<Genre>>) -> &Self {
        self.genres.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_page(&self) -> Result<Page<Movie>> {
        match self.pages.lock().unwrap().pop_front() {
            Some(result) => result,
            None => bail!("no scripted page left"),
        }
    }
}

impl CatalogApi for ScriptedCatalog {
    async fn popular_movies(&self, page: u32) -> Result<Page<Movie>> {
        self.record(Call::Popular(page));
        self.next_page()
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<Page<Movie>> {
        self.record(Call::Search(String::from(query), page));
        self.next_page()
    }

    async fn discover_movies(&self, genre_id: GenreId, page: u32) -> Result<Page<Movie>> {
        self.record(Call::Discover(genre_id, page));
        self.next_page()
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<Movie> {
        self.record(Call::Details(movie_id));
        match self.details.lock().unwrap().pop_front() {
            Some(result) => result,
            None => bail!("no scripted details left"),
        }
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        self.record(Call::Genres);
        match self.genres.lock().unwrap().pop_front() {
            Some(result) => result,
            None => bail!("no scripted genres left"),
        }
    }
}

pub fn movie(id: MovieId) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        release_date: None,
        vote_average: 0.0,
        genre_ids: Vec::new(),
        genres: None,
    }
}

pub fn page(number: u32, ids: &[MovieId], total_pages: u32) -> Page<Movie> {
    Page {
        page: number,
        results: ids.iter().copied().map(movie).collect(),
        total_pages,
        total_results: total_pages.saturating_mul(20),
    }
}

pub fn ids(movies: &[Movie]) -> Vec<MovieId> {
    movies.iter().map(|m| m.id).collect()
}
