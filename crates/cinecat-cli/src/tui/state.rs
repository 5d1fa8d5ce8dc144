//! Browser TUI state management.

use anyhow::Result;
use cinecat_api::tmdb::{Genre, Movie, Page};
use cinecat_core::details::{DetailsLoader, DetailsTicket};
use cinecat_core::genres::GenreCatalog;
use cinecat_core::theme::Theme;
use cinecat_core::{DEFAULT_THRESHOLD, ListController, LoadTicket, ScrollTrigger, Span, TriggerDeps};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::TableState;

/// Rows past the bottom of the list at which the next page is requested.
pub const SCROLL_LEAD_ROWS: f64 = 5.0;

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Movie list.
    List,
    /// Details of one movie.
    Details,
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
}

/// Result of a background fetch, delivered to the event loop.
#[derive(Debug)]
pub enum Action {
    /// A list page arrived.
    PageLoaded(LoadTicket, Result<Page<Movie>>),
    /// Movie details arrived.
    DetailsLoaded(DetailsTicket, Result<Movie>),
    /// The genre list arrived.
    GenresLoaded(Result<Vec<Genre>>),
}

/// Side effect requested by a key press.
#[derive(Debug)]
pub enum Command {
    /// Nothing to do.
    None,
    /// Leave the browser.
    Quit,
    /// Search text changed; commit it once typing pauses.
    Debounce(String),
    /// Commit search text right away.
    Commit(String),
    /// Fetch a list page.
    LoadPage(LoadTicket),
    /// Fetch movie details.
    LoadDetails(DetailsTicket),
    /// Switch light/dark.
    ToggleTheme,
    /// Open a URL in the browser.
    Open(String),
}

/// Web page of a movie on TMDB.
#[must_use]
pub fn movie_page_url(id: u64) -> String {
    format!("https://www.themoviedb.org/movie/{id}")
}

/// Converts a row count to scroll units.
fn rows(n: usize) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}

/// State for the browser TUI.
#[derive(Debug)]
pub struct BrowserState {
    /// List loading controller.
    pub list: ListController,
    /// Genre names and filter cycle.
    pub genres: GenreCatalog,
    /// Details loader for the details view.
    pub details: DetailsLoader,
    /// Active theme.
    pub theme: Theme,
    /// Current screen.
    pub view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search text being typed (committed after the debounce).
    pub search_input: String,
    /// Table state for the movie list (handles selection and scroll).
    pub table_state: TableState,
    /// Rows of the list visible in the last frame.
    pub list_rows: u16,
    /// Transient status message.
    pub status: Option<String>,
    /// End-of-list trigger.
    scroll: ScrollTrigger,
}

impl BrowserState {
    /// Creates an empty browser state.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            list: ListController::new(),
            genres: GenreCatalog::new(),
            details: DetailsLoader::new(),
            theme,
            view: View::List,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            table_state: TableState::default(),
            list_rows: 0,
            status: None,
            scroll: ScrollTrigger::new(SCROLL_LEAD_ROWS, DEFAULT_THRESHOLD),
        }
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Returns the movie under the cursor (if any).
    #[must_use]
    pub fn current_movie(&self) -> Option<&Movie> {
        self.list.state().items.get(self.cursor())
    }

    /// Moves cursor up.
    pub fn move_up(&mut self) {
        self.page_up(1);
    }

    /// Moves cursor down.
    pub fn move_down(&mut self) {
        self.page_down(1);
    }

    /// Scrolls up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        if self.list.state().items.is_empty() {
            return;
        }
        let target = self.cursor().saturating_sub(page_size.max(1));
        self.table_state.select(Some(target));
    }

    /// Scrolls down by a page.
    pub fn page_down(&mut self, page_size: usize) {
        let count = self.list.state().items.len();
        if count == 0 {
            return;
        }
        let last = count.saturating_sub(1);
        let target = self.cursor().saturating_add(page_size.max(1)).min(last);
        self.table_state.select(Some(target));
    }

    /// Commits search text. Returns `true` if the list was reset.
    pub fn commit_search(&mut self, text: String) -> bool {
        if !self.list.set_search_text(text) {
            return false;
        }
        self.reset_list_view();
        true
    }

    /// Moves to the next genre filter. Returns `true` if the list was reset.
    pub fn cycle_genre(&mut self) -> bool {
        let next = self.genres.next_filter(self.list.criteria().genre);
        if !self.list.set_genre(next) {
            return false;
        }
        self.reset_list_view();
        true
    }

    /// Clears the selection and visibility history after a criteria change.
    fn reset_list_view(&mut self) {
        self.table_state = TableState::default();
        self.scroll.reset();
    }

    /// Samples the end-of-list sentinel against the visible rows.
    ///
    /// Returns the ticket for the next page when the sentinel comes into
    /// view. The sentinel is hidden while a list error is shown, so a
    /// failure waits for an explicit retry.
    pub fn sentinel_request(&mut self) -> Option<LoadTicket> {
        let state = self.list.state();
        let deps = TriggerDeps::from_state(state);
        let visible = self.view == View::List
            && state.error.is_none()
            && self.scroll.is_visible(
                Span::new(rows(self.table_state.offset()), f64::from(self.list_rows)),
                Span::new(rows(state.items.len()), 1.0),
            );
        let page = self.scroll.observe_visibility(visible, deps)?;
        Some(self.list.begin(page, None))
    }

    /// Applies a fetch result.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::PageLoaded(ticket, result) => {
                self.list.finish(ticket, result);
                if self.table_state.selected().is_none() && !self.list.state().items.is_empty() {
                    self.table_state.select(Some(0));
                }
            }
            Action::DetailsLoaded(ticket, result) => {
                self.details.finish(ticket, result);
            }
            Action::GenresLoaded(result) => self.genres.apply(result),
        }
    }

    /// Handles a key press and returns the side effect to run.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Command {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Command::Quit;
        }
        match (self.input_mode, self.view) {
            (InputMode::Search, _) => self.handle_search_key(key),
            (InputMode::Normal, View::List) => self.handle_list_key(key),
            (InputMode::Normal, View::Details) => self.handle_details_key(key),
        }
    }

    /// Handles key input in search mode.
    fn handle_search_key(&mut self, key: KeyCode) -> Command {
        match key {
            KeyCode::Esc => {
                self.search_input.clear();
                self.input_mode = InputMode::Normal;
                Command::Commit(String::new())
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                Command::Commit(self.search_input.clone())
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                Command::Debounce(self.search_input.clone())
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                Command::Debounce(self.search_input.clone())
            }
            _ => Command::None,
        }
    }

    /// Handles key input on the list.
    fn handle_list_key(&mut self, key: KeyCode) -> Command {
        let page_size = usize::from(self.list_rows);
        match key {
            KeyCode::Char('q') => return Command::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::PageUp => self.page_up(page_size),
            KeyCode::PageDown => self.page_down(page_size),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('g') => {
                self.cycle_genre();
            }
            KeyCode::Char('t') => return Command::ToggleTheme,
            KeyCode::Char('r') => {
                if self.list.state().error.is_some()
                    && let Some(ticket) = self.list.begin_retry()
                {
                    return Command::LoadPage(ticket);
                }
            }
            KeyCode::Char('o') => {
                if let Some(movie) = self.current_movie() {
                    return Command::Open(movie_page_url(movie.id));
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.current_movie().map(|m| m.id) {
                    self.view = View::Details;
                    return Command::LoadDetails(self.details.begin(id));
                }
            }
            _ => {}
        }
        Command::None
    }

    /// Handles key input on the details view.
    fn handle_details_key(&mut self, key: KeyCode) -> Command {
        match key {
            KeyCode::Char('q') => return Command::Quit,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
                self.details.clear();
                self.view = View::List;
            }
            KeyCode::Char('t') => return Command::ToggleTheme,
            KeyCode::Char('r') => {
                if self.details.state().error.is_some()
                    && let Some(ticket) = self.details.begin_retry()
                {
                    return Command::LoadDetails(ticket);
                }
            }
            KeyCode::Char('o') => {
                if let Some(id) = self.details.movie_id() {
                    return Command::Open(movie_page_url(id));
                }
            }
            _ => {}
        }
        Command::None
    }
}
