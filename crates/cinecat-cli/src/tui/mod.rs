//! Interactive movie browser.
//!
//! Uses `ratatui` + `crossterm` for rendering. Fetches run on spawned tasks
//! and report back over a channel so the UI never blocks on the network.

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use cinecat_api::tmdb::{CatalogApi, TmdbClient};
use cinecat_core::debounce::{Debouncer, SEARCH_DEBOUNCE};
use cinecat_core::details::DetailsTicket;
use cinecat_core::theme::{ThemePreference, ThemeStore};
use cinecat_core::{LoadTicket, fetch_page};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use self::state::{Action, BrowserState, Command};

/// Interval between terminal input polls.
const TICK: Duration = Duration::from_millis(50);

/// Event loop resources around [`BrowserState`].
struct Browser<S> {
    state: BrowserState,
    client: Arc<TmdbClient>,
    preference: ThemePreference<S>,
    search: Debouncer<String>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

/// Runs the movie browser TUI.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<S: ThemeStore>(
    client: Arc<TmdbClient>,
    preference: ThemePreference<S>,
) -> Result<()> {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let mut browser = Browser {
        state: BrowserState::new(preference.theme()),
        client,
        preference,
        search: Debouncer::new(SEARCH_DEBOUNCE),
        action_tx,
        action_rx,
    };
    browser.spawn_genres();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = browser.run(&mut terminal).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

impl<S: ThemeStore> Browser<S> {
    /// Main event loop.
    async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut ticker = tokio::time::interval(TICK);

        loop {
            let mut list_rows = self.state.list_rows;
            terminal
                .draw(|frame| {
                    list_rows = ui::draw(frame, &mut self.state);
                })
                .context("failed to draw TUI")?;
            self.state.list_rows = list_rows;

            if let Some(ticket) = self.state.sentinel_request() {
                self.spawn_page(ticket);
            }

            tokio::select! {
                _ = ticker.tick() => {
                    while event::poll(Duration::ZERO).context("failed to poll events")? {
                        if let Event::Key(key) = event::read().context("failed to read event")?
                            && key.kind == KeyEventKind::Press
                        {
                            self.state.status = None;
                            let command = self.state.handle_key(key.code, key.modifiers);
                            if self.execute(command) {
                                return Ok(());
                            }
                        }
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.state.apply(action);
                }
                text = self.search.fire() => {
                    self.state.commit_search(text);
                }
            }
        }
    }

    /// Runs a key command. Returns `true` to exit.
    fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::None => {}
            Command::Quit => return true,
            Command::Debounce(text) => self.search.push(text),
            Command::Commit(text) => {
                self.search.cancel();
                self.state.commit_search(text);
            }
            Command::LoadPage(ticket) => self.spawn_page(ticket),
            Command::LoadDetails(ticket) => self.spawn_details(ticket),
            Command::ToggleTheme => self.toggle_theme(),
            Command::Open(url) => {
                if let Err(err) = open::that(&url) {
                    tracing::warn!(url = %url, error = %err, "failed to open browser");
                    self.state.status = Some(format!("failed to open {url}"));
                }
            }
        }
        false
    }

    /// Flips the theme and persists it.
    fn toggle_theme(&mut self) {
        if let Err(err) = self.preference.toggle() {
            tracing::warn!(error = %err, "failed to persist theme");
            self.state.status = Some(String::from("failed to save theme"));
        }
        self.state.theme = self.preference.theme();
    }

    /// Fetches the genre list in the background.
    fn spawn_genres(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = client.genres().await;
            let _ = tx.send(Action::GenresLoaded(result));
        });
    }

    /// Fetches a list page in the background.
    fn spawn_page(&self, ticket: LoadTicket) {
        let client = Arc::clone(&self.client);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = fetch_page(client.as_ref(), ticket.request()).await;
            let _ = tx.send(Action::PageLoaded(ticket, result));
        });
    }

    /// Fetches movie details in the background.
    fn spawn_details(&self, ticket: DetailsTicket) {
        let client = Arc::clone(&self.client);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = client.movie_details(ticket.movie_id()).await;
            let _ = tx.send(Action::DetailsLoaded(ticket, result));
        });
    }
}
