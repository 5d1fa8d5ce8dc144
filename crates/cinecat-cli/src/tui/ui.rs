//! TUI rendering logic for the movie browser.

use cinecat_api::tmdb::{ImageSize, Movie, image_url};
use cinecat_core::LoadPhase;
use cinecat_core::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

use super::state::{BrowserState, InputMode, View};

/// Colors for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    bg: Color,
    fg: Color,
    accent: Color,
    muted: Color,
    error: Color,
}

/// Palette for `theme`.
const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            error: Color::LightRed,
        },
        Theme::Light => Palette {
            bg: Color::White,
            fg: Color::Black,
            accent: Color::Blue,
            muted: Color::Gray,
            error: Color::Red,
        },
    }
}

/// Release year or a placeholder.
fn year_label(movie: &Movie) -> String {
    movie
        .release_year()
        .map_or_else(|| String::from("----"), |y| y.to_string())
}

/// Draws the browser UI. Returns the number of list rows visible.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState) -> u16 {
    let colors = palette(state.theme);
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg).fg(colors.fg)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search + filter
            Constraint::Min(5),    // main content
            Constraint::Length(3), // status + key hints
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state, colors);
    let rows = match state.view {
        View::List => draw_list(frame, chunks[1], state, colors),
        View::Details => {
            draw_details(frame, chunks[1], state, colors);
            0
        }
    };
    draw_footer(frame, chunks[2], state, colors);

    rows
}

/// Draws the search box and the active genre filter.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState, colors: Palette) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search_style = if state.input_mode == InputMode::Search {
        Style::default().fg(colors.accent)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.search_input.as_str())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, header_chunks[0]);

    let genre = Paragraph::new(state.genres.label(state.list.criteria().genre))
        .block(Block::default().borders(Borders::ALL).title(" Genre: g "));
    frame.render_widget(genre, header_chunks[1]);
}

/// Draws the movie list. Returns the number of visible rows.
fn draw_list(frame: &mut Frame, area: Rect, state: &mut BrowserState, colors: Palette) -> u16 {
    let list = state.list.state();
    let title = format!(
        " Movies ({}) - page {}/{} ",
        list.items.len(),
        list.page,
        list.total_pages
    );

    let header = Row::new(vec!["Title", "Year", "Rating", "Genres"])
        .style(
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = list
        .items
        .iter()
        .map(|m| {
            Row::new(vec![
                m.title.clone(),
                year_label(m),
                format!("{:.1}", m.vote_average),
                state.genres.names_for(&m.genre_ids).join(", "),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(30),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut state.table_state);

    // borders (2) + header with margin (2)
    area.height.saturating_sub(4)
}

/// Draws the details view.
fn draw_details(frame: &mut Frame, area: Rect, state: &BrowserState, colors: Palette) {
    let details = state.details.state();
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    let mut lines: Vec<Line> = if let Some(ref movie) = details.movie {
        let genres = movie.genres.as_ref().map_or_else(
            || state.genres.names_for(&movie.genre_ids).join(", "),
            |g| {
                g.iter()
                    .map(|g| g.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        );
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} ({})", movie.title, year_label(movie)),
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Rating: {:.1}", movie.vote_average)),
            Line::from(format!("Genres: {genres}")),
            Line::from(""),
            Line::from(movie.overview.as_str()),
            Line::from(""),
        ];
        for (label, url) in [
            ("Poster", image_url(movie.poster_path.as_deref(), ImageSize::W300)),
            ("Banner", image_url(movie.backdrop_path.as_deref(), ImageSize::W1280)),
        ] {
            if let Some(url) = url {
                lines.push(Line::from(Span::styled(
                    format!("{label}: {url}"),
                    Style::default().fg(colors.muted),
                )));
            }
        }
        lines
    } else if details.loading {
        vec![Line::from("Loading...")]
    } else {
        Vec::new()
    };

    if let Some(ref message) = details.error {
        lines.push(Line::from(Span::styled(
            format!("{message} (r: retry)"),
            Style::default().fg(colors.error),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Status line for the list.
fn list_status(state: &BrowserState, colors: Palette) -> Option<Span<'static>> {
    let list = state.list.state();
    match list.phase() {
        LoadPhase::Loading => Some(Span::raw("Loading...")),
        LoadPhase::Failed => list.error.as_ref().map(|message| {
            Span::styled(
                format!("{message} (r: retry)"),
                Style::default().fg(colors.error),
            )
        }),
        LoadPhase::Loaded if list.items.is_empty() => Some(Span::raw("No movies found")),
        LoadPhase::Loaded if !list.has_more() => Some(Span::styled(
            "End of results",
            Style::default().fg(colors.muted),
        )),
        LoadPhase::Idle | LoadPhase::Loaded => None,
    }
}

/// Draws the footer with status and key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState, colors: Palette) {
    let hints = match (state.input_mode, state.view) {
        (InputMode::Search, _) => "Type to search | Esc: clear | Enter: apply",
        (InputMode::Normal, View::List) => {
            "\u{2191}\u{2193}/j/k: move  PgUp/PgDn: page  Enter: details  /: search  g: genre  r: retry  t: theme  o: open  q: quit"
        }
        (InputMode::Normal, View::Details) => "Esc: back  r: retry  t: theme  o: open  q: quit",
    };

    let mut spans = Vec::new();
    let status = state.status.as_ref().map_or_else(
        || match state.view {
            View::List => list_status(state, colors),
            View::Details => None,
        },
        |message| Some(Span::styled(message.clone(), Style::default().fg(colors.error))),
    );
    if let Some(status) = status {
        spans.push(status);
        spans.push(Span::raw("  |  "));
    }
    spans.push(Span::styled(hints, Style::default().fg(colors.muted)));

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", state.theme)));
    frame.render_widget(footer, area);
}
