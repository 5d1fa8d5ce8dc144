//! cinecat - browse the TMDB movie catalog from the terminal.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cinecat_api::tmdb::{ImageSize, Movie, TmdbClient, image_url};
use cinecat_core::details::DetailsLoader;
use cinecat_core::genres::GenreCatalog;
use cinecat_core::theme::ThemePreference;
use cinecat_core::{FilterCriteria, GenreFilter, LIST_ERROR_MESSAGE, ListController, LoadOutcome};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{FileThemeStore, resolve_config_path, system_prefers_dark};
use crate::tui::run_browser;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List popular movies.
    Popular(PageArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// List movies of one genre.
    Discover(DiscoverArgs),
    /// Show details for one movie.
    Details(DetailsArgs),
    /// List movie genres.
    Genres,
    /// Show or toggle the color theme.
    Theme(ThemeCommand),
    /// Browse the catalog interactively.
    Browse,
}

/// Page selection shared by list subcommands.
#[derive(clap::Args)]
struct PageArgs {
    /// Page to fetch (1-500).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=500))]
    page: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Dune").
    #[arg(long, required = true)]
    query: String,
    /// Page selection.
    #[command(flatten)]
    page: PageArgs,
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// TMDB genre ID (see `cinecat genres`).
    #[arg(long, required = true)]
    genre: u32,
    /// Page selection.
    #[command(flatten)]
    page: PageArgs,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `theme` subcommand.
#[derive(clap::Args)]
struct ThemeCommand {
    /// Theme subcommand to run.
    #[command(subcommand)]
    command: ThemeSubcommands,
}

/// Available theme subcommands.
#[derive(Subcommand)]
enum ThemeSubcommands {
    /// Print the current theme.
    Show,
    /// Switch between light and dark and persist the choice.
    Toggle,
}

/// Builds the TMDB client from environment credentials.
///
/// `TMDB_API_TOKEN` (bearer) and `TMDB_API_KEY` (`api_key` parameter) are
/// both optional; without them requests fail with an authentication error.
///
/// # Errors
///
/// Returns an error if the client fails to build.
fn build_tmdb_client() -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Ok(token) = std::env::var("TMDB_API_TOKEN") {
        builder = builder.api_token(token);
    }
    if let Ok(key) = std::env::var("TMDB_API_KEY") {
        builder = builder.api_key(key);
    }
    builder.build().context("failed to build TMDB client")
}

/// Opens the persisted theme preference.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved.
fn open_theme_preference(dir: Option<&PathBuf>) -> Result<ThemePreference<FileThemeStore>> {
    let path = resolve_config_path(dir.map(PathBuf::as_path))?;
    Ok(ThemePreference::init(
        FileThemeStore::new(path),
        system_prefers_dark(),
    ))
}

/// Formats one list row.
fn format_row(movie: &Movie) -> String {
    let year = movie
        .release_year()
        .map_or_else(|| String::from("----"), |y| y.to_string());
    format!(
        "{}\t{}\t{:.1}\t{}",
        movie.id, year, movie.vote_average, movie.title
    )
}

/// Loads one page through the list controller and prints it.
///
/// # Errors
///
/// Returns an error if the client fails to build or the page fails to load.
#[instrument(skip_all)]
async fn run_list_page(page: u32, criteria: FilterCriteria) -> Result<()> {
    let client = build_tmdb_client()?;
    let mut controller = ListController::with_criteria(criteria);

    if controller.load(&client, page, None).await == LoadOutcome::Failed {
        let message = controller.state().error.as_deref().unwrap_or(LIST_ERROR_MESSAGE);
        bail!("{message}");
    }

    let state = controller.state();
    tracing::info!(
        "Page {}/{} ({} movies)",
        state.page,
        state.total_pages,
        state.items.len()
    );
    tracing::info!("ID\tYear\tRating\tTitle");
    for movie in &state.items {
        tracing::info!("{}", format_row(movie));
    }

    Ok(())
}

/// Runs the `discover` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the page fails to load.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs) -> Result<()> {
    let client = build_tmdb_client()?;
    let mut genres = GenreCatalog::new();
    genres.ensure_loaded(&client).await;
    tracing::info!("Genre: {}", genres.label(GenreFilter::Genre(args.genre)));

    let criteria = FilterCriteria::new(String::new(), GenreFilter::Genre(args.genre));
    run_list_page(args.page.page, criteria).await
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the movie fails to load.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs) -> Result<()> {
    let client = build_tmdb_client()?;
    let mut loader = DetailsLoader::new();
    loader.load(&client, args.id).await;

    let state = loader.state();
    if let Some(ref message) = state.error {
        bail!("{message}");
    }
    let Some(ref movie) = state.movie else {
        bail!("no movie returned for id {}", args.id);
    };

    let genres = movie
        .genres
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    tracing::info!("{} ({})", movie.title, movie.release_date.as_deref().unwrap_or("-"));
    tracing::info!("Rating: {:.1}", movie.vote_average);
    tracing::info!("Genres: {}", if genres.is_empty() { "-" } else { genres.as_str() });
    if let Some(url) = image_url(movie.poster_path.as_deref(), ImageSize::W300) {
        tracing::info!("Poster: {url}");
    }
    if let Some(url) = image_url(movie.backdrop_path.as_deref(), ImageSize::W1280) {
        tracing::info!("Banner: {url}");
    }
    if !movie.overview.is_empty() {
        tracing::info!("{}", movie.overview);
    }

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_genres() -> Result<()> {
    use cinecat_api::tmdb::CatalogApi;

    let client = build_tmdb_client()?;
    let genres = client
        .genres()
        .await
        .context("TMDB genre list request failed")?;

    tracing::info!("ID\tName");
    for genre in &genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }

    Ok(())
}

/// Runs the `theme` subcommands.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the toggle
/// cannot be persisted.
fn run_theme(command: &ThemeSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let mut preference = open_theme_preference(dir)?;
    match command {
        ThemeSubcommands::Show => {
            tracing::info!("Theme: {}", preference.theme());
        }
        ThemeSubcommands::Toggle => {
            let theme = preference.toggle().context("failed to persist theme")?;
            tracing::info!("Theme: {theme}");
        }
    }
    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let client = Arc::new(build_tmdb_client()?);
    let preference = open_theme_preference(dir)?;
    run_browser(client, preference).await
}

/// Initializes tracing with `default_level` unless `RUST_LOG` is set.
fn init_tracing(default_level: &str) {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Log lines would tear the alternate screen.
    init_tracing(if matches!(cli.command, Commands::Browse) {
        "off"
    } else {
        "info"
    });

    match cli.command {
        Commands::Popular(args) => run_list_page(args.page, FilterCriteria::default()).await,
        Commands::Search(args) => {
            let criteria = FilterCriteria::new(args.query, GenreFilter::All);
            run_list_page(args.page.page, criteria).await
        }
        Commands::Discover(args) => run_discover(&args).await,
        Commands::Details(args) => run_details(&args).await,
        Commands::Genres => run_genres().await,
        Commands::Theme(theme) => run_theme(&theme.command, cli.dir.as_ref()),
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row_with_year() {
        // Arrange
        let movie = Movie {
            id: 438_631,
            title: String::from("Dune"),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: Some(String::from("2021-09-15")),
            vote_average: 7.8,
            genre_ids: vec![878],
            genres: None,
        };

        // Act & Assert
        assert_eq!(format_row(&movie), "438631\t2021\t7.8\tDune");
    }

    #[test]
    fn test_format_row_without_date() {
        // Arrange
        let movie = Movie {
            id: 1,
            title: String::from("Untitled"),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: 0.0,
            genre_ids: Vec::new(),
            genres: None,
        };

        // Act & Assert
        assert_eq!(format_row(&movie), "1\t----\t0.0\tUntitled");
    }
}
