//! Client-side catalog logic for cinecat.
//!
//! Everything here is presentation-agnostic: the list loading controller
//! and its helpers are driven by whatever event loop renders them.

/// Debounced input bridge.
pub mod debounce;
/// Movie details loader.
pub mod details;
/// Session genre catalog.
pub mod genres;
/// Theme preference.
pub mod theme;

mod controller;
mod criteria;
mod scroll;

#[cfg(test)]
mod testing;

pub use controller::{
    LIST_ERROR_MESSAGE, ListController, LoadOutcome, LoadPhase, LoadState, LoadTicket,
    PageRequest, fetch_page,
};
pub use criteria::{CatalogQuery, FilterCriteria, GenreFilter};
pub use scroll::{DEFAULT_LEAD_MARGIN, DEFAULT_THRESHOLD, ScrollTrigger, Span, TriggerDeps};
