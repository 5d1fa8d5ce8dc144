//! Sentinel-driven "load next page" trigger.
//!
//! The renderer reports where the viewport and the end-of-list sentinel are;
//! the trigger turns those samples into at most one next-page request per
//! visibility transition.

use crate::controller::LoadState;

/// Default lead margin around the viewport, in logical units.
pub const DEFAULT_LEAD_MARGIN: f64 = 200.0;

/// Default fraction of the sentinel that must be inside the expanded viewport.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// An extent along the scroll axis, in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Offset of the leading edge.
    pub start: f64,
    /// Length (may be zero).
    pub len: f64,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(start: f64, len: f64) -> Self {
        Self { start, len }
    }

    const fn end(self) -> f64 {
        self.start + self.len
    }
}

/// List state the trigger depends on.
///
/// A change of any field while the sentinel is visible counts as a fresh
/// observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerDeps {
    /// Last loaded page.
    pub page: u32,
    /// Total pages.
    pub total_pages: u32,
    /// Load in flight.
    pub loading: bool,
}

impl TriggerDeps {
    /// Snapshots the fields of `state` the trigger depends on.
    #[must_use]
    pub const fn from_state(state: &LoadState) -> Self {
        Self {
            page: state.page,
            total_pages: state.total_pages,
            loading: state.loading,
        }
    }

    const fn can_load(self) -> bool {
        !self.loading && self.page < self.total_pages
    }
}

/// Next-page trigger fed with viewport/sentinel samples.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    lead_margin: f64,
    threshold: f64,
    was_visible: bool,
    deps: Option<TriggerDeps>,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_LEAD_MARGIN, DEFAULT_THRESHOLD)
    }
}

impl ScrollTrigger {
    /// Creates a trigger with the given lead margin and visibility threshold.
    #[must_use]
    pub const fn new(lead_margin: f64, threshold: f64) -> Self {
        Self {
            lead_margin,
            threshold,
            was_visible: false,
            deps: None,
        }
    }

    /// Fraction of `sentinel` inside `viewport` expanded by the lead margin.
    ///
    /// A zero-length sentinel counts as fully visible when it touches the
    /// expanded viewport.
    #[must_use]
    pub fn visible_fraction(&self, viewport: Span, sentinel: Span) -> f64 {
        let top = viewport.start - self.lead_margin;
        let bottom = viewport.end() + self.lead_margin;

        if sentinel.len <= 0.0 {
            return if sentinel.start >= top && sentinel.start <= bottom {
                1.0
            } else {
                0.0
            };
        }

        let overlap = (sentinel.end().min(bottom) - sentinel.start.max(top)).max(0.0);
        (overlap / sentinel.len).min(1.0)
    }

    /// Whether the sentinel counts as visible.
    #[must_use]
    pub fn is_visible(&self, viewport: Span, sentinel: Span) -> bool {
        let fraction = self.visible_fraction(viewport, sentinel);
        fraction > 0.0 && fraction >= self.threshold
    }

    /// Feeds one geometry sample. Returns the page to request, if any.
    pub fn observe(&mut self, viewport: Span, sentinel: Span, deps: TriggerDeps) -> Option<u32> {
        let visible = self.is_visible(viewport, sentinel);
        self.observe_visibility(visible, deps)
    }

    /// Feeds one visibility sample. Returns the page to request, if any.
    ///
    /// Fires when the sentinel is visible, more pages exist and nothing is
    /// loading, and either the sentinel just became visible or `deps`
    /// changed since the previous sample.
    pub fn observe_visibility(&mut self, visible: bool, deps: TriggerDeps) -> Option<u32> {
        let became_visible = visible && !self.was_visible;
        let deps_changed = self.deps != Some(deps);
        self.was_visible = visible;
        self.deps = Some(deps);

        if visible && (became_visible || deps_changed) && deps.can_load() {
            tracing::debug!(page = deps.page, total_pages = deps.total_pages, "sentinel visible");
            Some(deps.page.saturating_add(1))
        } else {
            None
        }
    }

    /// Forgets visibility history, as if the sentinel were observed anew.
    pub const fn reset(&mut self) {
        self.was_visible = false;
        self.deps = None;
    }
}
