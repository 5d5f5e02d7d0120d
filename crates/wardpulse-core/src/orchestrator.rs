//! Fetch-cycle coordination: the generation guard and the observable
//! dashboard state it protects.
//!
//! Rapid filter changes can start overlapping fetch cycles whose
//! responses arrive out of order. Only the most recently begun cycle may
//! publish; a superseded completion is discarded in full so a stale
//! response can never overwrite fresher data.

use chrono::{DateTime, Utc};

use crate::error::FetchError;
use crate::filters::WardCatalogue;
use crate::model::AnalyticsRow;

/// Identifier of one orchestrated fetch cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleId(u64);

/// Monotonic generation counter for fetch cycles.
#[derive(Clone, Debug, Default)]
pub struct CycleTracker {
    latest: u64,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cycle, superseding any cycle still in flight.
    pub fn begin(&mut self) -> CycleId {
        self.latest += 1;
        CycleId(self.latest)
    }

    pub fn is_current(&self, id: CycleId) -> bool {
        id.0 == self.latest
    }
}

/// Result of one completed fetch cycle.
#[derive(Clone, Debug)]
pub enum CycleOutcome {
    Loaded {
        rows: Vec<AnalyticsRow>,
        /// `Some` only when the cycle refreshed the ward catalogue.
        wards: Option<Vec<String>>,
    },
    Failed(FetchError),
}

/// Observable dashboard state fed by the fetch cycles.
#[derive(Clone, Debug, Default)]
pub struct DashboardData {
    rows: Vec<AnalyticsRow>,
    wards: WardCatalogue,
    error: Option<String>,
    loading: bool,
    loaded_once: bool,
    last_updated: Option<DateTime<Utc>>,
}

impl DashboardData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[AnalyticsRow] {
        &self.rows
    }

    pub fn wards(&self) -> &WardCatalogue {
        &self.wards
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether any cycle has ever completed successfully. Selects the
    /// full-screen loading state versus the lightweight "updating"
    /// indicator over previously rendered data.
    pub fn has_loaded(&self) -> bool {
        self.loaded_once
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Start a cycle: raise the in-progress flag and clear the previous
    /// error, keeping already-rendered rows on screen.
    pub fn begin_cycle(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Publish a completed cycle only if it is still the newest one.
    /// Returns whether the outcome was applied.
    pub fn publish(
        &mut self,
        tracker: &CycleTracker,
        id: CycleId,
        outcome: CycleOutcome,
    ) -> bool {
        if !tracker.is_current(id) {
            return false;
        }
        self.finish_cycle(outcome);
        true
    }

    /// Apply a finished cycle. The in-progress flag clears on every
    /// path, success or failure.
    pub fn finish_cycle(&mut self, outcome: CycleOutcome) {
        match outcome {
            CycleOutcome::Loaded { rows, wards } => {
                self.rows = rows;
                if let Some(names) = wards {
                    self.wards.merge(names);
                }
                self.loaded_once = true;
                self.last_updated = Some(Utc::now());
            }
            CycleOutcome::Failed(err) => {
                self.error = Some(err.display_message());
            }
        }
        self.loading = false;
    }

    /// Logout path: no stale data survives the transition. The recorded
    /// error stays so the login screen can explain a forced expiry.
    pub fn clear(&mut self) {
        self.rows = Vec::new();
        self.wards.clear();
        self.loading = false;
        self.loaded_once = false;
        self.last_updated = None;
    }

    /// Login-success path: the previously recorded error is gone.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
