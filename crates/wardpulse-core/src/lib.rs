//! Core types and state machines for the WardPulse dashboard.
//!
//! This crate holds everything the UI layer orchestrates but does not
//! own: the session gate, the filter selection and ward catalogue, the
//! wire-facing data model, response normalization, and the fetch-cycle
//! state machine with its out-of-order-completion guard. Nothing here
//! performs I/O, which keeps the whole layer unit-testable.

pub mod error;
pub mod filters;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod session;

pub use error::FetchError;
pub use filters::{ALL, Facet, FilterSelection, WardCatalogue};
pub use model::{
    AnalyticsRow, GeoFeature, GeoFeatureCollection, StrategicSummary, WardProperties,
};
pub use orchestrator::{CycleId, CycleOutcome, CycleTracker, DashboardData};
pub use session::{SessionGate, SessionStatus};
