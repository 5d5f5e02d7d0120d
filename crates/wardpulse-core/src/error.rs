//! Fetch failure taxonomy shared by the client and the dashboard.

use thiserror::Error;

/// Classified failure of a backend fetch.
///
/// The `Display` text doubles as the user-visible message, so every
/// variant reads as a sentence.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The call never completed (DNS failure, refused connection,
    /// dropped socket).
    #[error("Failed to reach the analytics service: {0}")]
    Network(String),

    /// The backend denied authorization mid-session.
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    /// A response arrived but could not be read as the expected shape.
    #[error("Received an unreadable response from the analytics service: {0}")]
    Malformed(String),

    /// Anything not covered by the other variants.
    #[error("Dashboard request failed: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Classify a non-success HTTP status. Authorization denials get the
    /// dedicated expiry variant; everything else is `Unknown` with the
    /// status recorded for display.
    pub fn from_status(status: u16, context: &str) -> FetchError {
        match status {
            401 | 403 => FetchError::SessionExpired,
            _ => FetchError::Unknown(format!("{context} returned HTTP {status}")),
        }
    }

    /// True for the session-expiry signal that forces a logout.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, FetchError::SessionExpired)
    }

    /// Display-facing message, set on every failure path.
    pub fn display_message(&self) -> String {
        self.to_string()
    }
}
