//! Error types for navigation, schema inference and transport.

/// Failures of the transport collaborators (HTTP client, browser session).
///
/// These may be transient, unlike structural mismatches, so callers are free
/// to retry them.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("browser error: {0}")]
    Browser(String),
}

impl TransportError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Timeout { .. } | TransportError::Request { .. } => true,
            TransportError::Status { status, .. } => *status >= 500 || *status == 429,
            TransportError::Browser(_) => false,
        }
    }
}

/// All errors surfaced by the waypoint core.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// A waypoint matched no clickable or linked element on the current document.
    #[error("no link or clickable element `{waypoint}` on {location}")]
    Navigation { waypoint: String, location: String },

    /// The sample label or value pattern could not be anchored on the terminal document.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid value pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl ScrapeError {
    pub fn navigation(waypoint: impl Into<String>, location: impl Into<String>) -> Self {
        ScrapeError::Navigation {
            waypoint: waypoint.into(),
            location: location.into(),
        }
    }

    /// Only transport failures are worth retrying; a structural mismatch
    /// means the site layout changed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScrapeError::Transport(e) => e.is_retryable(),
            _ => false,
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_error_names_waypoint_and_location() {
        let err = ScrapeError::navigation("NoSuchLink", "http://example.com/football");
        let msg = err.to_string();
        assert!(msg.contains("NoSuchLink"));
        assert!(msg.contains("http://example.com/football"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retryable_transport_errors() {
        let timeout: ScrapeError = TransportError::Timeout {
            url: "http://a".into(),
            timeout_ms: 10,
        }
        .into();
        assert!(timeout.is_retryable());

        let not_found: ScrapeError = TransportError::Status {
            url: "http://a".into(),
            status: 404,
        }
        .into();
        assert!(!not_found.is_retryable());

        let overloaded = TransportError::Status {
            url: "http://a".into(),
            status: 503,
        };
        assert!(overloaded.is_retryable());
        assert!(!ScrapeError::Parse("label anchor not found".into()).is_retryable());
    }
}
