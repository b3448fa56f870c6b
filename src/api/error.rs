//! Errors from talking to the backend

use std::fmt;

/// Errors that can occur during a backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout
    Network(String),
    /// Any non-2xx response, redirects included (the backend redirects to
    /// its login page when the session is missing)
    Status { status: u16, message: String },
    /// Body was not the JSON we expected
    Decode(String),
    /// Base URL or endpoint path could not be turned into a URL
    InvalidUrl(String),
}

impl ApiError {
    /// Build from a reqwest error raised while sending or reading the body
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if e.is_timeout() {
            Self::Network(format!("request timed out: {}", e))
        } else {
            Self::Network(e.to_string())
        }
    }

    /// Whether the backend answered with a redirect
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (300..400).contains(status))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status { status, message } if self.is_redirect() => {
                write!(f, "Server redirected ({}): {} - is the session cookie set?", status, message)
            }
            Self::Status { status, message } => write!(f, "Server error ({}): {}", status, message),
            Self::Decode(msg) => write!(f, "Malformed response: {}", msg),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 400,
            message: "Invalid category".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (400): Invalid category");
        assert!(!err.is_redirect());

        let redirect = ApiError::Status {
            status: 302,
            message: "/login".to_string(),
        };
        assert!(redirect.is_redirect());
        assert!(redirect.to_string().contains("session cookie"));
    }
}
