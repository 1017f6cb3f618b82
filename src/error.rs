use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds surfaced by the lookup pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The place name resolved to zero geocoding matches. User-correctable.
    #[error("no geocoding results for '{0}'")]
    NotFound(String),

    /// Network failure, timeout, or non-2xx response. `status` is present
    /// when an HTTP response was actually received.
    #[error("transport failure: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The provider payload did not match the expected structure. Indicates
    /// provider contract drift rather than user error.
    #[error("malformed weather data: {0}")]
    MalformedData(String),

    /// Search-history persistence failed. Never fatal to the read path.
    #[error("history storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    /// A non-2xx response, keeping the status and a short body snippet.
    pub(crate) fn bad_status(status: reqwest::StatusCode, body: &str) -> Self {
        Error::Transport {
            status: Some(status.as_u16()),
            message: format!("status {}: {}", status, truncate_body(body)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let end = (1..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
