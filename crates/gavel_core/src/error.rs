use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the gavel crates.
#[derive(Error, Debug)]
pub enum Error {
    /// The client was constructed with an invalid configuration
    /// (missing host, or missing API key where policy requires one).
    #[error("configuration error: {0}")]
    Config(String),

    /// A remote call failed. This is the only error the transport raises:
    /// connection faults, non-2xx statuses and unparseable result payloads
    /// all translate to it. `status_code` is `0` when the failure was not
    /// an HTTP-status failure; `body` carries the parsed error response
    /// when the server sent one.
    #[error("api error (status {status_code}): {message}")]
    Api {
        message: String,
        status_code: u16,
        body: Option<Value>,
    },

    /// An input was rejected before any I/O took place (conflicting
    /// submission payload fields, empty archive file set, blank run
    /// script, missing or unreadable source path).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The archive builder could not stage, write or read back the
    /// temporary zip archive.
    #[error("archive construction failed: {0}")]
    Archive(String),
}

impl Error {
    /// An [`Error::Api`] for a failure that never reached HTTP status
    /// handling, such as a connection fault or an unparseable result.
    pub fn api(message: impl Into<String>) -> Self {
        Error::Api {
            message: message.into(),
            status_code: 0,
            body: None,
        }
    }

    /// Translates a response-decoding failure into the uniform API error.
    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::api(format!("failed to decode response: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
