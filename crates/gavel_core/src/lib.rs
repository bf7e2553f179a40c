//! # Gavel Core
//!
//! Types and traits shared by the gavel Judge0 client crates.
//!
//! Defines the data transfer objects exchanged with the judging service and
//! the capabilities injected into the client.
//!
//! - **[`Submission`](submission::Submission)** / **[`SubmissionResult`](submission::SubmissionResult)**:
//!   the request payload sent for execution and the immutable result snapshot
//!   returned per poll.
//! - **[`Status`](status::Status)**: the closed set of execution outcomes,
//!   with pending/success/error classification.
//! - **[`Cache`](traits::Cache)**: trait for implementing response-cache
//!   backends (e.g. in-process, Redis).

pub mod error;
pub mod language;
pub mod status;
pub mod submission;
pub mod system;
pub mod traits;

pub use error::{Error, Result};

pub mod prelude {
    pub use super::error::*;
    pub use super::language::*;
    pub use super::routes;
    pub use super::status::*;
    pub use super::submission::*;
    pub use super::system::*;
    pub use super::traits::*;
}

pub mod routes {
    pub const LANGUAGES: &str = "/languages";
    pub const LANGUAGE_BY_ID: &str = "/languages/{id}";

    pub const ABOUT: &str = "/about";
    pub const CONFIG_INFO: &str = "/config_info";
    pub const STATUSES: &str = "/statuses";

    pub const SUBMISSIONS: &str = "/submissions";
    pub const SUBMISSION_BY_TOKEN: &str = "/submissions/{token}";
    pub const SUBMISSIONS_BATCH: &str = "/submissions/batch";
}
