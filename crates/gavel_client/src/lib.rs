//! # Gavel Client
//!
//! An async HTTP client for the Judge0 code-execution API.
//!
//! Submits source code plus stdin and limits for sandboxed execution,
//! polls or waits for results, and exposes service metadata (languages,
//! statuses, configuration) through typed resource facades. GET
//! responses and terminal submission results are cached through an
//! injected [`Cache`] backend.
//!
//! ## Example: Running a Submission
//!
//! ```no_run
//! use gavel_client::Judge0Client;
//! use gavel_core::prelude::Submission;
//!
//! async fn run() -> gavel_core::Result<()> {
//!     let client = Judge0Client::new("judge0-ce.p.rapidapi.com", Some("my-key".into()))?;
//!
//!     let submission = Submission {
//!         language_id: 71,
//!         source_code: Some("print('hello')".into()),
//!         stdin: Some("world".into()),
//!         ..Default::default()
//!     };
//!
//!     let created = client.submissions.create(&submission, false).await?;
//!     let result = client.submissions.wait(&created.token).await?;
//!     println!("{:?}", result.stdout);
//!     Ok(())
//! }
//! ```

pub mod archive;
mod http;
mod resources;

use std::sync::Arc;

use gavel_core::prelude::{Cache, Error, Result};

use crate::http::HttpClient;
pub use crate::resources::{Languages, Submissions, System};

/// Deployment policy for credential validation.
///
/// Production requires an API key at construction; development lets the
/// client talk to an unauthenticated (e.g. self-hosted) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Entry point: owns the transport and exposes the resource facades.
#[derive(Clone)]
pub struct Judge0Client {
    http: Arc<HttpClient>,
    pub languages: Languages,
    pub system: System,
    pub submissions: Submissions,
}

impl Judge0Client {
    /// A client for the development environment, without a cache.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when `host` is empty.
    pub fn new(host: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let mut builder = Self::builder(host);
        if let Some(api_key) = api_key {
            builder = builder.api_key(api_key);
        }
        builder.build()
    }

    pub fn builder(host: impl Into<String>) -> Judge0ClientBuilder {
        Judge0ClientBuilder::new(host)
    }

    /// Drops every cached response. No-op without a cache.
    pub fn clear_cache(&self) {
        self.http.clear_cache();
    }
}

/// Builder for [`Judge0Client`].
pub struct Judge0ClientBuilder {
    host: String,
    api_key: Option<String>,
    cache: Option<Arc<dyn Cache>>,
    environment: Environment,
}

impl Judge0ClientBuilder {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: None,
            cache: None,
            environment: Environment::default(),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// # Errors
    ///
    /// [`Error::Config`] when the host is empty, or when the environment
    /// is [`Environment::Production`] and no non-empty API key was given.
    pub fn build(self) -> Result<Judge0Client> {
        if self.host.trim().is_empty() {
            return Err(Error::Config(
                "Judge0 API host is required; pass it to the builder".into(),
            ));
        }

        if self.environment == Environment::Production
            && self.api_key.as_deref().is_none_or(|key| key.is_empty())
        {
            return Err(Error::Config(
                "Judge0 API key is required in the production environment".into(),
            ));
        }

        let http = Arc::new(HttpClient::new(&self.host, self.api_key, self.cache));

        Ok(Judge0Client {
            languages: Languages::new(http.clone()),
            system: System::new(http.clone()),
            submissions: Submissions::new(http.clone()),
            http,
        })
    }
}
