//! # ⚖️ Gavel
//!
//!> *Bring down the hammer on untrusted code*
//!
//! A modular client for the [Judge0](https://judge0.com) code-execution API:
//! submit source code for sandboxed execution, poll or wait for the verdict,
//! and query service metadata (languages, statuses, configuration).
//!
//! This crate serves as an entry point, re-exporting the core types and
//! optionally including the HTTP client and cache implementations via feature flags.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | **`client`** | Includes the reqwest-based client (`gavel_client`) with resource facades and the archive builder. |
//! | **`memory_cache`** | In-process cache backend (`gavel_cache_memory`) for response caching. |
//!
//! Both are enabled by default.
//!
//! ## Example: Running a Submission
//!
//! ```rust,no_run
//! use gavel::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> gavel::Result<()> {
//!     let client = Judge0Client::builder("judge0-ce.p.rapidapi.com")
//!         .api_key("my-key")
//!         .cache(Arc::new(MemoryCache::new()))
//!         .build()?;
//!
//!     let submission = Submission {
//!         language_id: 71,
//!         source_code: Some("print('hello')".into()),
//!         ..Default::default()
//!     };
//!
//!     let created = client.submissions.create(&submission, false).await?;
//!     let result = client.submissions.wait(&created.token).await?;
//!
//!     println!("{:?}: {:?}", result.status, result.stdout);
//!     Ok(())
//! }
//! ```

pub use gavel_core::*;

#[cfg(feature = "client")]
pub mod client {
    pub use gavel_client::*;
}

#[cfg(feature = "memory_cache")]
pub mod cache_memory {
    pub use gavel_cache_memory::*;
}

pub mod prelude {
    pub use gavel_core::prelude::*;

    #[cfg(feature = "client")]
    pub use gavel_client::{Environment, Judge0Client, Judge0ClientBuilder, archive};

    #[cfg(feature = "memory_cache")]
    pub use gavel_cache_memory::MemoryCache;
}
