//! Resource facades: typed operations composed from the transport
//! wrapper and the core DTOs.

use std::sync::Arc;
use std::time::Duration;

use gavel_core::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::http::HttpClient;

/// Metadata endpoints change rarely; a day of caching is safe.
const METADATA_CACHE_TTL: Duration = Duration::from_secs(86_400);
/// Service identity and limits may be reconfigured, so cache for an hour.
const SYSTEM_CACHE_TTL: Duration = Duration::from_secs(3_600);
/// Terminal submission results are immutable; kept for a day.
const FINAL_RESULT_CACHE_TTL: Duration = Duration::from_secs(86_400);

const DEFAULT_MAX_ATTEMPTS: u32 = 30;
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1_000);

fn base64_fields_query() -> Vec<(String, String)> {
    vec![
        ("base64_encoded".into(), "true".into()),
        ("fields".into(), "*".into()),
    ]
}

/// Supported runtimes exposed by the service.
#[derive(Clone)]
pub struct Languages {
    http: Arc<HttpClient>,
}

impl Languages {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// All available languages.
    pub async fn all(&self) -> Result<Vec<Language>> {
        let response = self
            .http
            .get(routes::LANGUAGES, &[], Some(METADATA_CACHE_TTL))
            .await?;
        serde_json::from_value(response).map_err(Error::parse)
    }

    /// A single language by id.
    pub async fn get(&self, id: u32) -> Result<Language> {
        let endpoint = routes::LANGUAGE_BY_ID.replace("{id}", &id.to_string());
        let response = self.http.get(&endpoint, &[], Some(METADATA_CACHE_TTL)).await?;
        serde_json::from_value(response).map_err(Error::parse)
    }
}

/// Read-only service metadata.
#[derive(Clone)]
pub struct System {
    http: Arc<HttpClient>,
}

impl System {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Service identity (version, homepage, maintainer).
    pub async fn about(&self) -> Result<About> {
        let response = self
            .http
            .get(routes::ABOUT, &[], Some(SYSTEM_CACHE_TTL))
            .await?;
        serde_json::from_value(response).map_err(Error::parse)
    }

    /// Service limits and maintenance flags.
    pub async fn config(&self) -> Result<Config> {
        let response = self
            .http
            .get(routes::CONFIG_INFO, &[], Some(SYSTEM_CACHE_TTL))
            .await?;
        serde_json::from_value(response).map_err(Error::parse)
    }

    /// The full status table.
    pub async fn statuses(&self) -> Result<Vec<Status>> {
        let response = self
            .http
            .get(routes::STATUSES, &[], Some(METADATA_CACHE_TTL))
            .await?;
        serde_json::from_value(response).map_err(Error::parse)
    }
}

/// Submission lifecycle: create, fetch, batch and wait-for-completion.
#[derive(Clone)]
pub struct Submissions {
    http: Arc<HttpClient>,
}

impl Submissions {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Submits source code for execution.
    ///
    /// With `wait`, the server is asked to block until the submission
    /// completes instead of returning a queued token immediately.
    pub async fn create(&self, submission: &Submission, wait: bool) -> Result<SubmissionResult> {
        let mut query = base64_fields_query();
        if wait {
            query.push(("wait".into(), "true".into()));
        }

        let payload = Value::Object(submission.to_payload(true)?);
        let response = self.http.post(routes::SUBMISSIONS, &payload, &query).await?;

        SubmissionResult::from_value(response, true).map_err(Error::parse)
    }

    /// Fetches the current result for `token`.
    ///
    /// Terminal results are memoized under `submission:{token}` when a
    /// cache is configured. The transport GET cache is deliberately
    /// bypassed here: whether a response may be cached depends on its
    /// completion state, which is only knowable after the call.
    pub async fn get(&self, token: &str) -> Result<SubmissionResult> {
        let endpoint = routes::SUBMISSION_BY_TOKEN.replace("{token}", token);
        let response = self.http.get(&endpoint, &base64_fields_query(), None).await?;

        let result = SubmissionResult::from_value(response.clone(), true).map_err(Error::parse)?;

        if !result.is_pending() {
            if let Some(cache) = self.http.cache() {
                let key = format!("submission:{token}");
                debug!(key = %key, "memoizing terminal result");
                cache.set(&key, response, Some(FINAL_RESULT_CACHE_TTL));
            }
        }

        Ok(result)
    }

    /// Creates several submissions in one call; results come back in
    /// request order.
    pub async fn create_batch(&self, submissions: &[Submission]) -> Result<Vec<SubmissionResult>> {
        let payloads = submissions
            .iter()
            .map(|s| s.to_payload(true).map(Value::Object))
            .collect::<Result<Vec<_>>>()?;

        let body = serde_json::json!({ "submissions": payloads });
        let query = vec![("base64_encoded".to_string(), "true".to_string())];
        let response = self
            .http
            .post(routes::SUBMISSIONS_BATCH, &body, &query)
            .await?;

        parse_results(response)
    }

    /// Fetches several results by token.
    pub async fn get_batch(&self, tokens: &[&str]) -> Result<Vec<SubmissionResult>> {
        let mut query = base64_fields_query();
        query.push(("tokens".into(), tokens.join(",")));

        let response = self.http.get(routes::SUBMISSIONS_BATCH, &query, None).await?;
        parse_results(response)
    }

    /// Polls `token` every second, up to 30 attempts.
    pub async fn wait(&self, token: &str) -> Result<SubmissionResult> {
        self.wait_with(token, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL)
            .await
    }

    /// Polls `token` at a fixed `interval` until it leaves the pending
    /// state or the attempt budget runs out.
    ///
    /// Exhausting the budget is not an error: one final fetch is issued
    /// and its result returned as-is, pending or not, for a total of
    /// `max_attempts + 1` calls. No backoff, no jitter; cancellation is
    /// the caller's concern.
    pub async fn wait_with(
        &self,
        token: &str,
        max_attempts: u32,
        interval: Duration,
    ) -> Result<SubmissionResult> {
        for attempt in 0..max_attempts {
            let result = self.get(token).await?;
            if !result.is_pending() {
                return Ok(result);
            }

            debug!(token, attempt, "submission still pending");
            tokio::time::sleep(interval).await;
        }

        self.get(token).await
    }
}

/// The batch endpoint answers with either a bare array or an object
/// wrapping a `submissions` array; both shapes normalize here.
fn parse_results(response: Value) -> Result<Vec<SubmissionResult>> {
    let items = match response {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("submissions") {
            Some(Value::Array(items)) => items,
            _ => return Err(Error::parse("missing submissions array in batch response")),
        },
        other => return Err(Error::parse(format!("unexpected batch response: {other}"))),
    };

    items
        .into_iter()
        .map(|item| SubmissionResult::from_value(item, true).map_err(Error::parse))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn batch_responses_normalize_from_both_shapes() {
        let bare = json!([{"token": "a"}, {"token": "b"}]);
        let wrapped = json!({"submissions": [{"token": "a"}, {"token": "b"}]});

        for shape in [bare, wrapped] {
            let results = parse_results(shape).unwrap();
            assert_eq!(results.len(), 2);
            assert_eq!(results[0].token, "a");
            assert_eq!(results[1].token, "b");
        }
    }

    #[test]
    fn malformed_batch_responses_are_api_errors() {
        for shape in [json!({"detail": "oops"}), json!(42)] {
            match parse_results(shape) {
                Err(Error::Api { status_code: 0, .. }) => {}
                other => panic!("expected Api error, got {other:?}"),
            }
        }
    }
}
