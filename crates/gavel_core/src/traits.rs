use std::time::Duration;

use serde_json::Value;

/// A trait for injecting a response-cache backend into the client.
///
/// The client holds it as `Arc<dyn Cache>`, so implementations must be
/// object-safe and own their synchronization; the cached values are raw
/// response mappings, never DTOs.
///
/// TTL semantics: `ttl: None` means the entry never expires; `Some(d)`
/// fixes the absolute expiry at write time as now + `d`. Reads must treat
/// an entry whose expiry has passed as absent and evict it lazily —
/// there is no background sweep.
pub trait Cache: Send + Sync {
    /// Returns the value for `key`, or [`None`] when the key is missing
    /// or expired. Never fails.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous entry and its
    /// expiry.
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> bool;

    /// Whether a live (non-expired) entry exists for `key`.
    fn has(&self, key: &str) -> bool;

    fn delete(&self, key: &str) -> bool;

    fn clear(&self) -> bool;
}
