//! Task-local trace id for one logical operation.
//!
//! The calling layer establishes a scope per request; the store-error
//! classifier and the problem-details renderer read it back so a failure
//! can be matched to its log lines.

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;
use tokio::task_local;
use xxhash_rust::xxh3::xxh3_64;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

static SEQ: AtomicU64 = AtomicU64::new(0);

/// The trace id of the current task, if a scope was established.
pub fn current() -> Option<String> {
    TRACE_ID
        .try_with(|cell| cell.borrow().as_ref().cloned())
        .ok()
        .flatten()
}

/// Returns "unknown" outside of a trace scope.
pub fn trace_id() -> String {
    current().unwrap_or_else(|| "unknown".to_string())
}

/// A fresh 16-hex-digit id, unique within the process.
pub fn generate() -> String {
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let mut seed = [0u8; 24];
    seed[..16].copy_from_slice(&nanos.to_le_bytes());
    seed[16..].copy_from_slice(&seq.to_le_bytes());
    format!("{:016x}", xxh3_64(&seed))
}

/// Run a future within a trace scope.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
