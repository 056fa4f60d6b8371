use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a unique request ID
pub fn generate_request_id() -> u64 {
    REQUEST_ID.fetch_add(1, Ordering::Relaxed)
}
