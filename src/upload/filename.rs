//! Generated object names
//!
//! When a request carries no explicit filename the resolved key falls
//! back to an opaque generated token. Only uniqueness is load-bearing;
//! the token is a 32-character lowercase hex string.

use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate a collision-resistant opaque object name.
///
/// The token hashes the current UTC timestamp at nanosecond precision,
/// a process-wide sequence number, and the process id, so repeated
/// calls within the same instant still differ.
pub fn generate_unique_name() -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);

    let seed = format!("{}.{}.{}", nanos, sequence, std::process::id());
    let digest = Sha256::digest(seed.as_bytes());
    let hex = format!("{:x}", digest);

    hex[..32].to_string()
}
