use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a loaded asset. Every load produces a fresh ID, so
/// reloading the same file yields a different identity.
pub type AssetId = u64;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a new unique asset ID.
pub(crate) fn next_asset_id() -> AssetId {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}
