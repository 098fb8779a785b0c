use crate::domain::model::PriceSnapshot;
use crate::domain::ports::{PriceSource, Storage};
use crate::utils::error::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// File the last snapshot is kept in, relative to the data directory.
const SNAPSHOT_FILE: &str = "snapshot.json";

/// Default freshness window, in minutes. The ministry republishes prices a
/// few times per day, so half an hour keeps repeated CLI calls cheap without
/// serving stale data for long.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct CachedSnapshot {
    fetched_at: DateTime<Utc>,
    snapshot: PriceSnapshot,
}

/// Disk-backed cache for the full station snapshot.
pub struct SnapshotCache<S: Storage> {
    storage: S,
    ttl: Duration,
}

impl<S: Storage> SnapshotCache<S> {
    pub fn new(storage: S, ttl_minutes: i64) -> Self {
        Self {
            storage,
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Loads the cached snapshot if present and fresh.
    ///
    /// A missing or corrupt cache file reads as `None`; it will be
    /// overwritten by the next successful fetch.
    pub async fn load(&self) -> Option<PriceSnapshot> {
        let bytes = self.storage.read_file(SNAPSHOT_FILE).await.ok()?;
        let cached: CachedSnapshot = match serde_json::from_slice(&bytes) {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!("Discarding unreadable snapshot cache: {}", e);
                return None;
            }
        };

        let age = Utc::now() - cached.fetched_at;
        if age > self.ttl {
            tracing::debug!("Snapshot cache is stale ({} min old)", age.num_minutes());
            return None;
        }

        tracing::debug!(
            "Using cached snapshot with {} stations ({} min old)",
            cached.snapshot.stations.len(),
            age.num_minutes()
        );
        Some(cached.snapshot)
    }

    pub async fn store(&self, snapshot: &PriceSnapshot) -> Result<()> {
        let cached = CachedSnapshot {
            fetched_at: Utc::now(),
            snapshot: snapshot.clone(),
        };
        let bytes = serde_json::to_vec(&cached)?;
        self.storage.write_file(SNAPSHOT_FILE, &bytes).await
    }

    /// Serves the snapshot from cache when fresh, fetching otherwise.
    /// `refresh` forces a fetch regardless of cache state.
    pub async fn load_or_fetch(
        &self,
        source: &dyn PriceSource,
        refresh: bool,
    ) -> Result<PriceSnapshot> {
        if !refresh {
            if let Some(snapshot) = self.load().await {
                return Ok(snapshot);
            }
        }

        tracing::info!("Fetching station list from the ministry service");
        let snapshot = source.fetch_snapshot().await?;
        self.store(&snapshot).await?;
        Ok(snapshot)
    }
}
