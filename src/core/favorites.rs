use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::HashSet;

/// File the favorite station ids are kept in, relative to the data directory.
const FAVORITES_FILE: &str = "favorites.json";

/// Persistent set of favorite station ids.
///
/// Every mutation reads the current set, applies the change, and rewrites
/// the whole file; the set is small enough that this stays cheap.
pub struct FavoritesStore<S: Storage> {
    storage: S,
}

impl<S: Storage> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// All favorite ids. A missing or unreadable file is an empty set.
    pub async fn all(&self) -> HashSet<String> {
        let Ok(bytes) = self.storage.read_file(FAVORITES_FILE).await else {
            return HashSet::new();
        };
        match serde_json::from_slice(&bytes) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Discarding unreadable favorites file: {}", e);
                HashSet::new()
            }
        }
    }

    pub async fn is_favorite(&self, station_id: &str) -> bool {
        self.all().await.contains(station_id)
    }

    /// Flips a station's favorite state; returns the new state.
    pub async fn toggle(&self, station_id: &str) -> Result<bool> {
        let mut favorites = self.all().await;
        let now_favorite = if favorites.contains(station_id) {
            favorites.remove(station_id);
            false
        } else {
            favorites.insert(station_id.to_string());
            true
        };

        self.save(&favorites).await?;
        Ok(now_favorite)
    }

    pub async fn clear(&self) -> Result<()> {
        self.save(&HashSet::new()).await
    }

    async fn save(&self, favorites: &HashSet<String>) -> Result<()> {
        let bytes = serde_json::to_vec(favorites)?;
        self.storage.write_file(FAVORITES_FILE, &bytes).await
    }
}
