use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// In-memory store of scored receipts, keyed by receipt id.
///
/// The store is a handle: clones share the same map, so it can be put in the
/// App State and handed to every request handler. Entries are written once
/// and live as long as the process. There is no update, delete, or eviction.
///
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    scores: Arc<RwLock<HashMap<String, i64>>>,
}

impl ScoreStore {
    /// Creates an empty store, not shared with any other.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the points for a receipt id.
    ///
    /// Ids are expected to be fresh. If one is reused, the first score is
    /// kept so that an id always resolves to the same points.
    ///
    pub async fn put(&self, id: impl Into<String>, points: i64) {
        let id = id.into();
        let mut scores = self.scores.write().await;

        if let Some(existing) = scores.get(&id) {
            tracing::warn!(%id, existing, points, "receipt id already stored, keeping first score");
            return;
        }
        scores.insert(id, points);
    }

    /// Returns the points stored for a receipt id, or None if it was never stored.
    pub async fn get(&self, id: &str) -> Option<i64> {
        self.scores.read().await.get(id).copied()
    }

    pub async fn len(&self) -> usize {
        self.scores.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
