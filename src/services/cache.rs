use crate::domain::category::Category;
use crate::domain::snapshot::{Item, Snapshot};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct SnapshotCache {
    inner: Arc<RwLock<Snapshot>>,
}

impl SnapshotCache {
    pub fn new() -> Self { Self::default() }

    pub async fn snapshot(&self) -> Snapshot {
        self.inner.read().await.clone()
    }

    pub async fn replace(&self, category: Category, items: Vec<Item>) {
        let mut snap = self.inner.write().await;
        *snap.slot_mut(category) = items;
    }

    pub async fn stamp(&self, at: OffsetDateTime) -> Snapshot {
        let mut snap = self.inner.write().await;
        snap.updated_at = Some(at);
        snap.clone()
    }
}
