use crate::services::cache::SnapshotCache;
use crate::services::persistence::SnapshotStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub cache: SnapshotCache,
    pub store: Arc<dyn SnapshotStore>,
}
