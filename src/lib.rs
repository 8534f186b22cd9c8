pub mod clients { pub mod upstream; }
pub mod config;
pub mod telemetry;
pub mod state;
pub mod error;
pub mod domain { pub mod category; pub mod snapshot; }
pub mod services { pub mod cache; pub mod fetcher; pub mod page_select; pub mod persistence; pub mod refresh; }
pub mod web { pub mod router; pub mod handlers; }

use axum::Router;
use std::sync::Arc;

use crate::clients::upstream::HttpUpstream;
use crate::services::{cache::SnapshotCache, fetcher::Fetcher, refresh};
use crate::services::persistence::{MongoSnapshotStore, SnapshotStore};
use crate::state::AppState;

pub use crate::web::router::build_router;

// The first refresh starts once storage answers a ping; serving starts right away.
pub async fn build_app(cfg: crate::config::Config) -> anyhow::Result<(Router, u16)> {
    let store: Arc<dyn SnapshotStore> =
        Arc::new(MongoSnapshotStore::connect(&cfg.mongodb_uri, &cfg.mongodb_db).await?);
    tracing::info!(db = %cfg.mongodb_db, "storage client created");

    let upstream = Arc::new(HttpUpstream::new()?);
    let cache = SnapshotCache::new();
    let fetcher = Fetcher::new(upstream, cfg.page_policy);
    let job = Arc::new(refresh::RefreshJob::new(fetcher, cache.clone(), store.clone()));
    refresh::start_schedule(job);

    let state = AppState { cache, store };
    Ok((build_router(state), crate::config::PORT))
}
