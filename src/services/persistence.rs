use async_trait::async_trait;
use bson::{doc, DateTime};
use mongodb::options::{ClientOptions, ReplaceOptions};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

use crate::domain::snapshot::{GenreItems, Item, Snapshot};
use crate::error::Result;

pub const COLLECTION: &str = "hompro";
pub const SNAPSHOT_KEY: &str = "latest";
const SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn is_ready(&self) -> bool;
    async fn load(&self) -> Result<Option<Snapshot>>;
    // creates the record or overwrites the existing one
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    series: Vec<Item>,
    #[serde(default)]
    genre: GenreItems,
    #[serde(rename = "updatedAt")]
    updated_at: DateTime,
}

impl SnapshotRecord {
    fn from_snapshot(snapshot: &Snapshot) -> Self {
        let at = snapshot.updated_at.unwrap_or_else(OffsetDateTime::now_utc);
        Self {
            id: SNAPSHOT_KEY.to_string(),
            series: snapshot.series.clone(),
            genre: snapshot.genre.clone(),
            updated_at: DateTime::from_time_0_3(at),
        }
    }
}

impl From<SnapshotRecord> for Snapshot {
    fn from(r: SnapshotRecord) -> Self {
        Snapshot { series: r.series, genre: r.genre, updated_at: Some(r.updated_at.to_time_0_3()) }
    }
}

#[derive(Clone)]
pub struct MongoSnapshotStore {
    db: Database,
    records: Collection<SnapshotRecord>,
}

impl MongoSnapshotStore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        opts.server_selection_timeout = Some(SELECTION_TIMEOUT);
        let db = Client::with_options(opts)?.database(db_name);
        Ok(Self { records: db.collection(COLLECTION), db })
    }
}

#[async_trait]
impl SnapshotStore for MongoSnapshotStore {
    async fn is_ready(&self) -> bool {
        match self.db.run_command(doc! { "ping": 1 }, None).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "storage ping failed");
                false
            }
        }
    }

    async fn load(&self) -> Result<Option<Snapshot>> {
        let record = self.records.find_one(doc! { "_id": SNAPSHOT_KEY }, None).await?;
        Ok(record.map(Snapshot::from))
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let record = SnapshotRecord::from_snapshot(snapshot);
        let opts = ReplaceOptions::builder().upsert(true).build();
        self.records.replace_one(doc! { "_id": SNAPSHOT_KEY }, &record, opts).await?;
        Ok(())
    }
}
