use crate::domain::category::Category;
use crate::domain::snapshot::REFRESH_EVERY;
use crate::services::{cache::SnapshotCache, fetcher::{FetchOutcome, Fetcher}, persistence::SnapshotStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{error, info, warn};

pub const READY_POLL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub categories: Vec<(Category, FetchOutcome)>,
    pub persisted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    SkippedNotReady,
    AlreadyRunning,
    Done(RefreshReport),
}

pub struct RefreshJob {
    fetcher: Fetcher,
    cache: SnapshotCache,
    store: Arc<dyn SnapshotStore>,
    running: AtomicBool,
}

struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) { self.0.store(false, Ordering::Release); }
}

impl RefreshJob {
    pub fn new(fetcher: Fetcher, cache: SnapshotCache, store: Arc<dyn SnapshotStore>) -> Self {
        Self { fetcher, cache, store, running: AtomicBool::new(false) }
    }

    pub async fn wait_until_ready(&self) {
        let mut attempts = 0u32;
        while !self.store.is_ready().await {
            attempts += 1;
            if attempts == 1 {
                warn!("storage not reachable yet, waiting before first refresh");
            }
            sleep(READY_POLL).await;
        }
        info!(attempts, "storage connected");
    }

    pub async fn run(&self) -> RunOutcome {
        if self.running.swap(true, Ordering::AcqRel) {
            warn!("previous refresh still running, skipping");
            return RunOutcome::AlreadyRunning;
        }
        let _guard = RunGuard(&self.running);

        if !self.store.is_ready().await {
            warn!(phase = "checking-readiness", "storage not ready, skipping refresh");
            return RunOutcome::SkippedNotReady;
        }

        info!(phase = "fetching", "fetching new data");
        let mut categories = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let outcome = self.fetcher.fetch_category(&category.url()).await;
            self.cache.replace(category, outcome.items().to_vec()).await;
            categories.push((category, outcome));
        }

        let snapshot = self.cache.stamp(OffsetDateTime::now_utc()).await;
        let persisted = match self.store.save(&snapshot).await {
            Ok(()) => {
                info!(phase = "persisting", "snapshot saved");
                true
            }
            Err(e) => {
                error!(phase = "persisting", error = %e, "snapshot save failed");
                false
            }
        };

        let failed = categories.iter().filter(|(_, o)| !o.is_fetched()).count();
        let counts: Vec<String> = categories
            .iter()
            .map(|(c, o)| format!("{c}={}", o.items().len()))
            .collect();
        info!(phase = "done", counts = %counts.join(" "), failed, persisted, "data updated");
        RunOutcome::Done(RefreshReport { categories, persisted })
    }
}

// Runs execute inline, so a slow run delays the next tick instead of overlapping it.
pub fn start_schedule(job: Arc<RefreshJob>) -> JoinHandle<()> {
    tokio::spawn(async move {
        job.wait_until_ready().await;
        let mut ticker = interval(REFRESH_EVERY);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            job.run().await;
        }
    })
}
