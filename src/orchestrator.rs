//! Bounded-concurrency execution of scrape requests.
//!
//! A batch is split into consecutive windows of [`WINDOW_SIZE`] ids. The
//! fetches of one window run concurrently on the calling task and the next
//! window only starts once every fetch of the current one has settled, so
//! the scraper never sees more than [`WINDOW_SIZE`] requests from us at a
//! time. Each settled fetch is written to the [`EntryStore`] and bumps the
//! batch [`Progress`] straight away, without waiting for its siblings.
//!
//! Failures never leave a fetch: they end up as a failed entry that can be
//! retried one by one ([`BatchOrchestrator::retry_one`]) or all at once
//! ([`BatchOrchestrator::retry_failed`]). There is no cancellation; a
//! started batch runs to the end.

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicBool, Ordering},
};

use chrono::NaiveDate;
use futures::future::join_all;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    management::EntryStore,
    scraper::FetchGateway,
    status,
    types::{Entry, FreshnessStatus, GroupPreference, Progress},
    utils,
};

/// Maximum number of scrape requests in flight during a batch.
pub const WINDOW_SIZE: usize = 3;

pub struct BatchOrchestrator {
    gateway: Arc<dyn FetchGateway>,
    store: Arc<EntryStore>,
    progress: watch::Sender<Progress>,
    running: AtomicBool,
    preference: RwLock<Option<GroupPreference>>,
}

struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BatchOrchestrator {
    pub fn new(gateway: Arc<dyn FetchGateway>) -> Self {
        Self::with_store(gateway, Arc::new(EntryStore::new()))
    }

    pub fn with_store(gateway: Arc<dyn FetchGateway>, store: Arc<EntryStore>) -> Self {
        let (progress, _) = watch::channel(Progress::default());
        Self {
            gateway,
            store,
            progress,
            running: AtomicBool::new(false),
            preference: RwLock::new(None),
        }
    }

    /// Checks every id from scratch.
    ///
    /// Returns `None` without touching anything when `ids` is empty or a
    /// batch is already running. Otherwise the store is reseeded with the
    /// ids, every entry is marked loading right away and the final progress
    /// of the batch is returned.
    pub async fn run_all(&self, ids: Vec<String>, preference: GroupPreference) -> Option<Progress> {
        let ids = utils::dedup_ids(ids);
        if ids.is_empty() {
            debug!("run rejected: no ids");
            return None;
        }

        let Some(_guard) = self.try_begin() else {
            warn!("run rejected: a batch is already in flight");
            return None;
        };

        *self
            .preference
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(preference);
        self.store.seed(&ids);
        for id in &ids {
            self.store.begin_loading(id);
        }

        Some(self.run_batch(ids).await)
    }

    /// Re-runs every entry that is failed right now. Other entries are left
    /// alone. Returns `None` when nothing failed or a batch is running.
    pub async fn retry_failed(&self) -> Option<Progress> {
        let Some(_guard) = self.try_begin() else {
            warn!("retry rejected: a batch is already in flight");
            return None;
        };

        let failed = self.store.failed_ids();
        if failed.is_empty() {
            debug!("retry skipped: nothing failed");
            return None;
        }

        Some(self.run_batch(failed).await)
    }

    /// Fetches one entry again outside of any batch. Progress is not
    /// touched and this may run while a batch is in flight.
    ///
    /// Returns `false` if `id` is not part of the current working set.
    pub async fn retry_one(&self, id: &str) -> bool {
        if !self.store.contains(id) {
            warn!(id, "retry of an unknown entry ignored");
            return false;
        }

        self.fetch_task(id).await;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Drops every entry and resets progress. Must not be called while a
    /// batch is running.
    pub fn clear(&self) {
        debug_assert!(!self.is_running(), "clear called during a batch");
        self.store.clear();
        self.progress.send_replace(Progress::default());
    }

    pub fn progress(&self) -> Progress {
        *self.progress.borrow()
    }

    /// Receives every progress change of this orchestrator.
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.store.entries()
    }

    pub fn store(&self) -> &Arc<EntryStore> {
        &self.store
    }

    /// The preference of the last run. Nothing has run yet when `None`.
    pub fn preference(&self) -> Option<GroupPreference> {
        self.preference
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current entries together with their freshness as of `today`.
    pub fn classified(&self, today: NaiveDate) -> Vec<(Entry, FreshnessStatus)> {
        let preference = self.preference().unwrap_or(GroupPreference::Any);
        self.store
            .entries()
            .into_iter()
            .map(|entry| {
                let status = status::classify(entry.snapshot(), &preference, today);
                (entry, status)
            })
            .collect()
    }

    fn try_begin(&self) -> Option<RunningGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunningGuard(&self.running))
    }

    async fn run_batch(&self, ids: Vec<String>) -> Progress {
        self.progress.send_replace(Progress::start(ids.len()));

        for (window, chunk) in ids.chunks(WINDOW_SIZE).enumerate() {
            debug!(window, size = chunk.len(), "starting window");
            let tasks = chunk.iter().map(|id| async move {
                self.fetch_task(id).await;
                self.progress
                    .send_modify(|p| p.completed = (p.completed + 1).min(p.total));
            });
            join_all(tasks).await;
        }

        let progress = self.progress();
        debug!(%progress, "batch finished");
        progress
    }

    async fn fetch_task(&self, id: &str) {
        self.store.begin_loading(id);
        match self.gateway.fetch(id).await {
            Ok(snapshot) => self.store.complete_success(id, snapshot),
            Err(e) => {
                warn!(id, error = %e, "fetch failed");
                self.store.complete_failure(id, e.user_message());
            }
        }
    }
}
