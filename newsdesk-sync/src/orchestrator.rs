//! Sync orchestration between the local repository and the remote CMS.
//!
//! The repository is authoritative: every mutation lands locally first
//! and a remote failure never rolls it back. Pushes happen on mutation
//! when auto-sync allows it; pulls resolve conflicts by timestamp with
//! the newer writer winning, and a tie leaves local content alone.

use crate::error::SyncResult;
use crate::report::{PullSummary, PushSummary, SyncReport};
use crate::settings::SyncSettings;
use crate::status::SyncStatus;
use chrono::{DateTime, Utc};
use newsdesk_remote::{CmsClient, ListQuery, PostDraft, PostPatch, RemotePost};
use newsdesk_store::{next_local_id, ContentRepository, StateStore, StoreError};
use newsdesk_types::{ContentItem, ContentKind, ContentPatch, LocalId, NewContent};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Tuning for the orchestrator.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// How long a terminal status stays visible (ms) before reverting
    /// to idle on its own.
    pub status_display_ms: u64,
    /// Cadence of the periodic pull task in seconds; `None` leaves
    /// the task unstarted.
    pub pull_interval_secs: Option<u64>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            status_display_ms: 3_000,
            pull_interval_secs: None,
        }
    }
}

/// Drives pushes and pulls between the repository and the CMS.
pub struct SyncOrchestrator {
    repo: Arc<ContentRepository>,
    client: Arc<CmsClient>,
    /// Where the settings persist; the same store the repository uses.
    settings_store: Arc<dyn StateStore>,
    settings: Mutex<SyncSettings>,
    options: SyncOptions,
    status: Arc<RwLock<SyncStatus>>,
    /// Bumped on every status write, so the delayed clear task can
    /// tell whether its status is still the one on display.
    status_generation: Arc<AtomicU64>,
    /// Newest local modification instant the remote is known to
    /// carry per item. Recorded by successful pushes and by pull
    /// matches; an absent entry means push.
    last_synced: Mutex<HashMap<LocalId, DateTime<Utc>>>,
}

impl SyncOrchestrator {
    /// Creates an orchestrator, loading persisted settings from the
    /// given store.
    pub fn new(
        repo: Arc<ContentRepository>,
        client: Arc<CmsClient>,
        settings_store: Arc<dyn StateStore>,
        options: SyncOptions,
    ) -> Self {
        let settings = SyncSettings::load(settings_store.as_ref());
        debug!(
            "sync orchestrator starting, remote {} / auto {}",
            settings.remote_sync_enabled, settings.auto_sync_enabled
        );
        Self {
            repo,
            client,
            settings_store,
            settings: Mutex::new(settings),
            options,
            status: Arc::new(RwLock::new(SyncStatus::default())),
            status_generation: Arc::new(AtomicU64::new(0)),
            last_synced: Mutex::new(HashMap::new()),
        }
    }

    // ── Settings ─────────────────────────────────────────────────

    /// The current sync switches.
    pub fn settings(&self) -> SyncSettings {
        *self.settings.lock().unwrap()
    }

    /// Flips the master switch and persists the settings.
    pub fn set_remote_sync_enabled(&self, enabled: bool) -> SyncResult<()> {
        let mut settings = self.settings.lock().unwrap();
        settings.remote_sync_enabled = enabled;
        settings.persist(self.settings_store.as_ref())?;
        info!("remote sync {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Flips the auto-sync switch and persists the settings.
    pub fn set_auto_sync_enabled(&self, enabled: bool) -> SyncResult<()> {
        let mut settings = self.settings.lock().unwrap();
        settings.auto_sync_enabled = enabled;
        settings.persist(self.settings_store.as_ref())?;
        info!("auto sync {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    fn remote_active(&self) -> bool {
        self.settings.lock().unwrap().remote_sync_enabled
    }

    fn auto_push_active(&self) -> bool {
        self.settings.lock().unwrap().auto_sync_active()
    }

    // ── Status ───────────────────────────────────────────────────

    /// The status currently on display.
    pub async fn status(&self) -> SyncStatus {
        self.status.read().await.clone()
    }

    /// Resets the status to idle immediately.
    pub async fn clear_status(&self) {
        self.set_status(SyncStatus::default()).await;
    }

    /// Writes a status and returns its generation.
    async fn set_status(&self, status: SyncStatus) -> u64 {
        let mut slot = self.status.write().await;
        let generation = self.status_generation.fetch_add(1, Ordering::SeqCst) + 1;
        *slot = status;
        generation
    }

    /// Writes a terminal status and schedules its reversion to idle.
    /// The clear task only fires if no newer status has replaced it.
    async fn finish_status(&self, status: SyncStatus) {
        let generation = self.set_status(status).await;
        let status_slot = Arc::clone(&self.status);
        let generation_counter = Arc::clone(&self.status_generation);
        let window = Duration::from_millis(self.options.status_display_ms);
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let mut slot = status_slot.write().await;
            if generation_counter.load(Ordering::SeqCst) == generation {
                *slot = SyncStatus::default();
            }
        });
    }

    // ── Mutations with push-on-mutation ──────────────────────────

    /// Creates an item locally, then pushes it when auto-sync is on.
    ///
    /// The local creation always stands: a failed push leaves the item
    /// unlinked for a later sync to retry, with the failure reported
    /// through the status.
    pub async fn create_item(&self, content: NewContent) -> SyncResult<ContentItem> {
        let item = self.repo.create(content)?;
        if !self.auto_push_active() {
            return Ok(item);
        }
        self.set_status(SyncStatus::syncing("pushing new item")).await;
        match self.push_create(&item).await {
            Ok(linked) => {
                self.finish_status(SyncStatus::success("item pushed")).await;
                Ok(linked)
            }
            Err(e) => {
                warn!("push after create failed for item {}: {e}", item.local_id);
                self.finish_status(SyncStatus::error(e.to_string())).await;
                Ok(item)
            }
        }
    }

    /// Applies a patch locally, then pushes the result when auto-sync
    /// is on. An unlinked item is created remotely instead of updated,
    /// healing items whose original push never returned an id.
    pub async fn update_item(&self, id: LocalId, patch: ContentPatch) -> SyncResult<ContentItem> {
        let item = self.repo.update(id, patch)?;
        if !self.auto_push_active() {
            return Ok(item);
        }
        self.set_status(SyncStatus::syncing("pushing changes")).await;
        match self.push_existing(&item).await {
            Ok(pushed) => {
                self.finish_status(SyncStatus::success("changes pushed")).await;
                Ok(pushed)
            }
            Err(e) => {
                warn!("push after update failed for item {id}: {e}");
                self.finish_status(SyncStatus::error(e.to_string())).await;
                Ok(item)
            }
        }
    }

    /// Deletes an item locally and, when it was linked and auto-sync
    /// is on, attempts the mirrored remote delete. The local delete
    /// stands whatever the remote says.
    pub async fn delete_item(&self, id: LocalId) -> SyncResult<Option<ContentItem>> {
        let Some(removed) = self.repo.delete(id)? else {
            return Ok(None);
        };
        self.last_synced.lock().unwrap().remove(&id);
        let Some(remote_id) = removed.remote_id else {
            return Ok(Some(removed));
        };
        if !self.auto_push_active() {
            return Ok(Some(removed));
        }
        self.set_status(SyncStatus::syncing("deleting remote post")).await;
        match self.client.delete(remote_id).await {
            Ok(()) => {
                self.finish_status(SyncStatus::success("remote post deleted")).await;
            }
            Err(e) => {
                warn!("remote delete of post {remote_id} failed: {e}");
                self.finish_status(SyncStatus::error(e.to_string())).await;
            }
        }
        Ok(Some(removed))
    }

    /// Pushes one item now, regardless of the auto-sync switch. The
    /// master switch still applies. Unlike the push-on-mutation paths
    /// this propagates the failure, since the caller asked explicitly.
    pub async fn push_item(&self, id: LocalId) -> SyncResult<ContentItem> {
        let item = self.repo.get(id).ok_or(StoreError::NotFound(id))?;
        if !self.remote_active() {
            debug!("remote sync disabled, not pushing item {id}");
            return Ok(item);
        }
        self.set_status(SyncStatus::syncing("pushing item")).await;
        match self.push_existing(&item).await {
            Ok(pushed) => {
                self.finish_status(SyncStatus::success("item pushed")).await;
                Ok(pushed)
            }
            Err(e) => {
                self.finish_status(SyncStatus::error(e.to_string())).await;
                Err(e)
            }
        }
    }

    // ── Pull and bidirectional passes ────────────────────────────

    /// Pulls published posts and merges them into the repository.
    ///
    /// Newer remote content overwrites the matching local item's
    /// synced fields; a tie or an older remote leaves it untouched.
    /// Posts with no local counterpart become new linked items. Local
    /// items without a remote link are never modified or deleted here.
    pub async fn sync_from_remote(&self) -> SyncResult<PullSummary> {
        if !self.remote_active() {
            debug!("remote sync disabled, skipping pull");
            return Ok(PullSummary::default());
        }
        self.set_status(SyncStatus::syncing("pulling from CMS")).await;
        match self.pull_pass().await {
            Ok(summary) => {
                info!(
                    "pull pass finished: {} created, {} updated, {} unchanged, {} failed",
                    summary.created, summary.updated, summary.unchanged, summary.failed
                );
                let status = if summary.failed > 0 {
                    SyncStatus::error(summary.to_string())
                } else {
                    SyncStatus::success(summary.to_string())
                };
                self.finish_status(status).await;
                Ok(summary)
            }
            Err(e) => {
                warn!("pull failed: {e}");
                self.finish_status(SyncStatus::error(e.to_string())).await;
                Err(e)
            }
        }
    }

    /// Pulls, then pushes everything locally newer than what the
    /// remote is known to carry. A second run with no intervening
    /// edits performs no remote writes.
    pub async fn sync_bidirectional(&self) -> SyncResult<SyncReport> {
        if !self.remote_active() {
            debug!("remote sync disabled, skipping sync");
            return Ok(SyncReport::default());
        }
        self.set_status(SyncStatus::syncing("syncing with CMS")).await;
        // Pull first so pushes are judged against fresh remote state.
        let pull = match self.pull_pass().await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("pull half of sync failed: {e}");
                self.finish_status(SyncStatus::error(e.to_string())).await;
                return Err(e);
            }
        };
        let push = self.push_pass().await;
        let report = SyncReport { pull, push };
        info!("sync finished: {report}");
        let status = if report.is_clean() {
            SyncStatus::success(report.to_string())
        } else {
            SyncStatus::error(report.to_string())
        };
        self.finish_status(status).await;
        Ok(report)
    }

    /// Starts the periodic pull task when the options carry an
    /// interval. Each tick drops expired cache entries and pulls.
    pub fn spawn_periodic_pull(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let interval_secs = self.options.pull_interval_secs?;
        let orchestrator = Arc::clone(self);
        info!("starting periodic pull every {interval_secs}s");
        Some(tokio::spawn(async move {
            let mut timer = tokio::time::interval(Duration::from_secs(interval_secs));
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; consume
            // it so the first pull happens one full period in.
            timer.tick().await;
            loop {
                timer.tick().await;
                orchestrator.client.purge_caches();
                if let Err(e) = orchestrator.sync_from_remote().await {
                    warn!("periodic pull failed: {e}");
                }
            }
        }))
    }

    // ── Push internals ───────────────────────────────────────────

    /// Creates the item remotely and links it to the returned post id.
    /// Linking does not move the item's modification clock.
    async fn push_create(&self, item: &ContentItem) -> SyncResult<ContentItem> {
        let created = self.client.create(&PostDraft::from_item(item)).await?;
        let linked = self.repo.link_remote(item.local_id, created.remote_id())?;
        self.record_synced(linked.local_id, linked.modified_at);
        info!(
            "pushed item {} as new remote post {}",
            linked.local_id,
            created.remote_id()
        );
        Ok(linked)
    }

    /// Updates the item's remote copy, or creates one when the item
    /// was never linked.
    async fn push_existing(&self, item: &ContentItem) -> SyncResult<ContentItem> {
        match item.remote_id {
            Some(remote_id) => {
                self.client.update(remote_id, &PostPatch::from_item(item)).await?;
                self.record_synced(item.local_id, item.modified_at);
                debug!("pushed item {} to remote post {remote_id}", item.local_id);
                Ok(item.clone())
            }
            None => self.push_create(item).await,
        }
    }

    /// Pushes every item the remote is not known to be current on.
    async fn push_pass(&self) -> PushSummary {
        let mut summary = PushSummary::default();
        for item in self.repo.list() {
            if !self.needs_push(&item) {
                summary.skipped += 1;
                continue;
            }
            let was_linked = item.is_linked();
            match self.push_existing(&item).await {
                Ok(_) => {
                    if was_linked {
                        summary.updated += 1;
                    } else {
                        summary.created += 1;
                    }
                }
                Err(e) => {
                    warn!("push of item {} failed: {e}", item.local_id);
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    /// True when the item's current content must be sent to the
    /// remote. Without a record the remote cannot be assumed current,
    /// so the item is pushed.
    fn needs_push(&self, item: &ContentItem) -> bool {
        match self.last_synced.lock().unwrap().get(&item.local_id) {
            Some(synced_at) => item.modified_at > *synced_at,
            None => true,
        }
    }

    fn record_synced(&self, id: LocalId, instant: DateTime<Utc>) {
        self.last_synced.lock().unwrap().insert(id, instant);
    }

    // ── Pull internals ───────────────────────────────────────────

    /// One pull: list published posts, merge, persist once.
    ///
    /// Per-post failures are counted and the merge continues; only a
    /// failed list or a failed persist aborts the pass.
    async fn pull_pass(&self) -> SyncResult<PullSummary> {
        let posts = self.client.list(&ListQuery::published()).await?;
        let mut summary = PullSummary::default();
        let mut items = self.repo.list();

        for post in posts {
            let modified_at = match post.modified_at() {
                Ok(instant) => instant,
                Err(e) => {
                    warn!("skipping remote post: {e}");
                    summary.failed += 1;
                    continue;
                }
            };
            let remote_id = post.remote_id();
            match items.iter().position(|i| i.remote_id == Some(remote_id)) {
                Some(pos) => {
                    let local = &mut items[pos];
                    if modified_at > local.modified_at {
                        local.status = post.content_status();
                        local.title = post.title;
                        local.body = post.content;
                        local.excerpt = post.excerpt;
                        local.tags = post.tags;
                        local.modified_at = modified_at;
                        summary.updated += 1;
                    } else {
                        // A tie is not news; local stays as it is.
                        summary.unchanged += 1;
                    }
                    self.record_synced(items[pos].local_id, modified_at);
                }
                None => {
                    let item = import_post(next_local_id(&items), post, modified_at);
                    self.record_synced(item.local_id, modified_at);
                    items.push(item);
                    summary.created += 1;
                }
            }
        }

        if summary.created > 0 || summary.updated > 0 {
            self.repo.replace_all(items)?;
        }
        Ok(summary)
    }
}

/// Builds a local item out of a remote post that has no local
/// counterpart. Pass-through fields start at their defaults; the
/// remote cannot know them.
fn import_post(local_id: LocalId, post: RemotePost, modified_at: DateTime<Utc>) -> ContentItem {
    let created_at = post.created_at().unwrap_or(modified_at);
    ContentItem {
        local_id,
        remote_id: Some(post.remote_id()),
        status: post.content_status(),
        title: post.title,
        body: post.content,
        excerpt: post.excerpt,
        tags: post.tags,
        created_at,
        modified_at,
        kind: ContentKind::News,
        location: None,
        participants: Vec::new(),
        gallery: Vec::new(),
    }
}
