//! The CMS client.

use crate::config::CmsConfig;
use crate::error::{RemoteError, RemoteResult};
use crate::wire::{ListQuery, PostDraft, PostPatch, RemotePost};
use newsdesk_cache::{CacheConfig, TtlCache};
use newsdesk_types::RemoteId;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, info};

/// Cache key prefix shared by all list queries, so one mutation can
/// drop every cached page at once.
const LIST_PREFIX: &str = "posts:list";

/// Key the connection probe result is cached under.
const PROBE_KEY: &str = "probe:connection";

/// Outcome of a connection probe, shaped for direct display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionCheck {
    pub success: bool,
    pub message: String,
}

/// HTTP client for the remote CMS.
///
/// Owns the normalized API base, the Basic auth material, and two
/// caches: list results (keyed per query) and the connection probe.
/// Reads consult the cache first; create, update, and delete drop
/// every cached list because any of them changes the result set.
pub struct CmsClient {
    config: CmsConfig,
    api_base: String,
    client: Client,
    list_cache: Mutex<TtlCache<Vec<RemotePost>>>,
    probe_cache: Mutex<TtlCache<ConnectionCheck>>,
}

impl CmsClient {
    /// Creates a client for the given CMS.
    #[must_use]
    pub fn new(config: CmsConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("failed to create HTTP client");
        let api_base = config.api_base();
        let list_cache = Mutex::new(TtlCache::new(CacheConfig {
            capacity: 64,
            default_ttl: config.list_ttl(),
        }));
        let probe_cache = Mutex::new(TtlCache::new(CacheConfig {
            capacity: 4,
            default_ttl: config.probe_ttl(),
        }));
        Self {
            config,
            api_base,
            client,
            list_cache,
            probe_cache,
        }
    }

    /// The normalized API base requests are sent to.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.config.username, Some(&self.config.app_password))
    }

    /// Classifies a non-success response, reading the body for the
    /// server-error detail.
    async fn ensure_success(&self, response: Response, context: &str) -> RemoteResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        debug!("{context} failed with status {status}");
        Err(RemoteError::from_status(status, detail))
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Checks whether the CMS is reachable with the configured
    /// credentials. No side effects; a successful result is cached
    /// for the probe TTL, failures are always re-probed.
    pub async fn test_connection(&self) -> ConnectionCheck {
        if let Some(check) = self.probe_cache.lock().unwrap().get(PROBE_KEY) {
            return check;
        }
        match self.probe().await {
            Ok(()) => {
                let check = ConnectionCheck {
                    success: true,
                    message: "CMS connection OK".to_string(),
                };
                self.probe_cache
                    .lock()
                    .unwrap()
                    .insert(PROBE_KEY, check.clone());
                check
            }
            Err(e) => ConnectionCheck {
                success: false,
                message: e.to_string(),
            },
        }
    }

    async fn probe(&self) -> RemoteResult<()> {
        let request = self
            .authed(self.client.get(format!("{}/posts", self.api_base)))
            .query(&[("per_page", "1")]);
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("connection probe failed: {e}")))?;
        self.ensure_success(response, "connection probe").await?;
        Ok(())
    }

    /// Lists posts matching the query, serving a cached result when
    /// one is still fresh.
    pub async fn list(&self, query: &ListQuery) -> RemoteResult<Vec<RemotePost>> {
        let key = query.cache_key();
        {
            let mut cache = self.list_cache.lock().unwrap();
            if let Some(posts) = cache.get(&key) {
                debug!(age = ?cache.age(&key), "serving post list from cache");
                return Ok(posts);
            }
        }

        let response = self
            .authed(self.client.get(format!("{}/posts", self.api_base)))
            .query(query)
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("post list failed: {e}")))?;
        let response = self.ensure_success(response, "post list").await?;
        let posts: Vec<RemotePost> = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidPost(format!("failed to parse post list: {e}")))?;

        debug!(count = posts.len(), "fetched post list");
        self.list_cache.lock().unwrap().insert(key, posts.clone());
        Ok(posts)
    }

    /// Fetches a single post by id. Always goes to the wire; single
    /// posts are cheap and staleness here is confusing.
    pub async fn get(&self, id: RemoteId) -> RemoteResult<RemotePost> {
        let response = self
            .authed(self.client.get(format!("{}/posts/{id}", self.api_base)))
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("post fetch failed: {e}")))?;
        let response = self.ensure_success(response, "post fetch").await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidPost(format!("failed to parse post: {e}")))
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Creates a post and returns it with its assigned id.
    ///
    /// An empty title or body is rejected locally; the CMS would
    /// accept the post and publish an empty shell.
    pub async fn create(&self, draft: &PostDraft) -> RemoteResult<RemotePost> {
        if draft.title.trim().is_empty() {
            return Err(RemoteError::Validation("title must not be empty".into()));
        }
        if draft.content.trim().is_empty() {
            return Err(RemoteError::Validation("content must not be empty".into()));
        }

        let response = self
            .authed(self.client.post(format!("{}/posts", self.api_base)))
            .json(draft)
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("post create failed: {e}")))?;
        let response = self.ensure_success(response, "post create").await?;
        let post: RemotePost = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidPost(format!("failed to parse created post: {e}")))?;

        self.invalidate_lists();
        info!(remote_id = post.id, "created remote post");
        Ok(post)
    }

    /// Updates a post by POSTing a partial body to its route (this
    /// wire protocol updates by POST, not PATCH). A 404 means the
    /// post is gone remotely.
    pub async fn update(&self, id: RemoteId, patch: &PostPatch) -> RemoteResult<RemotePost> {
        let response = self
            .authed(self.client.post(format!("{}/posts/{id}", self.api_base)))
            .json(patch)
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("post update failed: {e}")))?;
        let response = self.ensure_success(response, "post update").await?;
        let post: RemotePost = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidPost(format!("failed to parse updated post: {e}")))?;

        self.invalidate_lists();
        debug!(remote_id = post.id, "updated remote post");
        Ok(post)
    }

    /// Deletes a post. A 404 counts as success: the goal state is
    /// "post gone" and it already is. Cached lists are dropped either
    /// way since the visible result set changed.
    pub async fn delete(&self, id: RemoteId) -> RemoteResult<()> {
        let force = if self.config.delete_force { "true" } else { "false" };
        let response = self
            .authed(self.client.delete(format!("{}/posts/{id}", self.api_base)))
            .query(&[("force", force)])
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("post delete failed: {e}")))?;

        let status = response.status();
        if !status.is_success() && status.as_u16() != 404 {
            let detail = response.text().await.unwrap_or_default();
            return Err(RemoteError::from_status(status, detail));
        }

        self.invalidate_lists();
        info!(remote_id = %id, "deleted remote post");
        Ok(())
    }

    // ── Cache maintenance ────────────────────────────────────────

    fn invalidate_lists(&self) {
        let removed = self.list_cache.lock().unwrap().clear_prefix(LIST_PREFIX);
        if removed > 0 {
            debug!(removed, "invalidated cached post lists");
        }
    }

    /// Drops expired entries from both caches. Called from the
    /// periodic sync tick; never required for correctness.
    pub fn purge_caches(&self) {
        self.list_cache.lock().unwrap().purge_expired();
        self.probe_cache.lock().unwrap().purge_expired();
    }
}
