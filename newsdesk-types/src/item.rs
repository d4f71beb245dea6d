//! The content item record and its partial mutation types.

use crate::{ContentKind, ContentStatus, LocalId, RemoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// A locally owned news article or event.
///
/// The local repository is the authority for these records; the remote
/// CMS only mirrors them. `modified_at` is the conflict-resolution
/// clock and never decreases for a given `local_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub local_id: LocalId,
    /// Set once the item is known to exist remotely. `None` means the
    /// item was never pushed, or every push so far failed before an id
    /// came back.
    #[serde(default)]
    pub remote_id: Option<RemoteId>,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "epoch")]
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub kind: ContentKind,
    /// Event venue. Opaque to the sync engine.
    #[serde(default)]
    pub location: Option<String>,
    /// Event participants. Opaque to the sync engine.
    #[serde(default)]
    pub participants: Vec<String>,
    /// Attached image references. Opaque to the sync engine.
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl ContentItem {
    /// Builds a fresh item from creation fields, stamping both
    /// timestamps with the current time.
    #[must_use]
    pub fn from_new(local_id: LocalId, new: NewContent) -> Self {
        let now = Utc::now();
        Self {
            local_id,
            remote_id: None,
            title: new.title,
            body: new.body,
            excerpt: new.excerpt,
            status: new.status,
            created_at: now,
            modified_at: now,
            tags: new.tags,
            kind: new.kind,
            location: new.location,
            participants: new.participants,
            gallery: new.gallery,
        }
    }

    /// True when the item has a remote counterpart.
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.remote_id.is_some()
    }

    /// Bumps `modified_at` to the current time, keeping it
    /// non-decreasing even if the wall clock stepped backwards.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.modified_at {
            self.modified_at = now;
        }
    }

    /// Merges a partial mutation into this item. Fields absent from
    /// the patch keep their current value; timestamps are the
    /// caller's concern.
    pub fn apply(&mut self, patch: ContentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(remote_id) = patch.remote_id {
            self.remote_id = remote_id;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(participants) = patch.participants {
            self.participants = participants;
        }
        if let Some(gallery) = patch.gallery {
            self.gallery = gallery;
        }
    }
}

/// Fields for creating a new item. Everything except the title has a
/// sensible default, so call sites can spread `..Default::default()`.
#[derive(Debug, Clone, Default)]
pub struct NewContent {
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub status: ContentStatus,
    pub tags: Vec<String>,
    pub kind: ContentKind,
    pub location: Option<String>,
    pub participants: Vec<String>,
    pub gallery: Vec<String>,
}

/// A partial mutation. `None` leaves the field untouched.
///
/// `remote_id` is doubly wrapped so a patch can distinguish "leave the
/// link alone" (`None`) from "unlink" (`Some(None)`) and "link to this
/// post" (`Some(Some(id))`).
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<ContentStatus>,
    pub remote_id: Option<Option<RemoteId>>,
    pub tags: Option<Vec<String>>,
    pub location: Option<Option<String>>,
    pub participants: Option<Vec<String>>,
    pub gallery: Option<Vec<String>>,
}

impl ContentPatch {
    /// Patch that links an item to its remote counterpart.
    #[must_use]
    pub fn link(remote_id: RemoteId) -> Self {
        Self {
            remote_id: Some(Some(remote_id)),
            ..Self::default()
        }
    }

    /// Patch that severs an item's remote link.
    #[must_use]
    pub fn unlink() -> Self {
        Self {
            remote_id: Some(None),
            ..Self::default()
        }
    }

    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.excerpt.is_none()
            && self.status.is_none()
            && self.remote_id.is_none()
            && self.tags.is_none()
            && self.location.is_none()
            && self.participants.is_none()
            && self.gallery.is_none()
    }
}
