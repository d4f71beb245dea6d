//! Wire structures and domain conversions.

use crate::error::{RemoteError, RemoteResult};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use newsdesk_types::{ContentItem, ContentStatus, RemoteId};
use serde::{Deserialize, Serialize};

/// A post as the CMS reports it. Unknown fields are ignored; absent
/// fields default so older CMS versions still parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePost {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub status: String,
    /// Last modification in GMT, as the CMS formats it. Parsed
    /// lazily so one bad date fails one post, not a whole batch.
    #[serde(default)]
    pub modified_gmt: String,
    #[serde(default)]
    pub date_gmt: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RemotePost {
    #[must_use]
    pub fn remote_id(&self) -> RemoteId {
        RemoteId::new(self.id)
    }

    /// The post's modification instant.
    pub fn modified_at(&self) -> RemoteResult<DateTime<Utc>> {
        parse_gmt(&self.modified_gmt).ok_or_else(|| {
            RemoteError::InvalidPost(format!(
                "post {}: unparseable modified_gmt {:?}",
                self.id, self.modified_gmt
            ))
        })
    }

    /// The post's creation instant, when the CMS supplied one.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_gmt(&self.date_gmt)
    }

    /// Publication status in domain terms.
    #[must_use]
    pub fn content_status(&self) -> ContentStatus {
        status_from_wire(&self.status)
    }
}

/// The CMS emits GMT dates without a zone suffix; accept both that
/// and full RFC 3339.
fn parse_gmt(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Body for creating a post.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub excerpt: String,
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<i64>,
}

impl PostDraft {
    /// Full outgoing body for a local item.
    #[must_use]
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            content: item.body.clone(),
            excerpt: item.excerpt.clone(),
            status: wire_status(item.status).to_string(),
            tags: item.tags.clone(),
            categories: Vec::new(),
            featured_media: None,
        }
    }
}

/// Partial body for updating a post. Absent fields are left alone by
/// the CMS.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<i64>,
}

impl PostPatch {
    /// A patch carrying every pushable field of a local item. Used
    /// when the engine pushes an edit: the local copy is authoritative
    /// so the whole content is sent.
    #[must_use]
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            title: Some(item.title.clone()),
            content: Some(item.body.clone()),
            excerpt: Some(item.excerpt.clone()),
            status: Some(wire_status(item.status).to_string()),
            tags: Some(item.tags.clone()),
            categories: None,
            featured_media: None,
        }
    }
}

/// Parameters for listing posts.
#[derive(Debug, Clone, Serialize)]
pub struct ListQuery {
    pub per_page: u32,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub orderby: String,
    pub order: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            per_page: 100,
            page: 1,
            status: None,
            orderby: "modified".to_string(),
            order: "desc".to_string(),
        }
    }
}

impl ListQuery {
    /// The query a pull pass runs: everything publicly visible.
    #[must_use]
    pub fn published() -> Self {
        Self {
            status: Some("publish".to_string()),
            ..Self::default()
        }
    }

    /// Cache key for this query's results. Distinct parameters must
    /// never share an entry.
    pub(crate) fn cache_key(&self) -> String {
        format!(
            "posts:list:{}",
            serde_json::to_string(self).unwrap_or_default()
        )
    }
}

/// Domain status to wire status. The CMS has no "completed" notion;
/// completed events are simply published there.
#[must_use]
pub fn wire_status(status: ContentStatus) -> &'static str {
    match status {
        ContentStatus::Draft => "draft",
        ContentStatus::Published | ContentStatus::Completed => "publish",
    }
}

/// Wire status to domain status. Anything that is not published
/// ("pending", "private", "future", ...) is treated as a draft.
#[must_use]
pub fn status_from_wire(status: &str) -> ContentStatus {
    if status == "publish" {
        ContentStatus::Published
    } else {
        ContentStatus::Draft
    }
}
