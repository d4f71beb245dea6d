//! Built-in starter content.
//!
//! Loaded whenever the state store has nothing usable, and merged in
//! whenever stored data is missing some of these ids. Timestamps are
//! fixed and old so any genuine remote edit wins a pull merge.

use chrono::{DateTime, Utc};
use newsdesk_types::{ContentItem, ContentKind, ContentStatus, LocalId};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// The seed dataset: a few published articles and events so a fresh
/// install has something to show.
#[must_use]
pub fn seed_items() -> Vec<ContentItem> {
    vec![
        ContentItem {
            local_id: LocalId::new(1),
            remote_id: None,
            title: "Welcome to the newsroom".to_string(),
            body: "This site is now maintained through the new editorial tool. \
                   Articles written here are published to the main site automatically."
                .to_string(),
            excerpt: "The new editorial tool is live.".to_string(),
            status: ContentStatus::Published,
            created_at: ts("2024-11-04T09:00:00Z"),
            modified_at: ts("2024-11-04T09:00:00Z"),
            tags: vec!["announcement".to_string()],
            kind: ContentKind::News,
            location: None,
            participants: Vec::new(),
            gallery: Vec::new(),
        },
        ContentItem {
            local_id: LocalId::new(2),
            remote_id: None,
            title: "Season opening recap".to_string(),
            body: "A short look back at the opening weekend, with results and photos \
                   from the first matches."
                .to_string(),
            excerpt: "Results and photos from the opening weekend.".to_string(),
            status: ContentStatus::Published,
            created_at: ts("2024-11-18T14:30:00Z"),
            modified_at: ts("2024-11-20T08:15:00Z"),
            tags: vec!["sports".to_string(), "recap".to_string()],
            kind: ContentKind::News,
            location: None,
            participants: Vec::new(),
            gallery: vec!["opening-1.jpg".to_string(), "opening-2.jpg".to_string()],
        },
        ContentItem {
            local_id: LocalId::new(3),
            remote_id: None,
            title: "Draft: sponsorship update".to_string(),
            body: "Notes for the upcoming sponsorship announcement. Not ready yet."
                .to_string(),
            excerpt: String::new(),
            status: ContentStatus::Draft,
            created_at: ts("2024-12-01T10:00:00Z"),
            modified_at: ts("2024-12-01T10:00:00Z"),
            tags: Vec::new(),
            kind: ContentKind::News,
            location: None,
            participants: Vec::new(),
            gallery: Vec::new(),
        },
        ContentItem {
            local_id: LocalId::new(4),
            remote_id: None,
            title: "Spring tournament".to_string(),
            body: "Open tournament for all age groups. Registration closes a week \
                   before the event."
                .to_string(),
            excerpt: "Open tournament, all age groups welcome.".to_string(),
            status: ContentStatus::Published,
            created_at: ts("2024-12-10T16:00:00Z"),
            modified_at: ts("2024-12-10T16:00:00Z"),
            tags: vec!["tournament".to_string()],
            kind: ContentKind::Event,
            location: Some("Community sports hall".to_string()),
            participants: Vec::new(),
            gallery: Vec::new(),
        },
        ContentItem {
            local_id: LocalId::new(5),
            remote_id: None,
            title: "Autumn members meeting".to_string(),
            body: "Annual members meeting with board elections and the budget vote."
                .to_string(),
            excerpt: "Annual members meeting.".to_string(),
            status: ContentStatus::Completed,
            created_at: ts("2024-10-02T18:00:00Z"),
            modified_at: ts("2024-10-28T20:00:00Z"),
            tags: vec!["club".to_string()],
            kind: ContentKind::Event,
            location: Some("Clubhouse".to_string()),
            participants: vec!["Board".to_string(), "Members".to_string()],
            gallery: Vec::new(),
        },
    ]
}
