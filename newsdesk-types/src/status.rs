//! Publication status and content kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication state of a content item.
///
/// `Completed` exists for events whose date has passed; the remote CMS
/// has no such notion and treats it as published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Completed,
}

impl ContentStatus {
    /// True for the states that are visible to site visitors.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Published | Self::Completed)
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ContentStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "completed" => Ok(Self::Completed),
            other => Err(crate::Error::UnknownStatus(other.to_string())),
        }
    }
}

/// Which editorial collection an item belongs to.
///
/// The sync engine treats both kinds identically; the distinction only
/// matters to the front end and to seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    News,
    Event,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::News => "news",
            Self::Event => "event",
        };
        write!(f, "{s}")
    }
}
