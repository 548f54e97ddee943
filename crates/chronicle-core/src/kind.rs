//! Content kinds and cache key formats
//!
//! Every cached summary belongs to exactly one [`ContentKind`]. The kind
//! decides the key prefix and the prompt policy used when condensing it.

use std::fmt;
use std::str::FromStr;

use crate::error::{ChronicleError, Result};

/// Separator between kind and id in a summary key
pub const KEY_SEPARATOR: char = ':';

/// Suffix appended to a kind to form its meta-summary key
pub const META_SUFFIX: &str = "-meta";

/// The kinds of content that can be summarized individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    /// A single journal entry
    Entry,
    /// A character biography
    Character,
    /// A place description
    Location,
    /// A recurring topic or theme
    Topic,
}

/// Prompt and length policy for a content kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindPolicy {
    /// Fraction of the original length to aim for
    pub ratio: f64,
    /// Instruction passed to the summarizer
    pub guidance: &'static str,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Entry,
        ContentKind::Character,
        ContentKind::Location,
        ContentKind::Topic,
    ];

    /// Stable key prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Entry => "entry",
            ContentKind::Character => "character",
            ContentKind::Location => "location",
            ContentKind::Topic => "topic",
        }
    }

    /// Summarization policy for this kind, using `ratio` as the compression target
    pub fn policy(&self, ratio: f64) -> KindPolicy {
        let guidance = match self {
            ContentKind::Entry => {
                "Summarize this journal entry. Keep events, people, places and feelings; \
                 drop filler. Write in the same person and tense as the entry."
            }
            ContentKind::Character => {
                "Summarize this character description. Keep name, relationships, \
                 defining traits and notable history."
            }
            ContentKind::Location => {
                "Summarize this place description. Keep what it is, where it is, \
                 and why it matters to the writer."
            }
            ContentKind::Topic => {
                "Summarize these notes on a recurring topic. Keep the main threads \
                 and how the writer's view has changed."
            }
        };
        KindPolicy { ratio, guidance }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ChronicleError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        ContentKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| {
                ChronicleError::invalid_value(
                    "content kind",
                    format!("{s} (expected: entry, character, location, topic)"),
                )
            })
    }
}

/// Cache key of a single content item: `"<kind>:<id>"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummaryKey {
    pub kind: ContentKind,
    pub id: String,
}

impl SummaryKey {
    pub fn new(kind: ContentKind, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ChronicleError::invalid_value("content id", "(empty)"));
        }
        Ok(SummaryKey { kind, id })
    }
}

impl fmt::Display for SummaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind, KEY_SEPARATOR, self.id)
    }
}

/// Group name of a raw key: the substring before its first separator.
///
/// Keys without a separator (such as `entry-meta`) are their own group.
pub fn kind_of(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR)
        .map(|(kind, _)| kind)
        .unwrap_or(key)
}

/// Meta-summary key for a group name: `"<kind>-meta"`
pub fn meta_key(kind: &str) -> String {
    format!("{kind}{META_SUFFIX}")
}
