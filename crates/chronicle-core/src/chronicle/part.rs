//! Closed parts of the journal and their stored pieces

use serde::Serialize;

use super::keys;
use crate::error::Result;
use crate::store::{get_json, set_json, KeyValueStore};
use crate::summary::Summary;
use crate::text::clip_words;

/// A closed, fixed-size chunk of the journal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// 1-based
    pub index: usize,
    pub title: Option<String>,
    pub summary: Option<Summary>,
    pub member_entry_ids: Vec<String>,
}

impl Part {
    /// True when membership, summary and title are all stored
    pub fn is_complete(&self) -> bool {
        !self.member_entry_ids.is_empty() && self.summary.is_some() && self.title.is_some()
    }
}

/// Typed access to the part keys of a chronicle store
pub struct PartStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> PartStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn summary(&self, index: usize) -> Result<Option<Summary>> {
        get_json(self.store, &keys::part_summary(index))
    }

    pub fn set_summary(&self, index: usize, summary: &Summary) -> Result<()> {
        set_json(self.store, &keys::part_summary(index), summary)
    }

    pub fn title(&self, index: usize) -> Result<Option<String>> {
        get_json(self.store, &keys::part_title(index))
    }

    pub fn set_title(&self, index: usize, title: &str) -> Result<()> {
        set_json(self.store, &keys::part_title(index), title)
    }

    pub fn members(&self, index: usize) -> Result<Option<Vec<String>>> {
        get_json(self.store, &keys::part_members(index))
    }

    /// Record the member entry ids of a part unless some are already stored
    ///
    /// Returns whether anything was written.
    pub fn set_members_once(&self, index: usize, ids: &[String]) -> Result<bool> {
        match self.members(index)? {
            Some(existing) if !existing.is_empty() => Ok(false),
            _ => {
                set_json(self.store, &keys::part_members(index), ids)?;
                Ok(true)
            }
        }
    }

    pub fn load_part(&self, index: usize) -> Result<Part> {
        Ok(Part {
            index,
            title: self.title(index)?,
            summary: self.summary(index)?,
            member_entry_ids: self.members(index)?.unwrap_or_default(),
        })
    }
}

/// Clean up model output into a one-line title of at most `max_words` words
pub fn sanitize_title(raw: &str, max_words: usize) -> String {
    let line = raw.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let line = line.trim();
    let line = line
        .strip_prefix("Title:")
        .or_else(|| line.strip_prefix("title:"))
        .unwrap_or(line);

    let quotes: &[char] = &['"', '\'', '“', '”', '‘', '’', '*', '`'];
    let trimmed = line.trim().trim_matches(quotes).trim();
    let clipped = clip_words(trimmed, max_words);

    clipped
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'))
        .trim_end_matches(quotes)
        .trim()
        .to_string()
}
