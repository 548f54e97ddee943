//! Storage keys for journal parts and rollups

/// Highest closed part index
pub const LATEST_PART: &str = "journal:parts:latest";

/// Cumulative summary of every closed part
pub const SO_FAR_SUMMARY: &str = "journal:parts:so-far:latest";

/// Summary of the still-open part
pub const RECENT_SUMMARY: &str = "journal:recent-summary";

/// `journal:part:<index>`
pub fn part_summary(index: usize) -> String {
    format!("journal:part:{index}")
}

/// `journal:part:<index>:title`
pub fn part_title(index: usize) -> String {
    format!("journal:part:{index}:title")
}

/// `journal:part:<index>:entries`
pub fn part_members(index: usize) -> String {
    format!("journal:part:{index}:entries")
}
