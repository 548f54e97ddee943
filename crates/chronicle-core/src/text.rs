//! Text utilities shared by the summarization layers

/// Separator placed between concatenated sections.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True when the text has no non-whitespace characters
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Join sections with a blank line between them, skipping blank ones
pub fn join_sections<'a, I>(sections: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    sections
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// Keep at most `max_words` words, collapsing internal whitespace
pub fn clip_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
