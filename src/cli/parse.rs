use chronicle_core::kind::ContentKind;

/// Parse content kind from string
pub fn parse_content_kind(s: &str) -> std::result::Result<ContentKind, String> {
    s.parse::<ContentKind>().map_err(|e| e.to_string())
}
