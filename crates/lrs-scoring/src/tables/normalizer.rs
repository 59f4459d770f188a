/// Header key used for alias matching: invisible marks removed, ASCII
/// lowercased, and everything but letters and digits dropped, so
/// `"Question ID"`, `"QuestionID"` and `"question_id"` collide.
pub(crate) fn normalize_header(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Header text as shown to API consumers.
pub(crate) fn display_header(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

/// Trimmed cell contents, or `None` for cells spreadsheets leave empty.
pub(crate) fn clean_cell(value: &str) -> Option<&str> {
    let trimmed = value.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}');
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
    {
        None
    } else {
        Some(trimmed)
    }
}
