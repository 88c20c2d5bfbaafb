//! Text cleanup for catalog values and category searches.

/// Longest text value stored in any catalog column, in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// Trim a raw CSV value and cut it to [`MAX_TEXT_LEN`] characters.
///
/// Returns `None` for values that are empty once trimmed.
pub fn sanitize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_TEXT_LEN).collect())
}

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Unicode lowercase, used on both sides of a category comparison.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Build the `LIKE` pattern for a category substring search.
///
/// The term is whitespace-collapsed and case-folded with [`fold_case`], so
/// it must be matched against a folded column. `\`, `%` and `_` are escaped
/// with `\` (use `ESCAPE '\'` in the SQL) and the result is wrapped in
/// `%...%`.
pub fn category_like_pattern(term: &str) -> String {
    let collapsed = fold_case(&collapse_whitespace(term));
    let mut pattern = String::with_capacity(collapsed.len() + 2);
    pattern.push('%');
    for c in collapsed.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
