/// Full-width brackets used by Japanese catalogs around titles.
const DECORATIVE_BRACKETS: [char; 2] = ['【', '】'];

/// Symbols that never appear in release names.
const DECORATIVE_SYMBOLS: [char; 4] = ['★', '☆', '♪', '♥'];

/// Normalize a title for use as a search key.
///
/// Rules, in order:
/// 1. Remove `【` and `】` anywhere in the string.
/// 2. Strip one leading `[` and one trailing `]`, then one leading `(` and
///    one trailing `)`. Only the absolute start/end is considered.
/// 3. Remove `★ ☆ ♪ ♥`.
/// 4. Collapse whitespace runs into a single space and trim.
///
/// Empty input yields an empty string.
pub fn normalize_title(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let without_brackets: String = raw
        .chars()
        .filter(|c| !DECORATIVE_BRACKETS.contains(c))
        .collect();

    let mut s = without_brackets.as_str();
    s = s.strip_prefix('[').unwrap_or(s);
    s = s.strip_suffix(']').unwrap_or(s);
    s = s.strip_prefix('(').unwrap_or(s);
    s = s.strip_suffix(')').unwrap_or(s);

    let without_symbols: String = s
        .chars()
        .filter(|c| !DECORATIVE_SYMBOLS.contains(c))
        .collect();

    without_symbols.split_whitespace().collect::<Vec<_>>().join(" ")
}
