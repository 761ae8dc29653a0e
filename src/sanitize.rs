//! Markup stripping for feed text

use regex::Regex;
use std::sync::LazyLock;

// Non-greedy and single-line: a `<` without a closing `>` on the same line is kept.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"<.*?>").expect("tag pattern is a valid regex")
});

/// Remove every tag-like `<...>` substring from `text`.
///
/// All other characters, whitespace included, are preserved in order.
/// Entities such as `&amp;` are left as they are.
pub fn strip_tags(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}
