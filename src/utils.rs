//! Text helpers shared by the rules.

use std::sync::LazyLock;

use regex::Regex;

/// Pieces of a Qt UI string that are never translated: rich-text tags,
/// entities, and `%1`/`%L1`/`%n` argument markers.
static NON_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>|&(?:[A-Za-z]+|#[0-9]+|#x[0-9A-Fa-f]+);|%L?(?:n|[1-9][0-9]?)")
        .expect("Markup regex should compile")
});

/// Whether a source string has words a translator could change.
///
/// Strings made only of numbers, punctuation, markup and argument markers
/// (`"%1%"`, `"<b>%1</b>"`, `"&nbsp;-&nbsp;"`) read the same in every
/// language.
pub fn has_translatable_text(text: &str) -> bool {
    NON_WORDS
        .split(text)
        .any(|rest| rest.chars().any(char::is_alphabetic))
}
