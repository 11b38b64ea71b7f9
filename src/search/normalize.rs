//! Text normalization for diacritic-insensitive matching.
//!
//! Google Drive's `name contains` operator is a literal substring match, so
//! queries in diacritic-bearing scripts (Vietnamese in particular) miss files
//! whose names were typed without marks. Normalization folds both sides onto
//! the same plain-ASCII-ish form before comparison.

use unicode_normalization::UnicodeNormalization;

/// Lowercases and strips diacritical marks from `text`.
///
/// Decomposes to NFD and drops combining marks, then transliterates the
/// Vietnamese "d with stroke" (đ/Đ), which is a standalone letter rather
/// than a base + combining mark and survives decomposition.
///
/// Pure and total: any Unicode string in, never fails.
pub fn normalize(text: &str) -> String {
    strip_diacritics(text).to_lowercase()
}

/// Removes combining marks without changing case.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            c => c,
        })
        .collect()
}

/// Combining Diacritical Marks block (U+0300..U+036F).
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Splits text into words on the separator set shared by the variant
/// generator and the scorer: whitespace, hyphen, underscore, period.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(is_separator).collect()
}

pub(crate) fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '_' || c == '.'
}
