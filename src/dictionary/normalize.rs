//! Diacritics folding
//!
//! Accented letters are decomposed (NFD) and their combining marks dropped,
//! so `órgão` and `orgao` compare equal.

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Strip diacritics and lowercase
///
/// # Examples
/// ```
/// use wordle_play::dictionary::normalize;
///
/// assert_eq!(normalize("Órgão"), "orgao");
/// assert_eq!(normalize("BRAÇO"), "braco");
/// assert_eq!(normalize("crane"), "crane");
/// ```
#[must_use]
pub fn normalize(word: &str) -> String {
    word.nfd()
        .filter(|&c| !is_combining_mark(c))
        .collect::<String>()
        .to_lowercase()
}

/// Fold a single character to its accent-free lowercase form
///
/// Characters that fold to nothing or to several characters are returned
/// lowercased but otherwise unchanged.
#[must_use]
pub fn fold_char(c: char) -> char {
    let mut folded = std::iter::once(c).nfd().filter(|&c| !is_combining_mark(c));
    match (folded.next(), folded.next()) {
        (Some(base), None) => base.to_lowercase().next().unwrap_or(base),
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}
