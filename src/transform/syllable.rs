//! Approximate syllable segmentation
//!
//! This is a visual heuristic, not phonetics: a separator is inserted
//! wherever a vowel is immediately followed by a consonant. It gives long
//! words visible break points; the breaks will often not match a dictionary.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator inserted between segments
pub const SYLLABLE_SEPARATOR: char = '·';

/// Words this long or shorter are left alone
const MIN_SEGMENT_LEN: usize = 6;

/// Vowel (y counts) followed by a consonant
static VOWEL_CONSONANT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([aeiouyAEIOUY])([bcdfghjklmnpqrstvwxzBCDFGHJKLMNPQRSTVWXZ])")
        .expect("vowel/consonant pattern is valid")
});

/// Insert syllable separators into every long space-delimited token
///
/// Tokens of at most 6 characters and tokens starting with markup (`<`) are
/// returned unchanged. Lines are tokenized independently so a word never
/// spans a line break.
pub fn syllable_segment(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            line.split(' ')
                .map(segment_word)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn segment_word(word: &str) -> String {
    if word.chars().count() <= MIN_SEGMENT_LEN || word.starts_with('<') {
        return word.to_string();
    }

    let replacement = format!("${{1}}{}${{2}}", SYLLABLE_SEPARATOR);
    VOWEL_CONSONANT
        .replace_all(word, replacement.as_str())
        .into_owned()
}
