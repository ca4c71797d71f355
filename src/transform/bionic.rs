//! Bionic emphasis: bold the leading part of each word
//!
//! The bolded prefixes act as fixation anchors. The prefix length is
//! `ceil(len * 0.4)` characters, counted in Unicode scalar values so
//! multi-byte words are never split mid-character.

use super::escape_markup;

/// Wrap the leading 40% of every space-delimited token in `<b>` tags
///
/// Single-character tokens and tokens that start with markup (`<`) are only
/// escaped. Source text is HTML-escaped so the emitted tags are the only
/// markup in the result.
///
/// Each line is tokenized on its own, so every `<b>` span closes before the
/// line break it precedes.
pub fn bionic_emphasize(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            line.split(' ')
                .map(emphasize_word)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn emphasize_word(word: &str) -> String {
    let len = word.chars().count();
    if len < 2 || word.starts_with('<') {
        return escape_markup(word);
    }

    let split = emphasis_len(len);
    let byte_idx = word
        .char_indices()
        .nth(split)
        .map(|(idx, _)| idx)
        .unwrap_or(word.len());

    format!(
        "<b>{}</b>{}",
        escape_markup(&word[..byte_idx]),
        escape_markup(&word[byte_idx..])
    )
}

/// `ceil(len * 0.4)` without floating point
fn emphasis_len(len: usize) -> usize {
    (len * 2 + 4) / 5
}
