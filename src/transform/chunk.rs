//! Micro-chunking: one bullet line per sentence
//!
//! Long multi-sentence paragraphs are hard to track for readers with
//! attention difficulties. Each such paragraph is broken into bullet lines,
//! one per sentence, separated by blank lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker placed in front of every chunked sentence
pub const BULLET: &str = "• ";

/// Paragraphs shorter than this (in characters) are left alone
pub const MIN_CHUNK_LEN: usize = 50;

/// Sentence terminator followed by whitespace
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence break pattern is valid"));

/// Restructure multi-sentence paragraphs into bullet lines
///
/// Headers (`#...`) and short paragraphs pass through untouched, as does any
/// paragraph that contains a single sentence. Blank lines between paragraphs
/// are dropped and paragraphs are rejoined with one blank line.
pub fn micro_chunk(text: &str) -> String {
    text.lines()
        .filter(|p| !p.trim().is_empty())
        .map(chunk_paragraph)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn chunk_paragraph(paragraph: &str) -> String {
    if paragraph.starts_with('#') || paragraph.chars().count() < MIN_CHUNK_LEN {
        return paragraph.to_string();
    }

    let sentences = split_sentences(paragraph);
    if sentences.len() < 2 {
        return paragraph.to_string();
    }

    sentences
        .iter()
        .map(|s| format!("{}{}", BULLET, s))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Split a paragraph after each `.`, `!` or `?` that is followed by whitespace
///
/// The terminator stays with its sentence; the whitespace is dropped.
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(paragraph) {
        // Terminators are single-byte ASCII
        sentences.push(&paragraph[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&paragraph[start..]);

    sentences.retain(|s| !s.is_empty());
    sentences
}
