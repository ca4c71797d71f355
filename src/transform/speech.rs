//! Speech cleaning
//!
//! Generated study text carries markdown structure, links and emoji. A TTS
//! engine would read those out literally ("hash hash", "star star"), so they
//! are stripped before narration.

use once_cell::sync::Lazy;
use regex::Regex;

/// Header, emphasis, code and strike-through delimiters
static STRUCTURAL_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#*_`~]").expect("marker pattern is valid"));

/// `[visible text](target)`
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("link pattern is valid"));

/// Emoticons, symbols and pictographs, transport, flags, misc symbols,
/// dingbats, supplemental pictographs, enclosed characters, arrows, plus the
/// zero-width joiner and emoji variation selector that glue them together
static PICTOGRAPHS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2600}-\x{26FF}",
        r"\x{2700}-\x{27BF}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1F018}-\x{1F270}",
        r"\x{238C}",
        r"\x{2B00}-\x{2BFF}",
        r"\x{200D}",
        r"\x{FE0F}",
        "]"
    ))
    .expect("pictograph pattern is valid")
});

/// Bullet marker at the start of a line
static LEADING_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-•][ \t]*").expect("bullet pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Produce text suitable for a speech engine
///
/// Strips structural markers, keeps only the visible part of links, removes
/// pictographs and leading bullets, collapses whitespace and trims.
pub fn clean_for_speech(text: &str) -> String {
    let text = STRUCTURAL_MARKERS.replace_all(text, "");
    let text = LINK.replace_all(&text, "${1}");
    let text = PICTOGRAPHS.replace_all(&text, "");
    let text = LEADING_BULLET.replace_all(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_stripped() {
        assert_eq!(
            clean_for_speech("## The **Sun** is a `star` ~~planet~~"),
            "The Sun is a star planet"
        );
    }

    #[test]
    fn test_link_keeps_visible_text() {
        assert_eq!(
            clean_for_speech("Read [the guide](https://example.com/guide) first"),
            "Read the guide first"
        );
    }

    #[test]
    fn test_emoji_removed() {
        assert_eq!(clean_for_speech("Great job! 🎉🚀 Keep going ☀️"), "Great job! Keep going");
        assert_eq!(clean_for_speech("Family 👨‍👩‍👧 time"), "Family time");
    }

    #[test]
    fn test_bullets_stripped_per_line() {
        assert_eq!(
            clean_for_speech("- first\n• second\n  - third\nnot - a bullet"),
            "first second third not - a bullet"
        );
    }

    #[test]
    fn test_plain_text_only_whitespace_collapsed() {
        assert_eq!(
            clean_for_speech("  Plants need   light,\nwater and air.  "),
            "Plants need light, water and air."
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_for_speech(""), "");
        assert_eq!(clean_for_speech(" \n\t "), "");
    }
}
