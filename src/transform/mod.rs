//! Reading-aid text transforms
//!
//! Pure functions that turn canonical narrative text into marked-up text for
//! display, or into clean text for speech. Every render starts from the
//! canonical [`NarrativeText`]; rendered output is a separate type that can
//! never be fed back into the pipeline, so markup cannot compound.
//!
//! On-screen composition order is fixed: micro-chunking, then syllable
//! segmentation, then bionic emphasis on the segmented string.

pub mod bionic;
pub mod chunk;
pub mod speech;
pub mod syllable;

pub use bionic::bionic_emphasize;
pub use chunk::{micro_chunk, BULLET};
pub use speech::clean_for_speech;
pub use syllable::{syllable_segment, SYLLABLE_SEPARATOR};

use log::debug;
use std::fmt;
use std::sync::Arc;

/// A single reading aid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingAid {
    Bionic,
    Syllable,
    MicroChunk,
    FocusRuler,
}

impl ReadingAid {
    pub const ALL: [ReadingAid; 4] = [
        ReadingAid::Bionic,
        ReadingAid::Syllable,
        ReadingAid::MicroChunk,
        ReadingAid::FocusRuler,
    ];

    fn bit(self) -> u8 {
        match self {
            ReadingAid::Bionic => 1 << 0,
            ReadingAid::Syllable => 1 << 1,
            ReadingAid::MicroChunk => 1 << 2,
            ReadingAid::FocusRuler => 1 << 3,
        }
    }
}

/// Set of currently active reading aids
///
/// Membership is independent per aid. The order in which text aids are
/// applied is decided by [`render`], not by insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReadingAidSet(u8);

impl ReadingAidSet {
    /// Empty set
    pub fn new() -> Self {
        Self(0)
    }

    /// Builder-style insert
    pub fn with(mut self, aid: ReadingAid) -> Self {
        self.insert(aid);
        self
    }

    pub fn insert(&mut self, aid: ReadingAid) {
        self.0 |= aid.bit();
    }

    pub fn remove(&mut self, aid: ReadingAid) {
        self.0 &= !aid.bit();
    }

    pub fn contains(&self, aid: ReadingAid) -> bool {
        self.0 & aid.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate active aids in declaration order
    pub fn iter(&self) -> impl Iterator<Item = ReadingAid> + '_ {
        ReadingAid::ALL.into_iter().filter(|aid| self.contains(*aid))
    }
}

impl FromIterator<ReadingAid> for ReadingAidSet {
    fn from_iter<I: IntoIterator<Item = ReadingAid>>(iter: I) -> Self {
        let mut set = ReadingAidSet::new();
        for aid in iter {
            set.insert(aid);
        }
        set
    }
}

/// One version of generated narrative content
///
/// Immutable. The version identifies the content; a new version means any
/// narration of the old one is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeText {
    version: u64,
    text: Arc<str>,
}

impl NarrativeText {
    pub fn new(version: u64, text: impl Into<String>) -> Self {
        Self {
            version,
            text: Arc::from(text.into()),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for NarrativeText {
    fn default() -> Self {
        Self::new(0, String::new())
    }
}

/// Marked-up text ready for a presentation layer
///
/// The only tags it contains are balanced `<b>`/`</b>` pairs inserted by
/// bionic emphasis; everything from the source is HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText(String);

impl RenderedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render canonical narrative with the active reading aids
///
/// The focus ruler is an overlay and does not touch the text.
pub fn render(source: &NarrativeText, aids: ReadingAidSet) -> RenderedText {
    debug!(
        "Rendering narrative v{} ({} chars) with {:?}",
        source.version(),
        source.as_str().len(),
        aids
    );

    let mut text = source.as_str().to_string();

    if aids.contains(ReadingAid::MicroChunk) {
        text = micro_chunk(&text);
    }
    if aids.contains(ReadingAid::Syllable) {
        text = syllable_segment(&text);
    }

    // Bionic emphasis escapes the pieces it wraps; otherwise escape here
    let markup = if aids.contains(ReadingAid::Bionic) {
        bionic_emphasize(&text)
    } else {
        escape_markup(&text)
    };

    RenderedText(markup)
}

/// Text to hand to the speech engine for this narrative
///
/// Always derived from the canonical source so inserted markup is never read
/// aloud.
pub fn narration_text(source: &NarrativeText) -> String {
    clean_for_speech(source.as_str())
}

/// Escape the characters that would otherwise be read as markup
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
