//! Study content supplied by the content backend
//!
//! The backend produces a narrative, a reasoning trace and a few summary
//! facts. This crate only transforms or narrates them; missing fields are
//! treated as empty.

use crate::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One piece of generated study material
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyContent {
    /// Narrative text: paragraphs separated by line breaks, may contain
    /// markdown emphasis and headers
    pub content: String,

    /// How the backend arrived at the explanation
    pub reasoning: String,

    /// Short ordered list of summary facts
    pub tldr: Vec<String>,
}

impl StudyContent {
    /// Content with only a narrative
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            ..Self::default()
        }
    }

    /// Parse the backend's JSON payload
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a file
    ///
    /// JSON files (by extension, or content starting with `{`) are parsed as
    /// [`StudyContent`]; anything else is taken as plain narrative text.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            || raw.trim_start().starts_with('{');

        debug!(
            "Loading content from {:?} as {}",
            path,
            if is_json { "JSON" } else { "plain text" }
        );

        if is_json {
            Self::from_json(&raw)
        } else {
            Ok(Self::from_text(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let content = StudyContent::from_json(
            r#"{"content": "Cats are mammals.", "reasoning": "Looked at fur.", "tldr": ["Fur", "Milk", "Warm"]}"#,
        )
        .unwrap();
        assert_eq!(content.content, "Cats are mammals.");
        assert_eq!(content.reasoning, "Looked at fur.");
        assert_eq!(content.tldr, vec!["Fur", "Milk", "Warm"]);
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let content = StudyContent::from_json(r#"{"content": "Only text"}"#).unwrap();
        assert_eq!(content.reasoning, "");
        assert!(content.tldr.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(StudyContent::from_json("{not json").is_err());
    }
}
