//! Voice preference and platform voice resolution
//!
//! Platforms rarely expose a reliable gender for their voices, so the
//! preference is matched against well-known voice names instead. The match
//! is recomputed on every narration start because the platform voice list
//! can change while the application runs.

use super::synth::VoiceInfo;
use crate::LexaError;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Name fragments of commonly installed male voices
const MALE_VOICE_NAMES: &[&str] = &["Male", "David", "Daniel", "Google UK English Male"];

/// Name fragments of commonly installed female voices
const FEMALE_VOICE_NAMES: &[&str] = &["Female", "Zira", "Samantha", "Google US English"];

/// Requested narrator voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoicePreference {
    Male,
    #[default]
    Female,
}

impl VoicePreference {
    fn preferred_names(self) -> &'static [&'static str] {
        match self {
            VoicePreference::Male => MALE_VOICE_NAMES,
            VoicePreference::Female => FEMALE_VOICE_NAMES,
        }
    }

    /// Name fragment that marks a voice as the opposite gender
    fn opposite_marker(self) -> &'static str {
        match self {
            VoicePreference::Male => "Female",
            VoicePreference::Female => "Male",
        }
    }
}

impl fmt::Display for VoicePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoicePreference::Male => f.write_str("male"),
            VoicePreference::Female => f.write_str("female"),
        }
    }
}

impl FromStr for VoicePreference {
    type Err = LexaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(VoicePreference::Male),
            "female" => Ok(VoicePreference::Female),
            _ => Err(LexaError::InvalidSetting(format!("unknown voice '{}'", s))),
        }
    }
}

/// Pick a platform voice for the preference
///
/// First voice whose name contains one of the curated names; failing that,
/// the first voice not marked as the opposite gender; failing that, `None`
/// and the platform default applies.
pub fn resolve_voice(preference: VoicePreference, voices: &[VoiceInfo]) -> Option<&VoiceInfo> {
    let names = preference.preferred_names();
    let resolved = voices
        .iter()
        .find(|voice| names.iter().any(|name| voice.name.contains(name)))
        .or_else(|| {
            let marker = preference.opposite_marker();
            voices.iter().find(|voice| !voice.name.contains(marker))
        });

    match resolved {
        Some(voice) => debug!("Resolved {} voice to '{}'", preference, voice.name),
        None => debug!(
            "No {} voice among {} candidates, using platform default",
            preference,
            voices.len()
        ),
    }

    resolved
}
