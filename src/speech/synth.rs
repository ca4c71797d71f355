//! Speech synthesizer abstraction
//!
//! The narration engine is layered on exactly five platform primitives:
//! enumerate voices, speak an utterance, pause, resume and cancel. Platform
//! completion/error callbacks are surfaced as [`NarrationEvent`]s which the
//! owner drains with [`Synth::poll_events`] on its own thread.

use super::backends::native::NativeSynth;
use crate::Result;
use log::info;

/// A platform voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    /// Backend-specific identifier, passed back in [`Utterance::voice_id`]
    pub id: String,
    /// Human-readable name, used for voice matching
    pub name: String,
}

/// One submission to the speech backend
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Tag of the narration session that submitted it
    pub generation: u64,
    /// Speech-clean text
    pub text: String,
    /// Resolved voice, or `None` for the platform default
    pub voice_id: Option<String>,
    /// Rate multiplier, 1.0 is the platform's normal rate
    pub rate: f32,
    /// Pitch multiplier, 1.0 is the platform's normal pitch
    pub pitch: f32,
}

/// Completion or failure reported by the backend for an utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationEvent {
    /// Utterance played to the end
    Finished { generation: u64 },
    /// Backend gave up on the utterance
    Failed { generation: u64, reason: String },
}

impl NarrationEvent {
    pub fn generation(&self) -> u64 {
        match self {
            NarrationEvent::Finished { generation } => *generation,
            NarrationEvent::Failed { generation, .. } => *generation,
        }
    }
}

/// Speech synthesizer trait
///
/// All backends implement this. Implementations must not call back into the
/// engine; completion and errors are queued and returned from `poll_events`.
pub trait Synth: Send {
    /// Voices installed on the platform
    fn voices(&self) -> Result<Vec<VoiceInfo>>;

    /// Start speaking an utterance
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;

    /// Suspend the current utterance without discarding it
    fn pause(&mut self) -> Result<()>;

    /// Continue a suspended utterance
    fn resume(&mut self) -> Result<()>;

    /// Silence and discard anything queued or playing
    fn cancel(&mut self) -> Result<()>;

    /// Drain completion/error events reported since the last call
    fn poll_events(&mut self) -> Vec<NarrationEvent>;
}

/// Create the platform speech synthesizer
///
/// Uses the `tts` crate, which wraps Speech Dispatcher on Linux,
/// AVFoundation on macOS and WinRT/SAPI on Windows. Callers treat an error
/// as "speech unavailable" and keep running without narration.
pub fn create_synth() -> Result<Box<dyn Synth>> {
    info!(
        "Creating native speech synthesizer for platform: {}",
        std::env::consts::OS
    );

    let synth = NativeSynth::new()?;
    info!("Native TTS backend initialized");
    Ok(Box::new(synth))
}
