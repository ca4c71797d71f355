//! Narration engine
//!
//! A three-state machine (Idle, Playing, Paused) layered on a [`Synth`].
//!
//! Every submitted utterance carries a generation number. Completion and
//! error reports are [`NarrationEvent`]s tagged with that generation, and an
//! event only ends the session whose generation it names. Reports from a
//! cancelled or superseded utterance are dropped, so a late callback can
//! never stop a newer narration.
//!
//! Backend failures never propagate: they are logged and the engine falls
//! back to Idle. Without a backend every operation is a no-op.

use super::synth::{NarrationEvent, Synth, Utterance};
use super::voice::{resolve_voice, VoicePreference};
use crate::state::settings::SettingsSnapshot;
use crate::transform::clean_for_speech;
use log::{debug, info, warn};

/// Slowest allowed narration rate
pub const MIN_RATE: f32 = 0.5;
/// Fastest allowed narration rate
pub const MAX_RATE: f32 = 1.5;
/// Rate used until the user picks one
pub const DEFAULT_RATE: f32 = 0.9;

/// Pitch used when ADHD support is on; slightly lower is calmer
pub const ADHD_PITCH: f32 = 0.9;
pub const NORMAL_PITCH: f32 = 1.0;

/// Clamp a requested rate into [`MIN_RATE`, `MAX_RATE`]
pub fn clamp_rate(rate: f32) -> f32 {
    if rate.is_finite() {
        rate.clamp(MIN_RATE, MAX_RATE)
    } else {
        DEFAULT_RATE
    }
}

/// Narration state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationState {
    /// No utterance in flight
    Idle,
    /// Speech actively emitting
    Playing,
    /// Utterance suspended, resumable
    Paused,
}

/// Parameters for starting narration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrationOptions {
    pub voice: VoicePreference,
    pub rate: f32,
    pub adhd_support: bool,
}

impl NarrationOptions {
    pub fn pitch(&self) -> f32 {
        if self.adhd_support {
            ADHD_PITCH
        } else {
            NORMAL_PITCH
        }
    }
}

impl Default for NarrationOptions {
    fn default() -> Self {
        Self {
            voice: VoicePreference::default(),
            rate: DEFAULT_RATE,
            adhd_support: false,
        }
    }
}

impl From<&SettingsSnapshot> for NarrationOptions {
    fn from(settings: &SettingsSnapshot) -> Self {
        Self {
            voice: settings.voice,
            rate: settings.speech_rate,
            adhd_support: settings.adhd_support,
        }
    }
}

/// The single live narration
struct NarrationSession {
    utterance: Utterance,
    voice: VoicePreference,
    paused: bool,
}

/// Narration engine
pub struct NarrationEngine {
    /// Platform speech, `None` when unavailable
    synth: Option<Box<dyn Synth>>,

    /// At most one session exists at a time
    session: Option<NarrationSession>,

    /// Generation for the next submitted utterance
    next_generation: u64,
}

impl NarrationEngine {
    /// Create an engine over a speech backend
    pub fn new(synth: Box<dyn Synth>) -> Self {
        Self::with_synth(Some(synth))
    }

    /// Create an engine with no speech capability
    ///
    /// Every operation is a no-op and the state stays Idle.
    pub fn unavailable() -> Self {
        Self::with_synth(None)
    }

    pub fn with_synth(synth: Option<Box<dyn Synth>>) -> Self {
        if synth.is_none() {
            info!("Narration unavailable: no speech backend");
        }
        Self {
            synth,
            session: None,
            next_generation: 1,
        }
    }

    /// Whether a speech backend is present
    pub fn is_available(&self) -> bool {
        self.synth.is_some()
    }

    pub fn state(&self) -> NarrationState {
        match &self.session {
            None => NarrationState::Idle,
            Some(session) if session.paused => NarrationState::Paused,
            Some(_) => NarrationState::Playing,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// Generation of the live session
    pub fn generation(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.utterance.generation)
    }

    /// Cleaned text of the live session
    pub fn current_text(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.utterance.text.as_str())
    }

    /// Rate of the live session
    pub fn current_rate(&self) -> Option<f32> {
        self.session.as_ref().map(|s| s.utterance.rate)
    }

    /// Voice preference the live session was started with
    pub fn current_voice(&self) -> Option<VoicePreference> {
        self.session.as_ref().map(|s| s.voice)
    }

    /// Start narrating `text` from the beginning
    ///
    /// Works from any state. Outstanding platform speech is always cancelled
    /// first so a queued utterance from an earlier session cannot leak into
    /// this one. The text is cleaned for speech here; text that cleans to
    /// nothing leaves the engine Idle.
    pub fn start(&mut self, text: &str, options: NarrationOptions) -> NarrationState {
        let Some(synth) = self.synth.as_mut() else {
            debug!("Ignoring start: speech unavailable");
            return NarrationState::Idle;
        };

        if let Err(e) = synth.cancel() {
            warn!("Cancel before start failed: {}", e);
        }
        self.session = None;

        let cleaned = clean_for_speech(text);
        if cleaned.is_empty() {
            debug!("Nothing to narrate after cleaning");
            return NarrationState::Idle;
        }

        let voices = synth.voices().unwrap_or_else(|e| {
            warn!("Could not list voices, using platform default: {}", e);
            Vec::new()
        });
        let voice_id = resolve_voice(options.voice, &voices).map(|v| v.id.clone());

        self.submit(
            cleaned,
            voice_id,
            options.voice,
            clamp_rate(options.rate),
            options.pitch(),
        )
    }

    /// Suspend playback; no-op unless Playing
    pub fn pause(&mut self) -> NarrationState {
        if self.state() != NarrationState::Playing {
            debug!("Ignoring pause in state {:?}", self.state());
            return self.state();
        }

        if let (Some(synth), Some(session)) = (self.synth.as_mut(), self.session.as_mut()) {
            match synth.pause() {
                Ok(()) => {
                    session.paused = true;
                    debug!("Paused generation {}", session.utterance.generation);
                }
                Err(e) => warn!("Pause failed, still playing: {}", e),
            }
        }
        self.state()
    }

    /// Continue the paused utterance; no-op unless Paused
    pub fn resume(&mut self) -> NarrationState {
        if self.state() != NarrationState::Paused {
            debug!("Ignoring resume in state {:?}", self.state());
            return self.state();
        }

        if let (Some(synth), Some(session)) = (self.synth.as_mut(), self.session.as_mut()) {
            match synth.resume() {
                Ok(()) => {
                    session.paused = false;
                    debug!("Resumed generation {}", session.utterance.generation);
                }
                Err(e) => warn!("Resume failed, still paused: {}", e),
            }
        }
        self.state()
    }

    /// Cancel playback and discard the session; no-op from Idle
    pub fn stop(&mut self) -> NarrationState {
        let Some(session) = self.session.take() else {
            return NarrationState::Idle;
        };

        debug!("Stopping generation {}", session.utterance.generation);
        self.cancel_platform();
        NarrationState::Idle
    }

    /// Change the narration rate
    ///
    /// Platforms cannot change the rate of a live utterance, so while Playing
    /// the current utterance is cancelled and the same text restarts from
    /// the beginning at the new rate. There is no resume-from-position. In
    /// any other state the engine is untouched; the new rate applies to the
    /// next `start`.
    pub fn change_rate(&mut self, rate: f32) -> NarrationState {
        let rate = clamp_rate(rate);

        if self.state() != NarrationState::Playing {
            debug!("Rate {} recorded for next start", rate);
            return self.state();
        }

        let Some(session) = self.session.take() else {
            return NarrationState::Idle;
        };

        info!("Restarting narration at rate {}", rate);
        self.cancel_platform();

        let Utterance {
            text,
            voice_id,
            pitch,
            ..
        } = session.utterance;
        self.submit(text, voice_id, session.voice, rate, pitch)
    }

    /// Apply a completion or error report from the backend
    ///
    /// Only an event for the live generation ends the session.
    pub fn handle_event(&mut self, event: NarrationEvent) -> NarrationState {
        let live = self.generation();
        if live != Some(event.generation()) {
            debug!(
                "Ignoring stale event for generation {} (live: {:?})",
                event.generation(),
                live
            );
            return self.state();
        }

        match &event {
            NarrationEvent::Finished { generation } => {
                debug!("Generation {} finished", generation)
            }
            NarrationEvent::Failed { generation, reason } => {
                warn!("Generation {} failed: {}", generation, reason)
            }
        }
        self.session = None;
        NarrationState::Idle
    }

    /// Drain pending backend events and apply them
    pub fn pump(&mut self) -> NarrationState {
        let events = match self.synth.as_mut() {
            Some(synth) => synth.poll_events(),
            None => Vec::new(),
        };

        for event in events {
            self.handle_event(event);
        }
        self.state()
    }

    fn submit(
        &mut self,
        text: String,
        voice_id: Option<String>,
        voice: VoicePreference,
        rate: f32,
        pitch: f32,
    ) -> NarrationState {
        let Some(synth) = self.synth.as_mut() else {
            return NarrationState::Idle;
        };

        let generation = self.next_generation;
        self.next_generation += 1;

        let utterance = Utterance {
            generation,
            text,
            voice_id,
            rate,
            pitch,
        };

        match synth.speak(&utterance) {
            Ok(()) => {
                debug!(
                    "Generation {} playing at rate {} pitch {}",
                    generation, rate, pitch
                );
                self.session = Some(NarrationSession {
                    utterance,
                    voice,
                    paused: false,
                });
                NarrationState::Playing
            }
            Err(e) => {
                warn!("Speech backend rejected utterance: {}", e);
                self.session = None;
                NarrationState::Idle
            }
        }
    }

    fn cancel_platform(&mut self) {
        if let Some(synth) = self.synth.as_mut() {
            if let Err(e) = synth.cancel() {
                warn!("Cancel failed: {}", e);
            }
        }
    }
}

impl Drop for NarrationEngine {
    fn drop(&mut self) {
        if self.session.is_some() {
            self.cancel_platform();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_rate() {
        assert_eq!(clamp_rate(0.1), MIN_RATE);
        assert_eq!(clamp_rate(2.0), MAX_RATE);
        assert_eq!(clamp_rate(1.2), 1.2);
        assert_eq!(clamp_rate(f32::NAN), DEFAULT_RATE);
    }

    #[test]
    fn test_pitch_follows_adhd_support() {
        let mut options = NarrationOptions::default();
        assert_eq!(options.pitch(), NORMAL_PITCH);
        options.adhd_support = true;
        assert_eq!(options.pitch(), ADHD_PITCH);
    }

    #[test]
    fn test_unavailable_engine_is_inert() {
        let mut engine = NarrationEngine::unavailable();
        assert!(!engine.is_available());
        assert_eq!(
            engine.start("Hello there", NarrationOptions::default()),
            NarrationState::Idle
        );
        assert_eq!(engine.pause(), NarrationState::Idle);
        assert_eq!(engine.resume(), NarrationState::Idle);
        assert_eq!(engine.change_rate(1.2), NarrationState::Idle);
        assert_eq!(engine.stop(), NarrationState::Idle);
        assert_eq!(engine.pump(), NarrationState::Idle);
    }

    #[test]
    fn test_options_from_settings() {
        let mut settings = SettingsSnapshot::default();
        settings.voice = VoicePreference::Male;
        settings.speech_rate = 1.25;
        settings.adhd_support = true;

        let options = NarrationOptions::from(&settings);
        assert_eq!(options.voice, VoicePreference::Male);
        assert_eq!(options.rate, 1.25);
        assert_eq!(options.pitch(), ADHD_PITCH);
    }
}
