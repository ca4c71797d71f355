//! Native Rust TTS backend using the tts crate
//!
//! This backend uses the `tts` crate which provides a unified interface to:
//! - Speech Dispatcher on Linux (via native bindings)
//! - AVFoundation on macOS/iOS (via native bindings)
//! - WinRT / SAPI on Windows
//!
//! Utterance-end callbacks arrive on a platform thread. They only push the
//! utterance id into a channel; `poll_events` maps ids back to narration
//! generations on the owning thread.

use crate::speech::{NarrationEvent, Synth, Utterance, VoiceInfo};
use crate::{LexaError, Result};
use log::{debug, error, warn};
use std::sync::mpsc::{self, Receiver};
use tts::{Tts as TtsCrate, UtteranceId};

/// Native TTS backend using the tts crate
pub struct NativeSynth {
    /// The tts crate's TTS instance
    tts: TtsCrate,

    /// Utterance-end notifications from the platform callback
    finished_rx: Receiver<UtteranceId>,

    /// Submitted utterances still waiting for their end callback
    in_flight: Vec<(UtteranceId, u64)>,

    /// Generation of an utterance the platform gave no id for; completion is
    /// detected by polling `is_speaking`
    untracked: Option<u64>,
}

impl NativeSynth {
    /// Create a new native TTS synthesizer
    ///
    /// Initializes the platform-appropriate TTS backend and registers the
    /// utterance-end callback where the platform supports one.
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let tts = TtsCrate::default()
            .map_err(|e| LexaError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        let (finished_tx, finished_rx) = mpsc::channel();
        if tts.supported_features().utterance_callbacks {
            tts.on_utterance_end(Some(Box::new(move |id| {
                // Receiver gone means the synth was dropped; nothing to notify
                let _ = finished_tx.send(id);
            })))
            .map_err(|e| LexaError::Speech(format!("Failed to register callback: {}", e)))?;
        } else {
            warn!("Utterance callbacks not supported; completion will be polled");
        }

        debug!("Native TTS backend created successfully");

        Ok(Self {
            tts,
            finished_rx,
            in_flight: Vec::new(),
            untracked: None,
        })
    }

    /// Convert a rate multiplier (1.0 = normal) to the platform's scale
    fn convert_rate(&self, multiplier: f32) -> f32 {
        scale_to_range(
            multiplier,
            self.tts.min_rate(),
            self.tts.normal_rate(),
            self.tts.max_rate(),
        )
    }

    /// Convert a pitch multiplier (1.0 = normal) to the platform's scale
    fn convert_pitch(&self, multiplier: f32) -> f32 {
        scale_to_range(
            multiplier,
            self.tts.min_pitch(),
            self.tts.normal_pitch(),
            self.tts.max_pitch(),
        )
    }

    fn apply_voice(&mut self, voice_id: &str) -> Result<()> {
        let voices = self
            .tts
            .voices()
            .map_err(|e| LexaError::Speech(format!("Failed to get voices: {}", e)))?;

        match voices.iter().find(|voice| voice.id() == voice_id) {
            Some(voice) => {
                debug!("Selecting voice: {}", voice.name());
                self.tts
                    .set_voice(voice)
                    .map_err(|e| LexaError::Speech(format!("Failed to set voice: {}", e)))?;
            }
            None => warn!("Voice {} no longer available, using current voice", voice_id),
        }

        Ok(())
    }

    fn apply_prosody(&mut self, rate: f32, pitch: f32) -> Result<()> {
        let features = self.tts.supported_features();

        if features.rate {
            let converted = self.convert_rate(rate);
            self.tts
                .set_rate(converted)
                .map_err(|e| LexaError::Speech(format!("Failed to set rate: {}", e)))?;
        } else {
            warn!("Rate control not supported on this platform");
        }

        if features.pitch {
            let converted = self.convert_pitch(pitch);
            self.tts
                .set_pitch(converted)
                .map_err(|e| LexaError::Speech(format!("Failed to set pitch: {}", e)))?;
        } else {
            debug!("Pitch control not supported on this platform");
        }

        Ok(())
    }
}

/// Map a multiplier in [0.5, 1.5] onto a platform range
///
/// 1.0 maps to `normal`; 1.5 lands halfway between normal and max, 0.5
/// halfway between normal and min.
fn scale_to_range(multiplier: f32, min: f32, normal: f32, max: f32) -> f32 {
    let offset = multiplier - 1.0;
    let value = if offset >= 0.0 {
        normal + offset * (max - normal)
    } else {
        normal + offset * (normal - min)
    };
    value.clamp(min, max)
}

impl Synth for NativeSynth {
    fn voices(&self) -> Result<Vec<VoiceInfo>> {
        if !self.tts.supported_features().voice {
            return Ok(Vec::new());
        }

        let voices = self
            .tts
            .voices()
            .map_err(|e| LexaError::Speech(format!("Failed to get voices: {}", e)))?;

        Ok(voices
            .iter()
            .map(|voice| VoiceInfo {
                id: voice.id(),
                name: voice.name(),
            })
            .collect())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        if let Some(voice_id) = &utterance.voice_id {
            if self.tts.supported_features().voice {
                self.apply_voice(voice_id)?;
            }
        }
        self.apply_prosody(utterance.rate, utterance.pitch)?;

        debug!(
            "Speaking generation {} ({} chars)",
            utterance.generation,
            utterance.text.len()
        );
        let id = self
            .tts
            .speak(utterance.text.clone(), false)
            .map_err(|e| {
                error!("Failed to speak: {}", e);
                LexaError::Speech(format!("Speak failed: {}", e))
            })?;

        match id {
            Some(id) => self.in_flight.push((id, utterance.generation)),
            None => self.untracked = Some(utterance.generation),
        }

        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        // The tts crate exposes no pause primitive on any platform
        Err(LexaError::Speech(
            "Pause not supported by the native backend".to_string(),
        ))
    }

    fn resume(&mut self) -> Result<()> {
        Err(LexaError::Speech(
            "Resume not supported by the native backend".to_string(),
        ))
    }

    fn cancel(&mut self) -> Result<()> {
        debug!("Canceling speech");
        self.in_flight.clear();
        self.untracked = None;

        if !self.tts.supported_features().stop {
            warn!("Stop not supported on this platform");
            return Ok(());
        }

        self.tts.stop().map_err(|e| {
            error!("Failed to cancel speech: {}", e);
            LexaError::Speech(format!("Cancel failed: {}", e))
        })?;

        Ok(())
    }

    fn poll_events(&mut self) -> Vec<NarrationEvent> {
        let mut events = Vec::new();

        while let Ok(id) = self.finished_rx.try_recv() {
            if let Some(pos) = self.in_flight.iter().position(|(uid, _)| *uid == id) {
                let (_, generation) = self.in_flight.remove(pos);
                events.push(NarrationEvent::Finished { generation });
            }
        }

        if let Some(generation) = self.untracked {
            if !self.tts.supported_features().is_speaking {
                // No way to observe the end; report it rather than hang the caller
                self.untracked = None;
                events.push(NarrationEvent::Finished { generation });
            } else {
                match self.tts.is_speaking() {
                    Ok(true) => {}
                    Ok(false) => {
                        self.untracked = None;
                        events.push(NarrationEvent::Finished { generation });
                    }
                    Err(e) => {
                        self.untracked = None;
                        events.push(NarrationEvent::Failed {
                            generation,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        events
    }
}
