//! Shared test helpers
//!
//! `RecordingSynth` stands in for the platform speech backend. It records
//! every primitive call and lets the test inject completion/error events.

#![allow(dead_code)]

use lexa::speech::{NarrationEvent, Synth, Utterance, VoiceInfo};
use lexa::{LexaError, Result};
use std::sync::{Arc, Mutex};

/// One call made by the engine on the backend
#[derive(Debug, Clone, PartialEq)]
pub enum SynthCall {
    Speak(Utterance),
    Pause,
    Resume,
    Cancel,
}

#[derive(Default)]
struct Shared {
    calls: Vec<SynthCall>,
    pending: Vec<NarrationEvent>,
    voices: Vec<VoiceInfo>,
    reject_speak: bool,
    reject_pause: bool,
}

/// Fake backend handed to the engine
pub struct RecordingSynth {
    shared: Arc<Mutex<Shared>>,
}

/// Test-side handle onto the same fake
#[derive(Clone)]
pub struct SynthProbe {
    shared: Arc<Mutex<Shared>>,
}

/// Build a fake backend and its probe
pub fn recording_synth() -> (Box<dyn Synth>, SynthProbe) {
    let shared = Arc::new(Mutex::new(Shared::default()));
    (
        Box::new(RecordingSynth {
            shared: shared.clone(),
        }),
        SynthProbe { shared },
    )
}

impl SynthProbe {
    pub fn calls(&self) -> Vec<SynthCall> {
        self.shared.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.shared.lock().unwrap().calls.clear();
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SynthCall::Speak(utterance) => Some(utterance),
                _ => None,
            })
            .collect()
    }

    pub fn last_spoken(&self) -> Option<Utterance> {
        self.spoken().pop()
    }

    pub fn count(&self, wanted: &SynthCall) -> usize {
        self.calls()
            .iter()
            .filter(|call| std::mem::discriminant(*call) == std::mem::discriminant(wanted))
            .count()
    }

    pub fn speak_count(&self) -> usize {
        self.spoken().len()
    }

    pub fn cancel_count(&self) -> usize {
        self.count(&SynthCall::Cancel)
    }

    pub fn set_voices(&self, names: &[&str]) {
        self.shared.lock().unwrap().voices = names
            .iter()
            .map(|name| VoiceInfo {
                id: format!("id:{}", name),
                name: name.to_string(),
            })
            .collect();
    }

    pub fn reject_speak(&self, reject: bool) {
        self.shared.lock().unwrap().reject_speak = reject;
    }

    pub fn reject_pause(&self, reject: bool) {
        self.shared.lock().unwrap().reject_pause = reject;
    }

    /// Queue a completion for `generation`
    pub fn finish(&self, generation: u64) {
        self.shared
            .lock()
            .unwrap()
            .pending
            .push(NarrationEvent::Finished { generation });
    }

    /// Queue an error for `generation`
    pub fn fail(&self, generation: u64) {
        self.shared
            .lock()
            .unwrap()
            .pending
            .push(NarrationEvent::Failed {
                generation,
                reason: "audio device lost".to_string(),
            });
    }
}

impl Synth for RecordingSynth {
    fn voices(&self) -> Result<Vec<VoiceInfo>> {
        Ok(self.shared.lock().unwrap().voices.clone())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        let mut shared = self.shared.lock().unwrap();
        if shared.reject_speak {
            return Err(LexaError::Speech("rejected".to_string()));
        }
        shared.calls.push(SynthCall::Speak(utterance.clone()));
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut shared = self.shared.lock().unwrap();
        if shared.reject_pause {
            return Err(LexaError::Speech("pause unsupported".to_string()));
        }
        shared.calls.push(SynthCall::Pause);
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.shared.lock().unwrap().calls.push(SynthCall::Resume);
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        self.shared.lock().unwrap().calls.push(SynthCall::Cancel);
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<NarrationEvent> {
        std::mem::take(&mut self.shared.lock().unwrap().pending)
    }
}
