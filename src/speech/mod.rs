//! Speech synthesis and narration

pub mod backends;
pub mod engine;
pub mod synth;
pub mod voice;

pub use engine::{NarrationEngine, NarrationOptions, NarrationState};
pub use synth::{create_synth, NarrationEvent, Synth, Utterance, VoiceInfo};
pub use voice::{resolve_voice, VoicePreference};
