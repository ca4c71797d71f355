//! Application state management
//!
//! [`ReaderState`] is the central structure tying the pieces together: it
//! owns the canonical narrative, the settings store, the narration engine
//! and the focus timer, and enforces the rules that span them.
//!
//! - Rendering always starts from the canonical narrative.
//! - Loading new content stops any narration of the old content.
//! - Changing the voice preference stops narration; the next start resolves
//!   the new voice.
//! - Changing the speech rate restarts live narration at the new rate.

pub mod config;
pub mod palette;
pub mod settings;

use crate::content::StudyContent;
use crate::focus::{FocusTimer, RulerBand, TimerEvent};
use crate::speech::{NarrationEngine, NarrationOptions, NarrationState, Synth};
use crate::transform::{self, NarrativeText, RenderedText};
use crate::Result;
use config::Config;
use log::info;
use settings::{AccessibilitySettings, SettingChange, SettingsSnapshot, SubscriptionId};
use std::time::Duration;

/// Main application state for the reader
pub struct ReaderState {
    /// Accessibility configuration; written only through `update_settings`
    settings: AccessibilitySettings,

    /// Narration of the current narrative
    narration: NarrationEngine,

    /// Canonical, untransformed narrative
    narrative: NarrativeText,

    /// Everything the content source supplied alongside the narrative
    content: StudyContent,

    /// Focus/break countdown, ticking only while the focus timer is enabled
    focus_timer: FocusTimer,

    /// Version assigned to the next loaded narrative
    next_version: u64,
}

impl ReaderState {
    /// Create a reader over an existing settings store and engine
    pub fn new(settings: AccessibilitySettings, narration: NarrationEngine) -> Self {
        Self {
            settings,
            narration,
            narrative: NarrativeText::default(),
            content: StudyContent::default(),
            focus_timer: FocusTimer::new(),
            next_version: 1,
        }
    }

    /// Create a reader with settings seeded from `config`
    ///
    /// `synth` is `None` when no speech backend could be created; narration
    /// then stays inert.
    pub fn from_config(config: &Config, synth: Option<Box<dyn Synth>>) -> Self {
        let mut settings = AccessibilitySettings::new();
        config.apply(&mut settings);
        info!("Settings: {:?}", settings.snapshot());

        Self::new(settings, NarrationEngine::with_synth(synth))
    }

    // ========== Content ==========

    /// Replace the current content
    ///
    /// Returns the new narrative version. Narration of the previous content
    /// is stopped.
    pub fn load_content(&mut self, content: StudyContent) -> u64 {
        let version = self.next_version;
        self.next_version += 1;

        if !self.narration.is_idle() {
            info!("Content changed to v{}, stopping narration", version);
            self.narration.stop();
        }

        self.narrative = NarrativeText::new(version, content.content.clone());
        self.content = content;
        version
    }

    pub fn narrative(&self) -> &NarrativeText {
        &self.narrative
    }

    pub fn content(&self) -> &StudyContent {
        &self.content
    }

    pub fn reasoning(&self) -> &str {
        &self.content.reasoning
    }

    pub fn summary(&self) -> &[String] {
        &self.content.tldr
    }

    /// Narrative marked up with the active reading aids
    pub fn render(&self) -> RenderedText {
        transform::render(&self.narrative, self.settings.reading_aids())
    }

    /// Narrative as it will be spoken
    pub fn speech_text(&self) -> String {
        transform::narration_text(&self.narrative)
    }

    // ========== Settings ==========

    pub fn settings(&self) -> &AccessibilitySettings {
        &self.settings
    }

    /// Change settings and apply their effect on narration
    ///
    /// Runs `f` against the store, then compares the voice and rate before
    /// and after: a new voice stops narration, a new rate is forwarded to
    /// the engine.
    pub fn update_settings<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut AccessibilitySettings) -> R,
    {
        let before = self.settings.snapshot().clone();
        let result = f(&mut self.settings);
        let after = self.settings.snapshot();

        if before.voice != after.voice && !self.narration.is_idle() {
            info!("Voice changed to {}, stopping narration", after.voice);
            self.narration.stop();
        }

        if before.speech_rate != after.speech_rate {
            self.narration.change_rate(after.speech_rate);
        }

        result
    }

    /// Register a settings observer
    pub fn subscribe_settings<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&SettingsSnapshot, &SettingChange) + 'static,
    {
        self.settings.subscribe(observer)
    }

    /// Convenience for the rate slider
    pub fn set_speech_rate(&mut self, rate: f32) -> Result<f32> {
        self.update_settings(|settings| settings.set_speech_rate(rate))
    }

    // ========== Narration ==========

    pub fn narration_state(&self) -> NarrationState {
        self.narration.state()
    }

    pub fn narration(&self) -> &NarrationEngine {
        &self.narration
    }

    /// Narrate the current narrative from the beginning
    pub fn start_narration(&mut self) -> NarrationState {
        let options = NarrationOptions::from(self.settings.snapshot());
        self.narration.start(self.narrative.as_str(), options)
    }

    /// The listen/stop button: start when idle, otherwise stop
    pub fn toggle_narration(&mut self) -> NarrationState {
        if self.narration.is_idle() {
            self.start_narration()
        } else {
            self.narration.stop()
        }
    }

    pub fn pause_narration(&mut self) -> NarrationState {
        self.narration.pause()
    }

    pub fn resume_narration(&mut self) -> NarrationState {
        self.narration.resume()
    }

    pub fn stop_narration(&mut self) -> NarrationState {
        self.narration.stop()
    }

    /// Apply pending completion/error events from the speech backend
    pub fn pump_narration(&mut self) -> NarrationState {
        self.narration.pump()
    }

    // ========== Focus aids ==========

    pub fn focus_timer(&self) -> &FocusTimer {
        &self.focus_timer
    }

    /// Start or pause the focus timer; `None` while the timer is disabled
    pub fn toggle_focus_timer(&mut self) -> Option<bool> {
        if !self.settings.focus_timer() {
            return None;
        }
        Some(self.focus_timer.toggle())
    }

    /// Advance the focus timer if it is enabled
    pub fn tick_focus_timer(&mut self, elapsed: Duration) -> Option<TimerEvent> {
        if !self.settings.focus_timer() {
            return None;
        }
        self.focus_timer.tick(elapsed)
    }

    /// Ruler layout for a pointer position; `None` while the ruler is off
    pub fn ruler_band(&self, pointer_y: u32) -> Option<RulerBand> {
        if !self.settings.focus_ruler() {
            return None;
        }
        Some(RulerBand::at(pointer_y))
    }
}
