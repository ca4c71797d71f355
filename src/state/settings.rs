//! Accessibility settings store
//!
//! Holds every reading-aid toggle, slider and theme field. The snapshot is
//! only reachable for writing through the setters below, which is where the
//! one-directional interaction rules live:
//!
//! - enabling zen mode force-enables the focus ruler (disabling zen mode
//!   leaves the ruler alone)
//! - setting the theme overwrites the background tint with that theme's
//!   default tint
//!
//! Subscribers are called synchronously, once per changed field, before the
//! setter returns.

use super::palette::{Theme, Tint};
use crate::speech::engine::{DEFAULT_RATE, MAX_RATE, MIN_RATE};
use crate::speech::VoicePreference;
use crate::transform::{ReadingAid, ReadingAidSet};
use crate::{LexaError, Result};
use log::{debug, warn};

pub const MIN_LINE_HEIGHT: f32 = 1.5;
pub const MAX_LINE_HEIGHT: f32 = 3.0;
pub const DEFAULT_LINE_HEIGHT: f32 = 1.6;

/// Current value of every accessibility setting
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSnapshot {
    pub syllables: bool,
    pub bionic: bool,
    pub focus_ruler: bool,
    pub micro_chunk: bool,
    pub focus_timer: bool,
    pub zen_mode: bool,
    pub adhd_support: bool,
    pub dyslexic_font: bool,
    pub tint: Tint,
    pub line_height: f32,
    pub theme: Theme,
    pub voice: VoicePreference,
    pub speech_rate: f32,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            syllables: false,
            bionic: false,
            focus_ruler: false,
            micro_chunk: false,
            focus_timer: false,
            zen_mode: false,
            adhd_support: false,
            dyslexic_font: false,
            tint: Tint::White,
            line_height: DEFAULT_LINE_HEIGHT,
            theme: Theme::Light,
            voice: VoicePreference::Female,
            speech_rate: DEFAULT_RATE,
        }
    }
}

impl SettingsSnapshot {
    /// Reading aids currently switched on
    pub fn reading_aids(&self) -> ReadingAidSet {
        let mut aids = ReadingAidSet::new();
        if self.bionic {
            aids.insert(ReadingAid::Bionic);
        }
        if self.syllables {
            aids.insert(ReadingAid::Syllable);
        }
        if self.micro_chunk {
            aids.insert(ReadingAid::MicroChunk);
        }
        if self.focus_ruler {
            aids.insert(ReadingAid::FocusRuler);
        }
        aids
    }
}

/// A single field change, as delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    Syllables(bool),
    Bionic(bool),
    FocusRuler(bool),
    MicroChunk(bool),
    FocusTimer(bool),
    ZenMode(bool),
    AdhdSupport(bool),
    DyslexicFont(bool),
    Tint(Tint),
    LineHeight(f32),
    Theme(Theme),
    Voice(VoicePreference),
    SpeechRate(f32),
}

impl SettingChange {
    fn apply(self, snapshot: &mut SettingsSnapshot) {
        match self {
            SettingChange::Syllables(v) => snapshot.syllables = v,
            SettingChange::Bionic(v) => snapshot.bionic = v,
            SettingChange::FocusRuler(v) => snapshot.focus_ruler = v,
            SettingChange::MicroChunk(v) => snapshot.micro_chunk = v,
            SettingChange::FocusTimer(v) => snapshot.focus_timer = v,
            SettingChange::ZenMode(v) => snapshot.zen_mode = v,
            SettingChange::AdhdSupport(v) => snapshot.adhd_support = v,
            SettingChange::DyslexicFont(v) => snapshot.dyslexic_font = v,
            SettingChange::Tint(v) => snapshot.tint = v,
            SettingChange::LineHeight(v) => snapshot.line_height = v,
            SettingChange::Theme(v) => snapshot.theme = v,
            SettingChange::Voice(v) => snapshot.voice = v,
            SettingChange::SpeechRate(v) => snapshot.speech_rate = v,
        }
    }
}

/// Handle returned by [`AccessibilitySettings::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&SettingsSnapshot, &SettingChange)>;

/// The settings store
pub struct AccessibilitySettings {
    current: SettingsSnapshot,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessibilitySettings {
    /// Create a store holding the default settings
    pub fn new() -> Self {
        Self {
            current: SettingsSnapshot::default(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current settings
    pub fn snapshot(&self) -> &SettingsSnapshot {
        &self.current
    }

    pub fn reading_aids(&self) -> ReadingAidSet {
        self.current.reading_aids()
    }

    /// Register a callback run after every change
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&SettingsSnapshot, &SettingChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        debug!("Settings subscriber {:?} registered", id);
        id
    }

    /// Remove a subscriber; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Apply changes in order, then notify every subscriber of each one
    fn commit(&mut self, changes: &[SettingChange]) {
        for change in changes {
            change.apply(&mut self.current);
        }
        for change in changes {
            debug!("Setting changed: {:?}", change);
            for (_, observer) in self.observers.iter_mut() {
                observer(&self.current, change);
            }
        }
    }

    // ========== Getters ==========

    pub fn syllables(&self) -> bool {
        self.current.syllables
    }

    pub fn bionic(&self) -> bool {
        self.current.bionic
    }

    pub fn focus_ruler(&self) -> bool {
        self.current.focus_ruler
    }

    pub fn micro_chunk(&self) -> bool {
        self.current.micro_chunk
    }

    pub fn focus_timer(&self) -> bool {
        self.current.focus_timer
    }

    pub fn zen_mode(&self) -> bool {
        self.current.zen_mode
    }

    pub fn adhd_support(&self) -> bool {
        self.current.adhd_support
    }

    pub fn dyslexic_font(&self) -> bool {
        self.current.dyslexic_font
    }

    pub fn tint(&self) -> Tint {
        self.current.tint
    }

    pub fn line_height(&self) -> f32 {
        self.current.line_height
    }

    pub fn theme(&self) -> Theme {
        self.current.theme
    }

    pub fn voice(&self) -> VoicePreference {
        self.current.voice
    }

    pub fn speech_rate(&self) -> f32 {
        self.current.speech_rate
    }

    // ========== Boolean setters and toggles ==========

    pub fn set_syllables(&mut self, enabled: bool) {
        self.commit(&[SettingChange::Syllables(enabled)]);
    }

    pub fn toggle_syllables(&mut self) -> bool {
        let enabled = !self.current.syllables;
        self.set_syllables(enabled);
        enabled
    }

    pub fn set_bionic(&mut self, enabled: bool) {
        self.commit(&[SettingChange::Bionic(enabled)]);
    }

    pub fn toggle_bionic(&mut self) -> bool {
        let enabled = !self.current.bionic;
        self.set_bionic(enabled);
        enabled
    }

    pub fn set_focus_ruler(&mut self, enabled: bool) {
        self.commit(&[SettingChange::FocusRuler(enabled)]);
    }

    pub fn toggle_focus_ruler(&mut self) -> bool {
        let enabled = !self.current.focus_ruler;
        self.set_focus_ruler(enabled);
        enabled
    }

    pub fn set_micro_chunk(&mut self, enabled: bool) {
        self.commit(&[SettingChange::MicroChunk(enabled)]);
    }

    pub fn toggle_micro_chunk(&mut self) -> bool {
        let enabled = !self.current.micro_chunk;
        self.set_micro_chunk(enabled);
        enabled
    }

    pub fn set_focus_timer(&mut self, enabled: bool) {
        self.commit(&[SettingChange::FocusTimer(enabled)]);
    }

    pub fn toggle_focus_timer(&mut self) -> bool {
        let enabled = !self.current.focus_timer;
        self.set_focus_timer(enabled);
        enabled
    }

    /// Set zen mode
    ///
    /// Turning it on also turns the focus ruler on. Turning it off does not
    /// touch the ruler.
    pub fn set_zen_mode(&mut self, enabled: bool) {
        if enabled && !self.current.focus_ruler {
            self.commit(&[SettingChange::ZenMode(true), SettingChange::FocusRuler(true)]);
        } else {
            self.commit(&[SettingChange::ZenMode(enabled)]);
        }
    }

    pub fn toggle_zen_mode(&mut self) -> bool {
        let enabled = !self.current.zen_mode;
        self.set_zen_mode(enabled);
        enabled
    }

    pub fn set_adhd_support(&mut self, enabled: bool) {
        self.commit(&[SettingChange::AdhdSupport(enabled)]);
    }

    pub fn toggle_adhd_support(&mut self) -> bool {
        let enabled = !self.current.adhd_support;
        self.set_adhd_support(enabled);
        enabled
    }

    pub fn set_dyslexic_font(&mut self, enabled: bool) {
        self.commit(&[SettingChange::DyslexicFont(enabled)]);
    }

    pub fn toggle_dyslexic_font(&mut self) -> bool {
        let enabled = !self.current.dyslexic_font;
        self.set_dyslexic_font(enabled);
        enabled
    }

    // ========== Value setters ==========

    pub fn set_tint(&mut self, tint: Tint) {
        self.commit(&[SettingChange::Tint(tint)]);
    }

    /// Set the tint from a hex colour or palette name
    ///
    /// Anything outside the palette is rejected and the tint is unchanged.
    pub fn set_tint_str(&mut self, value: &str) -> Result<Tint> {
        let tint = value.parse::<Tint>().map_err(|e| {
            warn!("Rejected tint {:?}", value);
            e
        })?;
        self.set_tint(tint);
        Ok(tint)
    }

    /// Set line height, clamped to [1.5, 3.0]
    ///
    /// Returns the stored value. Non-finite input is rejected.
    pub fn set_line_height(&mut self, value: f32) -> Result<f32> {
        if !value.is_finite() {
            warn!("Rejected line height {}", value);
            return Err(LexaError::InvalidSetting(format!(
                "line height must be a finite number, got {}",
                value
            )));
        }

        let clamped = value.clamp(MIN_LINE_HEIGHT, MAX_LINE_HEIGHT);
        if clamped != value {
            debug!("Line height {} clamped to {}", value, clamped);
        }
        self.commit(&[SettingChange::LineHeight(clamped)]);
        Ok(clamped)
    }

    /// Set the theme and reset the tint to the theme's default
    ///
    /// The tint is overwritten every time, even if the theme is unchanged.
    pub fn set_theme(&mut self, theme: Theme) {
        self.commit(&[
            SettingChange::Theme(theme),
            SettingChange::Tint(theme.default_tint()),
        ]);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.current.theme.toggled();
        self.set_theme(theme);
        theme
    }

    pub fn set_voice(&mut self, voice: VoicePreference) {
        self.commit(&[SettingChange::Voice(voice)]);
    }

    /// Set narration rate, clamped to [0.5, 1.5]
    pub fn set_speech_rate(&mut self, rate: f32) -> Result<f32> {
        if !rate.is_finite() {
            warn!("Rejected speech rate {}", rate);
            return Err(LexaError::InvalidSetting(format!(
                "speech rate must be a finite number, got {}",
                rate
            )));
        }

        let clamped = rate.clamp(MIN_RATE, MAX_RATE);
        self.commit(&[SettingChange::SpeechRate(clamped)]);
        Ok(clamped)
    }
}
