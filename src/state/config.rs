//! Startup configuration
//!
//! Initial accessibility settings can be seeded from `~/.lexa.cfg`. The file
//! is only read: changes made while running are not written back.
//!
//! ```ini
//! [reading]
//! bionic = true
//! line_height = 2.0
//! tint = soft_cream
//!
//! [focus]
//! zen_mode = false
//!
//! [display]
//! theme = light
//!
//! [speech]
//! voice = female
//! rate = 0.9
//! ```

use super::palette::{Theme, Tint};
use super::settings::{AccessibilitySettings, SettingsSnapshot};
use crate::speech::VoicePreference;
use crate::{LexaError, Result};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Startup configuration for accessibility settings
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Where the config was read from
    path: PathBuf,
}

impl Config {
    /// Load `~/.lexa.cfg`, or defaults if it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load a specific config file, or defaults if it does not exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| LexaError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, using defaults");
            Ini::new()
        };

        Ok(Self { ini, path })
    }

    /// Parse config from a string
    pub fn from_str_contents(contents: &str) -> Result<Self> {
        let ini = Ini::load_from_str(contents)
            .map_err(|e| LexaError::IniParse(format!("Failed to parse config: {}", e)))?;
        Ok(Self {
            ini,
            path: PathBuf::new(),
        })
    }

    /// Get config file path (~/.lexa.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lexa.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Parse an optional value, logging and ignoring anything invalid
    fn get_parsed<T>(&self, section: &str, key: &str) -> Option<T>
    where
        T: std::str::FromStr<Err = LexaError>,
    {
        let raw = self.ini.get_from(Some(section), key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring [{}] {} = {:?}: {}", section, key, raw, e);
                None
            }
        }
    }

    // Reading aid getters

    pub fn bionic(&self) -> bool {
        self.get_bool("reading", "bionic", false)
    }

    pub fn syllables(&self) -> bool {
        self.get_bool("reading", "syllables", false)
    }

    pub fn micro_chunk(&self) -> bool {
        self.get_bool("reading", "micro_chunk", false)
    }

    pub fn focus_ruler(&self) -> bool {
        self.get_bool("reading", "focus_ruler", false)
    }

    pub fn dyslexic_font(&self) -> bool {
        self.get_bool("reading", "dyslexic_font", false)
    }

    pub fn line_height(&self) -> f32 {
        self.get_float(
            "reading",
            "line_height",
            SettingsSnapshot::default().line_height,
        )
    }

    /// Explicit tint, if one is configured and valid
    pub fn tint(&self) -> Option<Tint> {
        self.get_parsed("reading", "tint")
    }

    // Focus getters

    pub fn zen_mode(&self) -> bool {
        self.get_bool("focus", "zen_mode", false)
    }

    pub fn adhd_support(&self) -> bool {
        self.get_bool("focus", "adhd_support", false)
    }

    pub fn focus_timer(&self) -> bool {
        self.get_bool("focus", "focus_timer", false)
    }

    // Display and speech getters

    pub fn theme(&self) -> Theme {
        self.get_parsed("display", "theme").unwrap_or_default()
    }

    pub fn voice(&self) -> VoicePreference {
        self.get_parsed("speech", "voice").unwrap_or_default()
    }

    pub fn rate(&self) -> f32 {
        self.get_float("speech", "rate", SettingsSnapshot::default().speech_rate)
    }

    /// Seed a settings store from this config
    ///
    /// Goes through the store's setters so interaction rules hold: the theme
    /// is applied before an explicit tint so the tint wins, and zen mode is
    /// applied after the focus ruler so it can force the ruler on.
    pub fn apply(&self, settings: &mut AccessibilitySettings) {
        settings.set_theme(self.theme());
        if let Some(tint) = self.tint() {
            settings.set_tint(tint);
        }

        settings.set_bionic(self.bionic());
        settings.set_syllables(self.syllables());
        settings.set_micro_chunk(self.micro_chunk());
        settings.set_focus_ruler(self.focus_ruler());
        settings.set_dyslexic_font(self.dyslexic_font());
        settings.set_focus_timer(self.focus_timer());
        settings.set_adhd_support(self.adhd_support());
        settings.set_zen_mode(self.zen_mode());

        if let Err(e) = settings.set_line_height(self.line_height()) {
            warn!("Ignoring configured line height: {}", e);
        }

        settings.set_voice(self.voice());
        if let Err(e) = settings.set_speech_rate(self.rate()) {
            warn!("Ignoring configured speech rate: {}", e);
        }

        debug!("Settings seeded from {:?}", self.path);
    }
}
