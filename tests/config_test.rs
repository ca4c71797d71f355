//! Configuration loading tests
//!
//! Tests that startup configuration loads correctly, seeds the settings
//! store through its interaction rules and falls back to defaults

use lexa::speech::VoicePreference;
use lexa::state::config::Config;
use lexa::state::palette::{Theme, Tint};
use lexa::state::settings::{AccessibilitySettings, SettingsSnapshot};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(".lexa.cfg");
    fs::write(&path, contents).expect("Failed to write config");
    path
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.cfg");

    let config = Config::load_from(&path).expect("Missing config is not an error");
    assert_eq!(config.path(), &path);

    let mut settings = AccessibilitySettings::new();
    config.apply(&mut settings);
    assert_eq!(settings.snapshot(), &SettingsSnapshot::default());

    // Config is never written back
    assert!(!path.exists());
}

#[test]
fn test_full_config_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[reading]\n\
         bionic = true\n\
         syllables = true\n\
         micro_chunk = true\n\
         dyslexic_font = true\n\
         line_height = 2.4\n\
         [focus]\n\
         adhd_support = true\n\
         focus_timer = true\n\
         [speech]\n\
         voice = male\n\
         rate = 1.3\n",
    );

    let config = Config::load_from(&path).unwrap();
    let mut settings = AccessibilitySettings::new();
    config.apply(&mut settings);

    let snapshot = settings.snapshot();
    assert!(snapshot.bionic);
    assert!(snapshot.syllables);
    assert!(snapshot.micro_chunk);
    assert!(snapshot.dyslexic_font);
    assert!(snapshot.adhd_support);
    assert!(snapshot.focus_timer);
    assert_eq!(snapshot.line_height, 2.4);
    assert_eq!(snapshot.voice, VoicePreference::Male);
    assert_eq!(snapshot.speech_rate, 1.3);
}

#[test]
fn test_zen_in_config_forces_ruler() {
    let config = Config::from_str_contents("[reading]\nfocus_ruler = false\n[focus]\nzen_mode = true\n")
        .unwrap();
    let mut settings = AccessibilitySettings::new();
    config.apply(&mut settings);

    assert!(settings.zen_mode());
    assert!(settings.focus_ruler());
}

#[test]
fn test_explicit_tint_wins_over_theme() {
    let config =
        Config::from_str_contents("[display]\ntheme = dark\n[reading]\ntint = charcoal\n").unwrap();
    let mut settings = AccessibilitySettings::new();
    config.apply(&mut settings);

    assert_eq!(settings.theme(), Theme::Dark);
    assert_eq!(settings.tint(), Tint::Charcoal);
}

#[test]
fn test_theme_without_tint_uses_theme_default() {
    let config = Config::from_str_contents("[display]\ntheme = dark\n").unwrap();
    let mut settings = AccessibilitySettings::new();
    config.apply(&mut settings);

    assert_eq!(settings.tint(), Tint::DarkPanel);
}

#[test]
fn test_out_of_range_values_clamped() {
    let config =
        Config::from_str_contents("[reading]\nline_height = 9\n[speech]\nrate = 0.1\n").unwrap();
    let mut settings = AccessibilitySettings::new();
    config.apply(&mut settings);

    assert_eq!(settings.line_height(), 3.0);
    assert_eq!(settings.speech_rate(), 0.5);
}

#[test]
fn test_default_path() {
    // Load from home; may or may not exist
    if let Ok(config) = Config::load() {
        assert!(config.path().to_str().unwrap().contains(".lexa.cfg"));
    }
}
