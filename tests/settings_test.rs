//! Accessibility settings store tests

use lexa::state::palette::{Theme, Tint};
use lexa::state::settings::{AccessibilitySettings, SettingChange};
use std::cell::RefCell;
use std::rc::Rc;

/// Subscribe a recorder and return the shared log it writes to
fn record(settings: &mut AccessibilitySettings) -> Rc<RefCell<Vec<SettingChange>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    settings.subscribe(move |_, change| sink.borrow_mut().push(*change));
    log
}

#[test]
fn test_zen_enables_ruler() {
    let mut settings = AccessibilitySettings::new();
    settings.set_zen_mode(true);
    assert!(settings.zen_mode());
    assert!(settings.focus_ruler());
}

#[test]
fn test_zen_off_leaves_ruler_on() {
    let mut settings = AccessibilitySettings::new();
    settings.set_zen_mode(true);
    settings.set_zen_mode(false);
    assert!(!settings.zen_mode());
    assert!(settings.focus_ruler());
}

#[test]
fn test_ruler_off_does_not_touch_zen() {
    let mut settings = AccessibilitySettings::new();
    settings.set_zen_mode(true);
    settings.set_focus_ruler(false);
    assert!(settings.zen_mode());
    assert!(!settings.focus_ruler());
}

#[test]
fn test_zen_on_with_ruler_already_on() {
    let mut settings = AccessibilitySettings::new();
    settings.set_focus_ruler(true);
    let log = record(&mut settings);

    settings.set_zen_mode(true);
    assert_eq!(*log.borrow(), vec![SettingChange::ZenMode(true)]);
}

#[test]
fn test_zen_notifies_derived_ruler_change() {
    let mut settings = AccessibilitySettings::new();
    let log = record(&mut settings);

    settings.set_zen_mode(true);
    assert_eq!(
        *log.borrow(),
        vec![SettingChange::ZenMode(true), SettingChange::FocusRuler(true)]
    );
}

#[test]
fn test_theme_sets_default_tint() {
    let mut settings = AccessibilitySettings::new();
    settings.set_tint(Tint::SoftCream);

    settings.set_theme(Theme::Dark);
    assert_eq!(settings.theme(), Theme::Dark);
    assert_eq!(settings.tint(), Tint::DarkPanel);

    settings.set_theme(Theme::Light);
    assert_eq!(settings.tint(), Tint::White);
}

#[test]
fn test_same_theme_still_resets_tint() {
    let mut settings = AccessibilitySettings::new();
    settings.set_tint(Tint::PaleBlue);
    settings.set_theme(Theme::Light);
    assert_eq!(settings.tint(), Tint::White);
}

#[test]
fn test_tint_after_theme_sticks() {
    let mut settings = AccessibilitySettings::new();
    settings.set_theme(Theme::Dark);
    settings.set_tint(Tint::Charcoal);
    assert_eq!(settings.theme(), Theme::Dark);
    assert_eq!(settings.tint(), Tint::Charcoal);
}

#[test]
fn test_theme_notifies_theme_and_tint() {
    let mut settings = AccessibilitySettings::new();
    let log = record(&mut settings);

    assert_eq!(settings.toggle_theme(), Theme::Dark);
    assert_eq!(
        *log.borrow(),
        vec![
            SettingChange::Theme(Theme::Dark),
            SettingChange::Tint(Tint::DarkPanel)
        ]
    );
}

#[test]
fn test_subscriber_sees_committed_state() {
    let mut settings = AccessibilitySettings::new();
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    settings.subscribe(move |snapshot, _| {
        *sink.borrow_mut() = Some((snapshot.zen_mode, snapshot.focus_ruler));
    });

    settings.set_zen_mode(true);
    // Both observed states are fully applied
    assert_eq!(*seen.borrow(), Some((true, true)));
}

#[test]
fn test_notification_is_synchronous() {
    let mut settings = AccessibilitySettings::new();
    let log = record(&mut settings);

    settings.set_bionic(true);
    assert_eq!(log.borrow().len(), 1);
    settings.set_line_height(2.0).unwrap();
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(log.borrow()[1], SettingChange::LineHeight(2.0));
}

#[test]
fn test_unsubscribe() {
    let mut settings = AccessibilitySettings::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let id = settings.subscribe(move |_, change| sink.borrow_mut().push(*change));

    settings.set_syllables(true);
    assert!(settings.unsubscribe(id));
    settings.set_syllables(false);

    assert_eq!(*log.borrow(), vec![SettingChange::Syllables(true)]);
    assert!(!settings.unsubscribe(id));
}

#[test]
fn test_multiple_subscribers() {
    let mut settings = AccessibilitySettings::new();
    let first = record(&mut settings);
    let second = record(&mut settings);

    settings.set_adhd_support(true);
    assert_eq!(*first.borrow(), *second.borrow());
    assert_eq!(first.borrow().len(), 1);
}

#[test]
fn test_line_height_bounds() {
    let mut settings = AccessibilitySettings::new();
    for value in [0.0, 1.49, 1.5, 2.25, 3.0, 3.01, 100.0, -4.0] {
        let stored = settings.set_line_height(value).unwrap();
        assert!((1.5..=3.0).contains(&stored), "{} -> {}", value, stored);
        assert_eq!(settings.line_height(), stored);
    }
    assert!(settings.set_line_height(f32::INFINITY).is_err());
}

#[test]
fn test_speech_rate_bounds() {
    let mut settings = AccessibilitySettings::new();
    assert_eq!(settings.set_speech_rate(0.1).unwrap(), 0.5);
    assert_eq!(settings.set_speech_rate(3.0).unwrap(), 1.5);
    assert_eq!(settings.set_speech_rate(1.1).unwrap(), 1.1);
    assert!(settings.set_speech_rate(f32::NAN).is_err());
    assert_eq!(settings.speech_rate(), 1.1);
}

#[test]
fn test_tint_palette_only() {
    let mut settings = AccessibilitySettings::new();
    for tint in Tint::ALL {
        assert_eq!(settings.set_tint_str(tint.hex()).unwrap(), tint);
    }
    assert!(settings.set_tint_str("#123456").is_err());
    assert!(settings.set_tint_str("lavender").is_err());
    assert_eq!(settings.tint(), Tint::DarkPanel);
}
