//! Background tints and display themes

use crate::LexaError;
use std::fmt;
use std::str::FromStr;

/// Background tint, restricted to a fixed palette
///
/// Soft cream and pale blue reduce glare for many dyslexic readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tint {
    #[default]
    White,
    SoftCream,
    PaleBlue,
    Charcoal,
    DarkPanel,
}

impl Tint {
    pub const ALL: [Tint; 5] = [
        Tint::White,
        Tint::SoftCream,
        Tint::PaleBlue,
        Tint::Charcoal,
        Tint::DarkPanel,
    ];

    /// CSS hex colour for this tint
    pub fn hex(self) -> &'static str {
        match self {
            Tint::White => "#FFFFFF",
            Tint::SoftCream => "#FDF5E6",
            Tint::PaleBlue => "#E6F2FF",
            Tint::Charcoal => "#1E1E1E",
            Tint::DarkPanel => "#2D2D2D",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Tint::White => "white",
            Tint::SoftCream => "soft_cream",
            Tint::PaleBlue => "pale_blue",
            Tint::Charcoal => "charcoal",
            Tint::DarkPanel => "dark_panel",
        }
    }

    /// Whether text on this tint should use light foreground colours
    pub fn is_dark(self) -> bool {
        matches!(self, Tint::Charcoal | Tint::DarkPanel)
    }
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

impl FromStr for Tint {
    type Err = LexaError;

    /// Accepts a hex colour (`#FDF5E6`, case-insensitive, `#` optional) or a
    /// palette name (`soft_cream`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let hex = wanted.trim_start_matches('#');

        Tint::ALL
            .into_iter()
            .find(|tint| {
                tint.hex()[1..].eq_ignore_ascii_case(hex) || tint.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| LexaError::InvalidSetting(format!("unknown tint '{}'", s)))
    }
}

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Tint that setting this theme resets the background to
    pub fn default_tint(self) -> Tint {
        match self {
            Theme::Light => Tint::White,
            Theme::Dark => Tint::DarkPanel,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = LexaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(LexaError::InvalidSetting(format!("unknown theme '{}'", s))),
        }
    }
}
