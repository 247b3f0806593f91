use serde::{Deserialize, Serialize};

use crate::appearance::SystemAppearance;
use crate::palette::{Palette, DARK_PALETTE, LIGHT_PALETTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[serde(rename = "system")]
    #[default]
    System,
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
}

impl ThemeMode {
    /// The literal stored for this mode. Must stay in sync with the serde
    /// spelling; older app builds persisted through serde directly.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Strict inverse of [`as_str`](Self::as_str). Anything else stored is
    /// invalid and treated as absent by callers.
    pub fn from_str_value(value: &str) -> Option<Self> {
        match value {
            "system" => Some(ThemeMode::System),
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

/// Maps the user's mode and the ambient appearance to the active palette.
/// Total over both inputs; `Unknown` appearance counts as light.
pub fn resolve(mode: ThemeMode, appearance: SystemAppearance) -> &'static Palette {
    match mode {
        ThemeMode::Light => &LIGHT_PALETTE,
        ThemeMode::Dark => &DARK_PALETTE,
        ThemeMode::System => match appearance {
            SystemAppearance::Dark => &DARK_PALETTE,
            SystemAppearance::Light | SystemAppearance::Unknown => &LIGHT_PALETTE,
        },
    }
}

pub fn is_dark(mode: ThemeMode, appearance: SystemAppearance) -> bool {
    mode == ThemeMode::Dark
        || (mode == ThemeMode::System && appearance == SystemAppearance::Dark)
}

/// The palette currently in effect, together with the mode that produced it.
/// Derived on every mode or appearance change, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub mode: ThemeMode,
    pub palette: &'static Palette,
}

impl ResolvedTheme {
    pub fn resolve(mode: ThemeMode, appearance: SystemAppearance) -> Self {
        Self {
            mode,
            palette: resolve(mode, appearance),
        }
    }

    pub fn is_dark(&self) -> bool {
        *self.palette == DARK_PALETTE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPEARANCES: [SystemAppearance; 3] = [
        SystemAppearance::Light,
        SystemAppearance::Dark,
        SystemAppearance::Unknown,
    ];

    #[test]
    fn explicit_modes_resolve_regardless_of_appearance() {
        for appearance in APPEARANCES {
            assert_eq!(resolve(ThemeMode::Light, appearance), &LIGHT_PALETTE);
            assert_eq!(resolve(ThemeMode::Dark, appearance), &DARK_PALETTE);
        }
    }

    #[test]
    fn system_mode_follows_the_ambient_appearance() {
        assert_eq!(resolve(ThemeMode::System, SystemAppearance::Dark), &DARK_PALETTE);
        assert_eq!(resolve(ThemeMode::System, SystemAppearance::Light), &LIGHT_PALETTE);
        assert_eq!(resolve(ThemeMode::System, SystemAppearance::Unknown), &LIGHT_PALETTE);
    }

    #[test]
    fn is_dark_matches_the_resolved_palette_for_every_combination() {
        for mode in [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark] {
            for appearance in APPEARANCES {
                let resolved = ResolvedTheme::resolve(mode, appearance);
                assert_eq!(resolved.mode, mode);
                assert_eq!(resolved.is_dark(), is_dark(mode, appearance));
                assert_eq!(
                    resolved.is_dark(),
                    mode == ThemeMode::Dark
                        || (mode == ThemeMode::System && appearance == SystemAppearance::Dark)
                );
            }
        }
    }

    #[test]
    fn mode_round_trips_through_its_stored_literal() {
        for mode in [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_str_value(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn unknown_literals_are_rejected() {
        assert_eq!(ThemeMode::from_str_value("blue"), None);
        assert_eq!(ThemeMode::from_str_value("Dark"), None);
        assert_eq!(ThemeMode::from_str_value(""), None);
    }

    #[test]
    fn serde_spelling_agrees_with_the_stored_literals() {
        for mode in [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark] {
            let encoded = serde_json::to_value(mode).unwrap();
            assert_eq!(encoded, serde_json::Value::String(mode.as_str().to_string()));
            let decoded: ThemeMode = serde_json::from_value(encoded).unwrap();
            assert_eq!(decoded, mode);
        }
    }

    #[test]
    fn default_mode_is_system() {
        assert_eq!(ThemeMode::default(), ThemeMode::System);
    }
}
