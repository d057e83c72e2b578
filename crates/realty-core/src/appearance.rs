//! Appearance preference model — every preference field's enumerated domain
//! and the record grouping them with their defaults.
//!
//! These are plain value types; persistence and change notification live in
//! the preference store (realty-config). Each enum's kebab-case string form
//! is its storage encoding.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::nav::{self, NavLinkId};

/// Base color scheme. `System` resolves against the terminal environment at
/// startup; the other three are explicit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BaseTheme {
    System,
    Light,
    DarkPro,
    Midnight,
}

impl BaseTheme {
    pub const ALL: [Self; 4] = [Self::System, Self::Light, Self::DarkPro, Self::Midnight];

    pub fn label(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Light => "Light",
            Self::DarkPro => "Dark Pro",
            Self::Midnight => "Midnight",
        }
    }
}

/// Accent color family. The concrete palette lives in the view layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AccentColor {
    Indigo,
    Forest,
    Rose,
    Sunrise,
    Violet,
    Ocean,
}

impl AccentColor {
    pub const ALL: [Self; 6] = [
        Self::Indigo,
        Self::Forest,
        Self::Rose,
        Self::Sunrise,
        Self::Violet,
        Self::Ocean,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Indigo => "Indigo",
            Self::Forest => "Forest",
            Self::Rose => "Rose",
            Self::Sunrise => "Sunrise",
            Self::Violet => "Violet",
            Self::Ocean => "Ocean",
        }
    }
}

/// Desktop navigation placement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NavLayout {
    Vertical,
    Horizontal,
}

impl NavLayout {
    pub const ALL: [Self; 2] = [Self::Vertical, Self::Horizontal];

    pub fn label(self) -> &'static str {
        match self {
            Self::Vertical => "Sidebar",
            Self::Horizontal => "Top navbar",
        }
    }
}

/// Navigation placement when the viewport is narrow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MobileNavLayout {
    Bottom,
    Sidebar,
}

impl MobileNavLayout {
    pub const ALL: [Self; 2] = [Self::Bottom, Self::Sidebar];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bottom => "Bottom navbar",
            Self::Sidebar => "Sidebar",
        }
    }
}

/// Preferred font family. A terminal cannot change its font, so this is
/// stored and displayed but has no rendering effect here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Inter,
    Poppins,
    Roboto,
    OpenSans,
    Montserrat,
    Merriweather,
    Lato,
    Lora,
    NunitoSans,
    PlayfairDisplay,
    SourceCodePro,
}

impl FontFamily {
    pub const ALL: [Self; 11] = [
        Self::Inter,
        Self::Poppins,
        Self::Roboto,
        Self::OpenSans,
        Self::Montserrat,
        Self::Merriweather,
        Self::Lato,
        Self::Lora,
        Self::NunitoSans,
        Self::PlayfairDisplay,
        Self::SourceCodePro,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::Poppins => "Poppins",
            Self::Roboto => "Roboto",
            Self::OpenSans => "Open Sans",
            Self::Montserrat => "Montserrat",
            Self::Merriweather => "Merriweather",
            Self::Lato => "Lato",
            Self::Lora => "Lora",
            Self::NunitoSans => "Nunito Sans",
            Self::PlayfairDisplay => "Playfair Display",
            Self::SourceCodePro => "Source Code Pro",
        }
    }
}

/// Base font size step. Stored as the point value; only the five steps the
/// product defines are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSize {
    Compact,
    Small,
    Medium,
    Large,
    Spacious,
}

impl FontSize {
    pub const ALL: [Self; 5] = [
        Self::Compact,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Spacious,
    ];

    /// Point value, the persisted encoding.
    pub fn points(self) -> u8 {
        match self {
            Self::Compact => 14,
            Self::Small => 15,
            Self::Medium => 16,
            Self::Large => 17,
            Self::Spacious => 18,
        }
    }

    /// Parse a point value; anything outside the five steps is rejected.
    pub fn from_points(points: u8) -> Option<Self> {
        match points {
            14 => Some(Self::Compact),
            15 => Some(Self::Small),
            16 => Some(Self::Medium),
            17 => Some(Self::Large),
            18 => Some(Self::Spacious),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Small => "Small",
            Self::Medium => "Default",
            Self::Large => "Large",
            Self::Spacious => "Spacious",
        }
    }
}

/// The full appearance record.
///
/// Created with defaults on first load; mutated one field at a time through
/// the preference store, which persists every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearancePreferences {
    pub base_theme: BaseTheme,
    pub accent_color: AccentColor,
    pub layout: NavLayout,
    pub mobile_layout: MobileNavLayout,
    pub font_family: FontFamily,
    pub font_size: FontSize,
    pub sidebar_collapsed: bool,
    /// Full catalog permutation; role filtering happens at render time.
    pub nav_order: Vec<NavLinkId>,
}

impl Default for AppearancePreferences {
    fn default() -> Self {
        Self {
            base_theme: BaseTheme::System,
            accent_color: AccentColor::Indigo,
            layout: NavLayout::Vertical,
            mobile_layout: MobileNavLayout::Bottom,
            font_family: FontFamily::Inter,
            font_size: FontSize::Medium,
            sidebar_collapsed: false,
            nav_order: nav::canonical_order(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn base_theme_ids_round_trip() {
        for theme in BaseTheme::ALL {
            assert_eq!(BaseTheme::from_str(&theme.to_string()).unwrap(), theme);
        }
        assert_eq!(BaseTheme::DarkPro.to_string(), "dark-pro");
        assert!(BaseTheme::from_str("sunset").is_err());
    }

    #[test]
    fn font_family_ids_round_trip() {
        for font in FontFamily::ALL {
            assert_eq!(FontFamily::from_str(&font.to_string()).unwrap(), font);
        }
        assert_eq!(FontFamily::PlayfairDisplay.to_string(), "playfair-display");
    }

    #[test]
    fn font_size_accepts_only_defined_steps() {
        assert_eq!(FontSize::from_points(16).unwrap(), FontSize::Medium);
        assert_eq!(FontSize::from_points(18).unwrap(), FontSize::Spacious);
        assert!(FontSize::from_points(13).is_none());
        assert!(FontSize::from_points(19).is_none());
    }

    #[test]
    fn defaults_match_product_defaults() {
        let prefs = AppearancePreferences::default();
        assert_eq!(prefs.base_theme, BaseTheme::System);
        assert_eq!(prefs.accent_color, AccentColor::Indigo);
        assert_eq!(prefs.layout, NavLayout::Vertical);
        assert_eq!(prefs.mobile_layout, MobileNavLayout::Bottom);
        assert_eq!(prefs.font_family, FontFamily::Inter);
        assert_eq!(prefs.font_size.points(), 16);
        assert!(!prefs.sidebar_collapsed);
        assert_eq!(prefs.nav_order, nav::canonical_order());
    }
}
