//! Theme model: color scheme, mode selection, and the resolved theme record

use crate::error::ThemeError;
use crate::tokens::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Effective color scheme used for styling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Toggle between light and dark
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-selected theme mode
///
/// `Auto` follows the system preference. It is kept as the selection so it
/// survives persistence, but is always resolved to a [`ColorScheme`] before
/// styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    Auto,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Auto];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }

    /// The fixed scheme this mode selects, or `None` for `Auto`
    pub fn fixed_scheme(self) -> Option<ColorScheme> {
        match self {
            ThemeMode::Light => Some(ColorScheme::Light),
            ThemeMode::Dark => Some(ColorScheme::Dark),
            ThemeMode::Auto => None,
        }
    }
}

impl From<ColorScheme> for ThemeMode {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => ThemeMode::Light,
            ColorScheme::Dark => ThemeMode::Dark,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    /// Accepts exactly `light`, `dark` or `auto`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" => Ok(ThemeMode::Auto),
            other => Err(ThemeError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved theme
///
/// Every token group is complete; overrides are applied with
/// [`merge_themes`](crate::themes::merge_themes), which can replace values but
/// never drop keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ColorScheme,
    pub colors: ColorTokens,
    pub spacing: SpacingTokens,
    pub typography: TypographyTokens,
    pub shadows: ShadowTokens,
    pub radius: RadiusTokens,
    pub transitions: TransitionTokens,
}

/// A single token flattened out of a [`Theme`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenEntry {
    /// CSS category segment (`colors`, `font-size`, ...)
    pub category: &'static str,
    /// CSS token key (`primary`, `2xl`, ...)
    pub key: &'static str,
    /// Value rendered as CSS text
    pub value: String,
}

impl Theme {
    /// Every leaf token, grouped by category in a stable order
    pub fn token_entries(&self) -> Vec<TokenEntry> {
        let groups: [(&'static str, Vec<(&'static str, String)>); 10] = [
            ("colors", self.colors.entries()),
            ("spacing", self.spacing.entries()),
            ("font-family", self.typography.font_family.entries()),
            ("font-size", self.typography.font_size.entries()),
            ("font-weight", self.typography.font_weight.entries()),
            ("line-height", self.typography.line_height.entries()),
            ("shadows", self.shadows.entries()),
            ("radius", self.radius.entries()),
            ("duration", self.transitions.duration.entries()),
            ("timing", self.transitions.timing.entries()),
        ];

        groups
            .into_iter()
            .flat_map(|(category, entries)| {
                entries.into_iter().map(move |(key, value)| TokenEntry {
                    category,
                    key,
                    value,
                })
            })
            .collect()
    }
}

/// Partial theme supplied by the caller
///
/// Any group left out is treated as empty. The mode cannot be overridden; it
/// always follows the resolved color scheme.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeOverride {
    pub colors: ColorOverrides,
    pub spacing: SpacingOverrides,
    pub typography: TypographyOverrides,
    pub shadows: ShadowOverrides,
    pub radius: RadiusOverrides,
    pub transitions: TransitionOverrides,
}

impl ThemeOverride {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override color tokens
    pub fn with_colors(mut self, colors: ColorOverrides) -> Self {
        self.colors = colors;
        self
    }

    /// Override spacing tokens
    pub fn with_spacing(mut self, spacing: SpacingOverrides) -> Self {
        self.spacing = spacing;
        self
    }

    /// Override typography tokens
    pub fn with_typography(mut self, typography: TypographyOverrides) -> Self {
        self.typography = typography;
        self
    }

    /// Override shadow tokens
    pub fn with_shadows(mut self, shadows: ShadowOverrides) -> Self {
        self.shadows = shadows;
        self
    }

    /// Override radius tokens
    pub fn with_radius(mut self, radius: RadiusOverrides) -> Self {
        self.radius = radius;
        self
    }

    /// Override transition tokens
    pub fn with_transitions(mut self, transitions: TransitionOverrides) -> Self {
        self.transitions = transitions;
        self
    }

    /// Whether this override changes nothing
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.spacing.is_empty()
            && self.typography.is_empty()
            && self.shadows.is_empty()
            && self.radius.is_empty()
            && self.transitions.is_empty()
    }
}
