//! Typography tokens for theming
//!
//! Typography is a group of groups: families, sizes, weights and line heights
//! each merge independently.

use serde::{Deserialize, Serialize};

token_group! {
    /// Font stacks as CSS `font-family` values
    pub struct FontFamilyTokens / FontFamilyOverrides: String {
        sans => "sans",
        serif => "serif",
        mono => "mono",
    }
}

token_group! {
    /// Type scale as CSS lengths
    pub struct FontSizeTokens / FontSizeOverrides: String {
        xs => "xs",
        sm => "sm",
        base => "base",
        lg => "lg",
        xl => "xl",
        xxl => "2xl",
        xxxl => "3xl",
    }
}

token_group! {
    /// Numeric font weights
    pub struct FontWeightTokens / FontWeightOverrides: u16 {
        light => "light",
        normal => "normal",
        medium => "medium",
        semibold => "semibold",
        bold => "bold",
    }
}

token_group! {
    /// Unitless line heights
    pub struct LineHeightTokens / LineHeightOverrides: String {
        tight => "tight",
        normal => "normal",
        relaxed => "relaxed",
    }
}

/// Complete set of typography tokens
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypographyTokens {
    pub font_family: FontFamilyTokens,
    pub font_size: FontSizeTokens,
    pub font_weight: FontWeightTokens,
    pub line_height: LineHeightTokens,
}

/// Partial override for [`TypographyTokens`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypographyOverrides {
    pub font_family: FontFamilyOverrides,
    pub font_size: FontSizeOverrides,
    pub font_weight: FontWeightOverrides,
    pub line_height: LineHeightOverrides,
}

impl TypographyTokens {
    pub fn merged(&self, overrides: &TypographyOverrides) -> Self {
        Self {
            font_family: self.font_family.merged(&overrides.font_family),
            font_size: self.font_size.merged(&overrides.font_size),
            font_weight: self.font_weight.merged(&overrides.font_weight),
            line_height: self.line_height.merged(&overrides.line_height),
        }
    }
}

impl TypographyOverrides {
    pub fn is_empty(&self) -> bool {
        self.font_family.is_empty()
            && self.font_size.is_empty()
            && self.font_weight.is_empty()
            && self.line_height.is_empty()
    }
}
