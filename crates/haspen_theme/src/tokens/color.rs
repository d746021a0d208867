//! Color tokens for theming
//!
//! Values are CSS color strings (`#rrggbb`, `rgba(...)`).

token_group! {
    /// Complete set of semantic color tokens
    pub struct ColorTokens / ColorOverrides: String {
        // Brand colors
        primary => "primary",
        primary_hover => "primary-hover",
        primary_active => "primary-active",
        secondary => "secondary",
        secondary_hover => "secondary-hover",

        // Semantic colors
        success => "success",
        warning => "warning",
        error => "error",
        info => "info",

        // Surface colors
        background => "background",
        surface => "surface",
        surface_elevated => "surface-elevated",
        overlay => "overlay",

        // Text colors
        text => "text",
        text_secondary => "text-secondary",
        text_muted => "text-muted",
        text_inverse => "text-inverse",

        // Border colors
        border => "border",
        border_focus => "border-focus",
    }
}
