//! Default Haspen palette
//!
//! The light theme defines every token. The dark theme reuses the light
//! spacing, typography, shadows, radii and transitions and swaps only the
//! colors.

use crate::theme::{ColorScheme, Theme};
use crate::tokens::*;

pub(crate) fn light() -> Theme {
    Theme {
        mode: ColorScheme::Light,
        colors: light_colors(),
        spacing: SpacingTokens {
            xs: "0.25rem".into(),
            sm: "0.5rem".into(),
            md: "1rem".into(),
            lg: "1.5rem".into(),
            xl: "2rem".into(),
            xxl: "3rem".into(),
        },
        typography: TypographyTokens {
            font_family: FontFamilyTokens {
                sans: "'Inter', system-ui, -apple-system, 'Segoe UI', sans-serif".into(),
                serif: "Georgia, 'Times New Roman', serif".into(),
                mono: "'JetBrains Mono', ui-monospace, 'SFMono-Regular', monospace".into(),
            },
            font_size: FontSizeTokens {
                xs: "0.75rem".into(),
                sm: "0.875rem".into(),
                base: "1rem".into(),
                lg: "1.125rem".into(),
                xl: "1.25rem".into(),
                xxl: "1.5rem".into(),
                xxxl: "1.875rem".into(),
            },
            font_weight: FontWeightTokens {
                light: 300,
                normal: 400,
                medium: 500,
                semibold: 600,
                bold: 700,
            },
            line_height: LineHeightTokens {
                tight: "1.25".into(),
                normal: "1.5".into(),
                relaxed: "1.75".into(),
            },
        },
        shadows: ShadowTokens {
            sm: "0 1px 2px 0 rgba(0, 0, 0, 0.05)".into(),
            md: "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -2px rgba(0, 0, 0, 0.1)".into(),
            lg: "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -4px rgba(0, 0, 0, 0.1)".into(),
            xl: "0 20px 25px -5px rgba(0, 0, 0, 0.1), 0 8px 10px -6px rgba(0, 0, 0, 0.1)".into(),
            inner: "inset 0 2px 4px 0 rgba(0, 0, 0, 0.05)".into(),
        },
        radius: RadiusTokens {
            none: "0".into(),
            sm: "0.25rem".into(),
            md: "0.375rem".into(),
            lg: "0.5rem".into(),
            xl: "0.75rem".into(),
            full: "9999px".into(),
        },
        transitions: TransitionTokens {
            duration: DurationTokens {
                fast: "150ms".into(),
                normal: "250ms".into(),
                slow: "350ms".into(),
            },
            timing: TimingTokens {
                ease: "cubic-bezier(0.4, 0, 0.2, 1)".into(),
                ease_in: "cubic-bezier(0.4, 0, 1, 1)".into(),
                ease_out: "cubic-bezier(0, 0, 0.2, 1)".into(),
                ease_in_out: "cubic-bezier(0.4, 0, 0.6, 1)".into(),
            },
        },
    }
}

pub(crate) fn dark() -> Theme {
    Theme {
        mode: ColorScheme::Dark,
        colors: dark_colors(),
        ..light()
    }
}

fn light_colors() -> ColorTokens {
    ColorTokens {
        primary: "#3b82f6".into(),
        primary_hover: "#2563eb".into(),
        primary_active: "#1d4ed8".into(),
        secondary: "#64748b".into(),
        secondary_hover: "#475569".into(),

        success: "#16a34a".into(),
        warning: "#d97706".into(),
        error: "#dc2626".into(),
        info: "#0891b2".into(),

        background: "#ffffff".into(),
        surface: "#f8fafc".into(),
        surface_elevated: "#ffffff".into(),
        overlay: "rgba(15, 23, 42, 0.5)".into(),

        text: "#0f172a".into(),
        text_secondary: "#475569".into(),
        text_muted: "#94a3b8".into(),
        text_inverse: "#ffffff".into(),

        border: "#e2e8f0".into(),
        border_focus: "#3b82f6".into(),
    }
}

fn dark_colors() -> ColorTokens {
    ColorTokens {
        primary: "#60a5fa".into(),
        primary_hover: "#3b82f6".into(),
        primary_active: "#2563eb".into(),
        secondary: "#94a3b8".into(),
        secondary_hover: "#cbd5e1".into(),

        success: "#22c55e".into(),
        warning: "#f59e0b".into(),
        error: "#ef4444".into(),
        info: "#22d3ee".into(),

        background: "#0f172a".into(),
        surface: "#1e293b".into(),
        surface_elevated: "#334155".into(),
        overlay: "rgba(0, 0, 0, 0.7)".into(),

        text: "#f1f5f9".into(),
        text_secondary: "#cbd5e1".into(),
        text_muted: "#64748b".into(),
        text_inverse: "#0f172a".into(),

        border: "#334155".into(),
        border_focus: "#60a5fa".into(),
    }
}
