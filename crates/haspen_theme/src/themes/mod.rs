//! Built-in themes and override merging

mod haspen;

use crate::theme::{ColorScheme, Theme, ThemeOverride};
use std::sync::OnceLock;

static LIGHT_THEME: OnceLock<Theme> = OnceLock::new();
static DARK_THEME: OnceLock<Theme> = OnceLock::new();

/// The built-in light theme
pub fn light_theme() -> &'static Theme {
    LIGHT_THEME.get_or_init(haspen::light)
}

/// The built-in dark theme
pub fn dark_theme() -> &'static Theme {
    DARK_THEME.get_or_init(haspen::dark)
}

/// The built-in theme for a color scheme
pub fn base_theme(scheme: ColorScheme) -> &'static Theme {
    match scheme {
        ColorScheme::Light => light_theme(),
        ColorScheme::Dark => dark_theme(),
    }
}

/// Deep-merge an override into a base theme
///
/// With no override, `base` is returned untouched. Otherwise each token group
/// merges key by key (typography and transitions one level deeper), so the
/// result always keeps every key of `base`.
pub fn merge_themes(base: Theme, overrides: Option<&ThemeOverride>) -> Theme {
    let Some(overrides) = overrides else {
        return base;
    };

    Theme {
        mode: base.mode,
        colors: base.colors.merged(&overrides.colors),
        spacing: base.spacing.merged(&overrides.spacing),
        typography: base.typography.merged(&overrides.typography),
        shadows: base.shadows.merged(&overrides.shadows),
        radius: base.radius.merged(&overrides.radius),
        transitions: base.transitions.merged(&overrides.transitions),
    }
}

/// Resolve the theme for a scheme with an optional override applied
pub fn resolve_theme(scheme: ColorScheme, overrides: Option<&ThemeOverride>) -> Theme {
    merge_themes(base_theme(scheme).clone(), overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::*;

    #[test]
    fn test_merge_without_override_is_identity() {
        let merged = merge_themes(light_theme().clone(), None);
        assert_eq!(&merged, light_theme());

        let empty = ThemeOverride::default();
        assert_eq!(&merge_themes(light_theme().clone(), Some(&empty)), light_theme());
    }

    #[test]
    fn test_merge_replaces_only_given_leaves() {
        let overrides = ThemeOverride::new()
            .with_colors(ColorOverrides {
                primary: Some("#fff".into()),
                ..Default::default()
            })
            .with_typography(TypographyOverrides {
                font_size: FontSizeOverrides {
                    base: Some("17px".into()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .with_transitions(TransitionOverrides {
                timing: TimingOverrides {
                    ease: Some("linear".into()),
                    ..Default::default()
                },
                ..Default::default()
            });

        let base = light_theme();
        let merged = merge_themes(base.clone(), Some(&overrides));

        assert_eq!(merged.colors.primary, "#fff");
        assert_eq!(merged.colors.secondary, base.colors.secondary);
        assert_eq!(merged.colors.background, base.colors.background);

        assert_eq!(merged.typography.font_size.base, "17px");
        assert_eq!(merged.typography.font_size.lg, base.typography.font_size.lg);
        assert_eq!(merged.typography.font_family, base.typography.font_family);
        assert_eq!(merged.typography.font_weight, base.typography.font_weight);

        assert_eq!(merged.transitions.timing.ease, "linear");
        assert_eq!(merged.transitions.timing.ease_out, base.transitions.timing.ease_out);
        assert_eq!(merged.transitions.duration, base.transitions.duration);

        assert_eq!(merged.spacing, base.spacing);
        assert_eq!(merged.shadows, base.shadows);
        assert_eq!(merged.radius, base.radius);
        assert_eq!(merged.mode, base.mode);
    }

    #[test]
    fn test_merge_keeps_full_key_set() {
        let overrides = ThemeOverride::new().with_radius(RadiusOverrides {
            md: Some("2px".into()),
            full: Some("50%".into()),
            ..Default::default()
        });
        let base = dark_theme();
        let merged = merge_themes(base.clone(), Some(&overrides));

        let keys = |t: &Theme| {
            t.token_entries()
                .into_iter()
                .map(|e| (e.category, e.key))
                .collect::<Vec<_>>()
        };
        assert_eq!(keys(&merged), keys(base));
    }

    #[test]
    fn test_dark_is_light_with_dark_colors() {
        let light = light_theme();
        let dark = dark_theme();

        assert_eq!(dark.mode, ColorScheme::Dark);
        assert_ne!(dark.colors.primary, light.colors.primary);
        assert_eq!(dark.spacing, light.spacing);
        assert_eq!(dark.typography, light.typography);
        assert_eq!(dark.shadows, light.shadows);
        assert_eq!(dark.radius, light.radius);
        assert_eq!(dark.transitions, light.transitions);
    }

    #[test]
    fn test_resolve_theme() {
        assert_eq!(&resolve_theme(ColorScheme::Dark, None), dark_theme());
        assert!(std::ptr::eq(base_theme(ColorScheme::Light), light_theme()));
    }
}
