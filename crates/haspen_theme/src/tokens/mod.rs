//! Design tokens for theming
//!
//! Tokens are the atomic values that make up a design system:
//! - Colors
//! - Spacing (margins, padding)
//! - Typography (families, sizes, weights, line heights)
//! - Shadows
//! - Border radii
//! - Transition durations and timing functions
//!
//! Every token group comes with a matching `*Overrides` type whose fields are
//! all optional. Merging an override into a group replaces only the fields it
//! sets, so a merged group always carries the full key set.

/// Declare a token group and its partial override type
///
/// Each field maps to a CSS token key (`primary_hover => "primary-hover"`),
/// which is also its serialized name.
/// Values must implement `Display` so they can be rendered as CSS text.
macro_rules! token_group {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $overrides:ident : $ty:ty {
            $( $(#[$field_meta:meta])* $field:ident => $key:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(rename = $key)]
                pub $field: $ty,
            )*
        }

        #[doc = concat!("Partial override for [`", stringify!($name), "`]")]
        #[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default, deny_unknown_fields)]
        pub struct $overrides {
            $(
                #[serde(rename = $key, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            /// Token keys in declaration order
            pub const KEYS: &'static [&'static str] = &[$($key),*];

            /// Copy of this group with every field set in `overrides` replaced
            pub fn merged(&self, overrides: &$overrides) -> Self {
                Self {
                    $(
                        $field: match &overrides.$field {
                            Some(value) => value.clone(),
                            None => self.$field.clone(),
                        },
                    )*
                }
            }

            /// `(key, css value)` pairs in declaration order
            pub fn entries(&self) -> Vec<(&'static str, String)> {
                vec![$( ($key, self.$field.to_string()), )*]
            }
        }

        impl $overrides {
            /// Whether no field is overridden
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }
        }
    };
}

mod color;
mod radius;
mod shadow;
mod spacing;
mod transition;
mod typography;

pub use color::*;
pub use radius::*;
pub use shadow::*;
pub use spacing::*;
pub use transition::*;
pub use typography::*;
