//! Transition tokens for theming

use serde::{Deserialize, Serialize};

token_group! {
    /// Transition durations as CSS times
    pub struct DurationTokens / DurationOverrides: String {
        fast => "fast",
        normal => "normal",
        slow => "slow",
    }
}

token_group! {
    /// CSS timing functions
    pub struct TimingTokens / TimingOverrides: String {
        ease => "ease",
        ease_in => "ease-in",
        ease_out => "ease-out",
        ease_in_out => "ease-in-out",
    }
}

/// Complete set of transition tokens
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionTokens {
    pub duration: DurationTokens,
    pub timing: TimingTokens,
}

/// Partial override for [`TransitionTokens`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionOverrides {
    pub duration: DurationOverrides,
    pub timing: TimingOverrides,
}

impl TransitionTokens {
    pub fn merged(&self, overrides: &TransitionOverrides) -> Self {
        Self {
            duration: self.duration.merged(&overrides.duration),
            timing: self.timing.merged(&overrides.timing),
        }
    }
}

impl TransitionOverrides {
    pub fn is_empty(&self) -> bool {
        self.duration.is_empty() && self.timing.is_empty()
    }
}
