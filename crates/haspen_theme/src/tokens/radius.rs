//! Border radius tokens for theming

token_group! {
    /// Corner radii as CSS lengths
    pub struct RadiusTokens / RadiusOverrides: String {
        none => "none",
        sm => "sm",
        md => "md",
        lg => "lg",
        xl => "xl",
        /// Pill / circle
        full => "full",
    }
}
