//! Spacing tokens for theming

token_group! {
    /// Spacing scale as CSS lengths
    pub struct SpacingTokens / SpacingOverrides: String {
        xs => "xs",
        sm => "sm",
        md => "md",
        lg => "lg",
        xl => "xl",
        xxl => "2xl",
    }
}
