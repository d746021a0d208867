//! Shadow tokens for theming

token_group! {
    /// Elevation shadows as CSS `box-shadow` values
    pub struct ShadowTokens / ShadowOverrides: String {
        sm => "sm",
        md => "md",
        lg => "lg",
        xl => "xl",
        inner => "inner",
    }
}
