//! Template rendering error types.

/// Template rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// A provenance template failed to parse.
    #[error("Invalid '{name}' template: {source}")]
    RegistrationError {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },
}
