use cascade_config::ConfigError;

/// Result type alias for CSS build operations.
pub type Result<T> = std::result::Result<T, CssError>;

/// Errors raised while post-processing a bundle.
///
/// Lookups of modules or pages that do not exist are not errors: they are
/// skipped with a trace event. Only a bundle that contradicts its own
/// manifest, or CSS that cannot be reprinted, aborts a pass.
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    /// A chunk lists a CSS asset that is not in the bundle.
    #[error("chunk `{chunk}` references CSS asset `{asset}` which is missing from the bundle")]
    ManifestInconsistency { chunk: String, asset: String },

    #[error("failed to minify CSS asset `{asset}`: {message}")]
    Minify { asset: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
