//! Error types for mintship-render.

use thiserror::Error;

/// All errors that can arise from rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (unit file rendering).
    #[error("template engine error: {0}")]
    Template(#[from] tera::Error),

    /// A settings value is not representable in the daemon's config format.
    #[error("config serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// YAML serialization error (installed manifest copy).
    #[error("manifest serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A top-level settings entry was a scalar; the config format requires
    /// section tables at the top level.
    #[error("settings section '{section}' is not a table of keys")]
    SectionNotTable { section: String },
}
