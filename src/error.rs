//! Error type shared by theme parsing, configuration, and persistence.

/// Errors produced while parsing, configuring, or persisting a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// A string did not name one of the two themes.
    #[error("invalid theme '{0}' (expected 'light' or 'dark')")]
    InvalidTheme(String),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The key-value store rejected a read or write.
    #[error("storage access failed: {0}")]
    Storage(String),

    /// The document root rejected an attribute write.
    #[error("attribute write failed: {0}")]
    Attribute(String),

    /// The storage file could not be read or written.
    #[error("storage file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The storage file did not hold a JSON object of strings.
    #[error("storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
