use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Fatal extraction failures.
///
/// Any of these aborts the run for the file; no partial document is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The script section could not be parsed.
    #[error("syntax error: {message}")]
    Syntax {
        /// Parser message, prefixed with the character offset of the failure.
        message: String,
    },

    /// The requested dialect version is neither 2 nor 3.
    #[error("unsupported svelte dialect version {version}, expected 2 or 3")]
    UnsupportedDialect { version: u8 },

    /// An export or member value names a binding that is never declared.
    #[error("unresolved reference '{name}': no matching declaration or import")]
    UnresolvedReference { name: String },
}

impl ExtractError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }

    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedReference { name: name.into() }
    }
}
