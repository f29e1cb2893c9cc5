//! Binding generator error types.

use crate::field::Position;

/// Errors that can occur while building field descriptors.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// A function-pointer declaration whose parameter list is not wrapped in
    /// a single pair of parentheses.
    #[error("{position}: can't handle params in type: {raw}")]
    MalformedDeclaration { raw: String, position: Position },

    /// Two C struct names translate to the same host type name.
    #[error("struct names '{first}' and '{second}' both translate to '{host_name}'")]
    NameCollision {
        first: String,
        second: String,
        host_name: String,
    },

    /// A declaration references an owning struct that is not registered.
    #[error("unknown owning struct '{name}'")]
    UnknownOwner { name: String },

    /// Invalid generator configuration.
    #[error("invalid generator configuration: {detail}")]
    InvalidConfig { detail: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BindError {
    /// Whether this error is an unrecoverable generator-input violation.
    ///
    /// Fatal errors mean the header format changed or the upstream scanner is
    /// broken. The whole run must abort; no partial bindings are produced.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MalformedDeclaration { .. } | Self::NameCollision { .. }
        )
    }
}

/// Result type alias for binding operations.
pub type Result<T> = std::result::Result<T, BindError>;
