use thiserror::Error;

use crate::catalog::kind::ObjectKind;

/// A comment request that cannot be turned into SQL.
///
/// Raised before any statement is built; nothing is sent to the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown object kind '{0}'")]
    UnknownKind(String),

    #[error("{kind} comments need the name of the owning object")]
    MissingParent { kind: ObjectKind },

    #[error("{kind} is addressed on its own and does not take an owning object")]
    UnexpectedParent { kind: ObjectKind },

    #[error("{kind} must be identified by {expected}")]
    IdentifierMismatch {
        kind: ObjectKind,
        expected: &'static str,
    },

    #[error("{kind} name '{name}' has {parts} parts, at most {max} allowed")]
    TooManyNameParts {
        kind: ObjectKind,
        name: String,
        parts: usize,
        max: usize,
    },

    #[error("identifier contains an empty name part")]
    EmptyIdentifier,

    #[error("'{0}' is not a valid operator name")]
    InvalidOperator(String),
}

/// Failure of a comment operation run against a database.
#[derive(Debug, Error)]
pub enum CommentError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Passed through from sqlx as-is.
    #[error(transparent)]
    Execution(#[from] sqlx::Error),
}
