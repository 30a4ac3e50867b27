//! SQL rendering for comment operations

use crate::catalog::comments::description_query;
use crate::catalog::kind::Addressing;
use crate::catalog::target::CommentTarget;
use crate::config::{IdentifierQuoting, Rendering};
use crate::error::ConfigurationError;
use crate::normalize::NormalizedComment;
use crate::render::{RenderedSql, render_comment_sql};

/// Builds `COMMENT ON` statements and the queries that read comments back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStatementBuilder {
    quoting: IdentifierQuoting,
    terminate: bool,
}

impl Default for CommentStatementBuilder {
    fn default() -> Self {
        Self::from_config(&Rendering::default())
    }
}

impl CommentStatementBuilder {
    pub fn new(quoting: IdentifierQuoting, terminate: bool) -> Self {
        Self { quoting, terminate }
    }

    pub fn from_config(rendering: &Rendering) -> Self {
        Self::new(rendering.identifier_quoting, rendering.terminate_statements)
    }

    /// Render the statement that sets the comment, or clears it for `None`.
    pub fn build_set(
        &self,
        target: &CommentTarget,
        comment: Option<&NormalizedComment>,
    ) -> Result<RenderedSql, ConfigurationError> {
        target.validate()?;
        let kind = target.kind;
        let identifier = target.identifier.render(kind, self.quoting)?;

        let object = match (kind.addressing(), &target.parent) {
            (Addressing::Standalone, _) => identifier,
            (Addressing::QualifiedPair, Some(parent)) => {
                format!("{}.{}", parent.render(self.quoting)?, identifier)
            }
            (Addressing::TrailingOn, Some(parent)) => {
                format!("{} ON {}", identifier, parent.render(self.quoting)?)
            }
            (Addressing::QualifiedPair | Addressing::TrailingOn, None) => {
                return Err(ConfigurationError::MissingParent { kind });
            }
        };

        Ok(render_comment_sql(
            kind.keyword(),
            &object,
            comment.map(NormalizedComment::as_str),
            self.terminate,
        ))
    }

    /// Render the catalog query returning the current comment (or nothing).
    pub fn build_get(&self, target: &CommentTarget) -> Result<String, ConfigurationError> {
        description_query(target, self.quoting)
    }
}
