use crate::config::types::*;

// Config derives Default from these

impl Default for Rendering {
    fn default() -> Self {
        Self {
            identifier_quoting: IdentifierQuoting::Minimal,
            terminate_statements: true,
        }
    }
}

impl Default for CommentHandling {
    fn default() -> Self {
        Self { normalize: true }
    }
}
