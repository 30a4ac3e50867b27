use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            rendering: match (self.rendering, other.rendering) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            comments: match (self.comments, other.comments) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
        }
    }
}

impl RenderingInput {
    fn merge_with(self, other: RenderingInput) -> RenderingInput {
        RenderingInput {
            identifier_quoting: self.identifier_quoting.merge(other.identifier_quoting),
            terminate_statements: self.terminate_statements.merge(other.terminate_statements),
        }
    }
}

impl CommentsInput {
    fn merge_with(self, other: CommentsInput) -> CommentsInput {
        CommentsInput {
            normalize: self.normalize.merge(other.normalize),
        }
    }
}
