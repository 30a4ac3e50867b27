//! The object taxonomy and the catalog side of comments.

pub mod comments;
pub mod kind;
pub mod target;

pub use comments::{CommentAction, description_query, diff_comment};
pub use kind::{Addressing, Family, ObjectKind};
pub use target::{CommentTarget, ObjectIdentifier, QualifiedName, TypeName};
