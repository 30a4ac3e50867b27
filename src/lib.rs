//! Set and read comments on PostgreSQL objects.
//!
//! [`CommentNormalizer`] turns indented multi-line literals into clean
//! comment text, [`CommentStatementBuilder`] renders the `COMMENT ON`
//! statement (or the catalog query reading a comment back) for any
//! [`ObjectKind`], and [`Comments`] runs them on a connection the caller
//! passes in.
//!
//! ```
//! use pg_comment::{CommentStatementBuilder, CommentTarget, NormalizedComment, ObjectKind};
//!
//! let builder = CommentStatementBuilder::default();
//! let target = CommentTarget::new(ObjectKind::Column, "email").on("app.users");
//! let comment = NormalizedComment::from_raw("
//!     Primary contact address.
//! ");
//! let sql = builder.build_set(&target, Some(&comment)).unwrap();
//! assert_eq!(sql.sql, "COMMENT ON COLUMN app.users.email IS 'Primary contact address.';");
//! ```

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod normalize;
pub mod render;

pub use catalog::{
    Addressing, CommentAction, CommentTarget, Family, ObjectIdentifier, ObjectKind,
    QualifiedName, TypeName,
};
pub use config::{Config, ConfigBuilder, IdentifierQuoting};
pub use db::Comments;
pub use error::{CommentError, ConfigurationError};
pub use normalize::{CommentNormalizer, NormalizedComment, normalize_comment};
pub use render::{CommentStatementBuilder, RenderedSql, Safety};
