pub mod comment;
pub mod keywords;

pub use comment::CommentStatementBuilder;

use keywords::{is_column_name_keyword, is_reserved_keyword};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Safety {
    Safe,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSql {
    pub safety: Safety,
    pub sql: String,
}

impl RenderedSql {
    pub fn new(sql: String) -> Self {
        Self {
            sql,
            safety: Safety::Safe,
        }
    }

    pub fn destructive(sql: String) -> Self {
        Self {
            sql,
            safety: Safety::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.safety == Safety::Destructive
    }
}

/// Unconditionally double-quote an identifier part.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// True unless `ident` is a lowercase, non-keyword name PostgreSQL would
/// read back unchanged without quotes.
pub fn needs_quoting(ident: &str) -> bool {
    let mut chars = ident.chars();
    let starts_well = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    if !starts_well {
        return true;
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return true;
    }
    is_reserved_keyword(ident)
}

/// Quote an identifier part only when PostgreSQL requires it.
pub fn quote_ident_if_needed(ident: &str) -> String {
    if needs_quoting(ident) {
        quote_ident(ident)
    } else {
        ident.to_string()
    }
}

/// Quote a single-part routine or type name when PostgreSQL requires it.
///
/// Stricter than [`quote_ident_if_needed`]: column-name keywords such as
/// `position` parse as table names but not as function names.
pub fn quote_function_name_if_needed(ident: &str) -> String {
    if needs_quoting(ident) || is_column_name_keyword(ident) {
        quote_ident(ident)
    } else {
        ident.to_string()
    }
}

pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Generic helper for rendering comment SQL
///
/// Clearing a comment (`comment == None`) is rendered as destructive.
pub fn render_comment_sql(
    object_type: &str,
    identifier: &str,
    comment: Option<&str>,
    terminate: bool,
) -> RenderedSql {
    let terminator = if terminate { ";" } else { "" };
    match comment {
        Some(comment_text) => RenderedSql::new(format!(
            "COMMENT ON {} {} IS {}{}",
            object_type,
            identifier,
            escape_string(comment_text),
            terminator
        )),
        None => RenderedSql::destructive(format!(
            "COMMENT ON {} {} IS NULL{}",
            object_type, identifier, terminator
        )),
    }
}
