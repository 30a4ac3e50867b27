//! Reading comments back from the description catalogs.

use crate::catalog::kind::{Addressing, ObjectKind};
use crate::catalog::target::{CommentTarget, ObjectIdentifier, QualifiedName};
use crate::config::IdentifierQuoting;
use crate::error::ConfigurationError;
use crate::normalize::NormalizedComment;
use crate::render::escape_string;

/// Where the OID of a standalone object comes from.
#[derive(Debug, Clone, Copy)]
enum OidSource {
    /// `'name'::pg_catalog.<regtype>`
    RegCast(&'static str),
    /// Database-wide catalog keyed by a unique name column.
    Catalog {
        table: &'static str,
        name_column: &'static str,
    },
    /// Schema-scoped catalog without a `reg*` type.
    Namespaced {
        table: &'static str,
        name_column: &'static str,
        namespace_column: &'static str,
        visibility: &'static str,
        method_column: Option<&'static str>,
    },
    /// Identified by something other than a name (OID, cast, operator).
    Structural,
}

fn oid_source(kind: ObjectKind) -> OidSource {
    use OidSource::*;

    let catalog = |table, name_column| Catalog { table, name_column };
    let namespaced = |table, name_column, namespace_column, visibility| Namespaced {
        table,
        name_column,
        namespace_column,
        visibility,
        method_column: None,
    };

    match kind {
        ObjectKind::ForeignTable
        | ObjectKind::Index
        | ObjectKind::MaterializedView
        | ObjectKind::Sequence
        | ObjectKind::Table
        | ObjectKind::View => RegCast("regclass"),
        ObjectKind::Domain | ObjectKind::Type => RegCast("regtype"),
        ObjectKind::Aggregate | ObjectKind::Function | ObjectKind::Procedure => RegCast("regproc"),
        ObjectKind::TextSearchConfiguration => RegCast("regconfig"),
        ObjectKind::TextSearchDictionary => RegCast("regdictionary"),

        ObjectKind::AccessMethod => catalog("pg_am", "amname"),
        ObjectKind::Database => catalog("pg_database", "datname"),
        ObjectKind::EventTrigger => catalog("pg_event_trigger", "evtname"),
        ObjectKind::Extension => catalog("pg_extension", "extname"),
        ObjectKind::ForeignDataWrapper => catalog("pg_foreign_data_wrapper", "fdwname"),
        ObjectKind::Language | ObjectKind::ProceduralLanguage => catalog("pg_language", "lanname"),
        ObjectKind::Publication => catalog("pg_publication", "pubname"),
        // pg_authid is not readable by ordinary roles
        ObjectKind::Role => catalog("pg_roles", "rolname"),
        ObjectKind::Schema => catalog("pg_namespace", "nspname"),
        ObjectKind::Server => catalog("pg_foreign_server", "srvname"),
        ObjectKind::Subscription => catalog("pg_subscription", "subname"),
        ObjectKind::Tablespace => catalog("pg_tablespace", "spcname"),

        ObjectKind::Collation => namespaced(
            "pg_collation",
            "collname",
            "collnamespace",
            "pg_collation_is_visible",
        ),
        ObjectKind::Conversion => namespaced(
            "pg_conversion",
            "conname",
            "connamespace",
            "pg_conversion_is_visible",
        ),
        ObjectKind::Statistics => namespaced(
            "pg_statistic_ext",
            "stxname",
            "stxnamespace",
            "pg_statistics_obj_is_visible",
        ),
        ObjectKind::TextSearchParser => namespaced(
            "pg_ts_parser",
            "prsname",
            "prsnamespace",
            "pg_ts_parser_is_visible",
        ),
        ObjectKind::TextSearchTemplate => namespaced(
            "pg_ts_template",
            "tmplname",
            "tmplnamespace",
            "pg_ts_template_is_visible",
        ),
        ObjectKind::OperatorClass => Namespaced {
            table: "pg_opclass",
            name_column: "opcname",
            namespace_column: "opcnamespace",
            visibility: "pg_opclass_is_visible",
            method_column: Some("opcmethod"),
        },
        ObjectKind::OperatorFamily => Namespaced {
            table: "pg_opfamily",
            name_column: "opfname",
            namespace_column: "opfnamespace",
            visibility: "pg_opfamily_is_visible",
            method_column: Some("opfmethod"),
        },

        ObjectKind::Cast | ObjectKind::LargeObject | ObjectKind::Operator => Structural,

        // Looked up relative to their parent relation
        ObjectKind::Column
        | ObjectKind::Constraint
        | ObjectKind::Policy
        | ObjectKind::Rule
        | ObjectKind::Trigger => Structural,
    }
}

/// Catalog, name column and owning-relation column of a `TrailingOn` kind.
fn contained_catalog(kind: ObjectKind) -> Option<(&'static str, &'static str, &'static str)> {
    match kind {
        ObjectKind::Constraint => Some(("pg_constraint", "conname", "conrelid")),
        ObjectKind::Policy => Some(("pg_policy", "polname", "polrelid")),
        ObjectKind::Rule => Some(("pg_rewrite", "rulename", "ev_class")),
        ObjectKind::Trigger => Some(("pg_trigger", "tgname", "tgrelid")),
        _ => None,
    }
}

/// Build the query that reads a comment back.
///
/// The query yields one nullable text column named `comment`. No row or a
/// NULL value both mean the object carries no comment.
pub fn description_query(
    target: &CommentTarget,
    quoting: IdentifierQuoting,
) -> Result<String, ConfigurationError> {
    target.validate()?;
    let kind = target.kind;
    let catalog = kind.description_catalog();

    match kind.addressing() {
        Addressing::QualifiedPair => {
            let column = plain_name(target)?;
            let relation = reg_literal(&parent(target)?.render(quoting)?, "regclass");
            Ok(format!(
                "SELECT pg_catalog.col_description(a.attrelid, a.attnum) AS comment \
                 FROM pg_catalog.pg_attribute a \
                 WHERE a.attrelid = {} AND a.attname = {} AND NOT a.attisdropped",
                relation,
                escape_string(column.name())
            ))
        }
        Addressing::TrailingOn => {
            let (table, name_column, relation_column) =
                contained_catalog(kind).ok_or(ConfigurationError::IdentifierMismatch {
                    kind,
                    expected: "a name",
                })?;
            let name = plain_name(target)?;
            let relation = reg_literal(&parent(target)?.render(quoting)?, "regclass");
            Ok(format!(
                "SELECT pg_catalog.obj_description(c.oid, '{}') AS comment \
                 FROM pg_catalog.{} c \
                 WHERE c.{} = {} AND c.{} = {}",
                catalog,
                table,
                relation_column,
                relation,
                name_column,
                escape_string(name.name())
            ))
        }
        Addressing::Standalone => {
            let oid = standalone_oid(target, quoting)?;
            let function = if kind.is_shared() {
                "shobj_description"
            } else {
                "obj_description"
            };
            Ok(format!(
                "SELECT pg_catalog.{}({}, '{}') AS comment",
                function, oid, catalog
            ))
        }
    }
}

fn standalone_oid(
    target: &CommentTarget,
    quoting: IdentifierQuoting,
) -> Result<String, ConfigurationError> {
    let kind = target.kind;
    match &target.identifier {
        ObjectIdentifier::Oid(oid) => Ok(format!("{}::pg_catalog.oid", oid)),
        ObjectIdentifier::Cast { source, target } => Ok(format!(
            "(SELECT c.oid FROM pg_catalog.pg_cast c \
             WHERE c.castsource = {} AND c.casttarget = {})",
            reg_literal(&source.render(quoting)?, "regtype"),
            reg_literal(&target.render(quoting)?, "regtype")
        )),
        ObjectIdentifier::Operator { .. } => Ok(reg_literal(
            &target.identifier.render(kind, quoting)?,
            "regoperator",
        )),
        ObjectIdentifier::Routine { name, arguments } => {
            let arguments = arguments
                .iter()
                .map(|a| a.render(quoting))
                .collect::<Result<Vec<_>, _>>()?;
            let signature = format!(
                "{}({})",
                name.render_for(kind, quoting)?,
                arguments.join(",")
            );
            Ok(reg_literal(&signature, "regprocedure"))
        }
        ObjectIdentifier::AccessMethodScoped { name, method } => {
            namespaced_oid(kind, name, Some(method))
        }
        ObjectIdentifier::Name(name) => match oid_source(kind) {
            OidSource::RegCast(reg_type) => {
                Ok(reg_literal(&name.render_for(kind, quoting)?, reg_type))
            }
            OidSource::Catalog { table, name_column } => Ok(format!(
                "(SELECT x.oid FROM pg_catalog.{} x WHERE x.{} = {})",
                table,
                name_column,
                escape_string(name.name())
            )),
            OidSource::Namespaced { .. } => namespaced_oid(kind, name, None),
            OidSource::Structural => Err(ConfigurationError::IdentifierMismatch {
                kind,
                expected: "a name",
            }),
        },
    }
}

fn namespaced_oid(
    kind: ObjectKind,
    name: &QualifiedName,
    method: Option<&String>,
) -> Result<String, ConfigurationError> {
    let OidSource::Namespaced {
        table,
        name_column,
        namespace_column,
        visibility,
        method_column,
    } = oid_source(kind)
    else {
        return Err(ConfigurationError::IdentifierMismatch {
            kind,
            expected: "a name",
        });
    };

    let method_filter = match (method_column, method) {
        (Some(column), Some(method)) => format!(
            " AND x.{} = (SELECT am.oid FROM pg_catalog.pg_am am WHERE am.amname = {})",
            column,
            escape_string(method)
        ),
        _ => String::new(),
    };

    let sql = match name.schema() {
        Some(schema) => format!(
            "(SELECT x.oid FROM pg_catalog.{table} x \
             JOIN pg_catalog.pg_namespace n ON n.oid = x.{namespace_column} \
             WHERE n.nspname = {} AND x.{name_column} = {}{method_filter} LIMIT 1)",
            escape_string(schema),
            escape_string(name.name()),
        ),
        None => format!(
            "(SELECT x.oid FROM pg_catalog.{table} x \
             WHERE x.{name_column} = {} AND pg_catalog.{visibility}(x.oid){method_filter} LIMIT 1)",
            escape_string(name.name()),
        ),
    };
    Ok(sql)
}

fn reg_literal(text: &str, reg_type: &str) -> String {
    format!("{}::pg_catalog.{}", escape_string(text), reg_type)
}

fn plain_name(target: &CommentTarget) -> Result<&QualifiedName, ConfigurationError> {
    match &target.identifier {
        ObjectIdentifier::Name(name) => Ok(name),
        _ => Err(ConfigurationError::IdentifierMismatch {
            kind: target.kind,
            expected: "a name",
        }),
    }
}

fn parent(target: &CommentTarget) -> Result<&QualifiedName, ConfigurationError> {
    target
        .parent
        .as_ref()
        .ok_or(ConfigurationError::MissingParent { kind: target.kind })
}

/// What has to happen to bring a stored comment in line with the desired one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAction {
    Set(NormalizedComment),
    Drop,
}

/// Compare the stored comment with the desired one.
///
/// PostgreSQL drops a comment set to the empty string, so an empty desired
/// comment is treated like no comment at all.
pub fn diff_comment(
    current: Option<&str>,
    desired: Option<&NormalizedComment>,
) -> Option<CommentAction> {
    let desired = desired.filter(|c| !c.is_empty());
    match (current, desired) {
        (None, Some(comment)) => Some(CommentAction::Set(comment.clone())),
        (Some(_), None) => Some(CommentAction::Drop),
        (Some(old), Some(new)) if old != new.as_str() => Some(CommentAction::Set(new.clone())),
        _ => None, // No change
    }
}
