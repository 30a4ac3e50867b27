//! The PostgreSQL object kinds that accept `COMMENT ON`.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Whether an object is addressed on its own or through an owning relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Standalone,
    Contained,
}

/// How the object is spelled after the `COMMENT ON <KEYWORD>` phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// `<identifier>`
    Standalone,
    /// `<parent>.<identifier>`
    QualifiedPair,
    /// `<identifier> ON <parent>`
    TrailingOn,
}

impl Addressing {
    pub fn family(self) -> Family {
        match self {
            Addressing::Standalone => Family::Standalone,
            Addressing::QualifiedPair | Addressing::TrailingOn => Family::Contained,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    AccessMethod,
    Aggregate,
    Cast,
    Collation,
    Column,
    Constraint,
    Conversion,
    Database,
    Domain,
    EventTrigger,
    Extension,
    ForeignDataWrapper,
    ForeignTable,
    Function,
    Index,
    Language,
    LargeObject,
    MaterializedView,
    Operator,
    OperatorClass,
    OperatorFamily,
    Policy,
    Procedure,
    ProceduralLanguage,
    Publication,
    Role,
    Rule,
    Schema,
    Sequence,
    Server,
    Statistics,
    Subscription,
    Table,
    Tablespace,
    TextSearchConfiguration,
    TextSearchDictionary,
    TextSearchParser,
    TextSearchTemplate,
    Trigger,
    Type,
    View,
}

impl ObjectKind {
    pub const ALL: &'static [ObjectKind] = &[
        ObjectKind::AccessMethod,
        ObjectKind::Aggregate,
        ObjectKind::Cast,
        ObjectKind::Collation,
        ObjectKind::Column,
        ObjectKind::Constraint,
        ObjectKind::Conversion,
        ObjectKind::Database,
        ObjectKind::Domain,
        ObjectKind::EventTrigger,
        ObjectKind::Extension,
        ObjectKind::ForeignDataWrapper,
        ObjectKind::ForeignTable,
        ObjectKind::Function,
        ObjectKind::Index,
        ObjectKind::Language,
        ObjectKind::LargeObject,
        ObjectKind::MaterializedView,
        ObjectKind::Operator,
        ObjectKind::OperatorClass,
        ObjectKind::OperatorFamily,
        ObjectKind::Policy,
        ObjectKind::Procedure,
        ObjectKind::ProceduralLanguage,
        ObjectKind::Publication,
        ObjectKind::Role,
        ObjectKind::Rule,
        ObjectKind::Schema,
        ObjectKind::Sequence,
        ObjectKind::Server,
        ObjectKind::Statistics,
        ObjectKind::Subscription,
        ObjectKind::Table,
        ObjectKind::Tablespace,
        ObjectKind::TextSearchConfiguration,
        ObjectKind::TextSearchDictionary,
        ObjectKind::TextSearchParser,
        ObjectKind::TextSearchTemplate,
        ObjectKind::Trigger,
        ObjectKind::Type,
        ObjectKind::View,
    ];

    /// The snake_case tag used to name this kind in configuration and APIs.
    pub fn tag(self) -> &'static str {
        match self {
            ObjectKind::AccessMethod => "access_method",
            ObjectKind::Aggregate => "aggregate",
            ObjectKind::Cast => "cast",
            ObjectKind::Collation => "collation",
            ObjectKind::Column => "column",
            ObjectKind::Constraint => "constraint",
            ObjectKind::Conversion => "conversion",
            ObjectKind::Database => "database",
            ObjectKind::Domain => "domain",
            ObjectKind::EventTrigger => "event_trigger",
            ObjectKind::Extension => "extension",
            ObjectKind::ForeignDataWrapper => "foreign_data_wrapper",
            ObjectKind::ForeignTable => "foreign_table",
            ObjectKind::Function => "function",
            ObjectKind::Index => "index",
            ObjectKind::Language => "language",
            ObjectKind::LargeObject => "large_object",
            ObjectKind::MaterializedView => "materialized_view",
            ObjectKind::Operator => "operator",
            ObjectKind::OperatorClass => "operator_class",
            ObjectKind::OperatorFamily => "operator_family",
            ObjectKind::Policy => "policy",
            ObjectKind::Procedure => "procedure",
            ObjectKind::ProceduralLanguage => "procedural_language",
            ObjectKind::Publication => "publication",
            ObjectKind::Role => "role",
            ObjectKind::Rule => "rule",
            ObjectKind::Schema => "schema",
            ObjectKind::Sequence => "sequence",
            ObjectKind::Server => "server",
            ObjectKind::Statistics => "statistics",
            ObjectKind::Subscription => "subscription",
            ObjectKind::Table => "table",
            ObjectKind::Tablespace => "tablespace",
            ObjectKind::TextSearchConfiguration => "text_search_configuration",
            ObjectKind::TextSearchDictionary => "text_search_dictionary",
            ObjectKind::TextSearchParser => "text_search_parser",
            ObjectKind::TextSearchTemplate => "text_search_template",
            ObjectKind::Trigger => "trigger",
            ObjectKind::Type => "type",
            ObjectKind::View => "view",
        }
    }

    /// The keyword phrase that follows `COMMENT ON`.
    pub fn keyword(self) -> &'static str {
        match self {
            ObjectKind::AccessMethod => "ACCESS METHOD",
            ObjectKind::Aggregate => "AGGREGATE",
            ObjectKind::Cast => "CAST",
            ObjectKind::Collation => "COLLATION",
            ObjectKind::Column => "COLUMN",
            ObjectKind::Constraint => "CONSTRAINT",
            ObjectKind::Conversion => "CONVERSION",
            ObjectKind::Database => "DATABASE",
            ObjectKind::Domain => "DOMAIN",
            ObjectKind::EventTrigger => "EVENT TRIGGER",
            ObjectKind::Extension => "EXTENSION",
            ObjectKind::ForeignDataWrapper => "FOREIGN DATA WRAPPER",
            ObjectKind::ForeignTable => "FOREIGN TABLE",
            ObjectKind::Function => "FUNCTION",
            ObjectKind::Index => "INDEX",
            ObjectKind::Language => "LANGUAGE",
            ObjectKind::LargeObject => "LARGE OBJECT",
            ObjectKind::MaterializedView => "MATERIALIZED VIEW",
            ObjectKind::Operator => "OPERATOR",
            ObjectKind::OperatorClass => "OPERATOR CLASS",
            ObjectKind::OperatorFamily => "OPERATOR FAMILY",
            ObjectKind::Policy => "POLICY",
            ObjectKind::Procedure => "PROCEDURE",
            ObjectKind::ProceduralLanguage => "PROCEDURAL LANGUAGE",
            ObjectKind::Publication => "PUBLICATION",
            ObjectKind::Role => "ROLE",
            ObjectKind::Rule => "RULE",
            ObjectKind::Schema => "SCHEMA",
            ObjectKind::Sequence => "SEQUENCE",
            ObjectKind::Server => "SERVER",
            ObjectKind::Statistics => "STATISTICS",
            ObjectKind::Subscription => "SUBSCRIPTION",
            ObjectKind::Table => "TABLE",
            ObjectKind::Tablespace => "TABLESPACE",
            ObjectKind::TextSearchConfiguration => "TEXT SEARCH CONFIGURATION",
            ObjectKind::TextSearchDictionary => "TEXT SEARCH DICTIONARY",
            ObjectKind::TextSearchParser => "TEXT SEARCH PARSER",
            ObjectKind::TextSearchTemplate => "TEXT SEARCH TEMPLATE",
            ObjectKind::Trigger => "TRIGGER",
            ObjectKind::Type => "TYPE",
            ObjectKind::View => "VIEW",
        }
    }

    pub fn addressing(self) -> Addressing {
        match self {
            ObjectKind::Column => Addressing::QualifiedPair,
            ObjectKind::Constraint | ObjectKind::Policy | ObjectKind::Rule | ObjectKind::Trigger => {
                Addressing::TrailingOn
            }
            ObjectKind::AccessMethod
            | ObjectKind::Aggregate
            | ObjectKind::Cast
            | ObjectKind::Collation
            | ObjectKind::Conversion
            | ObjectKind::Database
            | ObjectKind::Domain
            | ObjectKind::EventTrigger
            | ObjectKind::Extension
            | ObjectKind::ForeignDataWrapper
            | ObjectKind::ForeignTable
            | ObjectKind::Function
            | ObjectKind::Index
            | ObjectKind::Language
            | ObjectKind::LargeObject
            | ObjectKind::MaterializedView
            | ObjectKind::Operator
            | ObjectKind::OperatorClass
            | ObjectKind::OperatorFamily
            | ObjectKind::Procedure
            | ObjectKind::ProceduralLanguage
            | ObjectKind::Publication
            | ObjectKind::Role
            | ObjectKind::Schema
            | ObjectKind::Sequence
            | ObjectKind::Server
            | ObjectKind::Statistics
            | ObjectKind::Subscription
            | ObjectKind::Table
            | ObjectKind::Tablespace
            | ObjectKind::TextSearchConfiguration
            | ObjectKind::TextSearchDictionary
            | ObjectKind::TextSearchParser
            | ObjectKind::TextSearchTemplate
            | ObjectKind::Type
            | ObjectKind::View => Addressing::Standalone,
        }
    }

    pub fn family(self) -> Family {
        self.addressing().family()
    }

    pub fn is_contained(self) -> bool {
        self.family() == Family::Contained
    }

    /// Kinds whose name is parsed like a function or type name, where a bare
    /// single-part name cannot be a column-name keyword.
    pub fn uses_function_name_grammar(self) -> bool {
        matches!(
            self,
            ObjectKind::Aggregate
                | ObjectKind::Domain
                | ObjectKind::Function
                | ObjectKind::Procedure
                | ObjectKind::Type
        )
    }

    /// Database-wide objects whose names cannot carry a schema.
    pub fn is_unqualified(self) -> bool {
        matches!(
            self,
            ObjectKind::AccessMethod
                | ObjectKind::Database
                | ObjectKind::EventTrigger
                | ObjectKind::Extension
                | ObjectKind::ForeignDataWrapper
                | ObjectKind::Language
                | ObjectKind::ProceduralLanguage
                | ObjectKind::Publication
                | ObjectKind::Role
                | ObjectKind::Schema
                | ObjectKind::Server
                | ObjectKind::Subscription
                | ObjectKind::Tablespace
        )
    }

    /// Most name parts an identifier of this kind may carry.
    ///
    /// Kinds looked up through their own catalog (collations, operator
    /// classes, ...) take at most `schema.name`; kinds resolved with a
    /// `reg*` cast also accept a leading database name.
    pub fn max_name_parts(self) -> usize {
        if self.is_contained() || self.is_unqualified() {
            return 1;
        }
        match self {
            ObjectKind::Collation
            | ObjectKind::Conversion
            | ObjectKind::OperatorClass
            | ObjectKind::OperatorFamily
            | ObjectKind::Statistics
            | ObjectKind::TextSearchParser
            | ObjectKind::TextSearchTemplate => 2,
            _ => 3,
        }
    }

    /// Objects recorded in `pg_shdescription` rather than `pg_description`.
    pub fn is_shared(self) -> bool {
        matches!(
            self,
            ObjectKind::Database | ObjectKind::Role | ObjectKind::Subscription | ObjectKind::Tablespace
        )
    }

    /// The system catalog holding the object, as recorded in the
    /// `classoid` column of the description catalogs.
    pub fn description_catalog(self) -> &'static str {
        match self {
            ObjectKind::AccessMethod => "pg_am",
            ObjectKind::Aggregate | ObjectKind::Function | ObjectKind::Procedure => "pg_proc",
            ObjectKind::Cast => "pg_cast",
            ObjectKind::Collation => "pg_collation",
            ObjectKind::Column
            | ObjectKind::ForeignTable
            | ObjectKind::Index
            | ObjectKind::MaterializedView
            | ObjectKind::Sequence
            | ObjectKind::Table
            | ObjectKind::View => "pg_class",
            ObjectKind::Constraint => "pg_constraint",
            ObjectKind::Conversion => "pg_conversion",
            ObjectKind::Database => "pg_database",
            ObjectKind::Domain | ObjectKind::Type => "pg_type",
            ObjectKind::EventTrigger => "pg_event_trigger",
            ObjectKind::Extension => "pg_extension",
            ObjectKind::ForeignDataWrapper => "pg_foreign_data_wrapper",
            ObjectKind::Language | ObjectKind::ProceduralLanguage => "pg_language",
            ObjectKind::LargeObject => "pg_largeobject",
            ObjectKind::Operator => "pg_operator",
            ObjectKind::OperatorClass => "pg_opclass",
            ObjectKind::OperatorFamily => "pg_opfamily",
            ObjectKind::Policy => "pg_policy",
            ObjectKind::Publication => "pg_publication",
            ObjectKind::Role => "pg_authid",
            ObjectKind::Rule => "pg_rewrite",
            ObjectKind::Schema => "pg_namespace",
            ObjectKind::Server => "pg_foreign_server",
            ObjectKind::Statistics => "pg_statistic_ext",
            ObjectKind::Subscription => "pg_subscription",
            ObjectKind::Tablespace => "pg_tablespace",
            ObjectKind::TextSearchConfiguration => "pg_ts_config",
            ObjectKind::TextSearchDictionary => "pg_ts_dict",
            ObjectKind::TextSearchParser => "pg_ts_parser",
            ObjectKind::TextSearchTemplate => "pg_ts_template",
            ObjectKind::Trigger => "pg_trigger",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ObjectKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        ObjectKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| ConfigurationError::UnknownKind(s.to_string()))
    }
}
