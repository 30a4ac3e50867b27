//! COMMENT ON rendering across the object taxonomy.

use anyhow::Result;
use pg_comment::{
    CommentStatementBuilder, CommentTarget, ConfigurationError, IdentifierQuoting,
    NormalizedComment, ObjectIdentifier, ObjectKind, TypeName,
};
use rstest::rstest;

fn x() -> NormalizedComment {
    NormalizedComment::from_raw("x")
}

/// A well-formed target for any kind, for properties that hold across kinds.
fn sample_target(kind: ObjectKind) -> CommentTarget {
    let identifier = match kind {
        ObjectKind::LargeObject => ObjectIdentifier::Oid(16384),
        ObjectKind::Cast => ObjectIdentifier::cast("int4", "text"),
        ObjectKind::Operator => {
            ObjectIdentifier::operator("+", Some("int4".into()), Some("int4".into()))
        }
        ObjectKind::OperatorClass | ObjectKind::OperatorFamily => {
            ObjectIdentifier::with_method("app.my_ops", "btree")
        }
        ObjectKind::Aggregate => ObjectIdentifier::routine("app.total", ["int4"]),
        kind if kind.is_unqualified() || kind.is_contained() => ObjectIdentifier::from("thing"),
        _ => ObjectIdentifier::from("app.thing"),
    };
    let target = CommentTarget::new(kind, identifier);
    if kind.is_contained() {
        target.on("app.users")
    } else {
        target
    }
}

#[rstest]
#[case::table(ObjectKind::Table, "app.users", "COMMENT ON TABLE app.users IS 'x';")]
#[case::view(ObjectKind::View, "app.active_users", "COMMENT ON VIEW app.active_users IS 'x';")]
#[case::materialized_view(
    ObjectKind::MaterializedView,
    "app.daily_totals",
    "COMMENT ON MATERIALIZED VIEW app.daily_totals IS 'x';"
)]
#[case::index(
    ObjectKind::Index,
    "app.users_email_idx",
    "COMMENT ON INDEX app.users_email_idx IS 'x';"
)]
#[case::sequence(
    ObjectKind::Sequence,
    "app.users_id_seq",
    "COMMENT ON SEQUENCE app.users_id_seq IS 'x';"
)]
#[case::foreign_table(
    ObjectKind::ForeignTable,
    "app.remote_users",
    "COMMENT ON FOREIGN TABLE app.remote_users IS 'x';"
)]
#[case::function(ObjectKind::Function, "app.refresh", "COMMENT ON FUNCTION app.refresh IS 'x';")]
#[case::procedure(ObjectKind::Procedure, "app.archive", "COMMENT ON PROCEDURE app.archive IS 'x';")]
#[case::type_(ObjectKind::Type, "app.mood", "COMMENT ON TYPE app.mood IS 'x';")]
#[case::domain(ObjectKind::Domain, "app.email", "COMMENT ON DOMAIN app.email IS 'x';")]
#[case::schema(ObjectKind::Schema, "app", "COMMENT ON SCHEMA app IS 'x';")]
#[case::database(ObjectKind::Database, "appdb", "COMMENT ON DATABASE appdb IS 'x';")]
#[case::role(ObjectKind::Role, "app_user", "COMMENT ON ROLE app_user IS 'x';")]
#[case::tablespace(ObjectKind::Tablespace, "fast_ssd", "COMMENT ON TABLESPACE fast_ssd IS 'x';")]
#[case::extension(ObjectKind::Extension, "pgcrypto", "COMMENT ON EXTENSION pgcrypto IS 'x';")]
#[case::language(ObjectKind::Language, "plpgsql", "COMMENT ON LANGUAGE plpgsql IS 'x';")]
#[case::procedural_language(
    ObjectKind::ProceduralLanguage,
    "plpgsql",
    "COMMENT ON PROCEDURAL LANGUAGE plpgsql IS 'x';"
)]
#[case::event_trigger(
    ObjectKind::EventTrigger,
    "ddl_audit",
    "COMMENT ON EVENT TRIGGER ddl_audit IS 'x';"
)]
#[case::foreign_data_wrapper(
    ObjectKind::ForeignDataWrapper,
    "postgres_fdw",
    "COMMENT ON FOREIGN DATA WRAPPER postgres_fdw IS 'x';"
)]
#[case::server(ObjectKind::Server, "remote", "COMMENT ON SERVER remote IS 'x';")]
#[case::access_method(ObjectKind::AccessMethod, "bloom", "COMMENT ON ACCESS METHOD bloom IS 'x';")]
#[case::publication(ObjectKind::Publication, "app_pub", "COMMENT ON PUBLICATION app_pub IS 'x';")]
#[case::subscription(
    ObjectKind::Subscription,
    "app_sub",
    "COMMENT ON SUBSCRIPTION app_sub IS 'x';"
)]
#[case::collation(ObjectKind::Collation, "app.german", "COMMENT ON COLLATION app.german IS 'x';")]
#[case::conversion(
    ObjectKind::Conversion,
    "app.latin1_to_utf8",
    "COMMENT ON CONVERSION app.latin1_to_utf8 IS 'x';"
)]
#[case::statistics(
    ObjectKind::Statistics,
    "app.users_stats",
    "COMMENT ON STATISTICS app.users_stats IS 'x';"
)]
#[case::text_search_configuration(
    ObjectKind::TextSearchConfiguration,
    "app.english_simple",
    "COMMENT ON TEXT SEARCH CONFIGURATION app.english_simple IS 'x';"
)]
#[case::text_search_dictionary(
    ObjectKind::TextSearchDictionary,
    "app.english_stem",
    "COMMENT ON TEXT SEARCH DICTIONARY app.english_stem IS 'x';"
)]
#[case::text_search_parser(
    ObjectKind::TextSearchParser,
    "app.prs",
    "COMMENT ON TEXT SEARCH PARSER app.prs IS 'x';"
)]
#[case::text_search_template(
    ObjectKind::TextSearchTemplate,
    "app.tmpl",
    "COMMENT ON TEXT SEARCH TEMPLATE app.tmpl IS 'x';"
)]
fn test_render_named_standalone(
    #[case] kind: ObjectKind,
    #[case] name: &str,
    #[case] expected: &str,
) -> Result<()> {
    let builder = CommentStatementBuilder::default();
    let rendered = builder.build_set(&CommentTarget::new(kind, name), Some(&x()))?;
    assert_eq!(rendered.sql, expected);
    Ok(())
}

#[rstest]
#[case::column(ObjectKind::Column, "COMMENT ON COLUMN app.users.email IS NULL;")]
#[case::constraint(
    ObjectKind::Constraint,
    "COMMENT ON CONSTRAINT email ON app.users IS NULL;"
)]
#[case::rule(ObjectKind::Rule, "COMMENT ON RULE email ON app.users IS NULL;")]
#[case::trigger(ObjectKind::Trigger, "COMMENT ON TRIGGER email ON app.users IS NULL;")]
#[case::policy(ObjectKind::Policy, "COMMENT ON POLICY email ON app.users IS NULL;")]
fn test_render_contained(#[case] kind: ObjectKind, #[case] expected: &str) -> Result<()> {
    let builder = CommentStatementBuilder::default();
    let target = CommentTarget::new(kind, "email").on("app.users");
    assert_eq!(builder.build_set(&target, None)?.sql, expected);
    Ok(())
}

#[test]
fn test_every_standalone_kind_sets_and_clears() -> Result<()> {
    let builder = CommentStatementBuilder::default();
    for kind in ObjectKind::ALL.iter().filter(|k| !k.is_contained()) {
        let target = sample_target(*kind);

        let cleared = builder.build_set(&target, None)?;
        assert!(cleared.sql.contains("IS NULL"), "{kind}: {}", cleared.sql);
        assert!(cleared.is_destructive());

        let set = builder.build_set(&target, Some(&x()))?;
        assert!(set.sql.contains("IS 'x'"), "{kind}: {}", set.sql);
        assert!(
            set.sql.starts_with(&format!("COMMENT ON {} ", kind.keyword())),
            "{kind}: {}",
            set.sql
        );
    }
    Ok(())
}

#[test]
fn test_every_kind_has_a_read_query() -> Result<()> {
    let builder = CommentStatementBuilder::default();
    for kind in ObjectKind::ALL {
        let query = builder.build_get(&sample_target(*kind))?;
        assert!(query.ends_with("AS comment") || query.contains("AS comment FROM"));
        if *kind == ObjectKind::Column {
            assert!(query.contains("col_description"), "{query}");
        } else {
            assert!(query.contains(kind.description_catalog()), "{kind}: {query}");
        }
    }
    Ok(())
}

#[test]
fn test_identifier_quoting() -> Result<()> {
    let builder = CommentStatementBuilder::new(IdentifierQuoting::Minimal, false);

    let spaced = builder.build_set(&CommentTarget::new(ObjectKind::Table, "My Table"), Some(&x()))?;
    insta::assert_snapshot!(spaced.sql, @r#"COMMENT ON TABLE "My Table" IS 'x'"#);

    let plain = builder.build_set(&CommentTarget::new(ObjectKind::Table, "plain_name"), Some(&x()))?;
    insta::assert_snapshot!(plain.sql, @"COMMENT ON TABLE plain_name IS 'x'");

    let reserved = builder.build_set(&CommentTarget::new(ObjectKind::Table, "public.user"), None)?;
    insta::assert_snapshot!(reserved.sql, @r#"COMMENT ON TABLE public."user" IS NULL"#);

    let sneaky = builder.build_set(
        &CommentTarget::new(ObjectKind::Column, "a\"b").on("Odd Schema.t"),
        Some(&NormalizedComment::from_raw("it's; DROP TABLE t; --")),
    )?;
    insta::assert_snapshot!(
        sneaky.sql,
        @r#"COMMENT ON COLUMN "Odd Schema".t."a""b" IS 'it''s; DROP TABLE t; --'"#
    );
    Ok(())
}

/// Column-name keywords are valid table names but not bare function or type names.
#[rstest]
#[case::function(
    ObjectKind::Function,
    ObjectIdentifier::routine("position", ["int4"]),
    r#"COMMENT ON FUNCTION "position"(int4) IS 'x'"#
)]
#[case::aggregate(
    ObjectKind::Aggregate,
    ObjectIdentifier::routine("coalesce", Vec::<TypeName>::new()),
    r#"COMMENT ON AGGREGATE "coalesce"(*) IS 'x'"#
)]
#[case::procedure_without_arguments(
    ObjectKind::Procedure,
    ObjectIdentifier::from("trim"),
    r#"COMMENT ON PROCEDURE "trim" IS 'x'"#
)]
#[case::domain(
    ObjectKind::Domain,
    ObjectIdentifier::from("values"),
    r#"COMMENT ON DOMAIN "values" IS 'x'"#
)]
#[case::qualified_function(
    ObjectKind::Function,
    ObjectIdentifier::routine("app.position", ["int4"]),
    "COMMENT ON FUNCTION app.position(int4) IS 'x'"
)]
#[case::table(
    ObjectKind::Table,
    ObjectIdentifier::from("position"),
    "COMMENT ON TABLE position IS 'x'"
)]
fn test_column_name_keywords(
    #[case] kind: ObjectKind,
    #[case] identifier: ObjectIdentifier,
    #[case] expected: &str,
) -> Result<()> {
    let builder = CommentStatementBuilder::new(IdentifierQuoting::Minimal, false);
    let rendered = builder.build_set(&CommentTarget::new(kind, identifier), Some(&x()))?;
    assert_eq!(rendered.sql, expected);
    Ok(())
}

#[test]
fn test_operator_comment_sequences_are_rejected() {
    let builder = CommentStatementBuilder::default();
    let target = CommentTarget::new(
        ObjectKind::Operator,
        ObjectIdentifier::operator("+--", Some("int4".into()), Some("int4".into())),
    );
    assert_eq!(
        builder.build_set(&target, Some(&x())),
        Err(ConfigurationError::InvalidOperator("+--".to_string()))
    );
}

#[test]
fn test_signature_kinds() -> Result<()> {
    let builder = CommentStatementBuilder::new(IdentifierQuoting::Minimal, false);

    let aggregate = CommentTarget::new(
        ObjectKind::Aggregate,
        ObjectIdentifier::routine("app.total", Vec::<TypeName>::new()),
    );
    assert_eq!(
        builder.build_set(&aggregate, Some(&x()))?.sql,
        "COMMENT ON AGGREGATE app.total(*) IS 'x'"
    );

    let operator = CommentTarget::new(
        ObjectKind::Operator,
        ObjectIdentifier::operator("-", None, Some(TypeName::new("app.money"))),
    );
    assert_eq!(
        builder.build_set(&operator, Some(&x()))?.sql,
        "COMMENT ON OPERATOR - (NONE, app.money) IS 'x'"
    );

    let family = CommentTarget::new(
        ObjectKind::OperatorFamily,
        ObjectIdentifier::with_method("app.Money_ops", "btree"),
    );
    assert_eq!(
        builder.build_set(&family, Some(&x()))?.sql,
        "COMMENT ON OPERATOR FAMILY app.\"Money_ops\" USING btree IS 'x'"
    );

    let procedure = CommentTarget::new(
        ObjectKind::Procedure,
        ObjectIdentifier::routine("app.archive", [TypeName::parse("text[]"), "int8".into()]),
    );
    assert_eq!(
        builder.build_set(&procedure, None)?.sql,
        "COMMENT ON PROCEDURE app.archive(text[], int8) IS NULL"
    );
    Ok(())
}

#[test]
fn test_configuration_errors() {
    let builder = CommentStatementBuilder::default();

    assert_eq!(
        builder.build_set(&CommentTarget::new(ObjectKind::Column, "col"), Some(&x())),
        Err(ConfigurationError::MissingParent {
            kind: ObjectKind::Column
        })
    );
    assert_eq!(
        "bogus".parse::<ObjectKind>(),
        Err(ConfigurationError::UnknownKind("bogus".to_string()))
    );
    assert_eq!(
        CommentTarget::parse("bogus", "x", None),
        Err(ConfigurationError::UnknownKind("bogus".to_string()))
    );
    assert_eq!(
        builder.build_set(&CommentTarget::new(ObjectKind::Table, "app."), None),
        Err(ConfigurationError::EmptyIdentifier)
    );
    assert!(builder.build_get(&CommentTarget::new(ObjectKind::Column, "col")).is_err());
}
