//! Addressing a commentable object: kind, identifier and owning relation.

use std::fmt;

use crate::catalog::kind::ObjectKind;
use crate::config::IdentifierQuoting;
use crate::error::ConfigurationError;
use crate::render::{quote_function_name_if_needed, quote_ident, quote_ident_if_needed};

/// Characters PostgreSQL allows in operator names.
const OPERATOR_CHARS: &str = "+-*/<>=~!@#%^&|`?";

/// A multi-character operator may only end in `+` or `-` if it holds one of these.
const TRAILING_SIGN_MARKERS: &str = "~!@#%^&|`?";

/// A possibly schema-qualified name; each part is quoted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    parts: Vec<String>,
}

impl QualifiedName {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a dotted name. Quotes are not interpreted, so a part containing
    /// `.` has to be built with [`QualifiedName::new`].
    pub fn parse(name: &str) -> Self {
        Self::new(name.split('.'))
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The unqualified object name (last part).
    pub fn name(&self) -> &str {
        self.parts.last().map_or("", String::as_str)
    }

    /// The part just before the object name, if any.
    pub fn schema(&self) -> Option<&str> {
        match self.parts.len() {
            0 | 1 => None,
            n => Some(self.parts[n - 2].as_str()),
        }
    }

    pub fn render(&self, quoting: IdentifierQuoting) -> Result<String, ConfigurationError> {
        if self.parts.is_empty() || self.parts.iter().any(|p| p.is_empty()) {
            return Err(ConfigurationError::EmptyIdentifier);
        }
        let quoted: Vec<String> = self
            .parts
            .iter()
            .map(|part| quote_part(part, quoting))
            .collect();
        Ok(quoted.join("."))
    }

    /// Render the name of an object of `kind`.
    ///
    /// Single-part routine and type names also quote column-name keywords.
    pub fn render_for(
        &self,
        kind: ObjectKind,
        quoting: IdentifierQuoting,
    ) -> Result<String, ConfigurationError> {
        let function_like = quoting == IdentifierQuoting::Minimal && kind.uses_function_name_grammar();
        match self.parts.as_slice() {
            [part] if function_like => {
                if part.is_empty() {
                    return Err(ConfigurationError::EmptyIdentifier);
                }
                Ok(quote_function_name_if_needed(part))
            }
            _ => self.render(quoting),
        }
    }

    fn check_parts(&self, kind: ObjectKind, max: usize) -> Result<(), ConfigurationError> {
        if self.parts.is_empty() || self.parts.iter().any(|p| p.is_empty()) {
            return Err(ConfigurationError::EmptyIdentifier);
        }
        if self.parts.len() > max {
            return Err(ConfigurationError::TooManyNameParts {
                kind,
                name: self.to_string(),
                parts: self.parts.len(),
                max,
            });
        }
        Ok(())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

/// A type reference inside a routine signature, operator or cast.
///
/// Multi-word SQL spellings are not parsed: use the internal names
/// (`float8`, `varchar`, `timestamptz`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub name: QualifiedName,
    pub array_dimensions: usize,
}

impl TypeName {
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            array_dimensions: 0,
        }
    }

    /// `public.mood[]` parses as the array of `public.mood`.
    pub fn parse(text: &str) -> Self {
        let mut base = text.trim();
        let mut array_dimensions = 0;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped.trim_end();
            array_dimensions += 1;
        }
        Self {
            name: QualifiedName::parse(base),
            array_dimensions,
        }
    }

    pub fn array(mut self) -> Self {
        self.array_dimensions += 1;
        self
    }

    pub fn render(&self, quoting: IdentifierQuoting) -> Result<String, ConfigurationError> {
        Ok(format!(
            "{}{}",
            self.name.render(quoting)?,
            "[]".repeat(self.array_dimensions)
        ))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, "[]".repeat(self.array_dimensions))
    }
}

impl From<&str> for TypeName {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// How the object itself is named.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectIdentifier {
    Name(QualifiedName),
    /// Large objects are only known by OID.
    Oid(u32),
    /// Function, procedure or aggregate with its argument types.
    Routine {
        name: QualifiedName,
        arguments: Vec<TypeName>,
    },
    /// `None` operands render as `NONE` (prefix operators).
    Operator {
        schema: Option<String>,
        symbol: String,
        left: Option<TypeName>,
        right: Option<TypeName>,
    },
    Cast {
        source: TypeName,
        target: TypeName,
    },
    /// Operator classes and families exist per index access method.
    AccessMethodScoped {
        name: QualifiedName,
        method: String,
    },
}

impl ObjectIdentifier {
    pub fn routine<I, T>(name: impl Into<QualifiedName>, arguments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        ObjectIdentifier::Routine {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn operator(
        symbol: impl Into<String>,
        left: Option<TypeName>,
        right: Option<TypeName>,
    ) -> Self {
        ObjectIdentifier::Operator {
            schema: None,
            symbol: symbol.into(),
            left,
            right,
        }
    }

    pub fn cast(source: impl Into<TypeName>, target: impl Into<TypeName>) -> Self {
        ObjectIdentifier::Cast {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn with_method(name: impl Into<QualifiedName>, method: impl Into<String>) -> Self {
        ObjectIdentifier::AccessMethodScoped {
            name: name.into(),
            method: method.into(),
        }
    }

    /// Render the identifier the way `COMMENT ON <kind>` expects it.
    pub fn render(
        &self,
        kind: ObjectKind,
        quoting: IdentifierQuoting,
    ) -> Result<String, ConfigurationError> {
        match self {
            ObjectIdentifier::Name(name) => name.render_for(kind, quoting),
            ObjectIdentifier::Oid(oid) => Ok(oid.to_string()),
            ObjectIdentifier::Routine { name, arguments } => {
                let args = render_types(arguments, quoting)?;
                let name = name.render_for(kind, quoting)?;
                if args.is_empty() && kind == ObjectKind::Aggregate {
                    Ok(format!("{}(*)", name))
                } else {
                    Ok(format!("{}({})", name, args.join(", ")))
                }
            }
            ObjectIdentifier::Operator {
                schema,
                symbol,
                left,
                right,
            } => {
                let operand = |t: &Option<TypeName>| match t {
                    Some(t) => t.render(quoting),
                    None => Ok("NONE".to_string()),
                };
                let prefix = match schema {
                    Some(schema) if schema.is_empty() => {
                        return Err(ConfigurationError::EmptyIdentifier);
                    }
                    Some(schema) => format!("{}.", quote_part(schema, quoting)),
                    None => String::new(),
                };
                Ok(format!(
                    "{}{} ({}, {})",
                    prefix,
                    symbol,
                    operand(left)?,
                    operand(right)?
                ))
            }
            ObjectIdentifier::Cast { source, target } => Ok(format!(
                "({} AS {})",
                source.render(quoting)?,
                target.render(quoting)?
            )),
            ObjectIdentifier::AccessMethodScoped { name, method } => {
                if method.is_empty() {
                    return Err(ConfigurationError::EmptyIdentifier);
                }
                Ok(format!(
                    "{} USING {}",
                    name.render(quoting)?,
                    quote_part(method, quoting)
                ))
            }
        }
    }
}

/// Unquoted, for log messages.
impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectIdentifier::Name(name) => write!(f, "{}", name),
            ObjectIdentifier::Oid(oid) => write!(f, "{}", oid),
            ObjectIdentifier::Routine { name, arguments } => {
                let arguments: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                write!(f, "{}({})", name, arguments.join(", "))
            }
            ObjectIdentifier::Operator {
                schema,
                symbol,
                left,
                right,
            } => {
                if let Some(schema) = schema {
                    write!(f, "{}.", schema)?;
                }
                let operand = |t: &Option<TypeName>| {
                    t.as_ref().map_or_else(|| "NONE".to_string(), |t| t.to_string())
                };
                write!(f, "{} ({}, {})", symbol, operand(left), operand(right))
            }
            ObjectIdentifier::Cast { source, target } => {
                write!(f, "({} AS {})", source, target)
            }
            ObjectIdentifier::AccessMethodScoped { name, method } => {
                write!(f, "{} USING {}", name, method)
            }
        }
    }
}

impl From<QualifiedName> for ObjectIdentifier {
    fn from(name: QualifiedName) -> Self {
        ObjectIdentifier::Name(name)
    }
}

impl From<&str> for ObjectIdentifier {
    fn from(name: &str) -> Self {
        ObjectIdentifier::Name(QualifiedName::parse(name))
    }
}

impl From<String> for ObjectIdentifier {
    fn from(name: String) -> Self {
        ObjectIdentifier::Name(QualifiedName::parse(&name))
    }
}

impl From<u32> for ObjectIdentifier {
    fn from(oid: u32) -> Self {
        ObjectIdentifier::Oid(oid)
    }
}

/// The object a comment is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentTarget {
    pub kind: ObjectKind,
    pub identifier: ObjectIdentifier,
    /// Owning relation; required iff `kind` is contained.
    pub parent: Option<QualifiedName>,
}

impl CommentTarget {
    pub fn new(kind: ObjectKind, identifier: impl Into<ObjectIdentifier>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            parent: None,
        }
    }

    /// Set the owning relation of a column, constraint, rule, trigger or policy.
    pub fn on(mut self, parent: impl Into<QualifiedName>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Build a target from plain strings, e.g. as read from configuration.
    ///
    /// Large objects take their OID as `identifier`.
    pub fn parse(
        kind: &str,
        identifier: &str,
        parent: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        let kind: ObjectKind = kind.parse()?;
        let identifier = if kind == ObjectKind::LargeObject {
            identifier
                .trim()
                .parse::<u32>()
                .map(ObjectIdentifier::Oid)
                .map_err(|_| ConfigurationError::IdentifierMismatch {
                    kind,
                    expected: "a large object OID",
                })?
        } else {
            ObjectIdentifier::from(identifier)
        };
        let target = Self {
            kind,
            identifier,
            parent: parent.map(QualifiedName::parse),
        };
        target.validate()?;
        Ok(target)
    }

    /// Check that the identifier shape and parent fit the kind.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let kind = self.kind;
        match (&self.parent, kind.is_contained()) {
            (None, true) => return Err(ConfigurationError::MissingParent { kind }),
            (Some(_), false) => return Err(ConfigurationError::UnexpectedParent { kind }),
            (Some(parent), true) => parent.check_parts(kind, 3)?,
            (None, false) => {}
        }

        let max = kind.max_name_parts();
        let mismatch = |expected| Err(ConfigurationError::IdentifierMismatch { kind, expected });
        match (kind, &self.identifier) {
            (ObjectKind::LargeObject, ObjectIdentifier::Oid(_)) => Ok(()),
            (ObjectKind::LargeObject, _) => mismatch("a large object OID"),

            (ObjectKind::Cast, ObjectIdentifier::Cast { source, target }) => {
                source.name.check_parts(kind, 3)?;
                target.name.check_parts(kind, 3)
            }
            (ObjectKind::Cast, _) => mismatch("source and target types"),

            (
                ObjectKind::Operator,
                ObjectIdentifier::Operator {
                    schema,
                    symbol,
                    left,
                    right,
                },
            ) => {
                if schema.as_deref() == Some("") {
                    return Err(ConfigurationError::EmptyIdentifier);
                }
                if !is_valid_operator(symbol) {
                    return Err(ConfigurationError::InvalidOperator(symbol.clone()));
                }
                if left.is_none() && right.is_none() {
                    return mismatch("an operator with at least one operand type");
                }
                for operand in [left, right].into_iter().flatten() {
                    operand.name.check_parts(kind, 3)?;
                }
                Ok(())
            }
            (ObjectKind::Operator, _) => mismatch("an operator symbol and operand types"),

            (
                ObjectKind::OperatorClass | ObjectKind::OperatorFamily,
                ObjectIdentifier::AccessMethodScoped { name, method },
            ) => {
                if method.is_empty() {
                    return Err(ConfigurationError::EmptyIdentifier);
                }
                name.check_parts(kind, max)
            }
            (ObjectKind::OperatorClass | ObjectKind::OperatorFamily, _) => {
                mismatch("a name and an index access method")
            }

            (
                ObjectKind::Aggregate | ObjectKind::Function | ObjectKind::Procedure,
                ObjectIdentifier::Routine { name, arguments },
            ) => {
                name.check_parts(kind, max)?;
                for argument in arguments {
                    argument.name.check_parts(kind, 3)?;
                }
                Ok(())
            }
            (ObjectKind::Aggregate, _) => mismatch("a name and argument types"),
            (ObjectKind::Function | ObjectKind::Procedure, ObjectIdentifier::Name(name)) => {
                name.check_parts(kind, max)
            }
            (ObjectKind::Function | ObjectKind::Procedure, _) => {
                mismatch("a name with optional argument types")
            }

            (_, ObjectIdentifier::Name(name)) => name.check_parts(kind, max),
            (_, _) => mismatch("a name"),
        }
    }
}

fn is_valid_operator(symbol: &str) -> bool {
    if symbol.is_empty() || !symbol.chars().all(|c| OPERATOR_CHARS.contains(c)) {
        return false;
    }
    // Both start a comment
    if symbol.contains("--") || symbol.contains("/*") {
        return false;
    }
    if symbol.len() > 1 && (symbol.ends_with('+') || symbol.ends_with('-')) {
        return symbol.chars().any(|c| TRAILING_SIGN_MARKERS.contains(c));
    }
    true
}

fn quote_part(part: &str, quoting: IdentifierQuoting) -> String {
    match quoting {
        IdentifierQuoting::Minimal => quote_ident_if_needed(part),
        IdentifierQuoting::Always => quote_ident(part),
    }
}

fn render_types(
    types: &[TypeName],
    quoting: IdentifierQuoting,
) -> Result<Vec<String>, ConfigurationError> {
    types.iter().map(|t| t.render(quoting)).collect()
}
