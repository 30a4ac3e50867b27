use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub rendering: Option<RenderingInput>,
    pub comments: Option<CommentsInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub rendering: Rendering,
    pub comments: CommentHandling,
}

// SQL rendering configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RenderingInput {
    pub identifier_quoting: Option<IdentifierQuoting>,
    pub terminate_statements: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub identifier_quoting: IdentifierQuoting,
    /// Append `;` to every rendered statement
    pub terminate_statements: bool,
}

/// When identifier parts are wrapped in double quotes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierQuoting {
    /// Only names PostgreSQL would otherwise fold or reject
    #[default]
    Minimal,
    /// Every name part
    Always,
}

impl fmt::Display for IdentifierQuoting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierQuoting::Minimal => write!(f, "minimal"),
            IdentifierQuoting::Always => write!(f, "always"),
        }
    }
}

impl FromStr for IdentifierQuoting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(IdentifierQuoting::Minimal),
            "always" => Ok(IdentifierQuoting::Always),
            other => Err(format!(
                "invalid identifier quoting '{}', expected 'minimal' or 'always'",
                other
            )),
        }
    }
}

// Comment handling configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommentsInput {
    pub normalize: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentHandling {
    /// Strip the first line's indentation from raw comments before setting them
    pub normalize: bool,
}
