use crate::config::{merge::Merge, types::*};
use anyhow::{Result, anyhow};

/// Environment variable overriding `rendering.identifier_quoting`
pub const IDENTIFIER_QUOTING_ENV: &str = "PG_COMMENT_IDENTIFIER_QUOTING";

#[derive(Default)]
pub struct ConfigBuilder {
    config_input: ConfigInput,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(overrides);
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();

        Ok(Config {
            rendering: self.resolve_rendering(&defaults.rendering)?,
            comments: self.resolve_comments(&defaults.comments),
        })
    }

    fn resolve_rendering(&self, defaults: &Rendering) -> Result<Rendering> {
        let rendering_input = self.config_input.rendering.as_ref();

        // Explicit input wins over the environment
        let identifier_quoting = match rendering_input.and_then(|r| r.identifier_quoting) {
            Some(quoting) => quoting,
            None => match std::env::var(IDENTIFIER_QUOTING_ENV) {
                Ok(value) => value
                    .parse()
                    .map_err(|e| anyhow!("{}: {}", IDENTIFIER_QUOTING_ENV, e))?,
                Err(_) => defaults.identifier_quoting,
            },
        };

        Ok(Rendering {
            identifier_quoting,
            terminate_statements: rendering_input
                .and_then(|r| r.terminate_statements)
                .unwrap_or(defaults.terminate_statements),
        })
    }

    fn resolve_comments(&self, defaults: &CommentHandling) -> CommentHandling {
        let comments_input = self.config_input.comments.as_ref();

        CommentHandling {
            normalize: comments_input
                .and_then(|c| c.normalize)
                .unwrap_or(defaults.normalize),
        }
    }
}
