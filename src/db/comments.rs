//! Running comment statements against a live connection.
//!
//! The executor is always passed in by the caller: a `&PgPool`, a
//! `&mut PgConnection` or a transaction all work. Nothing here opens
//! connections or manages transactions.

use sqlx::postgres::{PgConnection, PgExecutor};
use tracing::{debug, info};

use crate::catalog::comments::{CommentAction, diff_comment};
use crate::catalog::target::CommentTarget;
use crate::config::Config;
use crate::error::CommentError;
use crate::normalize::{CommentNormalizer, NormalizedComment};
use crate::render::{CommentStatementBuilder, RenderedSql};

/// Sets and reads comments, composed from a normalizer and a builder.
#[derive(Debug, Clone)]
pub struct Comments {
    normalizer: CommentNormalizer,
    builder: CommentStatementBuilder,
    normalize: bool,
}

impl Default for Comments {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Comments {
    pub fn new(config: &Config) -> Self {
        Self {
            normalizer: CommentNormalizer::new(),
            builder: CommentStatementBuilder::from_config(&config.rendering),
            normalize: config.comments.normalize,
        }
    }

    pub fn builder(&self) -> &CommentStatementBuilder {
        &self.builder
    }

    /// Prepare raw comment text the way `set_comment` stores it.
    pub fn prepare(&self, raw: &str) -> NormalizedComment {
        if self.normalize {
            self.normalizer.normalize(raw)
        } else {
            NormalizedComment::verbatim(raw)
        }
    }

    /// Render the statement `set_comment` would run, without running it.
    pub fn statement(
        &self,
        target: &CommentTarget,
        raw: Option<&str>,
    ) -> Result<RenderedSql, CommentError> {
        let comment = raw.map(|raw| self.prepare(raw));
        Ok(self.builder.build_set(target, comment.as_ref())?)
    }

    /// Set the comment on `target`, or clear it when `raw` is `None`.
    pub async fn set_comment<'e, E>(
        &self,
        executor: E,
        target: &CommentTarget,
        raw: Option<&str>,
    ) -> Result<(), CommentError>
    where
        E: PgExecutor<'e>,
    {
        let statement = self.statement(target, raw)?;
        self.execute(executor, target, &statement).await
    }

    /// Read the comment currently stored on `target`.
    pub async fn get_comment<'e, E>(
        &self,
        executor: E,
        target: &CommentTarget,
    ) -> Result<Option<String>, CommentError>
    where
        E: PgExecutor<'e>,
    {
        let query = self.builder.build_get(target)?;
        debug!("Fetching comment: {}", query);

        let comment = sqlx::query_scalar::<_, Option<String>>(&query)
            .persistent(false)
            .fetch_optional(executor)
            .await?;

        Ok(comment.flatten())
    }

    /// Bring the stored comment in line with `raw`, touching the database
    /// only when they differ. Returns whether a statement was run.
    pub async fn sync_comment(
        &self,
        conn: &mut PgConnection,
        target: &CommentTarget,
        raw: Option<&str>,
    ) -> Result<bool, CommentError> {
        let desired = raw.map(|raw| self.prepare(raw));
        // Validate before the first round-trip
        self.builder.build_set(target, desired.as_ref())?;

        let current = self.get_comment(&mut *conn, target).await?;

        let Some(action) = diff_comment(current.as_deref(), desired.as_ref()) else {
            debug!("Comment on {} {} is up to date", target.kind, describe(target));
            return Ok(false);
        };

        let statement = match action {
            CommentAction::Set(comment) => self.builder.build_set(target, Some(&comment))?,
            CommentAction::Drop => self.builder.build_set(target, None)?,
        };
        self.execute(&mut *conn, target, &statement).await?;
        Ok(true)
    }

    async fn execute<'e, E>(
        &self,
        executor: E,
        target: &CommentTarget,
        statement: &RenderedSql,
    ) -> Result<(), CommentError>
    where
        E: PgExecutor<'e>,
    {
        debug!("Executing: {}", statement.sql);
        sqlx::query(&statement.sql)
            .persistent(false)
            .execute(executor)
            .await?;

        if statement.is_destructive() {
            info!("Cleared comment on {} {}", target.kind, describe(target));
        } else {
            info!("Set comment on {} {}", target.kind, describe(target));
        }
        Ok(())
    }
}

fn describe(target: &CommentTarget) -> String {
    match &target.parent {
        Some(parent) => format!("{} on {}", target.identifier, parent),
        None => target.identifier.to_string(),
    }
}
