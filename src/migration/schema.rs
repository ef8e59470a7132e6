//! Destination schema setup.
//!
//! The DDL script is applied one statement at a time so a statement that fails
//! (for example an index on an object the operator dropped) is logged and
//! skipped without aborting the run.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::MigrationError;

/// Copy of `schema/schema.sql` compiled into the binary, used when no script
/// file is configured or installed.
pub const BUNDLED_SCHEMA: &str = include_str!("../../schema/schema.sql");

/// Result of applying a DDL script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchemaOutcome {
    pub executed: usize,
    pub failed: usize,
}

/// Reads the DDL script. An unreadable script is the only fatal schema failure.
pub fn load_script(path: &Path) -> Result<String, MigrationError> {
    std::fs::read_to_string(path).map_err(|source| MigrationError::SchemaScript {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits a script into its non-empty statements.
///
/// Whole-line `--` comments are dropped first so a comment-only chunk never
/// reaches the database. Statements containing `;` inside literals or trigger
/// bodies are not supported.
pub fn split_statements(script: &str) -> Vec<String> {
    let without_comments: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}

/// Executes each statement independently, continuing past failures.
pub async fn apply_schema<C: ConnectionTrait>(db: &C, script: &str) -> SchemaOutcome {
    let mut outcome = SchemaOutcome::default();

    for stmt in split_statements(script) {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => {
                debug!("Executed schema statement: {}", first_line(&stmt));
                outcome.executed += 1;
            }
            Err(e) => {
                warn!("スキーマ作成エラー: {}", e);
                warn!("SQL: {}", stmt);
                outcome.failed += 1;
            }
        }
    }

    info!(
        "スキーマ作成完了: {}件実行, {}件失敗",
        outcome.executed, outcome.failed
    );
    outcome
}

fn first_line(stmt: &str) -> &str {
    stmt.lines().next().unwrap_or(stmt)
}
