use sea_orm::error::DbErr;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigLoadError;

/// Which side of the migration a connection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Side {
    #[strum(serialize = "移行元")]
    Legacy,
    #[strum(serialize = "移行先")]
    Destination,
}

/// Errors that abort a migration run.
///
/// Per-statement schema failures and per-row skips never surface here; they are
/// logged and counted in the run report instead.
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("移行元データベースが見つかりません: {}", .0.display())]
    LegacyDatabaseMissing(PathBuf),

    #[error("{side}データベース接続エラー: {source}")]
    Connection {
        side: Side,
        #[source]
        source: DbErr,
    },

    #[error("スキーマファイルを読み込めません: {}: {source}", .path.display())]
    SchemaScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("データベースエラー: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error("入出力エラー: {0}")]
    Io(#[from] std::io::Error),
}

impl MigrationError {
    pub fn connection(side: Side, source: DbErr) -> Self {
        MigrationError::Connection { side, source }
    }
}

pub type MigrationResult<T> = Result<T, MigrationError>;
