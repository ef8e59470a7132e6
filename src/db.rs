use crate::errors::{MigrationError, Side};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Type alias for a database connection pool
pub type DbPool = DatabaseConnection;

/// Characters sqlx would read as URL syntax in the file name; it percent-decodes
/// the path and splits the query string at the first `?`.
const SQLITE_PATH_ENCODE_SET: &AsciiSet = &CONTROLS.add(b'%').add(b'?').add(b'#');

/// How a SQLite file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    ReadOnly,
    /// Read-write, creating the file when it does not exist yet
    ReadWriteCreate,
}

impl OpenMode {
    fn as_query(&self) -> &'static str {
        match self {
            OpenMode::ReadOnly => "ro",
            OpenMode::ReadWriteCreate => "rwc",
        }
    }
}

/// Configuration for database connection
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL
    pub url: String,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Acquire connection timeout
    pub acquire_timeout: Duration,
}

impl DbConfig {
    /// Builds the sqlx SQLite URL for a database file.
    pub fn sqlite_file(path: &Path, mode: OpenMode) -> Self {
        let path_str = path.to_string_lossy();
        let encoded = utf8_percent_encode(&path_str, SQLITE_PATH_ENCODE_SET);
        Self {
            url: format!("sqlite://{}?mode={}", encoded, mode.as_query()),
            ..Default::default()
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout: Duration::from_secs(30),
            acquire_timeout: Duration::from_secs(8),
        }
    }
}

/// Opens a single-connection pool.
///
/// The migration is strictly sequential, and per-connection PRAGMAs only hold
/// when every statement goes through the same connection.
pub async fn establish_connection_with_config(config: &DbConfig) -> Result<DbPool, DbErr> {
    debug!("Configuring database connection with: {:?}", config);

    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Opens the legacy store read-only.
pub async fn open_legacy(path: &Path) -> Result<DbPool, MigrationError> {
    let config = DbConfig::sqlite_file(path, OpenMode::ReadOnly);
    let pool = establish_connection_with_config(&config)
        .await
        .map_err(|e| MigrationError::connection(Side::Legacy, e))?;
    info!("移行元データベース接続成功: {}", path.display());
    Ok(pool)
}

/// Opens (or creates) the destination store with foreign-key enforcement on.
pub async fn open_destination(path: &Path) -> Result<DbPool, MigrationError> {
    let config = DbConfig::sqlite_file(path, OpenMode::ReadWriteCreate);
    let pool = establish_connection_with_config(&config)
        .await
        .map_err(|e| MigrationError::connection(Side::Destination, e))?;
    enable_foreign_keys(&pool)
        .await
        .map_err(|e| MigrationError::connection(Side::Destination, e))?;
    info!("移行先データベース接続成功: {}", path.display());
    Ok(pool)
}

/// Turns on foreign key checks for the connection.
pub async fn enable_foreign_keys<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    Ok(())
}

/// Closes a pool, logging rather than failing when the close itself errors.
pub async fn close_pool(pool: DbPool, side: Side) {
    info!("{}データベース接続を閉じます", side);
    if let Err(e) = pool.close().await {
        warn!("{}データベース切断エラー: {}", side, e);
    }
}

/// Fresh in-memory SQLite database for unit tests.
#[cfg(test)]
pub(crate) async fn memory_pool() -> DbPool {
    let config = DbConfig {
        url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    let pool = establish_connection_with_config(&config)
        .await
        .expect("in-memory sqlite");
    enable_foreign_keys(&pool).await.expect("foreign keys");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, Statement};

    #[test]
    fn sqlite_urls_carry_the_open_mode() {
        let ro = DbConfig::sqlite_file(Path::new("/data/legacy.sqlite"), OpenMode::ReadOnly);
        assert_eq!(ro.url, "sqlite:///data/legacy.sqlite?mode=ro");

        let rwc = DbConfig::sqlite_file(Path::new("out/new.sqlite"), OpenMode::ReadWriteCreate);
        assert_eq!(rwc.url, "sqlite://out/new.sqlite?mode=rwc");
    }

    #[test]
    fn url_syntax_in_file_names_is_escaped() {
        let config = DbConfig::sqlite_file(Path::new("/data/My?Data%41#1.sqlite"), OpenMode::ReadOnly);
        assert_eq!(config.url, "sqlite:///data/My%3FData%2541%231.sqlite?mode=ro");
    }

    #[tokio::test]
    async fn percent_sequence_in_destination_name_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup%41.sqlite");
        let pool = open_destination(&path).await.unwrap();
        close_pool(pool, Side::Destination).await;

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".sqlite"))
            .collect();
        assert_eq!(names, vec!["backup%41.sqlite".to_string()]);
    }

    #[tokio::test]
    async fn question_mark_in_legacy_name_opens_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("My?Data.sqlite");
        let created = open_destination(&path).await.unwrap();
        close_pool(created, Side::Destination).await;
        assert!(path.is_file());

        let legacy = open_legacy(&path).await.unwrap();
        close_pool(legacy, Side::Legacy).await;
    }

    #[tokio::test]
    async fn memory_pool_enforces_foreign_keys() {
        let pool = memory_pool().await;
        let row = pool
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "PRAGMA foreign_keys".to_string(),
            ))
            .await
            .unwrap()
            .expect("pragma row");
        let enabled: i64 = row.try_get_by_index(0).unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn opening_a_missing_legacy_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_legacy(&dir.path().join("absent.sqlite"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::Connection {
                side: Side::Legacy,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn destination_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.sqlite");
        let pool = open_destination(&path).await.unwrap();
        close_pool(pool, Side::Destination).await;
        assert!(path.exists());
    }
}
