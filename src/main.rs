use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::info;

use highlandirect_migration::{config, run_migration, MigrationRequest};

#[derive(Parser, Debug)]
#[command(
    name = "highlandirect-migrate",
    about = "Migrate a legacy HighLandirect database into the web back-office schema",
    version
)]
struct Cli {
    /// Legacy database file (SQLite export of the desktop database)
    legacy_db: PathBuf,

    /// Destination database file; created along with its directory if missing
    destination_db: PathBuf,

    /// DDL script applied before copying rows; defaults to schema.sql next to the
    /// binary, then to the built-in copy
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,

    /// Extra configuration file layered over config/migration.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Print the migration report as pretty JSON when finished"
    )]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // tracing may not be initialized yet, so report on stderr only
            eprintln!("エラー: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_config(cli.config.as_deref())
        .context("設定の読み込みに失敗しました")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);
    if let Some(path) = &cli.config {
        info!("設定ファイル: {}", path.display());
    }

    let request = MigrationRequest {
        legacy_path: cli.legacy_db,
        destination_path: cli.destination_db,
        schema_path: cli.schema,
    };

    let report = run_migration(&request, &cfg)
        .await
        .context("移行に失敗しました")?;

    if cli.json {
        print_json(&report)?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn two_positional_paths_are_required() {
        let err = Cli::try_parse_from(["highlandirect-migrate", "legacy.sqlite"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn optional_flags_parse() {
        let cli = Cli::try_parse_from([
            "highlandirect-migrate",
            "MyData.sqlite",
            "out/new.sqlite",
            "--schema",
            "db/schema.sql",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.legacy_db, PathBuf::from("MyData.sqlite"));
        assert_eq!(cli.schema, Some(PathBuf::from("db/schema.sql")));
        assert!(cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn help_is_not_an_error_exit() {
        let err = Cli::try_parse_from(["highlandirect-migrate", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }
}
