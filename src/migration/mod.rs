//! Migration phases and the orchestrator that runs them in order.

pub mod addresses;
pub mod codes;
pub mod key_map;
pub mod memos;
pub mod orders;
pub mod products;
pub mod report;
pub mod schema;
pub mod stores;

use chrono::Utc;
use sea_orm::TransactionTrait;
use std::path::{Path, PathBuf};
use strum::Display;
use tracing::{error, info, info_span, Instrument};

use crate::config::MigrationConfig;
use crate::db::{self, DbPool};
use crate::destination::DestinationWriter;
use crate::errors::{MigrationError, MigrationResult, Side};
use crate::legacy::LegacyReader;

pub use key_map::KeyMapper;
pub use report::MigrationReport;

use orders::HistoryTemplate;
use stores::StoreDefaults;

/// Migration steps, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Schema,
    Addresses,
    Products,
    Stores,
    Orders,
    OrderHistory,
    ReportMemos,
}

/// Paths for a single run
#[derive(Debug, Clone)]
pub struct MigrationRequest {
    pub legacy_path: PathBuf,
    pub destination_path: PathBuf,
    /// Overrides the configured DDL script location
    pub schema_path: Option<PathBuf>,
}

/// Runs `$body` with `$conn` bound to either a fresh transaction or the plain
/// destination connection. The transaction is committed after the body
/// succeeds and rolled back on drop when `?` leaves early.
macro_rules! within_phase {
    ($dest:expr, $use_tx:expr, |$conn:ident| $body:expr) => {{
        if $use_tx {
            let txn = $dest.begin().await?;
            let result = {
                let $conn = &txn;
                $body
            };
            txn.commit().await?;
            result
        } else {
            let $conn = $dest;
            $body
        }
    }};
}

fn phase_span(phase: Phase) -> tracing::Span {
    info_span!("phase", name = %phase)
}

/// Runs the whole migration.
///
/// Both connections are closed on every exit path once opened. The returned
/// report is also logged and recorded as metrics.
pub async fn run_migration(
    request: &MigrationRequest,
    cfg: &MigrationConfig,
) -> MigrationResult<MigrationReport> {
    if !request.legacy_path.is_file() {
        error!(
            "移行元データベースが見つかりません: {}",
            request.legacy_path.display()
        );
        return Err(MigrationError::LegacyDatabaseMissing(
            request.legacy_path.clone(),
        ));
    }
    ensure_parent_dir(&request.destination_path)?;
    let schema_path = cfg.resolve_schema_path(request.schema_path.as_deref());

    info!("=== HighLandirect データベース移行開始 ===");
    info!("移行元: {}", request.legacy_path.display());
    info!("移行先: {}", request.destination_path.display());

    let legacy = db::open_legacy(&request.legacy_path).await?;
    let destination = match db::open_destination(&request.destination_path).await {
        Ok(pool) => pool,
        Err(e) => {
            db::close_pool(legacy, Side::Legacy).await;
            error!("移行エラー: {}", e);
            return Err(e);
        }
    };

    let result = execute(&legacy, &destination, schema_path.as_deref(), cfg).await;

    db::close_pool(legacy, Side::Legacy).await;
    db::close_pool(destination, Side::Destination).await;

    match &result {
        Ok(report) => {
            report.log_summary();
            report.record_metrics();
            info!("=== 移行完了 ===");
        }
        Err(e) => error!("移行エラー: {}", e),
    }
    result
}

fn ensure_parent_dir(path: &Path) -> MigrationResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            info!("移行先ディレクトリを作成します: {}", dir.display());
            std::fs::create_dir_all(dir)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn execute(
    legacy: &DbPool,
    destination: &DbPool,
    schema_path: Option<&Path>,
    cfg: &MigrationConfig,
) -> MigrationResult<MigrationReport> {
    let mut report = MigrationReport::new(Utc::now());
    let reader = LegacyReader::new(legacy);
    let use_tx = cfg.transaction_per_phase;

    report.schema = async {
        let script = match schema_path {
            Some(path) => {
                info!("スキーマファイル: {}", path.display());
                schema::load_script(path)?
            }
            None => {
                info!("スキーマファイル: 組み込みスキーマを使用");
                schema::BUNDLED_SCHEMA.to_string()
            }
        };
        Ok::<_, MigrationError>(schema::apply_schema(destination, &script).await)
    }
    .instrument(phase_span(Phase::Schema))
    .await?;

    let mut key_map = KeyMapper::new();
    let address_counts = async {
        let customers = reader.customers().await?;
        let counts = within_phase!(destination, use_tx, |conn| {
            let writer = DestinationWriter::new(conn);
            addresses::migrate_customers(&customers, &writer, &mut key_map, &cfg.shipper_type)
                .await?
        });
        Ok::<_, MigrationError>(counts)
    }
    .instrument(phase_span(Phase::Addresses))
    .await?;
    report.record_addresses(address_counts);

    report.products = async {
        let products = reader.products().await?;
        let count = within_phase!(destination, use_tx, |conn| {
            products::migrate_products(&products, &DestinationWriter::new(conn)).await?
        });
        Ok::<_, MigrationError>(count)
    }
    .instrument(phase_span(Phase::Products))
    .await?;

    let store_defaults = StoreDefaults {
        carrier_code: cfg.carrier_code.clone(),
        carrier_name: cfg.carrier_name.clone(),
        placeholder_name: cfg.default_store_name.clone(),
    };
    report.stores = async {
        let legacy_stores = reader.stores().await?;
        let count = within_phase!(destination, use_tx, |conn| {
            stores::migrate_stores(&legacy_stores, &DestinationWriter::new(conn), &store_defaults)
                .await?
        });
        Ok::<_, MigrationError>(count)
    }
    .instrument(phase_span(Phase::Stores))
    .await?;

    let order_outcome = async {
        let legacy_orders = reader.orders().await?;
        let outcome = within_phase!(destination, use_tx, |conn| {
            orders::migrate_orders(
                &legacy_orders,
                &DestinationWriter::new(conn),
                &key_map,
                cfg.fallback_store_id,
            )
            .await?
        });
        Ok::<_, MigrationError>(outcome)
    }
    .instrument(phase_span(Phase::Orders))
    .await?;
    report.record_orders(order_outcome.counts);

    let template = HistoryTemplate {
        description: cfg.history_description.clone(),
        actor: cfg.history_actor.clone(),
        policy: cfg.order_history_policy,
    };
    let history_counts = async {
        let history = reader.order_history().await?;
        let counts = within_phase!(destination, use_tx, |conn| {
            orders::migrate_order_history(
                &history,
                &DestinationWriter::new(conn),
                &order_outcome.migrated_ids,
                &template,
            )
            .await?
        });
        Ok::<_, MigrationError>(counts)
    }
    .instrument(phase_span(Phase::OrderHistory))
    .await?;
    report.record_history(history_counts);

    report.report_memos = async {
        let memos = reader.report_memos().await?;
        let count = within_phase!(destination, use_tx, |conn| {
            memos::migrate_report_memos(&memos, &DestinationWriter::new(conn)).await?
        });
        Ok::<_, MigrationError>(count)
    }
    .instrument(phase_span(Phase::ReportMemos))
    .await?;

    report.finish();
    Ok(report)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::{memory_pool, DbPool};
    use crate::migration::schema::{apply_schema, BUNDLED_SCHEMA};

    /// In-memory destination with the bundled schema applied.
    pub async fn destination() -> DbPool {
        let pool = memory_pool().await;
        let outcome = apply_schema(&pool, BUNDLED_SCHEMA).await;
        assert_eq!(outcome.failed, 0, "bundled schema should apply cleanly");
        pool
    }
}
