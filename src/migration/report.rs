use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;
use tracing::info;

use super::addresses::AddressCounts;
use super::orders::{HistoryCounts, OrderCounts};
use super::schema::SchemaOutcome;

/// Summary of a completed migration run, printed at the end and available as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub schema: SchemaOutcome,
    pub addresses: usize,
    pub shippers: usize,
    pub consignees: usize,
    pub products: usize,
    pub stores: usize,
    pub orders: usize,
    pub skipped_orders: usize,
    pub skipped_orders_unmapped_customer: usize,
    pub skipped_orders_missing_role: usize,
    pub order_history: usize,
    pub skipped_order_history: usize,
    pub report_memos: usize,
}

impl MigrationReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            schema: SchemaOutcome::default(),
            addresses: 0,
            shippers: 0,
            consignees: 0,
            products: 0,
            stores: 0,
            orders: 0,
            skipped_orders: 0,
            skipped_orders_unmapped_customer: 0,
            skipped_orders_missing_role: 0,
            order_history: 0,
            skipped_order_history: 0,
            report_memos: 0,
        }
    }

    pub fn record_addresses(&mut self, counts: AddressCounts) {
        self.addresses = counts.addresses;
        self.shippers = counts.shippers;
        self.consignees = counts.consignees;
    }

    pub fn record_orders(&mut self, counts: OrderCounts) {
        self.orders = counts.migrated;
        self.skipped_orders = counts.skipped();
        self.skipped_orders_unmapped_customer = counts.skipped_unmapped_customer;
        self.skipped_orders_missing_role = counts.skipped_missing_role;
    }

    pub fn record_history(&mut self, counts: HistoryCounts) {
        self.order_history = counts.migrated;
        self.skipped_order_history = counts.skipped;
    }

    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Per-entity counts in migration order, keyed by metric label
    pub fn entity_counts(&self) -> [(&'static str, usize); 8] {
        [
            ("addresses", self.addresses),
            ("shippers", self.shippers),
            ("consignees", self.consignees),
            ("products", self.products),
            ("stores", self.stores),
            ("orders", self.orders),
            ("order_history", self.order_history),
            ("report_memos", self.report_memos),
        ]
    }

    pub fn log_summary(&self) {
        info!("=== 移行結果 ===");
        info!(
            "スキーマ: {}件実行, {}件失敗",
            self.schema.executed, self.schema.failed
        );
        info!("住所: {}件", self.addresses);
        info!("荷主: {}件", self.shippers);
        info!("送付先: {}件", self.consignees);
        info!("商品: {}件", self.products);
        info!("店舗: {}件", self.stores);
        info!("注文: {}件", self.orders);
        info!(
            "スキップした注文: {}件 (顧客マッピングなし: {}件, Shipper/Consigneeなし: {}件)",
            self.skipped_orders,
            self.skipped_orders_unmapped_customer,
            self.skipped_orders_missing_role
        );
        info!("注文履歴: {}件", self.order_history);
        if self.skipped_order_history > 0 {
            info!("スキップした注文履歴: {}件", self.skipped_order_history);
        }
        info!("レポートメモ: {}件", self.report_memos);
        info!("所要時間: {} ms", self.elapsed().num_milliseconds());
    }

    pub fn record_metrics(&self) {
        for (entity, count) in self.entity_counts() {
            counter!("migration.rows.migrated", count as u64, "entity" => entity);
        }
        counter!("migration.rows.skipped", self.skipped_orders as u64, "entity" => "orders");
        counter!(
            "migration.rows.skipped",
            self.skipped_order_history as u64,
            "entity" => "order_history"
        );
        counter!("migration.schema.failed_statements", self.schema.failed as u64);
    }
}
