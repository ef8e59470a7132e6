#![allow(dead_code)]

use std::path::{Path, PathBuf};

use highlandirect_migration::{
    db::{self, DbConfig, DbPool, OpenMode},
    errors::Side,
    migration::schema::split_statements,
    MigrationConfig, MigrationRequest,
};
use sea_orm::ConnectionTrait;
use tempfile::TempDir;

const LEGACY_SCHEMA: &str = include_str!("../fixtures/legacy_schema.sql");

/// Customers 5, 7, 42, 43 and 50 are live; 999 is soft-deleted.
///
/// 5 and 42 have only sent, 7 has only received, 43 has done both, 50 neither.
const CUSTOMERS: &str = r#"
INSERT INTO CustomerMaster (CustNo, Furigana, CustName, Keisho, PostalCD, PrefectureName, Address1, Phone, LatestSend, LatestResceive, "Delete") VALUES
    (5,   'ヤマダ', '山田商店', '様', '1000001', '東京都', '千代田区1-1', '03-0000-0001', '2023-02-01 09:00:00', NULL, 0),
    (7,   'スズキ', '鈴木 花子', '様', '5300001', '大阪府', '北区2-2', NULL, NULL, '2023-02-03 15:00:00', 0),
    (42,  NULL, '高原農園', '御中', NULL, NULL, NULL, NULL, '2023-01-01 00:00:00', NULL, NULL),
    (43,  'サトウ', '佐藤 一郎', '様', '0600001', '北海道', '中央区3-3', NULL, '2023-03-01 10:00:00', '2023-03-05 11:00:00', 0),
    (50,  NULL, '未取引', NULL, NULL, NULL, NULL, NULL, NULL, NULL, 0),
    (999, NULL, '削除済み', NULL, NULL, NULL, NULL, NULL, NULL, '2022-12-01 00:00:00', 1)
"#;

const PRODUCTS: &str = r#"
INSERT INTO ProductMaster (ProductID, ProductName, Tanka, IsDefault) VALUES
    (3, 'Box A', NULL, 1),
    (4, 'Box B', 1200, 0)
"#;

const STORES: &str = r#"
INSERT INTO Store (id, StoreId1, StoreName, IsDefault) VALUES
    (1, 'S001', '本店', 0),
    (7, '', '', 1)
"#;

/// 100 references soft-deleted customer 999; 103 is sent by a customer that never sent.
const ORDERS: &str = r#"
INSERT INTO "Order" (OrderID, OrderDate, SendCustID, ReceiveCustID, ProductID) VALUES
    (100, '2023-04-01 08:00:00', 5, 999, 3),
    (101, '2023-04-02 08:00:00', 5, 7, 3),
    (102, '2023-04-03 08:00:00', 42, 43, 4),
    (103, '2023-04-04 08:00:00', 7, 5, 3)
"#;

const ORDER_HISTORY: &str = r#"
INSERT INTO OrderHistory (OrderID, OrderDate, SendCustID, ReceiveCustID, ProductID) VALUES
    (101, '2023-04-02 08:00:00', 5, 7, 3),
    (102, '2023-04-03 08:00:00', 42, 43, 4)
"#;

const REPORT_MEMOS: &str = r#"
INSERT INTO ReportMemo (ReportMemoId, ReportMemo, MemoName, IsDefault) VALUES
    (1, '毎度ありがとうございます', '定型文', 1)
"#;

/// A legacy database file plus a destination path inside a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub legacy_path: PathBuf,
    pub destination_path: PathBuf,
}

impl Fixture {
    /// Legacy database populated with the standard rows.
    pub async fn new() -> Self {
        Self::with_extra(&[]).await
    }

    /// Standard rows followed by `extra` statements.
    pub async fn with_extra(extra: &[&str]) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let legacy_path = dir.path().join("MyData.sqlite");
        let destination_path = dir.path().join("out").join("highlandirect.sqlite");

        let pool = db::establish_connection_with_config(&DbConfig::sqlite_file(
            &legacy_path,
            OpenMode::ReadWriteCreate,
        ))
        .await
        .expect("create legacy fixture");

        let statements = split_statements(LEGACY_SCHEMA)
            .into_iter()
            .chain(
                [CUSTOMERS, PRODUCTS, STORES, ORDERS, ORDER_HISTORY, REPORT_MEMOS]
                    .into_iter()
                    .chain(extra.iter().copied())
                    .map(str::to_string),
            );
        for stmt in statements {
            pool.execute_unprepared(&stmt).await.expect("fixture statement");
        }
        db::close_pool(pool, Side::Legacy).await;

        Self {
            dir,
            legacy_path,
            destination_path,
        }
    }

    pub fn request(&self) -> MigrationRequest {
        self.request_into(&self.destination_path)
    }

    /// Request that relies on the built-in schema.
    pub fn request_with_bundled_schema(&self) -> MigrationRequest {
        MigrationRequest {
            schema_path: None,
            ..self.request()
        }
    }

    pub fn request_into(&self, destination: &Path) -> MigrationRequest {
        MigrationRequest {
            legacy_path: self.legacy_path.clone(),
            destination_path: destination.to_path_buf(),
            schema_path: Some(schema_path()),
        }
    }

    /// Reopens the migrated destination for assertions.
    pub async fn destination(&self) -> DbPool {
        db::open_destination(&self.destination_path)
            .await
            .expect("open destination")
    }
}

pub fn schema_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("schema")
        .join("schema.sql")
}

pub fn config() -> MigrationConfig {
    MigrationConfig::default()
}
