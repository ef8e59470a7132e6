//! Read-only access to the desktop-era database.
//!
//! Table and column names (including the `LatestResceive` spelling) are the
//! legacy contract and must not be renamed. Every column is cast explicitly so
//! rows decode the same way no matter how the legacy export typed them.

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};
use tracing::debug;

const CUSTOMERS_SQL: &str = r#"
    SELECT CAST(CustNo AS INTEGER) AS cust_no,
           CAST(Furigana AS TEXT) AS furigana,
           CAST(CustName AS TEXT) AS cust_name,
           CAST(Keisho AS TEXT) AS keisho,
           CAST(CityName AS TEXT) AS city_name,
           CAST(PostalCD AS TEXT) AS postal_cd,
           CAST(PrefectureCD AS TEXT) AS prefecture_cd,
           CAST(PrefectureName AS TEXT) AS prefecture_name,
           CAST(RegionCD AS TEXT) AS region_cd,
           CAST(RegionName AS TEXT) AS region_name,
           CAST(Address1 AS TEXT) AS address1,
           CAST(Address2 AS TEXT) AS address2,
           CAST(Address3 AS TEXT) AS address3,
           CAST(Address4 AS TEXT) AS address4,
           CAST(Phone AS TEXT) AS phone,
           CAST(Fax AS TEXT) AS fax,
           CAST(Phone2 AS TEXT) AS phone2,
           CAST(MailAddress AS TEXT) AS mail_address,
           CAST(Memo AS TEXT) AS memo,
           CAST(LatestSend AS TEXT) AS latest_send,
           CAST(LatestResceive AS TEXT) AS latest_receive
    FROM CustomerMaster
    WHERE "Delete" IS NULL OR "Delete" = 0
    ORDER BY CustNo
"#;

const PRODUCTS_SQL: &str = r#"
    SELECT CAST(ProductID AS INTEGER) AS product_id,
           CAST(ProductName AS TEXT) AS product_name,
           CAST(Tanka AS REAL) AS tanka,
           CAST(IsDefault AS INTEGER) AS is_default
    FROM ProductMaster
    ORDER BY ProductID
"#;

const STORES_SQL: &str = r#"
    SELECT CAST(id AS INTEGER) AS id,
           CAST(StoreId1 AS TEXT) AS store_id1,
           CAST(StoreName AS TEXT) AS store_name,
           CAST(IsDefault AS INTEGER) AS is_default
    FROM Store
    ORDER BY id
"#;

const ORDERS_SQL: &str = r#"
    SELECT CAST(OrderID AS INTEGER) AS order_id,
           CAST(OrderDate AS TEXT) AS order_date,
           CAST(ReceiveCustID AS INTEGER) AS receive_cust_id,
           CAST(SendCustID AS INTEGER) AS send_cust_id,
           CAST(ProductID AS INTEGER) AS product_id
    FROM "Order"
    ORDER BY OrderID
"#;

const ORDER_HISTORY_SQL: &str = r#"
    SELECT CAST(OrderID AS INTEGER) AS order_id
    FROM OrderHistory
    ORDER BY rowid
"#;

const REPORT_MEMOS_SQL: &str = r#"
    SELECT CAST(ReportMemoId AS INTEGER) AS report_memo_id,
           CAST(ReportMemo AS TEXT) AS report_memo,
           CAST(MemoName AS TEXT) AS memo_name,
           CAST(IsDefault AS INTEGER) AS is_default
    FROM ReportMemo
    ORDER BY ReportMemoId
"#;

/// `CustomerMaster` row that is not soft-deleted
#[derive(Debug, Clone, Default, PartialEq, FromQueryResult)]
pub struct LegacyCustomer {
    pub cust_no: i64,
    pub furigana: Option<String>,
    pub cust_name: Option<String>,
    pub keisho: Option<String>,
    pub city_name: Option<String>,
    pub postal_cd: Option<String>,
    pub prefecture_cd: Option<String>,
    pub prefecture_name: Option<String>,
    pub region_cd: Option<String>,
    pub region_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub address4: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub phone2: Option<String>,
    pub mail_address: Option<String>,
    pub memo: Option<String>,
    /// Last outbound shipment; present means the customer has shipped goods
    pub latest_send: Option<String>,
    /// Last inbound delivery; present means the customer has received goods
    pub latest_receive: Option<String>,
}

impl LegacyCustomer {
    pub fn has_sent(&self) -> bool {
        self.latest_send.is_some()
    }

    pub fn has_received(&self) -> bool {
        self.latest_receive.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct LegacyProduct {
    pub product_id: i64,
    pub product_name: Option<String>,
    /// Unit price
    pub tanka: Option<Decimal>,
    pub is_default: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct LegacyStore {
    pub id: i64,
    /// Alternate store code entered by the operator
    pub store_id1: Option<String>,
    pub store_name: Option<String>,
    pub is_default: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct LegacyOrder {
    pub order_id: i64,
    pub order_date: Option<String>,
    pub receive_cust_id: Option<i64>,
    pub send_cust_id: Option<i64>,
    pub product_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromQueryResult)]
pub struct LegacyOrderHistory {
    pub order_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct LegacyReportMemo {
    pub report_memo_id: i64,
    pub report_memo: Option<String>,
    pub memo_name: Option<String>,
    pub is_default: Option<i64>,
}

/// Legacy numeric flags are NULL, 0 or 1; NULL reads as false.
pub fn flag(value: Option<i64>) -> bool {
    value.unwrap_or(0) != 0
}

/// Issues the fixed legacy SELECTs against a read-only connection.
pub struct LegacyReader<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LegacyReader<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    async fn fetch<T: FromQueryResult>(&self, table: &str, sql: &str) -> Result<Vec<T>, DbErr> {
        let rows = T::find_by_statement(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
            .all(self.db)
            .await?;
        debug!("Read {} rows from legacy {}", rows.len(), table);
        Ok(rows)
    }

    pub async fn customers(&self) -> Result<Vec<LegacyCustomer>, DbErr> {
        self.fetch("CustomerMaster", CUSTOMERS_SQL).await
    }

    pub async fn products(&self) -> Result<Vec<LegacyProduct>, DbErr> {
        self.fetch("ProductMaster", PRODUCTS_SQL).await
    }

    pub async fn stores(&self) -> Result<Vec<LegacyStore>, DbErr> {
        self.fetch("Store", STORES_SQL).await
    }

    pub async fn orders(&self) -> Result<Vec<LegacyOrder>, DbErr> {
        self.fetch("Order", ORDERS_SQL).await
    }

    pub async fn order_history(&self) -> Result<Vec<LegacyOrderHistory>, DbErr> {
        self.fetch("OrderHistory", ORDER_HISTORY_SQL).await
    }

    pub async fn report_memos(&self) -> Result<Vec<LegacyReportMemo>, DbErr> {
        self.fetch("ReportMemo", REPORT_MEMOS_SQL).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::migration::schema::split_statements;

    /// Legacy tables as exported from the desktop database.
    const LEGACY_SCHEMA: &str = include_str!("../tests/fixtures/legacy_schema.sql");

    async fn legacy_pool() -> crate::db::DbPool {
        let pool = memory_pool().await;
        for stmt in split_statements(LEGACY_SCHEMA) {
            pool.execute_unprepared(&stmt).await.unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn soft_deleted_customers_are_excluded() {
        let pool = legacy_pool().await;
        pool.execute_unprepared(
            r#"INSERT INTO CustomerMaster (CustNo, CustName, "Delete") VALUES
                (1, '山田 太郎', NULL),
                (2, '佐藤 花子', 0),
                (3, '削除 済み', 1)"#,
        )
        .await
        .unwrap();

        let customers = LegacyReader::new(&pool).customers().await.unwrap();
        let ids: Vec<i64> = customers.iter().map(|c| c.cust_no).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn customer_columns_are_null_safe() {
        let pool = legacy_pool().await;
        pool.execute_unprepared(
            "INSERT INTO CustomerMaster (CustNo, CustName, PostalCD, LatestSend) \
             VALUES (42, '山田商店', 1000001, '2023-01-01 00:00:00')",
        )
        .await
        .unwrap();

        let customers = LegacyReader::new(&pool).customers().await.unwrap();
        let customer = &customers[0];
        assert_eq!(customer.cust_no, 42);
        assert_eq!(customer.postal_cd.as_deref(), Some("1000001"));
        assert_eq!(customer.furigana, None);
        assert!(customer.has_sent());
        assert!(!customer.has_received());
    }

    #[tokio::test]
    async fn product_prices_and_flags_decode() {
        let pool = legacy_pool().await;
        pool.execute_unprepared(
            "INSERT INTO ProductMaster VALUES (3, 'Box A', NULL, 1), (4, 'Box B', 1250, NULL)",
        )
        .await
        .unwrap();

        let products = LegacyReader::new(&pool).products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].tanka, None);
        assert!(flag(products[0].is_default));
        assert_eq!(products[1].tanka, Some(Decimal::from(1250)));
        assert!(!flag(products[1].is_default));
    }

    #[tokio::test]
    async fn orders_and_history_are_read_in_id_order() {
        let pool = legacy_pool().await;
        pool.execute_unprepared(
            r#"INSERT INTO "Order" VALUES
                (101, '2023-02-01', 7, 5, 3),
                (100, '2023-01-15', 999, 5, 3)"#,
        )
        .await
        .unwrap();
        pool.execute_unprepared("INSERT INTO OrderHistory (OrderID) VALUES (100), (101)")
            .await
            .unwrap();

        let reader = LegacyReader::new(&pool);
        let orders = reader.orders().await.unwrap();
        assert_eq!(orders[0].order_id, 100);
        assert_eq!(orders[0].receive_cust_id, Some(999));
        assert_eq!(orders[1].send_cust_id, Some(5));

        let history = reader.order_history().await.unwrap();
        assert_eq!(
            history,
            vec![
                LegacyOrderHistory { order_id: 100 },
                LegacyOrderHistory { order_id: 101 }
            ]
        );
    }

    #[test]
    fn null_flags_read_as_false() {
        assert!(!flag(None));
        assert!(!flag(Some(0)));
        assert!(flag(Some(1)));
    }
}
