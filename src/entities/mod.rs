//! Destination tables read by the web back-office.
//!
//! Column names follow the PascalCase schema in `schema/schema.sql`; audit
//! columns (`CreatedAt`, `UpdatedAt`, `IsActive`) are left to their DDL defaults
//! and are not mapped here.

pub mod address;
pub mod consignee;
pub mod order;
pub mod order_history;
pub mod product_master;
pub mod report_memo;
pub mod shipper;
pub mod store;

pub use address::{Entity as Address, Model as AddressModel};
pub use consignee::{Entity as Consignee, Model as ConsigneeModel};
pub use order::{Entity as Order, Model as OrderModel};
pub use order_history::{Entity as OrderHistory, Model as OrderHistoryModel};
pub use product_master::{Entity as ProductMaster, Model as ProductMasterModel};
pub use report_memo::{Entity as ReportMemo, Model as ReportMemoModel};
pub use shipper::{Entity as Shipper, Model as ShipperModel};
pub use store::{Entity as Store, Model as StoreModel};
