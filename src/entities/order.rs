use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Status values stored in `Order.OrderStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Completed,
    Cancelled,
}

/// Shipment request
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Order")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "OrderId")]
    pub order_id: i64,
    #[sea_orm(column_name = "OrderNumber", unique)]
    pub order_number: Option<String>,
    /// Stored as the legacy text timestamp
    #[sea_orm(column_name = "OrderDate")]
    pub order_date: Option<String>,
    #[sea_orm(column_name = "ShipperId")]
    pub shipper_id: i64,
    #[sea_orm(column_name = "ConsigneeId")]
    pub consignee_id: i64,
    #[sea_orm(column_name = "ProductId")]
    pub product_id: Option<i64>,
    #[sea_orm(column_name = "StoreId")]
    pub store_id: Option<i64>,
    #[sea_orm(column_name = "OrderStatus")]
    pub order_status: String,
}

impl Model {
    pub fn status(&self) -> Option<OrderStatus> {
        self.order_status.parse().ok()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shipper::Entity",
        from = "Column::ShipperId",
        to = "super::shipper::Column::ShipperId"
    )]
    Shipper,
    #[sea_orm(
        belongs_to = "super::consignee::Entity",
        from = "Column::ConsigneeId",
        to = "super::consignee::Column::ConsigneeId"
    )]
    Consignee,
    #[sea_orm(
        belongs_to = "super::product_master::Entity",
        from = "Column::ProductId",
        to = "super::product_master::Column::ProductId"
    )]
    ProductMaster,
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::StoreId"
    )]
    Store,
    #[sea_orm(has_many = "super::order_history::Entity")]
    OrderHistory,
}

impl Related<super::shipper::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shipper.def()
    }
}

impl Related<super::consignee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consignee.def()
    }
}

impl Related<super::product_master::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductMaster.def()
    }
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::order_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
