use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit trail row for an order
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "OrderHistory")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "OrderHistoryId")]
    pub order_history_id: i64,
    #[sea_orm(column_name = "OrderId")]
    pub order_id: i64,
    #[sea_orm(column_name = "StatusChange")]
    pub status_change: Option<String>,
    #[sea_orm(column_name = "NewStatus")]
    pub new_status: Option<String>,
    #[sea_orm(column_name = "ChangedBy")]
    pub changed_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::OrderId"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
