use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receiver role over an address
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Consignee")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ConsigneeId")]
    pub consignee_id: i64,
    #[sea_orm(column_name = "AddressId", unique)]
    pub address_id: i64,
    #[sea_orm(column_name = "ConsigneeCode")]
    pub consignee_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::address::Entity",
        from = "Column::AddressId",
        to = "super::address::Column::AddressId"
    )]
    Address,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
