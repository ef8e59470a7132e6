use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Collection/dispatch point
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Store")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "StoreId")]
    pub store_id: i64,
    #[sea_orm(column_name = "StoreCode")]
    pub store_code: Option<String>,
    #[sea_orm(column_name = "StoreName")]
    pub store_name: Option<String>,
    #[sea_orm(column_name = "CarrierCode")]
    pub carrier_code: Option<String>,
    #[sea_orm(column_name = "CarrierName")]
    pub carrier_name: Option<String>,
    #[sea_orm(column_name = "IsDefault")]
    pub is_default: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
