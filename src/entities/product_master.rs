use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sellable item
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ProductMaster")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ProductId")]
    pub product_id: i64,
    #[sea_orm(column_name = "ProductCode")]
    pub product_code: Option<String>,
    #[sea_orm(column_name = "ProductName")]
    pub product_name: Option<String>,
    #[sea_orm(column_name = "UnitPrice")]
    pub unit_price: Decimal,
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
