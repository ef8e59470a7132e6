use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reusable note template printed on reports
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ReportMemo")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ReportMemoId")]
    pub report_memo_id: i64,
    #[sea_orm(column_name = "MemoName")]
    pub memo_name: Option<String>,
    #[sea_orm(column_name = "MemoContent")]
    pub memo_content: Option<String>,
    #[sea_orm(column_name = "IsDefault")]
    pub is_default: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
