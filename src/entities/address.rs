use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Canonical postal/contact record shared by shippers and consignees
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Address")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "AddressId")]
    pub address_id: i64,
    /// Phonetic reading of the name
    #[sea_orm(column_name = "Furigana")]
    pub furigana: Option<String>,
    #[sea_orm(column_name = "Name")]
    pub name: Option<String>,
    /// Honorific printed after the name
    #[sea_orm(column_name = "Keisho")]
    pub keisho: Option<String>,
    #[sea_orm(column_name = "CityName")]
    pub city_name: Option<String>,
    #[sea_orm(column_name = "PostalCD")]
    pub postal_cd: Option<String>,
    #[sea_orm(column_name = "PrefectureCD")]
    pub prefecture_cd: Option<String>,
    #[sea_orm(column_name = "PrefectureName")]
    pub prefecture_name: Option<String>,
    #[sea_orm(column_name = "RegionCD")]
    pub region_cd: Option<String>,
    #[sea_orm(column_name = "RegionName")]
    pub region_name: Option<String>,
    #[sea_orm(column_name = "Address1")]
    pub address1: Option<String>,
    #[sea_orm(column_name = "Address2")]
    pub address2: Option<String>,
    #[sea_orm(column_name = "Address3")]
    pub address3: Option<String>,
    #[sea_orm(column_name = "Address4")]
    pub address4: Option<String>,
    #[sea_orm(column_name = "Phone")]
    pub phone: Option<String>,
    #[sea_orm(column_name = "Fax")]
    pub fax: Option<String>,
    #[sea_orm(column_name = "Phone2")]
    pub phone2: Option<String>,
    #[sea_orm(column_name = "MailAddress")]
    pub mail_address: Option<String>,
    #[sea_orm(column_name = "Memo")]
    pub memo: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::shipper::Entity")]
    Shipper,
    #[sea_orm(has_one = "super::consignee::Entity")]
    Consignee,
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

impl ActiveModelBehavior for ActiveModel {}
