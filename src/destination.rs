//! Inserts into the new schema, returning the row id each insert produced.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::{
    address, consignee, order, order_history, product_master, report_memo, shipper, store,
};
use crate::legacy::LegacyCustomer;

/// Values for a new `Store` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub store_code: String,
    pub store_name: String,
    pub carrier_code: String,
    pub carrier_name: String,
    pub is_default: bool,
}

/// Values for a new `Order` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Kept equal to the legacy order id
    pub order_id: i64,
    pub order_number: String,
    pub order_date: Option<String>,
    pub shipper_id: i64,
    pub consignee_id: i64,
    pub product_id: Option<i64>,
    pub store_id: i64,
    pub status: order::OrderStatus,
}

/// Insert and lookup operations against the destination connection.
pub struct DestinationWriter<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DestinationWriter<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Copies every postal/contact column; NULL legacy values stay NULL.
    pub async fn insert_address(&self, customer: &LegacyCustomer) -> Result<i64, DbErr> {
        let model = address::ActiveModel {
            address_id: NotSet,
            furigana: Set(customer.furigana.clone()),
            name: Set(customer.cust_name.clone()),
            keisho: Set(customer.keisho.clone()),
            city_name: Set(customer.city_name.clone()),
            postal_cd: Set(customer.postal_cd.clone()),
            prefecture_cd: Set(customer.prefecture_cd.clone()),
            prefecture_name: Set(customer.prefecture_name.clone()),
            region_cd: Set(customer.region_cd.clone()),
            region_name: Set(customer.region_name.clone()),
            address1: Set(customer.address1.clone()),
            address2: Set(customer.address2.clone()),
            address3: Set(customer.address3.clone()),
            address4: Set(customer.address4.clone()),
            phone: Set(customer.phone.clone()),
            fax: Set(customer.fax.clone()),
            phone2: Set(customer.phone2.clone()),
            mail_address: Set(customer.mail_address.clone()),
            memo: Set(customer.memo.clone()),
        };
        let res = address::Entity::insert(model).exec(self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_shipper(
        &self,
        address_id: i64,
        code: String,
        shipper_type: &str,
    ) -> Result<i64, DbErr> {
        let model = shipper::ActiveModel {
            shipper_id: NotSet,
            address_id: Set(address_id),
            shipper_code: Set(Some(code)),
            shipper_type: Set(Some(shipper_type.to_string())),
        };
        let res = shipper::Entity::insert(model).exec(self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_consignee(&self, address_id: i64, code: String) -> Result<i64, DbErr> {
        let model = consignee::ActiveModel {
            consignee_id: NotSet,
            address_id: Set(address_id),
            consignee_code: Set(Some(code)),
        };
        let res = consignee::Entity::insert(model).exec(self.db).await?;
        Ok(res.last_insert_id)
    }

    /// Inserts with an explicit id so orders can keep referencing legacy product ids.
    pub async fn insert_product(
        &self,
        product_id: i64,
        code: String,
        name: Option<String>,
        unit_price: Decimal,
        is_default: bool,
    ) -> Result<i64, DbErr> {
        let model = product_master::ActiveModel {
            product_id: Set(product_id),
            product_code: Set(Some(code)),
            product_name: Set(name),
            unit_price: Set(unit_price),
            is_default: Set(is_default),
        };
        let res = product_master::Entity::insert(model).exec(self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_store(&self, new_store: NewStore) -> Result<i64, DbErr> {
        let model = store::ActiveModel {
            store_id: NotSet,
            store_code: Set(Some(new_store.store_code)),
            store_name: Set(Some(new_store.store_name)),
            carrier_code: Set(Some(new_store.carrier_code)),
            carrier_name: Set(Some(new_store.carrier_name)),
            is_default: Set(new_store.is_default),
        };
        let res = store::Entity::insert(model).exec(self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_order(&self, new_order: NewOrder) -> Result<i64, DbErr> {
        let model = order::ActiveModel {
            order_id: Set(new_order.order_id),
            order_number: Set(Some(new_order.order_number)),
            order_date: Set(new_order.order_date),
            shipper_id: Set(new_order.shipper_id),
            consignee_id: Set(new_order.consignee_id),
            product_id: Set(new_order.product_id),
            store_id: Set(Some(new_order.store_id)),
            order_status: Set(new_order.status.to_string()),
        };
        let res = order::Entity::insert(model).exec(self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_order_history(
        &self,
        order_id: i64,
        description: &str,
        status: order::OrderStatus,
        actor: &str,
    ) -> Result<i64, DbErr> {
        let model = order_history::ActiveModel {
            order_history_id: NotSet,
            order_id: Set(order_id),
            status_change: Set(Some(description.to_string())),
            new_status: Set(Some(status.to_string())),
            changed_by: Set(Some(actor.to_string())),
        };
        let res = order_history::Entity::insert(model).exec(self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn insert_report_memo(
        &self,
        name: Option<String>,
        content: Option<String>,
        is_default: bool,
    ) -> Result<i64, DbErr> {
        let model = report_memo::ActiveModel {
            report_memo_id: NotSet,
            memo_name: Set(name),
            memo_content: Set(content),
            is_default: Set(is_default),
        };
        let res = report_memo::Entity::insert(model).exec(self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn shipper_id_for_address(&self, address_id: i64) -> Result<Option<i64>, DbErr> {
        shipper::Entity::find()
            .select_only()
            .column(shipper::Column::ShipperId)
            .filter(shipper::Column::AddressId.eq(address_id))
            .into_tuple::<i64>()
            .one(self.db)
            .await
    }

    pub async fn consignee_id_for_address(&self, address_id: i64) -> Result<Option<i64>, DbErr> {
        consignee::Entity::find()
            .select_only()
            .column(consignee::Column::ConsigneeId)
            .filter(consignee::Column::AddressId.eq(address_id))
            .into_tuple::<i64>()
            .one(self.db)
            .await
    }

    /// First store flagged default, if any.
    pub async fn default_store_id(&self) -> Result<Option<i64>, DbErr> {
        store::Entity::find()
            .select_only()
            .column(store::Column::StoreId)
            .filter(store::Column::IsDefault.eq(true))
            .order_by_asc(store::Column::StoreId)
            .into_tuple::<i64>()
            .one(self.db)
            .await
    }
}
