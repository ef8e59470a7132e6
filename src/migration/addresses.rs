//! Customers to `Address`, plus the `Shipper`/`Consignee` roles their history implies.

use sea_orm::{ConnectionTrait, DbErr};
use serde::Serialize;
use tracing::{debug, info};

use super::codes::{consignee_code, shipper_code};
use super::key_map::KeyMapper;
use crate::destination::DestinationWriter;
use crate::legacy::LegacyCustomer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AddressCounts {
    pub addresses: usize,
    pub shippers: usize,
    pub consignees: usize,
}

/// Writes one address per customer and records it in `key_map`.
///
/// A shipper is added when the customer has ever sent goods, a consignee when
/// it has ever received goods; a customer can be both or neither.
pub async fn migrate_customers<C: ConnectionTrait>(
    customers: &[LegacyCustomer],
    writer: &DestinationWriter<'_, C>,
    key_map: &mut KeyMapper,
    shipper_type: &str,
) -> Result<AddressCounts, DbErr> {
    info!("顧客データ移行開始... ({}件)", customers.len());
    let mut counts = AddressCounts::default();

    for customer in customers {
        let address_id = writer.insert_address(customer).await?;
        key_map.insert(customer.cust_no, address_id);
        counts.addresses += 1;

        if customer.has_sent() {
            writer
                .insert_shipper(address_id, shipper_code(customer.cust_no), shipper_type)
                .await?;
            counts.shippers += 1;
        }

        if customer.has_received() {
            writer
                .insert_consignee(address_id, consignee_code(customer.cust_no))
                .await?;
            counts.consignees += 1;
        }

        debug!(
            "Customer {} -> address {} (shipper: {}, consignee: {})",
            customer.cust_no,
            address_id,
            customer.has_sent(),
            customer.has_received()
        );
    }

    info!("住所データ移行完了: {}件", counts.addresses);
    info!("荷主データ移行完了: {}件 (LatestSendがある顧客)", counts.shippers);
    info!(
        "送付先データ移行完了: {}件 (LatestResceiveがある顧客)",
        counts.consignees
    );
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::test_support::destination;
    use crate::entities::{consignee, shipper};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    fn customer(cust_no: i64, sent: bool, received: bool) -> LegacyCustomer {
        LegacyCustomer {
            cust_no,
            cust_name: Some(format!("顧客{}", cust_no)),
            latest_send: sent.then(|| "2023-01-01 00:00:00".to_string()),
            latest_receive: received.then(|| "2023-02-01 00:00:00".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn every_customer_gets_an_address_and_a_mapping() {
        let pool = destination().await;
        let writer = DestinationWriter::new(&pool);
        let customers = vec![
            customer(1, false, false),
            customer(2, true, false),
            customer(3, false, true),
            customer(4, true, true),
        ];
        let mut key_map = KeyMapper::new();

        let counts = migrate_customers(&customers, &writer, &mut key_map, "既存荷主")
            .await
            .unwrap();

        assert_eq!(
            counts,
            AddressCounts {
                addresses: 4,
                shippers: 2,
                consignees: 2
            }
        );
        assert_eq!(key_map.len(), 4);
        for c in &customers {
            assert!(key_map.contains(c.cust_no));
        }
    }

    #[tokio::test]
    async fn sender_only_customer_becomes_shipper_only() {
        let pool = destination().await;
        let writer = DestinationWriter::new(&pool);
        let mut key_map = KeyMapper::new();

        migrate_customers(&[customer(42, true, false)], &writer, &mut key_map, "既存荷主")
            .await
            .unwrap();

        let address_id = key_map.address_for(42).unwrap();
        let shipper = shipper::Entity::find()
            .filter(shipper::Column::AddressId.eq(address_id))
            .one(&pool)
            .await
            .unwrap()
            .expect("shipper row");
        assert_eq!(shipper.shipper_code.as_deref(), Some("SHIP0042"));
        assert_eq!(shipper.shipper_type.as_deref(), Some("既存荷主"));

        let consignees = consignee::Entity::find()
            .filter(consignee::Column::AddressId.eq(address_id))
            .count(&pool)
            .await
            .unwrap();
        assert_eq!(consignees, 0);
    }
}
