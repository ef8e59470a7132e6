use sea_orm::{ConnectionTrait, DbErr};
use tracing::{debug, info};

use super::codes::{store_code, store_name};
use crate::destination::{DestinationWriter, NewStore};
use crate::legacy::{flag, LegacyStore};

/// Values the legacy `Store` table never tracked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDefaults {
    pub carrier_code: String,
    pub carrier_name: String,
    pub placeholder_name: String,
}

pub async fn migrate_stores<C: ConnectionTrait>(
    stores: &[LegacyStore],
    writer: &DestinationWriter<'_, C>,
    defaults: &StoreDefaults,
) -> Result<usize, DbErr> {
    info!("店舗データ移行開始... ({}件)", stores.len());

    for legacy in stores {
        let new_store = NewStore {
            store_code: store_code(legacy.id, legacy.store_id1.as_deref()),
            store_name: store_name(legacy.store_name.as_deref(), &defaults.placeholder_name),
            carrier_code: defaults.carrier_code.clone(),
            carrier_name: defaults.carrier_name.clone(),
            is_default: flag(legacy.is_default),
        };
        debug!("Store {} -> {}", legacy.id, new_store.store_code);
        writer.insert_store(new_store).await?;
    }

    info!("店舗データ移行完了: {}件", stores.len());
    Ok(stores.len())
}
