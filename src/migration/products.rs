use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbErr};
use tracing::info;

use super::codes::product_code;
use crate::destination::DestinationWriter;
use crate::legacy::{flag, LegacyProduct};

/// Copies the product catalog. A missing unit price becomes zero.
pub async fn migrate_products<C: ConnectionTrait>(
    products: &[LegacyProduct],
    writer: &DestinationWriter<'_, C>,
) -> Result<usize, DbErr> {
    info!("商品データ移行開始... ({}件)", products.len());

    for product in products {
        writer
            .insert_product(
                product.product_id,
                product_code(product.product_id),
                product.product_name.clone(),
                product.tanka.unwrap_or(Decimal::ZERO),
                flag(product.is_default),
            )
            .await?;
    }

    info!("商品データ移行完了: {}件", products.len());
    Ok(products.len())
}
