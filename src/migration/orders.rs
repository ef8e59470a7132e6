//! Orders and their history.
//!
//! An order is written only when both of its customers resolve through the
//! key mapper and the resulting addresses carry the matching role. Anything
//! else is skipped with the legacy order id in the log; nothing is written
//! partially.

use sea_orm::{ConnectionTrait, DbErr};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

use super::codes::order_number;
use super::key_map::KeyMapper;
use crate::config::OrderHistoryPolicy;
use crate::destination::{DestinationWriter, NewOrder};
use crate::entities::order::OrderStatus;
use crate::legacy::{LegacyOrder, LegacyOrderHistory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderCounts {
    pub migrated: usize,
    /// Sender or receiver customer has no migrated address
    pub skipped_unmapped_customer: usize,
    /// Address exists but lacks the shipper/consignee role
    pub skipped_missing_role: usize,
}

impl OrderCounts {
    pub fn skipped(&self) -> usize {
        self.skipped_unmapped_customer + self.skipped_missing_role
    }
}

/// Orders phase result; `migrated_ids` holds legacy order ids that were written.
#[derive(Debug, Clone, Default)]
pub struct OrderOutcome {
    pub counts: OrderCounts,
    pub migrated_ids: HashSet<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryCounts {
    pub migrated: usize,
    pub skipped: usize,
}

/// Fixed text written on every migrated history row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTemplate {
    pub description: String,
    pub actor: String,
    pub policy: OrderHistoryPolicy,
}

enum Resolution {
    Resolved { shipper_id: i64, consignee_id: i64 },
    UnmappedCustomer,
    MissingRole,
}

async fn resolve_parties<C: ConnectionTrait>(
    order: &LegacyOrder,
    writer: &DestinationWriter<'_, C>,
    key_map: &KeyMapper,
) -> Result<Resolution, DbErr> {
    let send_address = order.send_cust_id.and_then(|id| key_map.address_for(id));
    let receive_address = order.receive_cust_id.and_then(|id| key_map.address_for(id));

    let (Some(send_address), Some(receive_address)) = (send_address, receive_address) else {
        return Ok(Resolution::UnmappedCustomer);
    };

    let shipper_id = writer.shipper_id_for_address(send_address).await?;
    let consignee_id = writer.consignee_id_for_address(receive_address).await?;

    Ok(match (shipper_id, consignee_id) {
        (Some(shipper_id), Some(consignee_id)) => Resolution::Resolved {
            shipper_id,
            consignee_id,
        },
        _ => Resolution::MissingRole,
    })
}

/// Writes every resolvable order as completed, keeping the legacy id.
///
/// Products are referenced by their legacy id as-is. All orders go to the
/// default store, or to `fallback_store_id` when none is flagged.
pub async fn migrate_orders<C: ConnectionTrait>(
    orders: &[LegacyOrder],
    writer: &DestinationWriter<'_, C>,
    key_map: &KeyMapper,
    fallback_store_id: i64,
) -> Result<OrderOutcome, DbErr> {
    info!("注文データ移行開始... ({}件)", orders.len());

    let store_id = match writer.default_store_id().await? {
        Some(id) => id,
        None => {
            warn!(
                "既定の店舗がありません。店舗ID {} を使用します",
                fallback_store_id
            );
            fallback_store_id
        }
    };

    let mut outcome = OrderOutcome::default();

    for order in orders {
        match resolve_parties(order, writer, key_map).await? {
            Resolution::UnmappedCustomer => {
                warn!(
                    "顧客マッピングが見つかりません: Order {} (送り主 {:?}, 届け先 {:?})",
                    order.order_id, order.send_cust_id, order.receive_cust_id
                );
                outcome.counts.skipped_unmapped_customer += 1;
            }
            Resolution::MissingRole => {
                warn!(
                    "Shipper/Consignee IDが見つかりません: Order {}",
                    order.order_id
                );
                outcome.counts.skipped_missing_role += 1;
            }
            Resolution::Resolved {
                shipper_id,
                consignee_id,
            } => {
                writer
                    .insert_order(NewOrder {
                        order_id: order.order_id,
                        order_number: order_number(order.order_id),
                        order_date: order.order_date.clone(),
                        shipper_id,
                        consignee_id,
                        product_id: order.product_id,
                        store_id,
                        status: OrderStatus::Completed,
                    })
                    .await?;
                outcome.migrated_ids.insert(order.order_id);
                outcome.counts.migrated += 1;
            }
        }
    }

    info!(
        "注文データ移行完了: {}件 (スキップ: {}件)",
        outcome.counts.migrated,
        outcome.counts.skipped()
    );
    Ok(outcome)
}

/// Writes one history row per legacy history row.
///
/// With `CopyAll` the referenced order is not checked, so a history row for a
/// skipped order fails on the foreign key. `SkipOrphans` skips those rows.
pub async fn migrate_order_history<C: ConnectionTrait>(
    history: &[LegacyOrderHistory],
    writer: &DestinationWriter<'_, C>,
    migrated_orders: &HashSet<i64>,
    template: &HistoryTemplate,
) -> Result<HistoryCounts, DbErr> {
    info!(
        "注文履歴移行開始... ({}件, ポリシー: {})",
        history.len(),
        template.policy
    );
    let mut counts = HistoryCounts::default();

    for row in history {
        if template.policy == OrderHistoryPolicy::SkipOrphans
            && !migrated_orders.contains(&row.order_id)
        {
            warn!(
                "注文が移行されていないため履歴をスキップします: Order {}",
                row.order_id
            );
            counts.skipped += 1;
            continue;
        }

        writer
            .insert_order_history(
                row.order_id,
                &template.description,
                OrderStatus::Completed,
                &template.actor,
            )
            .await?;
        counts.migrated += 1;
    }

    info!(
        "注文履歴移行完了: {}件 (スキップ: {}件)",
        counts.migrated, counts.skipped
    );
    Ok(counts)
}
