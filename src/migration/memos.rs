use sea_orm::{ConnectionTrait, DbErr};
use tracing::info;

use crate::destination::DestinationWriter;
use crate::legacy::{flag, LegacyReportMemo};

pub async fn migrate_report_memos<C: ConnectionTrait>(
    memos: &[LegacyReportMemo],
    writer: &DestinationWriter<'_, C>,
) -> Result<usize, DbErr> {
    info!("レポートメモ移行開始... ({}件)", memos.len());

    for memo in memos {
        writer
            .insert_report_memo(
                memo.memo_name.clone(),
                memo.report_memo.clone(),
                flag(memo.is_default),
            )
            .await?;
    }

    info!("レポートメモ移行完了: {}件", memos.len());
    Ok(memos.len())
}
