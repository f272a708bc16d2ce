//! 參考表查詢

use rop_core::ItemKeyed;

/// 返回第一筆物料編號包含查詢字串的記錄（不分大小寫）
///
/// 找不到時返回 None，由呼叫端區分「沒有資料」與「資料為零」。
pub fn find_first_match<'a, T: ItemKeyed>(records: &'a [T], needle: &str) -> Option<&'a T> {
    records.iter().find(|record| record.matches_item(needle))
}
