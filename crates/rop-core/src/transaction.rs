//! 出庫交易模型

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 以物料編號（nobar）為鍵的記錄
pub trait ItemKeyed {
    /// 物料編號
    fn item_code(&self) -> &str;

    /// 物料編號是否包含查詢字串（不分大小寫）
    ///
    /// 空白的物料編號永遠不匹配。
    fn matches_item(&self, needle: &str) -> bool {
        let code = self.item_code().trim();
        if code.is_empty() {
            return false;
        }
        code.to_lowercase().contains(&needle.trim().to_lowercase())
    }
}

/// 出庫交易（年度資料中的一列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// 物料編號
    pub item_code: String,

    /// 物料名稱
    pub item_name: Option<String>,

    /// 單位
    pub unit: Option<String>,

    /// 交易日期（無法解析時為 None）
    pub date: Option<NaiveDate>,

    /// 出庫數量
    pub quantity: Decimal,

    /// 來源資料集年份
    pub source_year: i32,
}

impl TransactionRecord {
    /// 創建新的交易記錄
    pub fn new(
        item_code: String,
        date: Option<NaiveDate>,
        quantity: Decimal,
        source_year: i32,
    ) -> Self {
        Self {
            item_code,
            item_name: None,
            unit: None,
            date,
            quantity,
            source_year,
        }
    }

    /// 建構器模式：設置物料名稱
    pub fn with_item_name(mut self, item_name: String) -> Self {
        self.item_name = Some(item_name);
        self
    }

    /// 建構器模式：設置單位
    pub fn with_unit(mut self, unit: String) -> Self {
        self.unit = Some(unit);
        self
    }

    /// 交易日期所在年份
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// 交易日期所在月份（1-12）
    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month())
    }
}

impl ItemKeyed for TransactionRecord {
    fn item_code(&self) -> &str {
        &self.item_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_record() {
        let record = TransactionRecord::new(
            "PIPE-001".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 15),
            Decimal::from(40),
            2024,
        )
        .with_item_name("Elbow 90".to_string())
        .with_unit("PCS".to_string());

        assert_eq!(record.year(), Some(2024));
        assert_eq!(record.month(), Some(3));
        assert_eq!(record.item_name.as_deref(), Some("Elbow 90"));
        assert_eq!(record.unit.as_deref(), Some("PCS"));
    }

    #[test]
    fn test_missing_date_has_no_year() {
        let record = TransactionRecord::new("PIPE-001".to_string(), None, Decimal::ONE, 2023);

        assert_eq!(record.year(), None);
        assert_eq!(record.month(), None);
    }

    #[test]
    fn test_item_match_is_case_insensitive_substring() {
        let record = TransactionRecord::new("BRG-00123a".to_string(), None, Decimal::ONE, 2023);

        assert!(record.matches_item("00123A"));
        assert!(record.matches_item("brg"));
        assert!(!record.matches_item("999"));
    }

    #[test]
    fn test_blank_item_code_never_matches() {
        let record = TransactionRecord::new("  ".to_string(), None, Decimal::ONE, 2023);

        assert!(!record.matches_item(""));
        assert!(!record.matches_item("1"));
    }
}
