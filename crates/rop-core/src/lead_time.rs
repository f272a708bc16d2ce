//! 交期模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::ItemKeyed;

/// 交期（天）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTime {
    /// 物料編號
    pub item_code: String,

    /// 最短交期
    pub minimal: Decimal,

    /// 平均交期
    pub average: Decimal,

    /// 最長交期
    pub maximal: Decimal,
}

impl LeadTime {
    /// 創建新的交期記錄
    pub fn new(item_code: String, minimal: Decimal, average: Decimal, maximal: Decimal) -> Self {
        Self {
            item_code,
            minimal,
            average,
            maximal,
        }
    }

    /// 無交期資料時使用的零交期
    pub fn zero(item_code: String) -> Self {
        Self::new(item_code, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }
}

impl ItemKeyed for LeadTime {
    fn item_code(&self) -> &str {
        &self.item_code
    }
}

/// 交期表期別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeadTimePeriod {
    /// 本期
    #[default]
    Current,
    /// 前期
    Prior,
}

/// 一期的交期表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadTimeTable {
    /// 期別
    pub period: LeadTimePeriod,

    /// 顯示用期別標籤（例如 "2024"）
    pub label: String,

    /// 交期記錄（保留來源順序，查詢時取第一筆匹配）
    pub records: Vec<LeadTime>,
}

impl LeadTimeTable {
    /// 創建新的交期表
    pub fn new(period: LeadTimePeriod, label: impl Into<String>, records: Vec<LeadTime>) -> Self {
        Self {
            period,
            label: label.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
