//! 計算結果模型（用量表、評估表）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 用量排名標籤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankLabel {
    /// 最高
    Highest,
    /// 第二高
    SecondHighest,
    /// 第三高
    ThirdHighest,
    /// 第四高
    FourthHighest,
    /// 最低
    Lowest,
    /// 未標記
    Unranked,
}

impl RankLabel {
    /// 報表顯示文字
    pub fn label(&self) -> &'static str {
        match self {
            RankLabel::Highest => "Tertinggi",
            RankLabel::SecondHighest => "Tertinggi ke-2",
            RankLabel::ThirdHighest => "Tertinggi ke-3",
            RankLabel::FourthHighest => "Tertinggi ke-4",
            RankLabel::Lowest => "Terendah",
            RankLabel::Unranked => "-",
        }
    }

    /// 依顯示文字解析
    pub fn from_label(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "tertinggi" => Some(RankLabel::Highest),
            "tertinggi ke-2" => Some(RankLabel::SecondHighest),
            "tertinggi ke-3" => Some(RankLabel::ThirdHighest),
            "tertinggi ke-4" => Some(RankLabel::FourthHighest),
            "terendah" => Some(RankLabel::Lowest),
            "-" => Some(RankLabel::Unranked),
            _ => None,
        }
    }
}

impl std::fmt::Display for RankLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 年度用量（用量表的一欄）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRow {
    /// 年度總出庫量
    pub total_annual_usage: Decimal,

    /// 月用量
    pub monthly_usage: Decimal,

    /// 週用量
    pub weekly_usage: Decimal,

    /// 平均日用量
    pub daily_avg: Decimal,

    /// 最小日用量
    pub daily_min: Decimal,

    /// 最大日用量
    pub daily_max: Decimal,

    /// 排名標籤
    pub rank_label: RankLabel,
}

impl UsageRow {
    /// 全零用量（無法計算的年份）
    pub fn zero(rank_label: RankLabel) -> Self {
        Self {
            total_annual_usage: Decimal::ZERO,
            monthly_usage: Decimal::ZERO,
            weekly_usage: Decimal::ZERO,
            daily_avg: Decimal::ZERO,
            daily_min: Decimal::ZERO,
            daily_max: Decimal::ZERO,
            rank_label,
        }
    }
}

/// 年度評估結果（評估表的一欄）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRow {
    /// 年度總出庫量（兩位小數）
    pub usage_rounded: Decimal,

    /// 再訂購點
    pub rop: Decimal,

    /// 最小庫存
    pub min_stock: Decimal,

    /// 訂購量
    pub order_qty: Decimal,

    /// 最大庫存
    pub max_stock: Decimal,

    /// 排名標籤
    pub rank_label: RankLabel,
}

impl EvaluationRow {
    /// 全零評估（無法計算的年份）
    pub fn zero(rank_label: RankLabel) -> Self {
        Self {
            usage_rounded: Decimal::ZERO,
            rop: Decimal::ZERO,
            min_stock: Decimal::ZERO,
            order_qty: Decimal::ZERO,
            max_stock: Decimal::ZERO,
            rank_label,
        }
    }
}

/// 交期資料狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadTimeStatus {
    /// 找到交期記錄
    Found,
    /// 找不到交期記錄，以零交期計算
    Missing,
}

/// 物料基本資料（取自第一筆匹配交易）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub item_code: String,
    pub item_name: Option<String>,
    pub unit: Option<String>,
}

impl ItemMeta {
    pub fn from_record(record: &crate::TransactionRecord) -> Self {
        Self {
            item_code: record.item_code.clone(),
            item_name: record.item_name.clone(),
            unit: record.unit.clone(),
        }
    }

    /// 物料名稱，缺失時返回佔位文字
    pub fn item_name_or_placeholder(&self) -> &str {
        self.item_name.as_deref().unwrap_or("nabar TIDAK ADA")
    }

    /// 單位，缺失時返回佔位文字
    pub fn unit_or_placeholder(&self) -> &str {
        self.unit.as_deref().unwrap_or("satuan TIDAK ADA")
    }
}

/// 以年份為鍵的有序表
///
/// 年份順序由插入順序明確記錄，不依賴雜湊表的迭代順序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTable<T> {
    years: Vec<i32>,
    rows: HashMap<i32, T>,
}

impl<T> YearTable<T> {
    /// 創建空表
    pub fn new() -> Self {
        Self {
            years: Vec::new(),
            rows: HashMap::new(),
        }
    }

    /// 插入或覆寫一個年份；新年份追加到末尾
    pub fn insert(&mut self, year: i32, row: T) {
        if self.rows.insert(year, row).is_none() {
            self.years.push(year);
        }
    }

    pub fn get(&self, year: i32) -> Option<&T> {
        self.rows.get(&year)
    }

    /// 年份順序
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// 按年份順序迭代
    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> + '_ {
        self.years
            .iter()
            .filter_map(move |year| self.rows.get(year).map(|row| (*year, row)))
    }

    /// 按年份順序取出某一欄位
    pub fn column<V>(&self, f: impl Fn(&T) -> V) -> Vec<V> {
        self.iter().map(|(_, row)| f(row)).collect()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl<T> Default for YearTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
