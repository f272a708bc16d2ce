//! 年份與月份篩選條件

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 月份名稱（圖表座標軸使用）
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// 月份名稱（1-12），超出範圍返回 None
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize).copied())
}

/// 依名稱查詢月份（不分大小寫）
pub fn month_from_name(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|idx| idx as u32 + 1)
}

/// 使用者選擇的年份
///
/// 保留選擇順序，所有下游表格的欄位順序都依此決定。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearSelection {
    years: Vec<i32>,
}

impl YearSelection {
    /// 創建年份選擇（重複年份只保留第一次出現）
    pub fn new(years: impl IntoIterator<Item = i32>) -> Self {
        let mut ordered: Vec<i32> = Vec::new();
        for year in years {
            if !ordered.contains(&year) {
                ordered.push(year);
            }
        }
        Self { years: ordered }
    }

    /// 按選擇順序的年份
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }
}

impl FromIterator<i32> for YearSelection {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// 月份篩選
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthSelection {
    /// 所有月份（不篩選）
    #[default]
    All,

    /// 指定月份（1-12）
    Months(BTreeSet<u32>),
}

impl MonthSelection {
    /// 依月份編號創建篩選
    ///
    /// 月份必須在 1-12 之間。空集合表示沒有任何月份通過，
    /// 只有 `MonthSelection::All` 會關閉月份篩選。
    pub fn from_months(months: impl IntoIterator<Item = u32>) -> crate::Result<Self> {
        let mut set = BTreeSet::new();
        for month in months {
            if !(1..=12).contains(&month) {
                return Err(crate::RopError::Validation(format!("月份超出範圍: {}", month)));
            }
            set.insert(month);
        }
        Ok(MonthSelection::Months(set))
    }

    /// 是否為所有月份
    pub fn is_all(&self) -> bool {
        matches!(self, MonthSelection::All)
    }

    /// 檢查交易月份是否通過篩選
    ///
    /// 啟用月份篩選時，日期缺失（month 為 None）的交易不通過。
    pub fn accepts(&self, month: Option<u32>) -> bool {
        match self {
            MonthSelection::All => true,
            MonthSelection::Months(set) => month.map(|m| set.contains(&m)).unwrap_or(false),
        }
    }
}
