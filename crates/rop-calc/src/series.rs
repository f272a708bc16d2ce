//! 圖表資料序列（每月出庫量）

use rop_core::{month_name, TransactionRecord, YearSelection};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// 單月資料點
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPoint {
    /// 月份（1-12）
    pub month: u32,

    /// 月份名稱
    pub month_name: String,

    /// 當月出庫總量
    pub total: Decimal,
}

/// 單一年度的每月出庫序列（長條圖與折線圖共用）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySeries {
    pub year: i32,
    pub points: Vec<MonthPoint>,
}

impl MonthlySeries {
    /// 全年合計；溢位時返回 None
    pub fn total(&self) -> Option<Decimal> {
        self.points
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.total))
    }
}

/// 圖表序列計算器
pub struct SeriesCalculator;

impl SeriesCalculator {
    /// 按年份選擇順序產生每月出庫序列
    ///
    /// 只包含篩選結果中實際出現的年份與月份。
    pub fn monthly_totals(
        records: &[TransactionRecord],
        years: &YearSelection,
    ) -> Vec<MonthlySeries> {
        let mut by_year: BTreeMap<i32, BTreeMap<u32, Decimal>> = BTreeMap::new();

        for record in records {
            if let (Some(year), Some(month)) = (record.year(), record.month()) {
                let total = by_year
                    .entry(year)
                    .or_default()
                    .entry(month)
                    .or_insert(Decimal::ZERO);
                match total.checked_add(record.quantity) {
                    Some(sum) => *total = sum,
                    None => tracing::warn!("{} 年 {} 月出庫量溢位，略過一筆交易", year, month),
                }
            }
        }

        years
            .iter()
            .filter_map(|year| {
                by_year.get(&year).map(|months| MonthlySeries {
                    year,
                    points: months
                        .iter()
                        .map(|(month, total)| MonthPoint {
                            month: *month,
                            month_name: month_name(*month).unwrap_or_default().to_string(),
                            total: *total,
                        })
                        .collect(),
                })
            })
            .collect()
    }
}
