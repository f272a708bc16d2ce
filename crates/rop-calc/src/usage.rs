//! 年度用量彙總

use rop_core::{
    RankLabel, RopConfig, RopError, TransactionRecord, UsageRow, YearSelection, YearTable,
};
use rust_decimal::Decimal;

use crate::ranking::RankingCalculator;
use crate::RopWarning;

/// 彙總結果
#[derive(Debug, Clone, Default)]
pub struct UsageOutcome {
    /// 用量表（年份順序同選擇）
    pub table: YearTable<UsageRow>,

    /// 數值溢位的年份警告
    pub warnings: Vec<RopWarning>,
}

/// 用量彙總器
pub struct UsageAggregator;

impl UsageAggregator {
    /// 彙總篩選後交易，產生用量表
    ///
    /// 表的長度與年份順序與 `years` 一致；沒有交易的年份用量為 0。
    /// 數值溢位的年份記錄警告並以 0 計。
    pub fn aggregate(
        records: &[TransactionRecord],
        years: &YearSelection,
        config: &RopConfig,
    ) -> UsageOutcome {
        let mut outcome = UsageOutcome::default();

        let totals: Vec<(i32, Decimal)> = years
            .iter()
            .map(|year| match Self::annual_total(records, year) {
                Ok(total) => (year, total),
                Err(err) => {
                    tracing::warn!("{}", err);
                    outcome
                        .warnings
                        .push(RopWarning::error(year.to_string(), err.to_string()));
                    (year, Decimal::ZERO)
                }
            })
            .collect();
        let ranks = RankingCalculator::assign(&totals);

        for (year, total) in totals {
            let rank_label = ranks.get(&year).copied().unwrap_or(RankLabel::Unranked);
            let row = Self::derive_rates(year, total, rank_label, config).unwrap_or_else(|err| {
                tracing::warn!("{}", err);
                outcome
                    .warnings
                    .push(RopWarning::error(year.to_string(), err.to_string()));
                UsageRow::zero(rank_label)
            });
            outcome.table.insert(year, row);
        }

        tracing::debug!("用量表年份: {:?}", outcome.table.years());
        outcome
    }

    /// 年度總出庫量（依交易日期的年份歸屬，日期缺失的交易不計入）
    pub fn annual_total(records: &[TransactionRecord], year: i32) -> rop_core::Result<Decimal> {
        records
            .iter()
            .filter(|r| r.year() == Some(year))
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.quantity))
            .ok_or_else(|| overflow(year, "total_annual_usage"))
    }

    /// 由年用量推導月/週/日用量
    pub fn derive_rates(
        year: i32,
        total: Decimal,
        rank_label: RankLabel,
        config: &RopConfig,
    ) -> rop_core::Result<UsageRow> {
        let monthly_usage = total
            .checked_div(config.months_per_year)
            .ok_or_else(|| overflow(year, "monthly_usage"))?;
        let weekly_usage = monthly_usage
            .checked_div(config.weeks_per_month)
            .ok_or_else(|| overflow(year, "weekly_usage"))?;
        let daily_avg = weekly_usage
            .checked_div(config.days_per_week)
            .ok_or_else(|| overflow(year, "daily_avg"))?;

        Ok(UsageRow {
            total_annual_usage: total,
            monthly_usage,
            weekly_usage,
            daily_avg,
            daily_min: daily_avg
                .checked_mul(config.daily_min_factor)
                .ok_or_else(|| overflow(year, "daily_min"))?,
            daily_max: daily_avg
                .checked_mul(config.daily_max_factor)
                .ok_or_else(|| overflow(year, "daily_max"))?,
            rank_label,
        })
    }
}

fn overflow(year: i32, field: &str) -> RopError {
    RopError::Overflow {
        year,
        field: field.to_string(),
    }
}
