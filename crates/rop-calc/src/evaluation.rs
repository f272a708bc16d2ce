//! 再訂購點評估

use rop_core::{
    EvaluationRow, LeadTime, LeadTimePeriod, LeadTimeStatus, LeadTimeTable, RopConfig, RopError,
    UsageRow, YearTable,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::lookup::find_first_match;
use crate::RopWarning;

/// 一期交期下的評估結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// 交期期別
    pub period: LeadTimePeriod,

    /// 期別標籤
    pub period_label: String,

    /// 實際使用的交期（找不到時為零）
    pub lead_time: LeadTime,

    /// 交期資料狀態
    pub lead_time_status: LeadTimeStatus,

    /// 逐年評估（年份順序同用量表）
    pub rows: YearTable<EvaluationRow>,

    /// 數值溢位的年份警告（由查詢結果統一輸出）
    #[serde(skip)]
    pub warnings: Vec<RopWarning>,
}

impl Evaluation {
    /// 是否缺少交期資料
    pub fn lead_time_missing(&self) -> bool {
        self.lead_time_status == LeadTimeStatus::Missing
    }
}

/// ROP 評估器
pub struct RopEvaluator;

impl RopEvaluator {
    /// 查詢交期表並評估
    pub fn evaluate_period(
        usage: &YearTable<UsageRow>,
        table: &LeadTimeTable,
        item_query: &str,
        config: &RopConfig,
    ) -> Evaluation {
        let lead_time = find_first_match(&table.records, item_query);
        if lead_time.is_none() {
            tracing::debug!("{:?} 交期表找不到物料 {}", table.period, item_query);
        }

        let mut evaluation = Self::evaluate(usage, lead_time, config);
        evaluation.period = table.period;
        evaluation.period_label = table.label.clone();
        evaluation
    }

    /// 依用量表與交期計算 ROP、最小庫存、訂購量、最大庫存
    ///
    /// 沒有交期時以零交期計算，並以 `LeadTimeStatus::Missing` 標示。
    /// 數值溢位的年份以全零列代替並記錄警告。
    pub fn evaluate(
        usage: &YearTable<UsageRow>,
        lead_time: Option<&LeadTime>,
        config: &RopConfig,
    ) -> Evaluation {
        let (lead_time, lead_time_status) = match lead_time {
            Some(lt) => (lt.clone(), LeadTimeStatus::Found),
            None => (LeadTime::zero(String::new()), LeadTimeStatus::Missing),
        };

        let mut rows = YearTable::new();
        let mut warnings = Vec::new();
        for (year, usage_row) in usage.iter() {
            let row = Self::evaluate_row(year, usage_row, &lead_time, config).unwrap_or_else(|err| {
                tracing::warn!("{}", err);
                warnings.push(RopWarning::error(year.to_string(), err.to_string()));
                EvaluationRow::zero(usage_row.rank_label)
            });
            rows.insert(year, row);
        }

        Evaluation {
            period: LeadTimePeriod::Current,
            period_label: String::new(),
            lead_time,
            lead_time_status,
            rows,
            warnings,
        }
    }

    /// 單一年度評估
    pub fn evaluate_row(
        year: i32,
        usage: &UsageRow,
        lead_time: &LeadTime,
        config: &RopConfig,
    ) -> rop_core::Result<EvaluationRow> {
        let overflow = |field: &str| RopError::Overflow {
            year,
            field: field.to_string(),
        };
        let mul = |a: Decimal, b: Decimal, field: &str| {
            a.checked_mul(b).ok_or_else(|| overflow(field))
        };

        let rop = config.round(mul(usage.daily_max, lead_time.maximal, "rop")?);
        let min_stock = rop
            .checked_sub(config.round(mul(usage.daily_avg, lead_time.average, "min_stock")?))
            .ok_or_else(|| overflow("min_stock"))?;
        let order_qty = config.round(mul(min_stock, config.order_qty_multiplier, "order_qty")?);
        let consumed = config.round(mul(usage.daily_min, lead_time.minimal, "max_stock")?);
        let max_stock = rop
            .checked_add(order_qty)
            .and_then(|v| v.checked_sub(consumed))
            .map(|v| config.round(v))
            .ok_or_else(|| overflow("max_stock"))?;

        Ok(EvaluationRow {
            usage_rounded: config.round_usage(usage.total_annual_usage),
            rop,
            min_stock,
            order_qty,
            max_stock,
            rank_label: usage.rank_label,
        })
    }
}
