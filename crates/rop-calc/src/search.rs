//! ROP 查詢主流程

use rop_core::{
    DataProvider, ItemMeta, MonthSelection, ReferenceRop, RopConfig, RopError, RoundingMode,
    SourceData, UsageRow, YearSelection, YearTable,
};
use serde::Serialize;
use std::sync::Arc;

use crate::evaluation::{Evaluation, RopEvaluator};
use crate::filter::FilterCalculator;
use crate::lookup::find_first_match;
use crate::series::{MonthlySeries, SeriesCalculator};
use crate::usage::UsageAggregator;
use crate::{RopWarning, SearchResult};

/// 查詢條件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    /// 物料編號（子字串匹配）
    pub item_code: String,

    /// 年份（保留選擇順序）
    pub years: YearSelection,

    /// 月份
    pub months: MonthSelection,
}

impl SearchQuery {
    /// 創建查詢
    pub fn new(item_code: impl Into<String>, years: YearSelection) -> Self {
        Self {
            item_code: item_code.into(),
            years,
            months: MonthSelection::All,
        }
    }

    /// 建構器模式：設置月份
    pub fn with_months(mut self, months: MonthSelection) -> Self {
        self.months = months;
        self
    }

    /// 驗證查詢條件
    pub fn validate(&self) -> rop_core::Result<()> {
        if self.item_code.trim().is_empty() {
            return Err(RopError::Validation("物料編號不可為空".to_string()));
        }
        if self.years.is_empty() {
            return Err(RopError::Validation("至少需要選擇一個年份".to_string()));
        }
        Ok(())
    }
}

/// 查詢報表
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// 物料基本資料
    pub item_meta: ItemMeta,

    /// 匹配交易筆數
    pub record_count: usize,

    /// 用量表
    pub usage: YearTable<UsageRow>,

    /// 本期交期評估
    pub evaluation_current: Evaluation,

    /// 前期交期評估
    pub evaluation_prior: Evaluation,

    /// 現行 ROP
    pub reference_rop: ReferenceRop,

    /// 每月出庫序列
    pub monthly_series: Vec<MonthlySeries>,

    /// 計算與顯示使用的捨入方式
    pub rounding: RoundingMode,
}

/// ROP 查詢引擎
pub struct RopEngine {
    /// 來源資料（唯讀、可跨查詢共享）
    data: Arc<SourceData>,

    /// 計算參數
    config: RopConfig,
}

impl RopEngine {
    /// 創建新的查詢引擎
    pub fn new(data: Arc<SourceData>, config: RopConfig) -> Self {
        Self { data, config }
    }

    /// 從資料來源創建
    pub fn from_provider(provider: &dyn DataProvider, config: RopConfig) -> Self {
        Self::new(provider.source_data(), config)
    }

    /// 主查詢入口
    pub fn search(&self, query: &SearchQuery) -> rop_core::Result<SearchResult> {
        query.validate()?;
        let item_query = query.item_code.trim();

        tracing::info!(
            "開始 ROP 查詢：物料 {}，年份 {:?}，月份 {:?}",
            item_query,
            query.years.years(),
            query.months
        );

        let start_time = std::time::Instant::now();
        let mut result = SearchResult::empty(query.clone());

        // Step 1: 篩選交易
        tracing::debug!("Step 1: 篩選交易");
        let filtered = FilterCalculator::filter(
            &self.data,
            item_query,
            &query.years,
            &query.months,
            &self.config,
        );
        result.extend_warnings(filtered.warnings);

        let Some(first) = filtered.records.first() else {
            tracing::info!("物料 {} 沒有符合條件的交易", item_query);
            result.calculation_time_ms = Some(start_time.elapsed().as_millis());
            return Ok(result);
        };
        let item_meta = ItemMeta::from_record(first);
        tracing::debug!("匹配交易 {} 筆", filtered.records.len());

        // Step 2: 用量彙總與排名
        tracing::debug!("Step 2: 用量彙總");
        let usage_outcome =
            UsageAggregator::aggregate(&filtered.records, &query.years, &self.config);
        result.extend_warnings(usage_outcome.warnings);
        let usage = usage_outcome.table;

        // Step 3: 本期與前期交期評估
        tracing::debug!("Step 3: ROP 評估");
        let evaluation_current = RopEvaluator::evaluate_period(
            &usage,
            &self.data.lead_time_current,
            item_query,
            &self.config,
        );
        let evaluation_prior = RopEvaluator::evaluate_period(
            &usage,
            &self.data.lead_time_prior,
            item_query,
            &self.config,
        );
        for evaluation in [&evaluation_current, &evaluation_prior] {
            result.extend_warnings(evaluation.warnings.iter().cloned());
            if evaluation.lead_time_missing() {
                result.add_warning(RopWarning::warning(
                    format!("lead_time_{}", evaluation.period_label),
                    "找不到交期資料，以零交期計算".to_string(),
                ));
            }
        }

        // Step 4: 現行 ROP
        let reference_rop =
            ReferenceRop::from(find_first_match(&self.data.rop_reference, item_query));
        if !reference_rop.is_found() {
            result.add_warning(RopWarning::info(
                "rop_reference".to_string(),
                "找不到現行 ROP".to_string(),
            ));
        }

        // Step 5: 圖表序列
        tracing::debug!("Step 5: 圖表序列");
        let monthly_series = SeriesCalculator::monthly_totals(&filtered.records, &query.years);

        result.report = Some(SearchReport {
            item_meta,
            record_count: filtered.records.len(),
            usage,
            evaluation_current,
            evaluation_prior,
            reference_rop,
            monthly_series,
            rounding: self.config.rounding,
        });
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("ROP 查詢完成，耗時 {:?}", start_time.elapsed());

        Ok(result)
    }

    /// 取得來源資料
    pub fn data(&self) -> &SourceData {
        &self.data
    }

    /// 取得計算參數
    pub fn config(&self) -> &RopConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rop_core::{
        LeadTime, LeadTimePeriod, LeadTimeStatus, LeadTimeTable, RankLabel, RawRow, RopReference,
        StaticProvider, YearDataset,
    };
    use rust_decimal::Decimal;

    fn row(code: &str, date: &str, qty: &str) -> RawRow {
        [
            ("nobar", code),
            ("nabar", "ELBOW 90 DEG"),
            ("satuan", "PCS"),
            ("tanggal", date),
            ("jumlah", qty),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn headers() -> Vec<String> {
        ["nobar", "nabar", "satuan", "tanggal", "jumlah"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn engine() -> RopEngine {
        let data = SourceData::new()
            .with_year(YearDataset::new(
                2023,
                headers(),
                vec![row("BRG-001", "10/01/2023", "4000"), row("BRG-001", "11/07/2023", "290")],
            ))
            .with_year(YearDataset::new(
                2024,
                headers(),
                vec![row("BRG-001", "10/02/2024", "8580"), row("BRG-777", "10/02/2024", "1")],
            ))
            .with_rop_reference(vec![RopReference::new("BRG-001".to_string(), Decimal::from(300))])
            .with_lead_times(
                LeadTimeTable::new(
                    LeadTimePeriod::Current,
                    "2024",
                    vec![LeadTime::new(
                        "BRG-001".to_string(),
                        Decimal::from(5),
                        Decimal::from(7),
                        Decimal::from(10),
                    )],
                ),
                LeadTimeTable::new(LeadTimePeriod::Prior, "2023", Vec::new()),
            );

        RopEngine::from_provider(&StaticProvider::new(data), RopConfig::default())
    }

    #[test]
    fn test_empty_item_code_is_validation_error() {
        let result = engine().search(&SearchQuery::new("  ", YearSelection::new([2023])));

        assert!(matches!(result, Err(RopError::Validation(_))));
    }

    #[test]
    fn test_empty_year_selection_is_validation_error() {
        let result = engine().search(&SearchQuery::new("BRG", YearSelection::default()));

        assert!(matches!(result, Err(RopError::Validation(_))));
    }

    #[test]
    fn test_search_full_report() {
        let result = engine()
            .search(&SearchQuery::new("brg-001", YearSelection::new([2023, 2024])))
            .unwrap();

        let report = result.report.as_ref().unwrap();
        assert_eq!(report.item_meta.item_code, "BRG-001");
        assert_eq!(report.item_meta.item_name.as_deref(), Some("ELBOW 90 DEG"));
        assert_eq!(report.record_count, 3);
        assert_eq!(report.usage.years(), &[2023, 2024]);
        assert_eq!(report.usage.get(2024).unwrap().rank_label, RankLabel::Highest);
        assert_eq!(report.reference_rop, ReferenceRop::Found(Decimal::from(300)));

        assert_eq!(report.evaluation_current.lead_time_status, LeadTimeStatus::Found);
        assert_eq!(report.evaluation_prior.lead_time_status, LeadTimeStatus::Missing);
        assert_eq!(report.evaluation_current.rows.len(), 2);
        assert_eq!(report.evaluation_prior.rows.len(), 2);

        assert_eq!(report.monthly_series.len(), 2);
        assert!(result.calculation_time_ms.is_some());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].scope, "lead_time_2023");
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let result = engine()
            .search(&SearchQuery::new("ZZZ", YearSelection::new([2023, 2024])))
            .unwrap();

        assert!(result.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_search_month_filter_changes_usage() {
        let query = SearchQuery::new("BRG-001", YearSelection::new([2023]))
            .with_months(MonthSelection::from_months([7]).unwrap());

        let result = engine().search(&query).unwrap();
        let report = result.report.unwrap();

        assert_eq!(report.usage.get(2023).unwrap().total_annual_usage, Decimal::from(290));
    }

    #[test]
    fn test_empty_month_selection_finds_nothing() {
        let query = SearchQuery::new("BRG-001", YearSelection::new([2023, 2024]))
            .with_months(MonthSelection::from_months(Vec::<u32>::new()).unwrap());

        let result = engine().search(&query).unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_overflow_is_reported_not_panicking() {
        let data = SourceData::new().with_year(YearDataset::new(
            2024,
            headers(),
            vec![
                row("BRG-001", "10/02/2024", "79228162514264337593543950335"),
                row("BRG-001", "11/02/2024", "79228162514264337593543950335"),
            ],
        ));
        let engine = RopEngine::new(Arc::new(data), RopConfig::default());

        let result = engine
            .search(&SearchQuery::new("BRG-001", YearSelection::new([2024])))
            .unwrap();

        let overflow = result
            .warnings
            .iter()
            .find(|w| w.scope == "2024")
            .expect("overflow warning");
        assert!(overflow.message.contains("total_annual_usage"));
        let report = result.report.unwrap();
        assert_eq!(report.usage.get(2024).unwrap().total_annual_usage, Decimal::ZERO);
        assert_eq!(report.rounding, RoundingMode::HalfUp);
    }
}
