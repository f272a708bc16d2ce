//! 交易篩選

use chrono::NaiveDate;
use rop_core::{
    columns, ItemKeyed, MonthSelection, RawRow, RopConfig, RopError, SourceData,
    TransactionRecord, YearDataset, YearSelection,
};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::RopWarning;

/// 篩選結果
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// 匹配的交易（按年份選擇順序、資料列順序）
    pub records: Vec<TransactionRecord>,

    /// 逐年警告（缺欄位、缺資料集）
    pub warnings: Vec<RopWarning>,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 交易篩選器
pub struct FilterCalculator;

impl FilterCalculator {
    /// 依物料編號子字串、年份與月份篩選交易
    ///
    /// 只走訪選擇的年份。某年缺少必要欄位或沒有資料集時記錄警告並跳過該年，
    /// 其餘年份照常處理。
    pub fn filter(
        data: &SourceData,
        item_query: &str,
        years: &YearSelection,
        months: &MonthSelection,
        config: &RopConfig,
    ) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for year in years.iter() {
            let Some(dataset) = data.year(year) else {
                tracing::warn!("找不到 {} 年的資料集，跳過", year);
                outcome.warnings.push(RopWarning::warning(
                    year.to_string(),
                    RopError::DatasetNotFound(year).to_string(),
                ));
                continue;
            };

            match Self::filter_year(dataset, item_query, months, config) {
                Ok(records) => {
                    tracing::debug!("{} 年匹配 {} 筆交易", year, records.len());
                    outcome.records.extend(records);
                }
                Err(err) => {
                    tracing::warn!("{} 年資料無法篩選: {}", year, err);
                    outcome
                        .warnings
                        .push(RopWarning::error(year.to_string(), err.to_string()));
                }
            }
        }

        outcome
    }

    /// 篩選單一年度資料集
    pub fn filter_year(
        dataset: &YearDataset,
        item_query: &str,
        months: &MonthSelection,
        config: &RopConfig,
    ) -> rop_core::Result<Vec<TransactionRecord>> {
        dataset.require_columns(&columns::TRANSACTION_REQUIRED)?;

        let records = dataset
            .rows
            .iter()
            .map(|row| Self::to_record(row, dataset.year, &config.date_format))
            .filter(|record| record.matches_item(item_query))
            .filter(|record| months.accepts(record.month()))
            .collect();

        Ok(records)
    }

    /// 將原始資料列轉為交易記錄
    fn to_record(row: &RawRow, source_year: i32, date_format: &str) -> TransactionRecord {
        let cell = |name: &str| row.get(name).map(|v| v.trim()).unwrap_or("");
        let optional = |name: &str| {
            let value = cell(name);
            (!value.is_empty()).then(|| value.to_string())
        };

        TransactionRecord {
            item_code: cell(columns::ITEM_CODE).to_string(),
            item_name: optional(columns::ITEM_NAME),
            unit: optional(columns::UNIT),
            date: Self::parse_date(cell(columns::DATE), date_format),
            quantity: Self::parse_quantity(cell(columns::QUANTITY)),
            source_year,
        }
    }

    /// 按固定格式解析日期，失敗返回 None
    pub fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(value, format).ok()
    }

    /// 解析數量；空白或非數值視為 0
    pub fn parse_quantity(value: &str) -> Decimal {
        let value = value.trim();
        if value.is_empty() {
            return Decimal::ZERO;
        }
        Decimal::from_str(value)
            .or_else(|_| Decimal::from_scientific(value))
            .unwrap_or_else(|_| {
                tracing::debug!("無法解析數量 {:?}，以 0 計", value);
                Decimal::ZERO
            })
    }
}
