//! # ROP Calculation Engine
//!
//! 篩選、用量彙總、排名與再訂購點評估

pub mod evaluation;
pub mod filter;
pub mod lookup;
pub mod ranking;
pub mod search;
pub mod series;
pub mod usage;

// Re-export 主要類型
pub use evaluation::{Evaluation, RopEvaluator};
pub use filter::{FilterCalculator, FilterOutcome};
pub use lookup::find_first_match;
pub use ranking::{rank_labels, RankingCalculator};
pub use search::{RopEngine, SearchQuery, SearchReport};
pub use series::{MonthPoint, MonthlySeries, SeriesCalculator};
pub use usage::{UsageAggregator, UsageOutcome};

use serde::Serialize;

/// 查詢結果
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// 查詢條件
    pub query: SearchQuery,

    /// 報表（沒有匹配資料時為 None）
    pub report: Option<SearchReport>,

    /// 警告信息
    pub warnings: Vec<RopWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl SearchResult {
    /// 創建空的查詢結果
    pub fn empty(query: SearchQuery) -> Self {
        Self {
            query,
            report: None,
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 是否沒有匹配資料
    pub fn is_empty(&self) -> bool {
        self.report.is_none()
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: RopWarning) {
        self.warnings.push(warning);
    }

    /// 添加多筆警告
    pub fn extend_warnings(&mut self, warnings: impl IntoIterator<Item = RopWarning>) {
        self.warnings.extend(warnings);
    }
}

/// ROP 警告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RopWarning {
    /// 範圍（年份或資料表名稱）
    pub scope: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl RopWarning {
    pub fn new(scope: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            scope,
            message,
            severity,
        }
    }

    pub fn info(scope: String, message: String) -> Self {
        Self::new(scope, message, WarningSeverity::Info)
    }

    pub fn warning(scope: String, message: String) -> Self {
        Self::new(scope, message, WarningSeverity::Warning)
    }

    pub fn error(scope: String, message: String) -> Self {
        Self::new(scope, message, WarningSeverity::Error)
    }
}

impl std::fmt::Display for RopWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.scope, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
