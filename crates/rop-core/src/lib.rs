//! # ROP Core
//!
//! 再訂購點（ROP）評估的核心資料模型與類型定義

pub mod config;
pub mod dataset;
pub mod lead_time;
pub mod provider;
pub mod reference;
pub mod report;
pub mod selection;
pub mod transaction;

// Re-export 主要類型
pub use config::{RopConfig, RoundingMode};
pub use dataset::{columns, RawRow, SourceData, YearDataset};
pub use lead_time::{LeadTime, LeadTimePeriod, LeadTimeTable};
pub use provider::{DataProvider, StaticProvider};
pub use reference::{ReferenceRop, RopReference};
pub use report::{
    EvaluationRow, ItemMeta, LeadTimeStatus, RankLabel, UsageRow, YearTable,
};
pub use selection::{month_from_name, month_name, MonthSelection, YearSelection, MONTH_NAMES};
pub use transaction::{ItemKeyed, TransactionRecord};

/// ROP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum RopError {
    #[error("輸入驗證失敗: {0}")]
    Validation(String),

    #[error("{year} 年資料缺少欄位: {column}")]
    MissingColumn { year: i32, column: String },

    #[error("找不到 {0} 年的資料集")]
    DatasetNotFound(i32),

    #[error("{year} 年數值溢位: {field}")]
    Overflow { year: i32, field: String },
}

pub type Result<T> = std::result::Result<T, RopError>;
