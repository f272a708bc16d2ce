//! 資料載入錯誤類型

use thiserror::Error;

/// 資料載入錯誤
#[derive(Error, Debug)]
pub enum IoError {
    // ===== 檔案相關錯誤 =====
    #[error("檔案不存在: {0}")]
    FileNotFound(String),

    #[error("檔案格式不支援: {0}（僅支援 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("檔案讀取失敗: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Excel 解析失敗: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失敗: {0}")]
    CsvParseError(#[from] csv::Error),

    // ===== 資料來源清單錯誤 =====
    #[error("資料來源清單解析失敗: {0}")]
    ManifestError(#[from] serde_json::Error),

    #[error("資料來源清單無效: {0}")]
    InvalidManifest(String),

    // ===== 資料表錯誤 =====
    #[error("資料表 {table} 缺少欄位: {column}")]
    MissingColumn { table: String, column: String },
}

pub type IoResult<T> = std::result::Result<T, IoError>;
