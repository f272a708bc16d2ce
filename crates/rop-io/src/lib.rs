//! # ROP IO
//!
//! 讀取 Excel/CSV 來源資料並轉為核心資料模型

pub mod error;
pub mod loader;
pub mod manifest;
pub mod parser;

// Re-export 主要類型
pub use error::{IoError, IoResult};
pub use loader::{DataLoader, FileProvider};
pub use manifest::DataSourceManifest;
pub use parser::{CsvParser, ExcelParser, FileParser, RawTable, UniversalFileParser};
