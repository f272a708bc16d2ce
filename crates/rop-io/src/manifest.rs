//! 資料來源清單
//!
//! JSON 格式，例如：
//!
//! ```json
//! {
//!   "years": { "2023": "2023.xlsx", "2024": "2024.xlsx" },
//!   "rop_reference": "rop existing_fix.xlsx",
//!   "lead_time_current": "Book1.xlsx",
//!   "lead_time_prior": "Book2.xlsx",
//!   "current_period_label": "2024",
//!   "prior_period_label": "2023"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{IoError, IoResult};

/// 資料檔案位置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceManifest {
    /// 年度交易資料
    pub years: BTreeMap<i32, PathBuf>,

    /// 現行 ROP 參考表
    pub rop_reference: PathBuf,

    /// 本期交期表
    pub lead_time_current: PathBuf,

    /// 前期交期表
    pub lead_time_prior: PathBuf,

    /// 本期標籤
    #[serde(default = "default_current_label")]
    pub current_period_label: String,

    /// 前期標籤
    #[serde(default = "default_prior_label")]
    pub prior_period_label: String,

    /// 相對路徑的基準目錄（清單檔所在目錄）
    #[serde(skip)]
    pub base_dir: PathBuf,
}

fn default_current_label() -> String {
    "current".to_string()
}

fn default_prior_label() -> String {
    "prior".to_string()
}

impl DataSourceManifest {
    /// 從 JSON 檔讀取清單，相對路徑以清單所在目錄為準
    pub fn from_file(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound(path.display().to_string()));
        }

        let text = std::fs::read_to_string(path)?;
        let mut manifest = Self::from_json(&text)?;
        manifest.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(manifest)
    }

    /// 從 JSON 字串解析
    pub fn from_json(text: &str) -> IoResult<Self> {
        let manifest: Self = serde_json::from_str(text)?;
        if manifest.years.is_empty() {
            return Err(IoError::InvalidManifest("至少需要一個年度資料檔".to_string()));
        }
        Ok(manifest)
    }

    /// 建構器模式：設置基準目錄
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// 解析為實際路徑
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// 清單中的年份（升序）
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }
}
