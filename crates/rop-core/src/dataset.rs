//! 原始資料集模型

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::lead_time::LeadTimeTable;
use crate::reference::RopReference;

/// 資料表欄位名稱
pub mod columns {
    /// 物料編號
    pub const ITEM_CODE: &str = "nobar";
    /// 物料名稱
    pub const ITEM_NAME: &str = "nabar";
    /// 單位
    pub const UNIT: &str = "satuan";
    /// 交易日期
    pub const DATE: &str = "tanggal";
    /// 出庫數量
    pub const QUANTITY: &str = "jumlah";
    /// 現行 ROP
    pub const ROP_EXISTING: &str = "Rop Existing";
    /// 最短交期
    pub const LEAD_TIME_MIN: &str = "lead_time_minimal";
    /// 平均交期
    pub const LEAD_TIME_AVG: &str = "lead_time_avg";
    /// 最長交期
    pub const LEAD_TIME_MAX: &str = "lead_time_maximal";

    /// 年度交易資料必要欄位
    pub const TRANSACTION_REQUIRED: [&str; 3] = [ITEM_CODE, DATE, QUANTITY];
}

/// 一列原始資料（欄位名 → 儲存格字串）
pub type RawRow = HashMap<String, String>;

/// 單一年度的原始交易資料
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearDataset {
    /// 資料集年份
    pub year: i32,

    /// 表頭（保留原始順序）
    pub headers: Vec<String>,

    /// 資料列
    pub rows: Vec<RawRow>,
}

impl YearDataset {
    /// 創建新的年度資料集
    pub fn new(year: i32, headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { year, headers, rows }
    }

    /// 是否包含指定欄位
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// 檢查必要欄位，返回第一個缺少的欄位
    pub fn require_columns(&self, required: &[&str]) -> crate::Result<()> {
        match required.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(crate::RopError::MissingColumn {
                year: self.year,
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 資料列數
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 所有來源資料（載入後唯讀）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceData {
    /// 年度交易資料
    pub years: BTreeMap<i32, YearDataset>,

    /// 現行 ROP 參考表
    pub rop_reference: Vec<RopReference>,

    /// 本期交期表
    pub lead_time_current: LeadTimeTable,

    /// 前期交期表
    pub lead_time_prior: LeadTimeTable,
}

impl SourceData {
    /// 創建空的來源資料
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：添加年度資料集
    pub fn with_year(mut self, dataset: YearDataset) -> Self {
        self.years.insert(dataset.year, dataset);
        self
    }

    /// 建構器模式：設置 ROP 參考表
    pub fn with_rop_reference(mut self, reference: Vec<RopReference>) -> Self {
        self.rop_reference = reference;
        self
    }

    /// 建構器模式：設置本期與前期交期表
    pub fn with_lead_times(mut self, current: LeadTimeTable, prior: LeadTimeTable) -> Self {
        self.lead_time_current = current;
        self.lead_time_prior = prior;
        self
    }

    /// 取得年度資料集
    pub fn year(&self, year: i32) -> Option<&YearDataset> {
        self.years.get(&year)
    }

    /// 可用年份（升序）
    pub fn available_years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }
}
