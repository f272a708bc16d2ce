//! 來源資料載入

use rop_core::{
    columns, DataProvider, LeadTime, LeadTimePeriod, LeadTimeTable, RawRow, RopReference,
    SourceData, YearDataset,
};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{IoError, IoResult};
use crate::manifest::DataSourceManifest;
use crate::parser::{FileParser, RawTable, UniversalFileParser};

/// 來源資料載入器
pub struct DataLoader<P: FileParser = UniversalFileParser> {
    parser: P,
}

impl DataLoader<UniversalFileParser> {
    /// 依副檔名自動選擇解析器
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }
}

impl Default for DataLoader<UniversalFileParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FileParser> DataLoader<P> {
    /// 使用指定解析器
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// 依清單載入所有來源資料
    ///
    /// 年度交易資料保留原始欄位，欄位檢查交由篩選階段逐年處理；
    /// 參考表與交期表在此轉為型別化記錄。
    pub fn load(&self, manifest: &DataSourceManifest) -> IoResult<SourceData> {
        let start_time = std::time::Instant::now();
        let mut data = SourceData::new();

        for (year, path) in &manifest.years {
            let path = manifest.resolve(path);
            let table = self.parser.parse(&path)?;
            tracing::debug!("載入 {} 年資料: {} 筆 ({})", year, table.rows.len(), path.display());
            data = data.with_year(YearDataset::new(*year, table.headers, table.rows));
        }

        let reference_path = manifest.resolve(&manifest.rop_reference);
        let reference_table = self.parser.parse(&reference_path)?;
        data.rop_reference = Self::to_rop_reference(&reference_table, &reference_path)?;

        let current_path = manifest.resolve(&manifest.lead_time_current);
        let prior_path = manifest.resolve(&manifest.lead_time_prior);
        data.lead_time_current = LeadTimeTable::new(
            LeadTimePeriod::Current,
            manifest.current_period_label.clone(),
            Self::to_lead_times(&self.parser.parse(&current_path)?, &current_path)?,
        );
        data.lead_time_prior = LeadTimeTable::new(
            LeadTimePeriod::Prior,
            manifest.prior_period_label.clone(),
            Self::to_lead_times(&self.parser.parse(&prior_path)?, &prior_path)?,
        );

        tracing::info!(
            "來源資料載入完成：{} 個年度，ROP 參考 {} 筆，交期 {}/{} 筆，耗時 {:?}",
            data.years.len(),
            data.rop_reference.len(),
            data.lead_time_current.len(),
            data.lead_time_prior.len(),
            start_time.elapsed()
        );

        Ok(data)
    }

    /// 轉換現行 ROP 參考表；數值無法解析的列跳過
    pub fn to_rop_reference(table: &RawTable, path: &Path) -> IoResult<Vec<RopReference>> {
        require(table, path, &[columns::ITEM_CODE, columns::ROP_EXISTING])?;

        Ok(table
            .rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let code = cell(row, columns::ITEM_CODE);
                match parse_decimal(cell(row, columns::ROP_EXISTING)) {
                    Some(rop) if !code.is_empty() => Some(RopReference::new(code.to_string(), rop)),
                    _ => {
                        tracing::warn!("{} 第 {} 列 ROP 資料無效，跳過", path.display(), idx + 2);
                        None
                    }
                }
            })
            .collect())
    }

    /// 轉換交期表；任一交期無法解析的列跳過
    pub fn to_lead_times(table: &RawTable, path: &Path) -> IoResult<Vec<LeadTime>> {
        require(
            table,
            path,
            &[
                columns::ITEM_CODE,
                columns::LEAD_TIME_MIN,
                columns::LEAD_TIME_AVG,
                columns::LEAD_TIME_MAX,
            ],
        )?;

        Ok(table
            .rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let code = cell(row, columns::ITEM_CODE);
                let parsed = (
                    parse_decimal(cell(row, columns::LEAD_TIME_MIN)),
                    parse_decimal(cell(row, columns::LEAD_TIME_AVG)),
                    parse_decimal(cell(row, columns::LEAD_TIME_MAX)),
                );
                match parsed {
                    (Some(min), Some(avg), Some(max)) if !code.is_empty() => {
                        Some(LeadTime::new(code.to_string(), min, avg, max))
                    }
                    _ => {
                        tracing::warn!("{} 第 {} 列交期資料無效，跳過", path.display(), idx + 2);
                        None
                    }
                }
            })
            .collect())
    }
}

fn require(table: &RawTable, path: &Path, required: &[&str]) -> IoResult<()> {
    match required.iter().find(|c| !table.has_column(c)) {
        Some(missing) => Err(IoError::MissingColumn {
            table: path.display().to_string(),
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

fn cell<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(|v| v.trim()).unwrap_or("")
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    if value.is_empty() {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// 從檔案載入的資料來源
pub struct FileProvider {
    data: Arc<SourceData>,
}

impl FileProvider {
    /// 讀取清單並載入所有資料
    pub fn open(manifest_path: impl AsRef<Path>) -> IoResult<Self> {
        let manifest = DataSourceManifest::from_file(manifest_path)?;
        Self::from_manifest(&manifest)
    }

    pub fn from_manifest(manifest: &DataSourceManifest) -> IoResult<Self> {
        let data = DataLoader::new().load(manifest)?;
        Ok(Self {
            data: Arc::new(data),
        })
    }
}

impl DataProvider for FileProvider {
    fn source_data(&self) -> Arc<SourceData> {
        Arc::clone(&self.data)
    }
}
