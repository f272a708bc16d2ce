//! 檔案解析器
//!
//! 支援 Excel (.xlsx/.xls) 與 CSV (.csv)，輸出表頭與字串儲存格。

use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

use rop_core::RawRow;

use crate::error::{IoError, IoResult};

/// Excel 日期儲存格轉成的文字格式
pub const EXCEL_DATE_FORMAT: &str = "%d/%m/%Y";

/// 解析後的原始資料表
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// 表頭（去除前後空白）
    pub headers: Vec<String>,

    /// 資料列（已跳過全空白列）
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// 是否包含指定欄位
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// 由表頭與逐列儲存格建立
    fn from_cells(headers: Vec<String>, rows: impl Iterator<Item = Vec<String>>) -> Self {
        let mut records = Vec::new();
        for cells in rows {
            let row: RawRow = headers
                .iter()
                .cloned()
                .zip(cells.into_iter().map(|v| v.trim().to_string()))
                .collect();

            // 跳過完全空白的行
            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            records.push(row);
        }

        Self {
            headers,
            rows: records,
        }
    }
}

/// 檔案解析介面
pub trait FileParser {
    fn parse(&self, path: &Path) -> IoResult<RawTable>;
}

/// 檢查檔案存在並返回小寫副檔名
fn checked_extension(path: &Path) -> IoResult<String> {
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }
    Ok(path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase())
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, path: &Path) -> IoResult<RawTable> {
        let ext = checked_extension(path)?;
        if ext != "csv" {
            return Err(IoError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允許行長度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect::<Vec<_>>());
        }

        Ok(RawTable::from_cells(headers, rows.into_iter()))
    }
}

// ==========================================
// Excel Parser（讀取第一個工作表）
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 儲存格轉文字；日期儲存格轉為 DD/MM/YYYY
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::DateTime(_) | Data::DateTimeIso(_) => cell
                .as_date()
                .map(|d| d.format(EXCEL_DATE_FORMAT).to_string())
                .unwrap_or_else(|| cell.to_string()),
            other => other.to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse(&self, path: &Path) -> IoResult<RawTable> {
        let ext = checked_extension(path)?;
        if ext != "xlsx" && ext != "xls" {
            return Err(IoError::UnsupportedFormat(ext));
        }

        let mut workbook =
            open_workbook_auto(path).map_err(|e| IoError::ExcelParseError(e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IoError::ExcelParseError("Excel 檔案沒有工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| IoError::ExcelParseError(e.to_string()))?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| IoError::ExcelParseError("Excel 檔案沒有資料行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let cells = rows.map(|row| row.iter().map(Self::cell_to_string).collect::<Vec<_>>());

        Ok(RawTable::from_cells(headers, cells))
    }
}

// ==========================================
// 通用檔案解析器（依副檔名選擇）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse(&self, path: &Path) -> IoResult<RawTable> {
        match checked_extension(path)?.as_str() {
            "csv" => CsvParser.parse(path),
            "xlsx" | "xls" => ExcelParser.parse(path),
            other => Err(IoError::UnsupportedFormat(other.to_string())),
        }
    }
}
