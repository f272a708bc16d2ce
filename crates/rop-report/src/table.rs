//! 純文字表格

use rop_calc::{Evaluation, MonthlySeries};
use rop_core::{EvaluationRow, RankLabel, RoundingMode, UsageRow, YearTable};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::style::{rank_cell_style, row_style, RowKind, StyleTag};

/// 第一欄標題
pub const LABEL_HEADER: &str = "Keterangan";

/// 表格列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub kind: RowKind,
    pub label: String,
    pub cells: Vec<String>,
    /// 每個儲存格的樣式（與 cells 等長）
    pub styles: Vec<StyleTag>,
}

impl TableRow {
    fn values(kind: RowKind, label: &str, cells: Vec<String>) -> Self {
        let styles = vec![row_style(kind); cells.len()];
        Self {
            kind,
            label: label.to_string(),
            cells,
            styles,
        }
    }

    fn ranks(labels: Vec<RankLabel>) -> Self {
        Self {
            kind: RowKind::Rank,
            label: "Keterangan Pemakaian".to_string(),
            cells: labels.iter().map(|l| l.label().to_string()).collect(),
            styles: labels.into_iter().map(rank_cell_style).collect(),
        }
    }
}

/// 以年份為欄的表格
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TextTable {
    fn with_years(years: &[i32]) -> Self {
        let mut headers = vec![LABEL_HEADER.to_string()];
        headers.extend(years.iter().map(|y| y.to_string()));
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 用量表；比率依 `rounding` 取兩位小數
    pub fn usage(usage: &YearTable<UsageRow>, rounding: RoundingMode) -> Self {
        let mut table = Self::with_years(usage.years());
        let rate = |label: &str, f: fn(&UsageRow) -> Decimal| {
            TableRow::values(
                RowKind::Rate,
                label,
                usage.column(|r| format_rate(f(r), rounding)),
            )
        };

        table.rows.push(TableRow::values(
            RowKind::Usage,
            "Pemakaian Mutasi 1 th",
            usage.column(|r| format_quantity(r.total_annual_usage)),
        ));
        table.rows.push(rate("Pakai per bulan", |r| r.monthly_usage));
        table.rows.push(rate("Pakai per minggu", |r| r.weekly_usage));
        table.rows.push(rate("Pakai per hari (Avg)", |r| r.daily_avg));
        table.rows.push(rate("Pakai per hari (Min)", |r| r.daily_min));
        table.rows.push(rate("Pakai per hari (Max)", |r| r.daily_max));
        table.rows.push(TableRow::ranks(usage.column(|r| r.rank_label)));
        table
    }

    /// 評估表
    pub fn evaluation(evaluation: &Evaluation) -> Self {
        let rows = &evaluation.rows;
        let mut table = Self::with_years(rows.years());
        let figure = |kind: RowKind, label: &str, f: fn(&EvaluationRow) -> Decimal| {
            TableRow::values(kind, label, rows.column(|r| format_quantity(f(r))))
        };

        table.rows.push(figure(RowKind::Usage, "Pemakaian Mutasi 1 th", |r| r.usage_rounded));
        table.rows.push(figure(RowKind::Evaluation, "ROP", |r| r.rop));
        table.rows.push(figure(RowKind::Evaluation, "Min Stock", |r| r.min_stock));
        table.rows.push(figure(RowKind::Evaluation, "Order Qty", |r| r.order_qty));
        table.rows.push(figure(RowKind::Evaluation, "Max Stock", |r| r.max_stock));
        table.rows.push(TableRow::ranks(rows.column(|r| r.rank_label)));
        table
    }

    /// 每月出庫序列（每年一欄月份、一欄數量）
    pub fn monthly(series: &MonthlySeries) -> Self {
        let mut table = Self {
            headers: vec!["Bulan".to_string(), series.year.to_string()],
            rows: Vec::new(),
        };
        for point in &series.points {
            table.rows.push(TableRow::values(
                RowKind::Usage,
                &point.month_name,
                vec![format_quantity(point.total)],
            ));
        }
        table
    }

    /// 渲染為對齊的純文字
    pub fn render(&self) -> String {
        let column_count = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            let cells = std::iter::once(&row.label).chain(row.cells.iter());
            for (idx, cell) in cells.enumerate().take(column_count) {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(idx, cell)| {
                    if idx == 0 {
                        format!("{:<width$}", cell, width = widths[idx])
                    } else {
                        format!("{:>width$}", cell, width = widths[idx])
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let mut out = String::new();
        out.push_str(&line(self.headers.iter().map(String::as_str).collect()));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<&str> = std::iter::once(row.label.as_str())
                .chain(row.cells.iter().map(String::as_str))
                .take(column_count)
                .collect();
            out.push_str(&line(cells));
            out.push('\n');
        }
        out
    }
}

/// 數量：去除多餘的零
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

/// 用量比率：依捨入方式取兩位小數
pub fn format_rate(value: Decimal, rounding: RoundingMode) -> String {
    format!("{:.2}", rounding.round_dp(value, 2))
}
