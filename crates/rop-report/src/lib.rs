//! # ROP Report
//!
//! 將查詢結果渲染為純文字報表或 JSON

pub mod style;
pub mod table;

// Re-export 主要類型
pub use style::{rank_cell_style, row_style, RowKind, StyleTag};
pub use table::{format_quantity, format_rate, TableRow, TextTable};

use rop_calc::{Evaluation, SearchResult, WarningSeverity};
use rop_core::ReferenceRop;
use std::fmt::Write;

/// 沒有匹配資料時的提示
pub const EMPTY_MESSAGE: &str = "Tidak ada data untuk filter yang dipilih.";

/// 交期缺失時的提示
pub const MISSING_LEAD_TIME_MESSAGE: &str =
    "Data lead time tidak ditemukan, dihitung dengan lead time 0.";

/// 渲染完整報表
pub fn render_report(result: &SearchResult) -> String {
    let mut out = String::new();

    for warning in result
        .warnings
        .iter()
        .filter(|w| w.severity == WarningSeverity::Error)
    {
        let _ = writeln!(out, "! Tahun {}: {}", warning.scope, warning.message);
    }

    let report = match &result.report {
        Some(report) => report,
        None => {
            out.push_str(EMPTY_MESSAGE);
            out.push('\n');
            return out;
        }
    };

    let meta = &report.item_meta;
    let _ = writeln!(out, "Nobar  : {}", meta.item_code);
    let _ = writeln!(out, "Nabar  : {}", meta.item_name_or_placeholder());
    let _ = writeln!(out, "Satuan : {}", meta.unit_or_placeholder());
    let _ = writeln!(out, "Jumlah transaksi: {}", report.record_count);
    out.push('\n');

    out.push_str("== Pemakaian ==\n");
    out.push_str(&TextTable::usage(&report.usage, report.rounding).render());

    for evaluation in [&report.evaluation_current, &report.evaluation_prior] {
        out.push('\n');
        let _ = writeln!(out, "== Evaluasi ROP (lead time {}) ==", evaluation.period_label);
        out.push_str(&render_evaluation_panel(evaluation, &report.reference_rop));
        out.push_str(&TextTable::evaluation(evaluation).render());
    }

    if !report.monthly_series.is_empty() {
        out.push('\n');
        out.push_str("== Pemakaian per bulan ==\n");
        for series in &report.monthly_series {
            out.push_str(&TextTable::monthly(series).render());
        }
    }

    out
}

/// 評估資訊面板：現行 ROP 與交期
pub fn render_evaluation_panel(evaluation: &Evaluation, reference: &ReferenceRop) -> String {
    let lead_time = &evaluation.lead_time;
    let mut out = String::new();
    let _ = writeln!(out, "ROP Existing          : {}", reference);
    let days = |value| format!("{} hari", format_quantity(value));
    let _ = writeln!(out, "Lead Time Minimal     : {}", days(lead_time.minimal));
    let _ = writeln!(out, "Lead Time Rata-rata   : {}", days(lead_time.average));
    let _ = writeln!(out, "Lead Time Maksimal    : {}", days(lead_time.maximal));
    if evaluation.lead_time_missing() {
        let _ = writeln!(out, "{}", MISSING_LEAD_TIME_MESSAGE);
    }
    out
}

/// 匯出為 JSON
pub fn to_json(result: &SearchResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
