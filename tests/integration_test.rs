//! 集成測試

use rop_calc::{RopEngine, SearchQuery, WarningSeverity};
use rop_core::*;
use rop_io::FileProvider;
use rstest::rstest;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const HEADERS: [&str; 5] = ["nobar", "nabar", "satuan", "tanggal", "jumlah"];

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>()
}

fn transaction(code: &str, date: &str, qty: &str) -> RawRow {
    row(&[
        ("nobar", code),
        ("nabar", "Elbow 90 2\""),
        ("satuan", "PCS"),
        ("tanggal", date),
        ("jumlah", qty),
    ])
}

fn lead_time(code: &str, min: i64, avg: i64, max: i64) -> LeadTime {
    LeadTime::new(
        code.to_string(),
        Decimal::from(min),
        Decimal::from(avg),
        Decimal::from(max),
    )
}

/// 2023 年 4290、2024 年 4290 + 4290 的出庫資料
fn warehouse() -> SourceData {
    SourceData::new()
        .with_year(YearDataset::new(
            2023,
            headers(&HEADERS),
            vec![
                transaction("ELB-0090", "15/03/2023", "4000"),
                transaction("ELB-0090", "20/07/2023", "290"),
                transaction("FLG-0200", "20/07/2023", "77"),
            ],
        ))
        .with_year(YearDataset::new(
            2024,
            headers(&HEADERS),
            vec![
                transaction("ELB-0090", "02/03/2024", "4290"),
                transaction("elb-0090", "11/11/2024", "4290"),
                transaction("", "11/11/2024", "999"),
            ],
        ))
        .with_rop_reference(vec![
            RopReference::new("FLG-0200".to_string(), Decimal::from(12)),
            RopReference::new("ELB-0090".to_string(), Decimal::from(150)),
        ])
        .with_lead_times(
            LeadTimeTable::new(
                LeadTimePeriod::Current,
                "2024",
                vec![lead_time("ELB-0090", 5, 7, 10)],
            ),
            LeadTimeTable::new(
                LeadTimePeriod::Prior,
                "2023",
                vec![lead_time("ELB-0090", 10, 20, 30)],
            ),
        )
}

fn engine(data: SourceData) -> RopEngine {
    RopEngine::new(Arc::new(data), RopConfig::default())
}

#[test]
fn test_full_search_pipeline() {
    let engine = engine(warehouse());
    let query = SearchQuery::new("elb", YearSelection::new([2023, 2024]));

    let result = engine.search(&query).unwrap();
    let report = result.report.expect("report");

    assert_eq!(report.item_meta.item_code, "ELB-0090");
    assert_eq!(report.item_meta.unit.as_deref(), Some("PCS"));
    assert_eq!(report.record_count, 4);

    // 用量
    let usage_2023 = report.usage.get(2023).unwrap();
    let usage_2024 = report.usage.get(2024).unwrap();
    assert_eq!(report.usage.years(), &[2023, 2024]);
    assert_eq!(usage_2023.total_annual_usage, Decimal::from(4290));
    assert_eq!(usage_2024.total_annual_usage, Decimal::from(8580));
    assert_eq!(usage_2023.monthly_usage, Decimal::new(3575, 1));
    assert_eq!(usage_2024.monthly_usage, Decimal::from(715));
    assert_eq!(usage_2023.daily_avg.round_dp(2), Decimal::new(1190, 2));
    assert_eq!(usage_2024.daily_avg.round_dp(2), Decimal::new(2381, 2));
    assert_eq!(usage_2023.rank_label, RankLabel::Lowest);
    assert_eq!(usage_2024.rank_label, RankLabel::Highest);

    // 本期交期 5/7/10
    let current = &report.evaluation_current;
    assert_eq!(current.period_label, "2024");
    assert_eq!(current.lead_time_status, LeadTimeStatus::Found);
    let row_2023 = current.rows.get(2023).unwrap();
    let row_2024 = current.rows.get(2024).unwrap();
    assert_eq!(
        (row_2023.rop, row_2023.min_stock, row_2023.order_qty, row_2023.max_stock),
        (Decimal::from(179), Decimal::from(96), Decimal::from(192), Decimal::from(341))
    );
    assert_eq!(
        (row_2024.rop, row_2024.min_stock, row_2024.order_qty, row_2024.max_stock),
        (Decimal::from(357), Decimal::from(190), Decimal::from(380), Decimal::from(677))
    );
    assert_eq!(row_2024.rank_label, RankLabel::Highest);

    // 前期交期 10/20/30
    let prior = report.evaluation_prior.rows.get(2024).unwrap();
    assert_eq!(prior.rop, Decimal::from(1071));
    assert_eq!(prior.max_stock, Decimal::from(2142));

    // 現行 ROP 取第一筆匹配
    assert_eq!(report.reference_rop, ReferenceRop::Found(Decimal::from(150)));

    // 每月序列
    assert_eq!(report.monthly_series.len(), 2);
    let months_2024: Vec<u32> = report.monthly_series[1].points.iter().map(|p| p.month).collect();
    assert_eq!(months_2024, vec![3, 11]);

    assert!(result.warnings.is_empty());
}

#[test]
fn test_order_qty_is_twice_min_stock() {
    let engine = engine(warehouse());
    let result = engine
        .search(&SearchQuery::new("ELB", YearSelection::new([2024, 2023])))
        .unwrap();
    let report = result.report.unwrap();

    for evaluation in [&report.evaluation_current, &report.evaluation_prior] {
        for (_, row) in evaluation.rows.iter() {
            assert_eq!(row.order_qty, (row.min_stock * Decimal::TWO).round());
        }
    }
    assert_eq!(report.usage.years(), &[2024, 2023]);
}

#[rstest]
#[case("")]
#[case("   ")]
fn test_blank_item_code_is_rejected(#[case] item: &str) {
    let engine = engine(warehouse());

    let result = engine.search(&SearchQuery::new(item, YearSelection::new([2024])));

    assert!(matches!(result, Err(RopError::Validation(_))));
}

#[test]
fn test_empty_year_selection_is_rejected() {
    let engine = engine(warehouse());

    let result = engine.search(&SearchQuery::new("ELB", YearSelection::new(Vec::<i32>::new())));

    assert!(matches!(result, Err(RopError::Validation(_))));
}

#[test]
fn test_no_match_returns_empty_result() {
    let engine = engine(warehouse());

    let result = engine
        .search(&SearchQuery::new("PUMP", YearSelection::new([2023, 2024])))
        .unwrap();

    assert!(result.is_empty());
    assert!(rop_report::render_report(&result).contains(rop_report::EMPTY_MESSAGE));
}

#[test]
fn test_year_missing_date_column_is_skipped() {
    let data = warehouse().with_year(YearDataset::new(
        2022,
        headers(&["nobar", "jumlah"]),
        vec![row(&[("nobar", "ELB-0090"), ("jumlah", "100")])],
    ));
    let engine = engine(data);

    let result = engine
        .search(&SearchQuery::new("ELB", YearSelection::new([2022, 2023, 2024])))
        .unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].scope, "2022");
    assert_eq!(result.warnings[0].severity, WarningSeverity::Error);
    assert!(result.warnings[0].message.contains("tanggal"));

    let report = result.report.unwrap();
    assert_eq!(report.usage.get(2022).unwrap().total_annual_usage, Decimal::ZERO);
    assert_eq!(report.usage.get(2023).unwrap().total_annual_usage, Decimal::from(4290));
    assert_eq!(report.usage.get(2024).unwrap().total_annual_usage, Decimal::from(8580));
}

#[test]
fn test_year_without_dataset_is_warned() {
    let engine = engine(warehouse());

    let result = engine
        .search(&SearchQuery::new("ELB", YearSelection::new([2021, 2024])))
        .unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].scope, "2021");
    assert_eq!(result.warnings[0].severity, WarningSeverity::Warning);
    assert!(result.report.is_some());
}

#[test]
fn test_month_filter() {
    let engine = engine(warehouse());
    let query = SearchQuery::new("ELB", YearSelection::new([2023, 2024]))
        .with_months(MonthSelection::from_months([3]).unwrap());

    let report = engine.search(&query).unwrap().report.unwrap();

    assert_eq!(report.record_count, 2);
    assert_eq!(report.usage.get(2023).unwrap().total_annual_usage, Decimal::from(4000));
    assert_eq!(report.usage.get(2024).unwrap().total_annual_usage, Decimal::from(4290));
}

#[test]
fn test_month_selection_never_widens() {
    let engine = engine(warehouse());
    let query = SearchQuery::new("ELB", YearSelection::new([2023, 2024]))
        .with_months(MonthSelection::from_months(Vec::<u32>::new()).unwrap());

    assert!(engine.search(&query).unwrap().is_empty());
    assert!(MonthSelection::from_months([13]).is_err());
}

#[test]
fn test_missing_lead_time_and_reference() {
    let data = SourceData::new().with_year(YearDataset::new(
        2024,
        headers(&HEADERS),
        vec![transaction("GSK-0001", "01/02/2024", "60")],
    ));
    let engine = engine(data);

    let result = engine
        .search(&SearchQuery::new("gsk", YearSelection::new([2024])))
        .unwrap();
    let report = result.report.as_ref().unwrap();

    assert!(report.evaluation_current.lead_time_missing());
    assert!(report.evaluation_prior.lead_time_missing());
    let row = report.evaluation_current.rows.get(2024).unwrap();
    assert_eq!(row.rop, Decimal::ZERO);
    assert_eq!(row.max_stock, Decimal::ZERO);
    assert_eq!(report.reference_rop, ReferenceRop::NotFound);
    assert_eq!(result.warnings.len(), 3);
}

#[test]
fn test_six_years_rank_labels() {
    let mut data = SourceData::new();
    for (year, qty) in [
        (2019, "600"),
        (2020, "500"),
        (2021, "400"),
        (2022, "300"),
        (2023, "200"),
        (2024, "100"),
    ] {
        data = data.with_year(YearDataset::new(
            year,
            headers(&HEADERS),
            vec![transaction("ELB-0090", &format!("01/06/{}", year), qty)],
        ));
    }
    let engine = engine(data);

    let report = engine
        .search(&SearchQuery::new("ELB", YearSelection::new(2019..=2024)))
        .unwrap()
        .report
        .unwrap();

    let labels = report.usage.column(|r| r.rank_label.label());
    assert_eq!(
        labels,
        vec!["Tertinggi", "Tertinggi ke-2", "Tertinggi ke-3", "Tertinggi ke-4", "Terendah", "-"]
    );
}

#[test]
fn test_concurrent_searches_share_data() {
    let engine = engine(warehouse());

    let totals: Vec<Decimal> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["ELB", "FLG"]
            .into_iter()
            .map(|item| {
                let engine = &engine;
                scope.spawn(move || {
                    let result = engine
                        .search(&SearchQuery::new(item, YearSelection::new([2023])))
                        .unwrap();
                    result.report.unwrap().usage.get(2023).unwrap().total_annual_usage
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(totals, vec![Decimal::from(4290), Decimal::from(77)]);
}

#[test]
fn test_search_from_csv_manifest() {
    let dir = TempDir::new().unwrap();
    let write = |name: &str, content: &str| fs::write(dir.path().join(name), content).unwrap();

    write(
        "2023.csv",
        "nobar,nabar,satuan,tanggal,jumlah\nELB-0090,Elbow,PCS,15/03/2023,4290\n",
    );
    write(
        "2024.csv",
        concat!(
            "nobar,nabar,satuan,tanggal,jumlah\n",
            "ELB-0090,Elbow,PCS,02/03/2024,8580\n",
            "ELB-0090,Elbow,PCS,,5\n",
        ),
    );
    write("rop.csv", "nobar,Rop Existing\nELB-0090,150\n");
    write(
        "lt_2024.csv",
        "nobar,lead_time_minimal,lead_time_avg,lead_time_maximal\nELB-0090,5,7,10\n",
    );
    write(
        "lt_2023.csv",
        "nobar,lead_time_minimal,lead_time_avg,lead_time_maximal\nELB-0090,10,20,30\n",
    );
    write(
        "manifest.json",
        r#"{
            "years": { "2023": "2023.csv", "2024": "2024.csv" },
            "rop_reference": "rop.csv",
            "lead_time_current": "lt_2024.csv",
            "lead_time_prior": "lt_2023.csv",
            "current_period_label": "2024",
            "prior_period_label": "2023"
        }"#,
    );

    let provider = FileProvider::open(dir.path().join("manifest.json")).unwrap();
    let engine = RopEngine::from_provider(&provider, RopConfig::default());

    let result = engine
        .search(&SearchQuery::new("ELB", YearSelection::new([2023, 2024])))
        .unwrap();
    let report = result.report.as_ref().unwrap();

    // 日期空白的交易不歸入任何年度
    assert_eq!(report.record_count, 3);
    assert_eq!(report.usage.get(2024).unwrap().total_annual_usage, Decimal::from(8580));
    assert_eq!(report.evaluation_current.rows.get(2024).unwrap().rop, Decimal::from(357));
    assert_eq!(report.evaluation_prior.period_label, "2023");

    let text = rop_report::render_report(&result);
    assert!(text.contains("ROP Existing          : 150"));
    assert!(text.contains("Tertinggi"));
}
