//! 簡單 ROP 查詢示例

use rop_calc::{RopEngine, SearchQuery};
use rop_core::{
    LeadTime, LeadTimePeriod, LeadTimeTable, RopConfig, RopReference, SourceData, StaticProvider,
    YearDataset, YearSelection,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

fn transaction(code: &str, name: &str, date: &str, qty: &str) -> HashMap<String, String> {
    [
        ("nobar", code),
        ("nabar", name),
        ("satuan", "PCS"),
        ("tanggal", date),
        ("jumlah", qty),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 簡單 ROP 查詢示例 ===\n");

    let headers: Vec<String> = ["nobar", "nabar", "satuan", "tanggal", "jumlah"]
        .iter()
        .map(|h| h.to_string())
        .collect();

    // 三個年度的出庫資料
    let data = SourceData::new()
        .with_year(YearDataset::new(
            2022,
            headers.clone(),
            vec![
                transaction("PIPE-001", "Pipa PVC 2\"", "14/02/2022", "1200"),
                transaction("PIPE-001", "Pipa PVC 2\"", "20/09/2022", "800"),
            ],
        ))
        .with_year(YearDataset::new(
            2023,
            headers.clone(),
            vec![
                transaction("PIPE-001", "Pipa PVC 2\"", "03/01/2023", "2500"),
                transaction("VALVE-010", "Gate Valve", "03/01/2023", "12"),
            ],
        ))
        .with_year(YearDataset::new(
            2024,
            headers,
            vec![transaction("PIPE-001", "Pipa PVC 2\"", "11/06/2024", "1500")],
        ))
        .with_rop_reference(vec![RopReference::new("PIPE-001".to_string(), Decimal::from(40))])
        .with_lead_times(
            LeadTimeTable::new(
                LeadTimePeriod::Current,
                "2024",
                vec![LeadTime::new(
                    "PIPE-001".to_string(),
                    Decimal::from(7),
                    Decimal::from(14),
                    Decimal::from(21),
                )],
            ),
            LeadTimeTable::new(
                LeadTimePeriod::Prior,
                "2023",
                vec![LeadTime::new(
                    "PIPE-001".to_string(),
                    Decimal::from(10),
                    Decimal::from(20),
                    Decimal::from(30),
                )],
            ),
        );

    let provider = StaticProvider::new(data);
    let engine = RopEngine::from_provider(&provider, RopConfig::default());

    let query = SearchQuery::new("pipe", YearSelection::new([2022, 2023, 2024]));
    let result = engine.search(&query)?;

    print!("{}", rop_report::render_report(&result));

    if !result.warnings.is_empty() {
        println!("\n警告:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }

    Ok(())
}
