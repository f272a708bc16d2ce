//! `rop` 命令列工具

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rop_calc::{rank_labels, RopEngine, SearchQuery};
use rop_core::{month_from_name, MonthSelection, RopConfig, RoundingMode, YearSelection};
use rop_io::{DataSourceManifest, FileProvider};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rop",
    author,
    version,
    about = "Warehouse reorder-point evaluation",
    long_about = None
)]
struct Cli {
    /// 日誌詳細程度（-v debug，-vv trace）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 查詢物料的用量與 ROP 評估
    Search {
        /// 資料來源清單（JSON）
        #[arg(short, long)]
        manifest: PathBuf,

        /// 物料編號（子字串，不分大小寫）
        #[arg(short, long)]
        item: String,

        /// 年份，可重複；預設為清單中所有年份
        #[arg(short, long = "year")]
        years: Vec<i32>,

        /// 月份（1-12 或月份名稱），可重複；預設為全部月份
        #[arg(long = "month")]
        months: Vec<String>,

        /// 捨入方式：half-up 或 half-even
        #[arg(long, default_value = "half-up")]
        rounding: RoundingMode,

        /// 交易日期格式
        #[arg(long, default_value = "%d/%m/%Y")]
        date_format: String,

        /// 以 JSON 輸出
        #[arg(long)]
        json: bool,
    },

    /// 列出 n 個年份時的排名標籤
    Labels {
        n: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Search {
            manifest,
            item,
            years,
            months,
            rounding,
            date_format,
            json,
        } => {
            let manifest = DataSourceManifest::from_file(&manifest)
                .with_context(|| format!("無法讀取資料來源清單 {}", manifest.display()))?;
            let provider = FileProvider::from_manifest(&manifest).context("載入來源資料失敗")?;

            let config = RopConfig::default()
                .with_rounding(rounding)
                .with_date_format(date_format);
            let engine = RopEngine::from_provider(&provider, config);

            let years = if years.is_empty() {
                manifest.years()
            } else {
                years
            };
            let query = SearchQuery::new(item, YearSelection::new(years))
                .with_months(parse_months(&months)?);

            let result = engine.search(&query)?;
            for warning in &result.warnings {
                tracing::warn!("{}", warning);
            }

            if json {
                println!("{}", rop_report::to_json(&result)?);
            } else {
                print!("{}", rop_report::render_report(&result));
            }
        }
        Commands::Labels { n } => {
            for (idx, label) in rank_labels(n).iter().enumerate() {
                println!("{}\t{}", idx + 1, label);
            }
        }
    }

    Ok(())
}

/// 解析月份參數：數字或月份名稱；沒有指定時為所有月份
fn parse_months(values: &[String]) -> Result<MonthSelection> {
    if values.is_empty() {
        return Ok(MonthSelection::All);
    }

    let mut months = Vec::with_capacity(values.len());
    for value in values {
        let month = match value.trim().parse::<u32>() {
            Ok(m) => m,
            Err(_) => month_from_name(value)
                .with_context(|| format!("無法識別的月份: {}", value))?,
        };
        months.push(month);
    }
    Ok(MonthSelection::from_months(months)?)
}
