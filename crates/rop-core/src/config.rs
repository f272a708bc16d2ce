//! ROP 計算參數配置

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 捨入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// 四捨五入（.5 遠離零）
    #[default]
    HalfUp,

    /// 銀行家捨入（.5 取偶數）
    HalfEven,
}

impl RoundingMode {
    /// 捨入到指定小數位
    pub fn round_dp(&self, value: Decimal, dp: u32) -> Decimal {
        let strategy = match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        };
        value.round_dp_with_strategy(dp, strategy)
    }

    /// 捨入到整數
    pub fn round(&self, value: Decimal) -> Decimal {
        self.round_dp(value, 0)
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = crate::RopError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half-up" | "halfup" => Ok(RoundingMode::HalfUp),
            "half-even" | "halfeven" | "bankers" => Ok(RoundingMode::HalfEven),
            other => Err(crate::RopError::Validation(format!("未知的捨入模式: {}", other))),
        }
    }
}

/// 用量換算與 ROP 計算參數
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RopConfig {
    /// 每年月數
    pub months_per_year: Decimal,

    /// 每月平均週數
    pub weeks_per_month: Decimal,

    /// 每週天數
    pub days_per_week: Decimal,

    /// 最小日用量係數（相對平均日用量）
    pub daily_min_factor: Decimal,

    /// 最大日用量係數（相對平均日用量）
    pub daily_max_factor: Decimal,

    /// 訂購量倍數（相對最小庫存）
    pub order_qty_multiplier: Decimal,

    /// 年用量顯示的小數位
    pub usage_decimal_places: u32,

    /// 捨入模式
    pub rounding: RoundingMode,

    /// 交易日期格式（chrono 格式字串）
    pub date_format: String,
}

impl RopConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            months_per_year: Decimal::from(12),
            weeks_per_month: Decimal::new(429, 2),
            days_per_week: Decimal::from(7),
            daily_min_factor: Decimal::new(5, 1),
            daily_max_factor: Decimal::new(15, 1),
            order_qty_multiplier: Decimal::from(2),
            usage_decimal_places: 2,
            rounding: RoundingMode::HalfUp,
            date_format: "%d/%m/%Y".to_string(),
        }
    }

    /// 建構器模式：設置捨入模式
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// 建構器模式：設置日期格式
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// 建構器模式：設置每月週數
    pub fn with_weeks_per_month(mut self, weeks: Decimal) -> Self {
        self.weeks_per_month = weeks;
        self
    }

    /// 建構器模式：設置最小/最大日用量係數
    pub fn with_daily_factors(mut self, min_factor: Decimal, max_factor: Decimal) -> Self {
        self.daily_min_factor = min_factor;
        self.daily_max_factor = max_factor;
        self
    }

    /// 按配置的捨入模式取整
    pub fn round(&self, value: Decimal) -> Decimal {
        self.rounding.round(value)
    }

    /// 年用量顯示值
    pub fn round_usage(&self, value: Decimal) -> Decimal {
        self.rounding.round_dp(value, self.usage_decimal_places)
    }
}

impl Default for RopConfig {
    fn default() -> Self {
        Self::new()
    }
}
