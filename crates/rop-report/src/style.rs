//! 表格標示樣式
//!
//! 純函式：列類型與排名標籤 → 樣式標籤，不依賴任何計算邏輯。

use rop_core::RankLabel;
use serde::Serialize;

/// 報表列類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowKind {
    /// 年度總出庫量
    Usage,
    /// 月/週/日用量
    Rate,
    /// ROP、最小庫存、訂購量、最大庫存
    Evaluation,
    /// 排名標籤列
    Rank,
}

/// 儲存格樣式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleTag {
    pub background: &'static str,
    pub foreground: Option<&'static str>,
}

impl StyleTag {
    const fn background(color: &'static str) -> Self {
        Self {
            background: color,
            foreground: None,
        }
    }

    const fn inverted(color: &'static str) -> Self {
        Self {
            background: color,
            foreground: Some("#ffffff"),
        }
    }

    /// CSS 宣告
    pub fn to_css(&self) -> String {
        match self.foreground {
            Some(fg) => format!("background-color: {}; color: {};", self.background, fg),
            None => format!("background-color: {}", self.background),
        }
    }
}

/// 整列底色
pub fn row_style(kind: RowKind) -> StyleTag {
    match kind {
        RowKind::Usage | RowKind::Rate => StyleTag::background("#fff3cd"),
        RowKind::Evaluation | RowKind::Rank => StyleTag::background("#d4edda"),
    }
}

/// 排名列中單一儲存格的樣式
pub fn rank_cell_style(label: RankLabel) -> StyleTag {
    match label {
        RankLabel::Highest => StyleTag::inverted("#0d47a1"),
        RankLabel::SecondHighest => StyleTag::inverted("#1565c0"),
        RankLabel::ThirdHighest => StyleTag::background("#1e88e5"),
        RankLabel::FourthHighest => StyleTag::background("#42a5f5"),
        RankLabel::Lowest => StyleTag::background("#bbdefb"),
        RankLabel::Unranked => StyleTag::background("#ffffff"),
    }
}
