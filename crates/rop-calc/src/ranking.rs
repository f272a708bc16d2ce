//! 年度用量排名

use rop_core::RankLabel;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 依年份數量返回排名標籤（按用量由高到低的位置）
///
/// 最多定義五個位置：n ≥ 5 時前四名與第五個位置有標籤，第六個位置起為 `Unranked`。
/// 因此 n = 6 時真正用量最低的年份會得到 "-"。
pub fn rank_labels(n: usize) -> Vec<RankLabel> {
    use RankLabel::*;

    let scheme: &[RankLabel] = match n {
        0 => &[],
        1 => &[Highest],
        2 => &[Highest, Lowest],
        3 => &[Highest, SecondHighest, Lowest],
        4 => &[Highest, SecondHighest, ThirdHighest, Lowest],
        _ => &[Highest, SecondHighest, ThirdHighest, FourthHighest, Lowest],
    };

    (0..n)
        .map(|i| scheme.get(i).copied().unwrap_or(Unranked))
        .collect()
}

/// 排名計算器
pub struct RankingCalculator;

impl RankingCalculator {
    /// 為每個年份指定排名標籤
    ///
    /// 依總用量降序做穩定排序，用量相同時保留輸入（年份選擇）順序。
    pub fn assign(totals: &[(i32, Decimal)]) -> HashMap<i32, RankLabel> {
        let mut sorted: Vec<(i32, Decimal)> = totals.to_vec();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        let labels = rank_labels(sorted.len());
        sorted
            .iter()
            .zip(labels)
            .map(|((year, _), label)| (*year, label))
            .collect()
    }
}
