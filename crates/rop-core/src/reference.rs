//! 現行 ROP 參考模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::ItemKeyed;

/// 現行 ROP 參考表中的一列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RopReference {
    /// 物料編號
    pub item_code: String,

    /// 現行 ROP
    pub existing_rop: Decimal,
}

impl RopReference {
    pub fn new(item_code: String, existing_rop: Decimal) -> Self {
        Self {
            item_code,
            existing_rop,
        }
    }
}

impl ItemKeyed for RopReference {
    fn item_code(&self) -> &str {
        &self.item_code
    }
}

/// 查詢結果中的現行 ROP
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ReferenceRop {
    Found(Decimal),
    NotFound,
}

impl ReferenceRop {
    pub fn is_found(&self) -> bool {
        matches!(self, ReferenceRop::Found(_))
    }
}

impl From<Option<&RopReference>> for ReferenceRop {
    fn from(reference: Option<&RopReference>) -> Self {
        match reference {
            Some(r) => ReferenceRop::Found(r.existing_rop),
            None => ReferenceRop::NotFound,
        }
    }
}

impl std::fmt::Display for ReferenceRop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceRop::Found(value) => write!(f, "{}", value.normalize()),
            ReferenceRop::NotFound => write!(f, "Data tidak ditemukan"),
        }
    }
}
