//! 資料來源介面

use std::sync::Arc;

use crate::dataset::SourceData;

/// 提供唯讀來源資料
///
/// 查詢之間共享同一份 `SourceData`，每次查詢只在自己的篩選副本上計算。
pub trait DataProvider: Send + Sync {
    /// 取得來源資料
    fn source_data(&self) -> Arc<SourceData>;
}

/// 記憶體中的固定資料來源
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    data: Arc<SourceData>,
}

impl StaticProvider {
    pub fn new(data: SourceData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }
}

impl From<Arc<SourceData>> for StaticProvider {
    fn from(data: Arc<SourceData>) -> Self {
        Self { data }
    }
}

impl DataProvider for StaticProvider {
    fn source_data(&self) -> Arc<SourceData> {
        Arc::clone(&self.data)
    }
}
