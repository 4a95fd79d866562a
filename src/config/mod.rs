#[cfg(feature = "cli")]
pub mod cli;
pub mod file_config;
pub mod storage;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://course.ntu.edu.tw/api/v1/courses/search/dept";

/// 所有來源（預設值、TOML 檔、命令列）合併後的最終設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub catalog_endpoint: String,
    pub data_path: String,
    pub batch_size: u32,
    pub sorting: String,
    /// 大一對應的民國學年
    pub base_year: u16,
    /// 計畫涵蓋的學年數（上下學期各一個學期鍵）
    pub year_span: u16,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog_endpoint: DEFAULT_CATALOG_ENDPOINT.to_string(),
            data_path: "./data".to_string(),
            batch_size: 30,
            sorting: "correlation".to_string(),
            base_year: 112,
            year_span: 7,
        }
    }
}

impl ConfigProvider for PlannerConfig {
    fn catalog_endpoint(&self) -> &str {
        &self.catalog_endpoint
    }

    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn batch_size(&self) -> u32 {
        self.batch_size
    }

    fn sorting(&self) -> &str {
        &self.sorting
    }

    fn base_year(&self) -> u16 {
        self.base_year
    }

    fn year_span(&self) -> u16 {
        self.year_span
    }
}

impl Validate for PlannerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("catalog.endpoint", &self.catalog_endpoint)?;
        validate_path("storage.data_path", &self.data_path)?;
        validate_range("catalog.batch_size", self.batch_size, 1, 200)?;
        validate_range("plan.base_year", self.base_year, 100, 200)?;
        validate_range("plan.years", self.year_span, 1, 7)?;
        Ok(())
    }
}
