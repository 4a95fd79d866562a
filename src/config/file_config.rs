use crate::config::PlannerConfig;
use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML 設定檔，所有區段與欄位都可省略，省略的用預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub catalog: Option<CatalogSection>,
    pub plan: Option<PlanSection>,
    pub storage: Option<StorageSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub endpoint: Option<String>,
    pub batch_size: Option<u32>,
    pub sorting: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanSection {
    pub base_year: Option<u16>,
    pub years: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_path: Option<String>,
}

impl FileConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigError {
            field: "toml_parsing".to_string(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COURSE_API})，找不到的變數原樣保留
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 疊在基底設定上，檔案裡有給的欄位才覆蓋
    pub fn apply_to(self, mut config: PlannerConfig) -> PlannerConfig {
        if let Some(catalog) = self.catalog {
            if let Some(endpoint) = catalog.endpoint {
                config.catalog_endpoint = endpoint;
            }
            if let Some(batch_size) = catalog.batch_size {
                config.batch_size = batch_size;
            }
            if let Some(sorting) = catalog.sorting {
                config.sorting = sorting;
            }
        }
        if let Some(plan) = self.plan {
            if let Some(base_year) = plan.base_year {
                config.base_year = base_year;
            }
            if let Some(years) = plan.years {
                config.year_span = years;
            }
        }
        if let Some(storage) = self.storage {
            if let Some(data_path) = storage.data_path {
                config.data_path = data_path;
            }
        }
        config
    }
}
