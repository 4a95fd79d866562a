use crate::config::{file_config::FileConfig, PlannerConfig};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ntu-planner")]
#[command(about = "Multi-year course schedule planner for the NTU catalog")]
pub struct CliConfig {
    /// 課程查詢 API 端點，不給就用台大課程網
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// 備份檔存放目錄
    #[arg(long)]
    pub data_path: Option<String>,

    /// TOML 設定檔路徑
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 合併順序：預設值 ← 設定檔 ← 命令列旗標
    pub fn resolve(&self) -> Result<PlannerConfig> {
        let mut config = PlannerConfig::default();
        if let Some(path) = &self.config {
            config = FileConfig::from_file(path)?.apply_to(config);
        }
        if let Some(endpoint) = &self.api_endpoint {
            config.catalog_endpoint = endpoint.clone();
        }
        if let Some(data_path) = &self.data_path {
            config.data_path = data_path.clone();
        }
        Ok(config)
    }
}
