//! Command line and environment settings of the host.

use clap::Parser;
use common::config::{UiConfig, DEFAULT_API_BASE_URL};

#[derive(Parser, Debug, Clone)]
#[command(name = "clickhouse-transfer")]
#[command(about = "Serves the ClickHouse transfer wizard and opens it in the browser")]
pub struct HostConfig {
    /// Address to bind
    #[arg(long, env = "TRANSFER_UI_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "TRANSFER_UI_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL of the ingestion backend the browser talks to
    #[arg(long, env = "INGESTION_API_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Do not open a browser window on start
    #[arg(long, env = "TRANSFER_UI_NO_BROWSER")]
    pub no_browser: bool,
}

impl HostConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn ui_config(&self) -> UiConfig {
        UiConfig::new(&self.api_base_url)
    }
}
