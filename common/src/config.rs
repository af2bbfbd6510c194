use serde::{Deserialize, Serialize};

/// Base URL of the ingestion backend used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api/ingestion";

/// Path under which the local host publishes [`UiConfig`].
pub const UI_CONFIG_PATH: &str = "/api/ui-config";

/// Runtime settings handed from the host to the browser application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    pub api_base_url: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl UiConfig {
    pub fn new(api_base_url: impl AsRef<str>) -> Self {
        let trimmed = api_base_url.as_ref().trim().trim_end_matches('/');
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self {
                api_base_url: trimmed.to_string(),
            }
        }
    }
}
