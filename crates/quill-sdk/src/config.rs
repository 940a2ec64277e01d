use std::path::Path;

use serde::{Deserialize, Serialize};

use quill_sync::TransportConfig;

use crate::error::{SdkError, SdkResult};

/// Full client configuration, as read from `quill.toml`.
///
/// ```toml
/// [api]
/// base_url = "https://blog.example/api"
/// request_timeout_secs = 30
///
/// [site]
/// title = "My blog - Home"
/// posts_per_page = 5
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: TransportConfig,
    pub site: SiteConfig,
}

/// Presentation settings used by the page loaders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub posts_per_page: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog - Home".into(),
            description: "Welcome to the blog".into(),
            posts_per_page: 10,
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(raw: &str) -> SdkResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| SdkError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> SdkResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> SdkResult<()> {
        if self.api.page_limit == 0 {
            return Err(SdkError::Config("api.page_limit must be positive".into()));
        }
        if self.site.posts_per_page == 0 {
            return Err(SdkError::Config("site.posts_per_page must be positive".into()));
        }
        Ok(())
    }
}
