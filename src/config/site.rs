//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Offset applied to `published_at` when none is configured
pub const DEFAULT_PUBLISH_OFFSET_HOURS: i64 = 8;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,

    // Directory
    /// Directory holding the `Post{id}` resources, relative to the site root
    pub post_dir: String,
    /// File extension of post resources (without the dot)
    pub post_ext: String,
    /// Directory served for any path that is not a blog route
    pub static_dir: String,

    // Metadata
    /// Hours added to the load time to produce `published_at`
    pub publish_offset_hours: i64,
    /// Upper bound on a single resource load when serving HTTP
    pub read_timeout_ms: u64,

    // Date format used by the views (chrono syntax)
    pub date_format: String,

    // Home page
    #[serde(default)]
    pub index: IndexConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Simple Blog".to_string(),
            subtitle: String::new(),
            author: String::new(),

            post_dir: "posts".to_string(),
            post_ext: "html".to_string(),
            static_dir: "wwwroot".to_string(),

            publish_offset_hours: DEFAULT_PUBLISH_OFFSET_HOURS,
            read_timeout_ms: 5000,

            date_format: "%Y-%m-%d %H:%M".to_string(),

            index: IndexConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Index listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Post ids shown on the index, in display order
    pub ids: Vec<u32>,
    /// List every `Post{id}` resource found in the post directory instead of `ids`
    pub scan: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            ids: vec![1, 2],
            scan: false,
        }
    }
}
