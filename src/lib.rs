//! simple-blog: a small blog reader
//!
//! Posts are template files that declare their own metadata inline
//! (`var postTitle = "...";`). This crate extracts that metadata, lists
//! posts and serves index and detail pages over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

pub use error::BlogError;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding post resources
    pub post_dir: std::path::PathBuf,
    /// Static asset directory
    pub static_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let post_dir = base_dir.join(&config.post_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            post_dir,
            static_dir,
        }
    }

    /// Metadata loader bound to this blog's post directory
    pub fn loader(&self) -> content::PostLoader<'_> {
        content::PostLoader::new(self)
    }
}
