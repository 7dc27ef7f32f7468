//! Command-line arguments.
//!
//! Settings are layered: built-in defaults, then the YAML file given by
//! `--config`, then individual flags.

use crate::logging::LogFormat;
use clap::Parser;
use std::path::PathBuf;
use vaultpress_core::{PublishConfig, Result};
use vaultpress_publish::ReportFormat;

/// Publish an Obsidian vault into a Jekyll site
#[derive(Parser, Debug)]
#[command(name = "vaultpress", author, version, about, long_about = None)]
pub struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "VAULTPRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the Obsidian vault directory
    #[arg(short, long, env = "OBSIDIAN_VAULT_PATH")]
    pub vault: Option<PathBuf>,

    /// Path to the Jekyll site directory
    #[arg(short, long, env = "JEKYLL_SITE_PATH")]
    pub site: Option<PathBuf>,

    /// Publish directory, relative to the vault
    #[arg(long)]
    pub publish_dir: Option<PathBuf>,

    /// Image directory, relative to the vault
    #[arg(long)]
    pub image_dir: Option<PathBuf>,

    /// Image directory, relative to the site
    #[arg(long)]
    pub site_image_dir: Option<PathBuf>,

    /// Report format (text, json, csv)
    #[arg(short, long, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Resolve the effective configuration. Not validated yet.
    pub fn to_config(&self) -> Result<PublishConfig> {
        let mut config = match &self.config {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                PublishConfig::load(path)?
            }
            None => PublishConfig::default(),
        };

        if let Some(vault) = &self.vault {
            config.obsidian_root = vault.clone();
        }
        if let Some(site) = &self.site {
            config.jekyll_root = site.clone();
        }
        if let Some(dir) = &self.publish_dir {
            config.publish_dir = dir.clone();
        }
        if let Some(dir) = &self.image_dir {
            config.obsidian_image_dir = dir.clone();
        }
        if let Some(dir) = &self.site_image_dir {
            config.jekyll_image_dir = dir.clone();
        }

        Ok(config)
    }
}
