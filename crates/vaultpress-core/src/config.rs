//! Configuration types for publishing a vault into a site.
//!
//! Follows a builder pattern for complex configuration with validation.
//! A [`PublishConfig`] is plain data (loadable from YAML); [`PublishConfig::layout`]
//! resolves it into a [`PublishLayout`] of validated paths that the rest of
//! the pipeline consumes.

use crate::error::{Error, Result};
use crate::paths::{Roots, ValidatedPath, expand_path};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default publish directory, relative to the vault root
pub const DEFAULT_PUBLISH_DIR: &str = "Publish";
/// Default image directory, relative to the vault root
pub const DEFAULT_OBSIDIAN_IMAGE_DIR: &str = "Assets/Images";
/// Default image directory, relative to the site root
pub const DEFAULT_JEKYLL_IMAGE_DIR: &str = "assets/img";
/// Default note extension
pub const DEFAULT_NOTE_EXTENSION: &str = "md";

/// Configuration for a single publish run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Root of the Obsidian vault
    pub obsidian_root: PathBuf,
    /// Root of the Jekyll site
    pub jekyll_root: PathBuf,
    /// Directory holding one subdirectory per category, relative to `obsidian_root`
    pub publish_dir: PathBuf,
    /// Image directory in the vault, relative to `obsidian_root`
    pub obsidian_image_dir: PathBuf,
    /// Image directory in the site, relative to `jekyll_root`
    pub jekyll_image_dir: PathBuf,
    /// Extension (without dot) of the notes to publish
    pub note_extension: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            obsidian_root: PathBuf::from(".."),
            jekyll_root: PathBuf::from("../site"),
            publish_dir: PathBuf::from(DEFAULT_PUBLISH_DIR),
            obsidian_image_dir: PathBuf::from(DEFAULT_OBSIDIAN_IMAGE_DIR),
            jekyll_image_dir: PathBuf::from(DEFAULT_JEKYLL_IMAGE_DIR),
            note_extension: DEFAULT_NOTE_EXTENSION.to_string(),
        }
    }
}

impl PublishConfig {
    /// Create a new config with builder
    pub fn builder(
        obsidian_root: impl Into<PathBuf>,
        jekyll_root: impl Into<PathBuf>,
    ) -> PublishConfigBuilder {
        PublishConfigBuilder::new(obsidian_root, jekyll_root)
    }

    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!(
                "Failed to load configuration from {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize configuration: {}", e)))?;

        std::fs::write(path, yaml).map_err(|e| {
            Error::config_error(format!(
                "Failed to save configuration to {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Validate the configuration against the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.note_extension.is_empty() || self.note_extension.starts_with('.') {
            return Err(Error::config_error(
                "note_extension must be a bare extension such as \"md\"",
            ));
        }

        let obsidian_root = expand_path(&self.obsidian_root)?;
        let jekyll_root = expand_path(&self.jekyll_root)?;

        for (label, dir) in [
            ("Obsidian root", obsidian_root.clone()),
            ("Jekyll root", jekyll_root.clone()),
            ("Publish directory", obsidian_root.join(&self.publish_dir)),
            (
                "Obsidian image directory",
                obsidian_root.join(&self.obsidian_image_dir),
            ),
            (
                "Jekyll image directory",
                jekyll_root.join(&self.jekyll_image_dir),
            ),
        ] {
            if !dir.is_dir() {
                return Err(Error::config_error(format!(
                    "{} is not a directory: {}",
                    label,
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Validate and resolve into a [`PublishLayout`].
    pub fn layout(&self) -> Result<PublishLayout> {
        self.validate()?;

        let roots = Roots::new(&self.obsidian_root, &self.jekyll_root)?;
        let publish_dir = ValidatedPath::source(&roots, roots.source().join(&self.publish_dir))?;
        let source_images =
            ValidatedPath::source(&roots, roots.source().join(&self.obsidian_image_dir))?;
        let dest_images = ValidatedPath::dest(&roots, roots.dest().join(&self.jekyll_image_dir))?;

        log::debug!(
            "Resolved layout: vault={} site={} publish={} images={} -> {}",
            roots.source().display(),
            roots.dest().display(),
            publish_dir,
            source_images,
            dest_images
        );

        Ok(PublishLayout {
            roots,
            publish_dir,
            source_images,
            dest_images,
            note_extension: self.note_extension.clone(),
        })
    }
}

/// Builder for PublishConfig
pub struct PublishConfigBuilder {
    config: PublishConfig,
}

impl PublishConfigBuilder {
    /// Create a new builder
    pub fn new(obsidian_root: impl Into<PathBuf>, jekyll_root: impl Into<PathBuf>) -> Self {
        Self {
            config: PublishConfig {
                obsidian_root: obsidian_root.into(),
                jekyll_root: jekyll_root.into(),
                ..PublishConfig::default()
            },
        }
    }

    /// Set the publish directory (relative to the vault root)
    pub fn publish_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.publish_dir = dir.into();
        self
    }

    /// Set the vault image directory (relative to the vault root)
    pub fn obsidian_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.obsidian_image_dir = dir.into();
        self
    }

    /// Set the site image directory (relative to the site root)
    pub fn jekyll_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.jekyll_image_dir = dir.into();
        self
    }

    pub fn note_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.note_extension = ext.into();
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<PublishConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Resolved, validated directories for one publish run.
///
/// Read-only once built; every component receives it explicitly.
#[derive(Debug, Clone)]
pub struct PublishLayout {
    pub roots: Roots,
    /// Category directories live directly under this
    pub publish_dir: ValidatedPath,
    /// Where image references are resolved in the vault
    pub source_images: ValidatedPath,
    /// Where images are copied in the site
    pub dest_images: ValidatedPath,
    pub note_extension: String,
}
