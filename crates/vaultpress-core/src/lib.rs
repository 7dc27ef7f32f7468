//! # Vaultpress Core
//!
//! Error types, configuration and root-validated paths shared by every
//! vaultpress crate.
//!
//! ## Core Modules
//!
//! - [`error`] - The [`Error`] enum and [`Result`] alias
//! - [`config`] - [`PublishConfig`] (YAML loadable, builder) and the resolved [`PublishLayout`]
//! - [`paths`] - [`Roots`] and [`ValidatedPath`], paths proven to live under a root
//!
//! ## Usage Examples
//!
//! ### Error Handling
//!
//! ```
//! use vaultpress_core::prelude::*;
//!
//! fn publish_note() -> Result<()> {
//!     Err(Error::transform("Publish/Posts/Draft.md", "Missing date field for post layout"))
//! }
//!
//! let err = publish_note().unwrap_err();
//! assert!(err.is_recoverable());
//! ```
//!
//! ### Configuration
//!
//! ```
//! use vaultpress_core::prelude::*;
//!
//! let config = PublishConfig::default();
//! assert_eq!(config.jekyll_image_dir.to_str(), Some("assets/img"));
//! ```

pub mod config;
pub mod error;
pub mod paths;

pub use config::*;
pub use error::{Error, Result};
pub use paths::{RootKind, Roots, ValidatedPath, expand_path, normalize_lexically};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{PublishConfig, PublishConfigBuilder, PublishLayout};
    pub use crate::error::{Error, Result};
    pub use crate::paths::{RootKind, Roots, ValidatedPath};
}
