//! # Vaultpress
//!
//! Publish the `Publish/` part of an Obsidian vault into a Jekyll site.
//!
//! Every category directory (`Publish/Posts`, `Publish/Projects`) replaces
//! the contents of its site counterpart (`_posts`, `_projects`). Notes get
//! Jekyll file names, bracket links are flattened to their display text and
//! referenced images are copied into the site's image directory.
//!
//! ```no_run
//! use vaultpress::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let config = PublishConfig::builder("~/notes", "~/notes/site").build()?;
//! let report = vaultpress::publish(&config)?;
//! println!("{} notes published", report.total_published());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod logging;

pub use vaultpress_core::prelude::*;
pub use vaultpress_publish::{
    CategoryReport, FailedNote, PublishedNote, Publisher, ReportFormat, RewriteStats,
    TransferReport,
};

/// Validate `config` and publish every category.
///
/// Per-note transform failures are collected in the report; any other
/// error stops the run.
pub fn publish(config: &PublishConfig) -> Result<TransferReport> {
    let layout = config.layout()?;
    Publisher::new(layout).run()
}

/// Re-export commonly used types
pub mod prelude {
    pub use vaultpress_core::prelude::*;
    pub use vaultpress_publish::prelude::*;
}
