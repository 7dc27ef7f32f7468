//! # Vaultpress Publish
//!
//! Filesystem side of publishing: clearing site directories, copying notes
//! and images, rewriting references in place, and reporting the outcome.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultpress_core::prelude::*;
//! use vaultpress_publish::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let layout = PublishConfig::builder("~/notes", "~/blog").build()?.layout()?;
//! let report = Publisher::new(layout).run()?;
//! print!("{}", report.to_text());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`transfer`] - [`Publisher`]: categories, clearing, per-note transfer
//! - [`rewrite`] - [`ReferenceRewriter`]: in-place link and image rewriting
//! - [`assets`] - Image resolution and copying
//! - [`report`] - [`TransferReport`] in text, JSON and CSV

pub mod assets;
pub mod report;
pub mod rewrite;
pub mod transfer;

pub use assets::{ImagePair, copy_image, ensure_image_available, resolve_image};
pub use report::{CategoryReport, FailedNote, PublishedNote, ReportFormat, TransferReport};
pub use rewrite::{ReferenceRewriter, RewriteStats};
pub use transfer::Publisher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::report::{ReportFormat, TransferReport};
    pub use crate::rewrite::{ReferenceRewriter, RewriteStats};
    pub use crate::transfer::Publisher;
}
