//! In-place reference rewriting for notes already copied into the site.
//!
//! Standard-syntax references are rewritten first, then bracket references.
//! The two syntaxes use disjoint delimiters, so the output of one pass is
//! never matched by the other.

use crate::assets::copy_image;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::instrument;
use vaultpress_core::{Error, PublishLayout, Result};
use vaultpress_parser::{
    ReferenceOccurrence, Syntax, TargetKind, classify_target, replace_references,
    transform_image_ref, transform_md_ref, url_path,
};

/// What a rewrite did to one note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    /// Local images copied into the site
    pub images_copied: usize,
    /// Bracket document links replaced by their display text
    pub links_flattened: usize,
    /// `http(s)` images left as they were
    pub external_images: usize,
}

/// Rewrites references against one [`PublishLayout`].
pub struct ReferenceRewriter<'a> {
    layout: &'a PublishLayout,
}

impl<'a> ReferenceRewriter<'a> {
    pub fn new(layout: &'a PublishLayout) -> Self {
        Self { layout }
    }

    /// Rewrite note content, copying every referenced local image.
    ///
    /// The first missing image aborts the rewrite with a transform error.
    pub fn rewrite_content(&self, content: &str) -> Result<(String, RewriteStats)> {
        let mut stats = RewriteStats::default();

        let content = replace_references(content, Syntax::Standard, |reference| {
            self.rewrite_standard(reference, &mut stats)
        })?;
        let content = replace_references(&content, Syntax::Bracket, |reference| {
            self.rewrite_bracket(reference, &mut stats)
        })?;

        Ok((content, stats))
    }

    /// Rewrite a note on disk in place.
    #[instrument(skip(self), fields(file = ?note), name = "rewrite_file")]
    pub fn rewrite_file(&self, note: &Path) -> Result<RewriteStats> {
        let content = fs::read_to_string(note).map_err(Error::io)?;
        let (rewritten, stats) = self.rewrite_content(&content)?;

        if rewritten != content {
            fs::write(note, rewritten).map_err(Error::io)?;
        }

        log::debug!(
            "Rewrote {}: {} images, {} links flattened, {} external images",
            note.display(),
            stats.images_copied,
            stats.links_flattened,
            stats.external_images
        );
        Ok(stats)
    }

    /// `[text](url)` is left alone unless it is a local image.
    fn rewrite_standard(
        &self,
        reference: &ReferenceOccurrence<'_>,
        stats: &mut RewriteStats,
    ) -> Result<String> {
        if !reference.is_image {
            return Ok(reference.matched.to_string());
        }
        if classify_target(reference.raw_target) == TargetKind::Web {
            stats.external_images += 1;
            return Ok(reference.matched.to_string());
        }

        let pair = copy_image(self.layout, reference.raw_target)?;
        stats.images_copied += 1;

        let relative = pair
            .destination
            .strip_prefix(self.layout.dest_images.path())
            .unwrap_or(Path::new(reference.raw_target));
        Ok(format!("![{}]({})", reference.text(), url_path(relative)))
    }

    /// `![[image|...]]` becomes a site image, `[[Note|Text]]` becomes `Text`.
    fn rewrite_bracket(
        &self,
        reference: &ReferenceOccurrence<'_>,
        stats: &mut RewriteStats,
    ) -> Result<String> {
        if !reference.is_image {
            stats.links_flattened += 1;
            return Ok(transform_md_ref(reference.raw_target));
        }

        let image_dir = self.layout.dest_images.relative_to_root(&self.layout.roots);
        let (markdown, relative) = transform_image_ref(reference.raw_target, image_dir);
        copy_image(self.layout, &relative)?;
        stats.images_copied += 1;
        Ok(markdown)
    }
}
