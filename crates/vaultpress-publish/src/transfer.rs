//! Transfer of publish categories from the vault into the site.
//!
//! Each directory under the publish directory is a category (`Posts`,
//! `Projects`) mapped to an existing site directory (`_posts`, `_projects`).
//! A category's site directory is emptied, then each note is slugged, copied
//! and rewritten. A note that fails to transform is removed again and
//! reported; anything else aborts the run.

use crate::report::{CategoryReport, FailedNote, PublishedNote, TransferReport};
use crate::rewrite::ReferenceRewriter;
use std::fs;
use tracing::instrument;
use vaultpress_core::{Error, PublishLayout, Result, RootKind, ValidatedPath};
use vaultpress_parser::slugify;
use walkdir::WalkDir;

/// Publishes every category of one layout
pub struct Publisher {
    layout: PublishLayout,
}

impl Publisher {
    pub fn new(layout: PublishLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PublishLayout {
        &self.layout
    }

    /// Category directories under the publish directory, sorted by name.
    ///
    /// Any file directly in the publish directory is a structural error.
    pub fn get_publish_subdirectories(&self) -> Result<Vec<ValidatedPath>> {
        let mut subdirectories = Vec::new();

        for entry in fs::read_dir(&self.layout.publish_dir).map_err(Error::io)? {
            let path = entry.map_err(Error::io)?.path();
            if !path.is_dir() {
                return Err(Error::structural(format!(
                    "File {} located in the publish directory",
                    path.file_name().unwrap_or_default().to_string_lossy()
                )));
            }
            subdirectories.push(ValidatedPath::source(&self.layout.roots, path)?);
        }

        subdirectories.sort();
        Ok(subdirectories)
    }

    /// Site directory for a category: `Posts` maps to `<site>/_posts`.
    pub fn get_jekyll_directory(&self, subdirectory: &ValidatedPath) -> Result<ValidatedPath> {
        if subdirectory.parent() != Some(self.layout.publish_dir.path()) {
            return Err(Error::structural(format!(
                "{} is not located directly in the publish directory {}",
                subdirectory, self.layout.publish_dir
            )));
        }

        let name = subdirectory
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let jekyll_dir = ValidatedPath::dest(
            &self.layout.roots,
            self.layout.roots.dest().join(format!("_{}", name)),
        )?;

        if !jekyll_dir.is_dir() {
            return Err(Error::structural(format!(
                "Jekyll directory {} does not exist",
                jekyll_dir
            )));
        }

        Ok(jekyll_dir)
    }

    /// Delete everything below `directory`, keeping the directory itself.
    ///
    /// Refuses anything that is not strictly inside the site root.
    #[instrument(skip(self), fields(dir = %directory), name = "remove_contents_of")]
    pub fn remove_contents_of(&self, directory: &ValidatedPath) -> Result<()> {
        if directory.kind() != RootKind::Dest || directory.is_root(&self.layout.roots) {
            return Err(Error::structural(
                "Trying to remove contents outside of this project! Aborted.",
            ));
        }

        for entry in WalkDir::new(directory).min_depth(1).contents_first(true) {
            let entry = entry.map_err(|e| Error::io(e.into()))?;
            if entry.file_type().is_dir() {
                fs::remove_dir(entry.path()).map_err(Error::io)?;
            } else {
                fs::remove_file(entry.path()).map_err(Error::io)?;
            }
            log::debug!("Removed {}", entry.path().display());
        }

        Ok(())
    }

    /// Notes directly inside `directory` (not recursive), sorted.
    ///
    /// Notes whose names are not valid UTF-8 are left out; see
    /// [`Publisher::publish_category`] for how they are reported.
    pub fn get_directory_md_files(&self, directory: &ValidatedPath) -> Result<Vec<ValidatedPath>> {
        self.scan_notes(directory).map(|(notes, _)| notes)
    }

    /// Notes in `directory`, plus the ones rejected for their file name.
    fn scan_notes(
        &self,
        directory: &ValidatedPath,
    ) -> Result<(Vec<ValidatedPath>, Vec<FailedNote>)> {
        let mut notes = Vec::new();
        let mut rejected = Vec::new();

        for entry in fs::read_dir(directory).map_err(Error::io)? {
            let path = entry.map_err(Error::io)?.path();
            let is_note = path
                .extension()
                .is_some_and(|ext| *ext == *self.layout.note_extension);
            if !is_note || !path.is_file() {
                continue;
            }

            let file_name = path.file_name().unwrap_or_default();
            if file_name.to_str().is_none() {
                rejected.push(FailedNote {
                    path: directory.relative_to_root(&self.layout.roots).join(file_name),
                    reason: "Note name is not valid UTF-8".to_string(),
                });
                continue;
            }
            notes.push(directory.join(&self.layout.roots, file_name)?);
        }

        notes.sort();
        rejected.sort_by(|a, b| a.path.cmp(&b.path));
        Ok((notes, rejected))
    }

    /// Slug, copy and rewrite one note into `target_dir`.
    ///
    /// An existing file at the destination is never overwritten; the target
    /// directory was emptied, so it belongs to another note of this run. If
    /// the rewrite fails the copied file is deleted before the error is
    /// returned.
    #[instrument(skip(self), fields(note = %note), name = "transfer_publish_file")]
    pub fn transfer_publish_file(
        &self,
        note: &ValidatedPath,
        target_dir: &ValidatedPath,
    ) -> Result<PublishedNote> {
        let slug = slugify(note)?;

        let destination = target_dir.join(&self.layout.roots, &slug)?;
        if destination.exists() {
            return Err(Error::transform(
                note.path(),
                format!("{} was already published by another note", slug),
            ));
        }
        fs::copy(note, &destination).map_err(Error::io)?;

        match ReferenceRewriter::new(&self.layout).rewrite_file(&destination) {
            Ok(stats) => Ok(PublishedNote {
                source: note.relative_to_root(&self.layout.roots).to_path_buf(),
                destination: destination.relative_to_root(&self.layout.roots).to_path_buf(),
                stats,
            }),
            Err(e) => {
                if let Err(remove_err) = fs::remove_file(&destination) {
                    log::warn!(
                        "Could not remove partial output {}: {}",
                        destination,
                        remove_err
                    );
                }
                Err(e)
            }
        }
    }

    /// Publish one category into its site directory.
    #[instrument(skip(self), fields(category = %subdirectory), name = "publish_category")]
    pub fn publish_category(&self, subdirectory: &ValidatedPath) -> Result<CategoryReport> {
        let roots = &self.layout.roots;
        let jekyll_dir = self.get_jekyll_directory(subdirectory)?;

        self.remove_contents_of(&jekyll_dir)?;
        let (notes, rejected) = self.scan_notes(subdirectory)?;

        let mut report = CategoryReport::new(
            subdirectory
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            subdirectory.relative_to_root(roots).to_path_buf(),
            jekyll_dir.relative_to_root(roots).to_path_buf(),
        );
        for note in rejected {
            log::warn!("Skipped {}: {}", note.path.display(), note.reason);
            report.failed.push(note);
        }

        let total = notes.len();
        for (index, note) in notes.iter().enumerate() {
            match self.transfer_publish_file(note, &jekyll_dir) {
                Ok(published) => {
                    log::info!(
                        "[{}/{}] Transferred {} -> {}",
                        index + 1,
                        total,
                        published.source.display(),
                        published.destination.display()
                    );
                    report.published.push(published);
                }
                Err(e) if e.is_recoverable() => {
                    log::warn!("[{}/{}] Skipped {}: {}", index + 1, total, note, e);
                    report.failed.push(FailedNote {
                        path: note.relative_to_root(roots).to_path_buf(),
                        reason: match e {
                            Error::Transform { reason, .. } => reason,
                            other => other.to_string(),
                        },
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    /// Publish every category, in name order.
    #[instrument(skip(self), name = "publish_run")]
    pub fn run(&self) -> Result<TransferReport> {
        log::info!(
            "Publishing {} into {}",
            self.layout.publish_dir,
            self.layout.roots.dest().display()
        );

        let mut report = TransferReport::default();
        for subdirectory in self.get_publish_subdirectories()? {
            let category = self.publish_category(&subdirectory)?;
            log::info!(
                "{}: {} published, {} failed",
                category.name,
                category.published.len(),
                category.failed.len()
            );
            report.categories.push(category);
        }

        log::info!(
            "Publish finished: {} notes published, {} failed",
            report.total_published(),
            report.total_failed()
        );
        Ok(report)
    }
}
