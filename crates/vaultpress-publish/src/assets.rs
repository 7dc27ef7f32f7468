//! Image copying between the vault and the site.

use std::fs;
use std::path::{Component, Path};
use vaultpress_core::{Error, PublishLayout, Result, ValidatedPath, normalize_lexically};

/// Source and destination of one referenced image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub source: ValidatedPath,
    pub destination: ValidatedPath,
}

/// Resolve an image path relative to both image directories.
///
/// Targets that leave the image directory (`../x.png`, `/etc/x.png`) are a
/// transform error for the note, not a fatal path error.
pub fn resolve_image(layout: &PublishLayout, relative: &str) -> Result<ImagePair> {
    let relative_path = Path::new(relative);
    let escapes = relative_path.is_absolute()
        || normalize_lexically(relative_path)
            .components()
            .next()
            .is_none_or(|first| !matches!(first, Component::Normal(_)))
        || !normalize_lexically(&layout.source_images.path().join(relative_path))
            .starts_with(layout.source_images.path());

    if escapes {
        return Err(Error::transform(
            relative_path,
            "Image path leaves the image directory",
        ));
    }

    Ok(ImagePair {
        source: layout.source_images.join(&layout.roots, relative_path)?,
        destination: layout.dest_images.join(&layout.roots, relative_path)?,
    })
}

/// Copy `src` to `dst`, creating missing parent directories of `dst`.
///
/// Fails without touching `dst` when `src` does not exist. An existing
/// destination is overwritten.
pub fn ensure_image_available(src: &Path, dst: &Path) -> Result<bool> {
    if !src.is_file() {
        return Err(Error::transform(src, "Obsidian image path does not exist."));
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(Error::io)?;
    }

    let bytes = fs::copy(src, dst).map_err(Error::io)?;
    log::debug!(
        "Copied image {} -> {} ({} bytes)",
        src.display(),
        dst.display(),
        bytes
    );
    Ok(true)
}

/// Resolve and copy one referenced image.
pub fn copy_image(layout: &PublishLayout, relative: &str) -> Result<ImagePair> {
    let pair = resolve_image(layout, relative)?;
    ensure_image_available(&pair.source, &pair.destination)?;
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vaultpress_core::PublishConfig;

    fn layout(temp: &TempDir) -> PublishLayout {
        let vault = temp.path().join("vault");
        let site = temp.path().join("site");
        fs::create_dir_all(vault.join("Publish")).unwrap();
        fs::create_dir_all(vault.join("Assets/Images/sub")).unwrap();
        fs::create_dir_all(site.join("assets/img")).unwrap();
        fs::write(vault.join("Assets/Images/test-image.png"), b"png bytes").unwrap();
        fs::write(vault.join("Assets/Images/sub/nested.png"), b"nested").unwrap();
        fs::write(vault.join("secret.png"), b"secret").unwrap();

        PublishConfig::builder(&vault, &site)
            .build()
            .unwrap()
            .layout()
            .unwrap()
    }

    #[test]
    fn test_copy_image() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);

        let pair = copy_image(&layout, "test-image.png").unwrap();
        assert_eq!(fs::read(&pair.destination).unwrap(), b"png bytes");
    }

    #[test]
    fn test_copy_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);

        let pair = copy_image(&layout, "sub/nested.png").unwrap();
        assert!(pair.destination.ends_with("assets/img/sub/nested.png"));
        assert!(pair.destination.exists());
    }

    #[test]
    fn test_copy_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        fs::write(layout.dest_images.join(&layout.roots, "test-image.png").unwrap(), b"stale")
            .unwrap();

        let pair = copy_image(&layout, "test-image.png").unwrap();
        assert_eq!(fs::read(&pair.destination).unwrap(), b"png bytes");
    }

    #[test]
    fn test_missing_source_never_creates_destination() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);

        let err = copy_image(&layout, "missing/nonexistent.png").unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("does not exist"));
        assert!(!layout.dest_images.path().join("missing").exists());
    }

    #[test]
    fn test_escaping_image_is_rejected() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);

        for target in ["../../secret.png", "/etc/passwd", "sub/../../x.png", ".."] {
            let err = resolve_image(&layout, target).unwrap_err();
            assert!(err.is_recoverable(), "target: {target}");
        }
    }

    #[test]
    fn test_dot_segments_inside_directory_are_allowed() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);

        let pair = resolve_image(&layout, "./sub/../test-image.png").unwrap();
        assert!(pair.source.ends_with("Assets/Images/test-image.png"));
    }
}
