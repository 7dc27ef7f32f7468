//! Root-validated paths.
//!
//! Publishing touches two trees: the Obsidian vault (source) and the Jekyll
//! site (destination). A [`ValidatedPath`] proves at construction time that it
//! lives under the root configured for its [`RootKind`]. The roots themselves
//! live in a [`Roots`] table that is passed around explicitly, so tests can
//! point both kinds at temporary directories.

use crate::error::{Error, Result};
use std::fmt;
use std::ffi::OsString;
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};

/// Which tree a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RootKind {
    /// The Obsidian vault
    Source,
    /// The Jekyll site
    Dest,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "Source"),
            Self::Dest => write!(f, "Dest"),
        }
    }
}

/// Table mapping each [`RootKind`] to its canonical root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    source: PathBuf,
    dest: PathBuf,
}

impl Roots {
    /// Resolve both roots. Fails if either cannot be reached.
    pub fn new(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            source: resolve_root(source.as_ref(), RootKind::Source)?,
            dest: resolve_root(dest.as_ref(), RootKind::Dest)?,
        })
    }

    /// Root directory for the given kind
    pub fn root(&self, kind: RootKind) -> &Path {
        match kind {
            RootKind::Source => &self.source,
            RootKind::Dest => &self.dest,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

fn resolve_root(root: &Path, kind: RootKind) -> Result<PathBuf> {
    let expanded = expand_path(root)?;
    expanded.canonicalize().map_err(|e| {
        Error::invalid_path(format!(
            "{} root {} is unreachable: {}",
            kind,
            expanded.display(),
            e
        ))
    })
}

/// Expand tilde and environment variables, then make the path absolute
/// relative to the current directory.
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::invalid_path("Path contains invalid UTF-8"))?;

    let expanded = shellexpand::full(path_str)
        .map_err(|e| Error::invalid_path(format!("Failed to expand path: {}", e)))?;

    absolutize(PathBuf::from(expanded.as_ref()))
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&path))
            .map_err(|e| Error::invalid_path(format!("Failed to get current directory: {}", e)))
    }
}

/// Remove `.` and `..` components without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Canonicalize the longest existing prefix of `path` and re-append the rest.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut rest: Vec<OsString> = Vec::new();

    loop {
        if let Ok(mut resolved) = existing.canonicalize() {
            for part in rest.iter().rev() {
                resolved.push(part);
            }
            return resolved;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// An absolute path proven to live under the root of its [`RootKind`].
///
/// Immutable. Derefs to [`Path`], so `parent()`, `file_name()`, `exists()`
/// and friends return plain paths; use [`ValidatedPath::join`] to derive a
/// new validated path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatedPath {
    kind: RootKind,
    path: PathBuf,
}

impl ValidatedPath {
    /// Validate `path` against the root configured for `kind`.
    ///
    /// `~` is expanded and relative paths are taken from the current
    /// directory. The path itself does not need to exist.
    pub fn new(roots: &Roots, kind: RootKind, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| Error::invalid_path("Path contains invalid UTF-8"))?;
        let expanded = shellexpand::tilde(path_str);
        let absolute = normalize_lexically(&absolutize(PathBuf::from(expanded.as_ref()))?);

        let root = roots.root(kind);
        if absolute.starts_with(root) {
            return Ok(Self {
                kind,
                path: absolute,
            });
        }

        // Root is canonical; the candidate may reach it through a symlink
        let resolved = resolve_existing_prefix(&absolute);
        if resolved.starts_with(root) {
            return Ok(Self {
                kind,
                path: resolved,
            });
        }

        Err(Error::invalid_path(format!(
            "Path {} is outside {} root {}",
            absolute.display(),
            kind,
            root.display()
        )))
    }

    /// Validate a path inside the Obsidian vault
    pub fn source(roots: &Roots, path: impl AsRef<Path>) -> Result<Self> {
        Self::new(roots, RootKind::Source, path)
    }

    /// Validate a path inside the Jekyll site
    pub fn dest(roots: &Roots, path: impl AsRef<Path>) -> Result<Self> {
        Self::new(roots, RootKind::Dest, path)
    }

    pub fn kind(&self) -> RootKind {
        self.kind
    }

    /// Access the raw path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    /// Join a child path and re-validate it against the same root.
    pub fn join(&self, roots: &Roots, child: impl AsRef<Path>) -> Result<Self> {
        Self::new(roots, self.kind, self.path.join(child))
    }

    /// Path relative to the root of this path's kind.
    pub fn relative_to_root<'a>(&'a self, roots: &Roots) -> &'a Path {
        self.path
            .strip_prefix(roots.root(self.kind))
            .unwrap_or(Path::new(""))
    }

    /// True when the path is the root itself
    pub fn is_root(&self, roots: &Roots) -> bool {
        self.path == roots.root(self.kind)
    }
}

impl Deref for ValidatedPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for ValidatedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ValidatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, Roots) {
        let temp = TempDir::new().unwrap();
        let vault = temp.path().join("vault");
        let site = temp.path().join("site");
        std::fs::create_dir_all(vault.join("Publish/Posts")).unwrap();
        std::fs::create_dir_all(site.join("_posts")).unwrap();
        let roots = Roots::new(&vault, &site).unwrap();
        (temp, roots)
    }

    #[test]
    fn test_valid_source_path() {
        let (_temp, roots) = fixture();
        let note = roots.source().join("Publish/Posts/file1.md");
        let path = ValidatedPath::source(&roots, &note).unwrap();
        assert_eq!(path.kind(), RootKind::Source);
        assert_eq!(path.path(), note);
        assert!(path.parent().unwrap().exists());
    }

    #[test]
    fn test_valid_dest_path_need_not_exist() {
        let (_temp, roots) = fixture();
        let post = roots.dest().join("_posts/post.md");
        let path = ValidatedPath::dest(&roots, &post).unwrap();
        assert!(!path.exists());
        assert_eq!(path.relative_to_root(&roots), Path::new("_posts/post.md"));
    }

    #[test]
    fn test_root_itself_is_valid() {
        let (_temp, roots) = fixture();
        let path = ValidatedPath::dest(&roots, roots.dest()).unwrap();
        assert!(path.is_root(&roots));
    }

    #[test]
    fn test_outside_root_is_rejected() {
        let (_temp, roots) = fixture();
        let elsewhere = TempDir::new().unwrap();
        let err = ValidatedPath::source(&roots, elsewhere.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let (_temp, roots) = fixture();
        let inside_vault = roots.source().join("Publish/outside_jekyll.md");
        assert!(ValidatedPath::dest(&roots, inside_vault).is_err());
    }

    #[test]
    fn test_parent_dir_escape_is_rejected() {
        let (_temp, roots) = fixture();
        let sneaky = roots.dest().join("_posts/../../vault/secret.md");
        assert!(ValidatedPath::dest(&roots, sneaky).is_err());
    }

    #[test]
    fn test_join_revalidates() {
        let (_temp, roots) = fixture();
        let posts = ValidatedPath::dest(&roots, roots.dest().join("_posts")).unwrap();
        let post = posts.join(&roots, "hello-world.md").unwrap();
        assert_eq!(post.kind(), RootKind::Dest);
        assert!(posts.join(&roots, "../../escape.md").is_err());
    }

    #[test]
    fn test_unreachable_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");
        let err = Roots::new(&missing, temp.path()).unwrap_err();
        assert!(err.to_string().contains("unreachable"));
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/./c/../d")),
            PathBuf::from("/a/b/d")
        );
        assert_eq!(normalize_lexically(Path::new("/a/../../b")), PathBuf::from("/b"));
    }
}
