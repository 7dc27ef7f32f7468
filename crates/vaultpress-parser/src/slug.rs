//! Jekyll file names for published notes.

use crate::dates::{date_prefix, parse_date};
use crate::frontmatter::{FrontMatter, read_front_matter};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use vaultpress_core::{Error, Result};

/// Characters that are neither word characters, whitespace nor hyphens
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

/// Runs of whitespace, underscores and hyphens
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").unwrap());

/// Slug a file name without looking at its front matter.
///
/// `"Hello World!.md"` becomes `"hello-world.md"`. Accented characters are
/// decomposed and reduced to ASCII; other non-ASCII characters are dropped.
pub fn slugify_file_name(file_name: &str) -> String {
    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let ext = name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().trim()))
        .unwrap_or_default();

    let ascii: String = stem.trim().nfkd().filter(char::is_ascii).collect();
    let cleaned = NON_WORD.replace_all(&ascii, "");
    let hyphenated = SEPARATORS.replace_all(&cleaned, "-");

    format!(
        "{}{}",
        hyphenated.trim_matches('-').to_lowercase(),
        ext.to_lowercase()
    )
}

/// Slug a note given its already-read front matter.
///
/// Notes with `layout: post` need a parseable `date` and get a
/// `YYYY-MM-DD-` prefix. A name with nothing left to slug is an error for
/// every layout. `path` only labels errors.
pub fn slugify_with_front_matter(path: &Path, front_matter: &FrontMatter) -> Result<String> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let slug = slugify_file_name(&file_name);
    if slug.is_empty() || slug.starts_with('.') {
        return Err(Error::transform(path, "Note name produces an empty slug"));
    }

    if front_matter.layout() != Some("post") {
        return Ok(slug);
    }

    let date = match front_matter.get("date") {
        Some(date) if !date.is_empty() => date,
        _ => {
            return Err(Error::transform(
                path,
                "Missing date field for post layout",
            ));
        }
    };

    match parse_date(date) {
        Some(date) => Ok(format!("{}-{}", date_prefix(date), slug)),
        None => Err(Error::transform(
            path,
            "Invalid date front matter provided for a post layout.",
        )),
    }
}

/// Slug a note on disk, reading its front matter.
pub fn slugify(path: &Path) -> Result<String> {
    let front_matter = read_front_matter(path);
    let slug = slugify_with_front_matter(path, &front_matter)?;
    log::debug!("Slugified {} -> {}", path.display(), slug);
    Ok(slug)
}
