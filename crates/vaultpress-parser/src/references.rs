//! Link and image references in note content.
//!
//! Two syntaxes are recognised:
//!
//! - Standard markdown: `[text](target)` and `![alt](target)`
//! - Obsidian brackets: `[[target]]` and `![[target|modifiers]]`
//!
//! This module only parses and formats. Copying images and rewriting files
//! is the caller's job; see [`replace_references`] for the hook.

use regex::{Captures, Regex};
use std::ops::Range;
use std::path::{Component, Path};
use std::sync::LazyLock;
use vaultpress_core::{Result, normalize_lexically};

/// Matches `[text](target)` with an optional leading `!`
static STANDARD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Matches `[[target]]` with an optional leading `!`
static BRACKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[\[([^\]\[]+)\]\]").unwrap());

/// Default alt text for bracket images without one
pub const DEFAULT_ALT_TEXT: &str = "Image";

/// Reference syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// `[text](target)`
    Standard,
    /// `[[target]]`
    Bracket,
}

impl Syntax {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Standard => &*STANDARD_PATTERN,
            Self::Bracket => &*BRACKET_PATTERN,
        }
    }
}

/// Where a standard-syntax target points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// `http://` or `https://`
    Web,
    /// Anything else, resolved against the image directory
    Local,
}

/// Classify a reference target.
pub fn classify_target(target: &str) -> TargetKind {
    if target.starts_with("http://") || target.starts_with("https://") {
        TargetKind::Web
    } else {
        TargetKind::Local
    }
}

/// One matched reference. Borrowed from the content it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOccurrence<'a> {
    pub syntax: Syntax,
    /// Leading `!`
    pub is_image: bool,
    /// URL for standard syntax, bracket interior for bracket syntax
    pub raw_target: &'a str,
    /// Text between `[` and `]` (standard syntax only)
    pub alt_or_display_text: Option<&'a str>,
    /// The whole matched text
    pub matched: &'a str,
    /// Byte range of the whole match
    pub span: Range<usize>,
}

impl<'a> ReferenceOccurrence<'a> {
    fn from_captures(syntax: Syntax, caps: &Captures<'a>) -> Self {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let matched = caps.get(0).map_or("", |m| m.as_str());
        let is_image = caps.get(1).is_some_and(|m| m.as_str() == "!");
        let text = |group| caps.get(group).map_or("", |m| m.as_str());

        match syntax {
            Syntax::Standard => Self {
                syntax,
                is_image,
                raw_target: text(3),
                alt_or_display_text: Some(text(2)),
                matched,
                span: whole,
            },
            Syntax::Bracket => Self {
                syntax,
                is_image,
                raw_target: text(2),
                alt_or_display_text: None,
                matched,
                span: whole,
            },
        }
    }

    /// Alt (or link) text; empty for bracket references
    pub fn text(&self) -> &'a str {
        self.alt_or_display_text.unwrap_or("")
    }
}

/// Find every non-overlapping reference of one syntax.
pub fn find_references(content: &str, syntax: Syntax) -> Vec<ReferenceOccurrence<'_>> {
    syntax
        .pattern()
        .captures_iter(content)
        .map(|caps| ReferenceOccurrence::from_captures(syntax, &caps))
        .collect()
}

/// Replace every reference of one syntax with the closure's output.
///
/// Text between matches is copied through unchanged. The first error aborts
/// the whole replacement and is returned as-is.
pub fn replace_references<F>(content: &str, syntax: Syntax, mut replace: F) -> Result<String>
where
    F: FnMut(&ReferenceOccurrence<'_>) -> Result<String>,
{
    let mut output = String::with_capacity(content.len());
    let mut last = 0;

    for caps in syntax.pattern().captures_iter(content) {
        let occurrence = ReferenceOccurrence::from_captures(syntax, &caps);
        output.push_str(&content[last..occurrence.span.start]);
        output.push_str(&replace(&occurrence)?);
        last = occurrence.span.end;
    }

    output.push_str(&content[last..]);
    Ok(output)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Display text for a bracket document link.
///
/// Returns the first non-numeric `|` segment after the target, or an empty
/// string. `[[Note|Text]]` becomes `Text`; `[[Note]]` and `[[Note#Heading]]`
/// disappear.
pub fn transform_md_ref(full_ref: &str) -> String {
    full_ref
        .split('|')
        .map(str::trim)
        .skip(1)
        .find(|part| !is_digits(part))
        .unwrap_or_default()
        .to_string()
}

/// A parsed `![[path|alt|WxH]]` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDirective {
    /// Path relative to the image directory
    pub relative_path: String,
    pub alt_text: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl ImageDirective {
    /// Parse a bracket image interior.
    ///
    /// Each segment after the path is classified on its own: `200x100` sets
    /// both dimensions, `200` sets the width, anything else is alt text.
    /// Later segments override earlier ones of the same kind.
    pub fn parse(full_ref: &str) -> Self {
        let mut parts = full_ref.split('|').map(str::trim);
        let relative_path = parts.next().unwrap_or_default().to_string();

        let mut directive = Self {
            relative_path,
            alt_text: DEFAULT_ALT_TEXT.to_string(),
            width: None,
            height: None,
        };

        for part in parts {
            if part.contains('x') && part.split('x').all(is_digits) {
                let mut dims = part.split('x');
                directive.width = dims.next().map(str::to_string);
                directive.height = dims.next().map(str::to_string);
            } else if is_digits(part) {
                directive.width = Some(part.to_string());
            } else {
                directive.alt_text = part.to_string();
            }
        }

        directive
    }

    /// Jekyll size attribute, empty when no width is set
    pub fn size_attributes(&self) -> String {
        match (&self.width, &self.height) {
            (Some(width), Some(height)) => format!("{{:width=\"{width}\" height=\"{height}\"}}"),
            (Some(width), None) => format!("{{:width=\"{width}\"}}"),
            _ => String::new(),
        }
    }

    /// Render as standard markdown. `image_dir` is the site image directory
    /// relative to the site root.
    pub fn to_markdown(&self, image_dir: &Path) -> String {
        format!(
            "![{}](/{}){}",
            self.alt_text,
            url_path(&normalize_lexically(&image_dir.join(&self.relative_path))),
            self.size_attributes()
        )
    }
}

/// Join path components with `/`, dropping `.` and empty components.
pub fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Convert a bracket image interior to standard markdown.
///
/// Returns the markdown and the image path relative to the image directory,
/// so the caller can copy the file.
pub fn transform_image_ref(full_ref: &str, image_dir: &Path) -> (String, String) {
    let directive = ImageDirective::parse(full_ref);
    (directive.to_markdown(image_dir), directive.relative_path)
}
