//! # Vaultpress Parser
//!
//! Text processing for publishing Obsidian notes to Jekyll. Nothing here
//! writes to disk.
//!
//! - [`frontmatter`] - `key: value` front matter between `---` lines
//! - [`slug`] - Jekyll file names, with a date prefix for `layout: post`
//! - [`dates`] - The front matter date formats
//! - [`references`] - Standard and bracket references, image directives
//!
//! ## Quick Start
//!
//! ```
//! use vaultpress_parser::{parse_front_matter, slugify_file_name, transform_md_ref};
//!
//! let fm = parse_front_matter("---\nlayout: post\ndate: 2024-12-20\n---\nBody");
//! assert_eq!(fm.get("date"), Some("2024-12-20"));
//!
//! assert_eq!(slugify_file_name("Hello World!.md"), "hello-world.md");
//! assert_eq!(transform_md_ref("Note|Shown Text"), "Shown Text");
//! ```
//!
//! ### Images
//!
//! ```
//! use std::path::Path;
//! use vaultpress_parser::transform_image_ref;
//!
//! let (markdown, relative) = transform_image_ref("diagram.png|Flow|640x480", Path::new("assets/img"));
//! assert_eq!(markdown, r#"![Flow](/assets/img/diagram.png){:width="640" height="480"}"#);
//! assert_eq!(relative, "diagram.png");
//! ```

pub mod dates;
pub mod frontmatter;
pub mod references;
pub mod slug;

pub use dates::{date_prefix, parse_date};
pub use frontmatter::{FrontMatter, parse_front_matter, parse_front_matter_lines, read_front_matter};
pub use references::{
    DEFAULT_ALT_TEXT, ImageDirective, ReferenceOccurrence, Syntax, TargetKind, classify_target,
    find_references, replace_references, transform_image_ref, transform_md_ref, url_path,
};
pub use slug::{slugify, slugify_file_name, slugify_with_front_matter};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::{
        FrontMatter, ImageDirective, ReferenceOccurrence, Syntax, TargetKind, parse_date,
        parse_front_matter, read_front_matter, replace_references, slugify, transform_image_ref,
        transform_md_ref,
    };
}
