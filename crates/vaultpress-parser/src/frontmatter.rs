//! Front matter: `key: value` lines between two `---` delimiter lines.
//!
//! This is deliberately not a YAML parser. Values are the raw trimmed text
//! after the first colon, so `time: 12:30:45` keeps its colons.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const DELIMITER: &str = "---";

/// Ordered string map read from a note's leading front matter block.
///
/// Keys keep the order in which they first appear. A repeated key replaces
/// the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, String)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `layout` key, if any
    pub fn layout(&self) -> Option<&str> {
        self.get("layout")
    }
}

/// Parse front matter from any sequence of lines.
///
/// Everything before the opening delimiter is skipped. An unterminated block
/// yields an empty map, discarding pairs parsed so far.
pub fn parse_front_matter_lines<I, S>(lines: I) -> FrontMatter
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter();

    if !lines.by_ref().any(|line| line.as_ref().trim() == DELIMITER) {
        return FrontMatter::new();
    }

    let mut front_matter = FrontMatter::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line == DELIMITER {
            return front_matter;
        }
        if line.is_empty() {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            front_matter.insert(key.trim(), value.trim());
        }
    }

    // Unclosed block
    FrontMatter::new()
}

/// Parse front matter from note content
pub fn parse_front_matter(content: &str) -> FrontMatter {
    parse_front_matter_lines(content.lines())
}

/// Read front matter from a note on disk.
///
/// Unreadable files (missing, not UTF-8) are treated as having no front
/// matter. Reading stops at the closing delimiter.
pub fn read_front_matter(path: &Path) -> FrontMatter {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("No front matter for {}: {}", path.display(), e);
            return FrontMatter::new();
        }
    };

    let mut failed = false;
    let lines = BufReader::new(file).lines().map_while(|line| match line {
        Ok(line) => Some(line),
        Err(e) => {
            log::debug!("Stopped reading {}: {}", path.display(), e);
            failed = true;
            None
        }
    });
    let front_matter = parse_front_matter_lines(lines);

    if failed {
        FrontMatter::new()
    } else {
        front_matter
    }
}
