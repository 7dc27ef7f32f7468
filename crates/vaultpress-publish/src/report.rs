//! Run reports in text, JSON and CSV.

use crate::rewrite::RewriteStats;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use vaultpress_core::{Error, Result};

/// A note that made it into the site. Paths are relative to their roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedNote {
    pub source: PathBuf,
    pub destination: PathBuf,
    #[serde(flatten)]
    pub stats: RewriteStats,
}

/// A note that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedNote {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome for one category directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    /// Category name as found under the publish directory
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub published: Vec<PublishedNote>,
    pub failed: Vec<FailedNote>,
}

impl CategoryReport {
    pub fn new(name: impl Into<String>, source: PathBuf, destination: PathBuf) -> Self {
        Self {
            name: name.into(),
            source,
            destination,
            published: Vec::new(),
            failed: Vec::new(),
        }
    }
}

/// Outcome of a whole publish run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub categories: Vec<CategoryReport>,
}

impl TransferReport {
    pub fn total_published(&self) -> usize {
        self.categories.iter().map(|c| c.published.len()).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.categories.iter().map(|c| c.failed.len()).sum()
    }

    pub fn images_copied(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.published)
            .map(|note| note.stats.images_copied)
            .sum()
    }

    /// True when every note was published
    pub fn is_clean(&self) -> bool {
        self.total_failed() == 0
    }

    /// Human readable summary
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for category in &self.categories {
            out.push_str(&format!(
                "{} -> {}: {} published, {} failed\n",
                category.source.display(),
                category.destination.display(),
                category.published.len(),
                category.failed.len()
            ));
            for note in &category.published {
                out.push_str(&format!(
                    "  ok    {} -> {}\n",
                    note.source.display(),
                    note.destination.display()
                ));
            }
            for note in &category.failed {
                out.push_str(&format!("  FAIL  {}: {}\n", note.path.display(), note.reason));
            }
        }

        out.push_str(&format!(
            "Published {} notes ({} images), {} failed\n",
            self.total_published(),
            self.images_copied(),
            self.total_failed()
        ));
        out
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::config_error(format!("Failed to serialize transfer report as JSON: {}", e))
        })
    }

    /// One row per note: `category,source,destination,status,reason`
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("category,source,destination,status,reason\n");

        for category in &self.categories {
            for note in &category.published {
                let source = note.source.display().to_string();
                let destination = note.destination.display().to_string();
                csv.push_str(&csv_row(&[
                    category.name.as_str(),
                    source.as_str(),
                    destination.as_str(),
                    "published",
                    "",
                ]));
            }
            for note in &category.failed {
                let source = note.path.display().to_string();
                csv.push_str(&csv_row(&[
                    category.name.as_str(),
                    source.as_str(),
                    "",
                    "failed",
                    note.reason.as_str(),
                ]));
            }
        }

        csv
    }

    /// Render in the given format
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Csv => Ok(self.to_csv()),
        }
    }
}

fn csv_row(fields: &[&str]) -> String {
    let mut row = fields
        .iter()
        .map(|field| {
            if field.contains([',', '"', '\n']) {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Output format for [`TransferReport::render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(Error::config_error(format!(
                "Unknown report format '{}' (expected text, json or csv)",
                other
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransferReport {
        let mut posts = CategoryReport::new(
            "Posts",
            PathBuf::from("Publish/Posts"),
            PathBuf::from("_posts"),
        );
        posts.published.push(PublishedNote {
            source: PathBuf::from("Publish/Posts/Hello World!.md"),
            destination: PathBuf::from("_posts/hello-world.md"),
            stats: RewriteStats {
                images_copied: 2,
                links_flattened: 1,
                external_images: 0,
            },
        });
        posts.failed.push(FailedNote {
            path: PathBuf::from("Publish/Posts/Draft.md"),
            reason: "Missing date field for post layout".to_string(),
        });
        TransferReport {
            categories: vec![posts],
        }
    }

    #[test]
    fn test_totals() {
        let report = sample();
        assert_eq!(report.total_published(), 1);
        assert_eq!(report.total_failed(), 1);
        assert_eq!(report.images_copied(), 2);
        assert!(!report.is_clean());
        assert!(TransferReport::default().is_clean());
    }

    #[test]
    fn test_text_report() {
        insta::assert_snapshot!(sample().to_text(), @r"
        Publish/Posts -> _posts: 1 published, 1 failed
          ok    Publish/Posts/Hello World!.md -> _posts/hello-world.md
          FAIL  Publish/Posts/Draft.md: Missing date field for post layout
        Published 1 notes (2 images), 1 failed
        ");
    }

    #[test]
    fn test_csv_report() {
        let csv = sample().to_csv();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "category,source,destination,status,reason");
        assert_eq!(
            lines[1],
            "Posts,Publish/Posts/Hello World!.md,_posts/hello-world.md,published,"
        );
        assert_eq!(
            lines[2],
            "Posts,Publish/Posts/Draft.md,,failed,Missing date field for post layout"
        );
    }

    #[test]
    fn test_csv_quotes_fields() {
        assert_eq!(csv_row(&["a,b", "say \"hi\"", "plain"]), "\"a,b\",\"say \"\"hi\"\"\",plain\n");
    }

    #[test]
    fn test_json_report_flattens_stats() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let note = &value["categories"][0]["published"][0];
        assert_eq!(note["images_copied"], 2);
        assert_eq!(note["destination"], "_posts/hello-world.md");
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::Csv.to_string(), "csv");
        assert!("xml".parse::<ReportFormat>().is_err());
    }
}
