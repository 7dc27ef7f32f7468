//! End-to-end publishing against a temporary vault and site.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vaultpress::prelude::*;

struct Fixture {
    _temp: TempDir,
    vault: PathBuf,
    site: PathBuf,
}

/// Vault with `Publish/{Posts,Projects}` and one image, site with the
/// matching `_posts`, `_projects` and `assets/img`.
fn create_fixture() -> Fixture {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let vault = temp.path().join("vault");
    let site = temp.path().join("site");

    for dir in ["Publish/Posts", "Publish/Projects", "Assets/Images"] {
        fs::create_dir_all(vault.join(dir)).unwrap();
    }
    for dir in ["_posts", "_projects", "assets/img"] {
        fs::create_dir_all(site.join(dir)).unwrap();
    }
    fs::write(vault.join("Assets/Images/test-image.png"), b"\x89PNG test").unwrap();

    Fixture {
        _temp: temp,
        vault,
        site,
    }
}

fn config(fixture: &Fixture) -> PublishConfig {
    PublishConfig::builder(&fixture.vault, &fixture.site)
        .build()
        .expect("Fixture config should validate")
}

fn write_note(fixture: &Fixture, relative: &str, content: &str) {
    fs::write(fixture.vault.join("Publish").join(relative), content).unwrap();
}

fn read_site(fixture: &Fixture, relative: &str) -> String {
    fs::read_to_string(fixture.site.join(relative)).unwrap()
}

#[test]
fn test_hello_world_with_embedded_image() {
    let fixture = create_fixture();
    write_note(
        &fixture,
        "Projects/Hello World!.md",
        "# Hello\n\n![[test-image.png|200]]\n",
    );

    let report = vaultpress::publish(&config(&fixture)).unwrap();
    assert!(report.is_clean());

    insta::assert_snapshot!(
        read_site(&fixture, "_projects/hello-world.md"),
        @r#"
    # Hello

    ![Image](/assets/img/test-image.png){:width="200"}
    "#
    );
    assert_eq!(
        fs::read(fixture.site.join("assets/img/test-image.png")).unwrap(),
        b"\x89PNG test"
    );
}

#[test]
fn test_posts_are_date_prefixed_and_failures_reported() {
    let fixture = create_fixture();
    write_note(
        &fixture,
        "Posts/Launch Day.md",
        "---\nlayout: post\ndate: December 20, 2024\ntitle: Launch: Day One\n---\nSee [[Projects/Roadmap|the roadmap]].\n",
    );
    write_note(
        &fixture,
        "Posts/Undated.md",
        "---\nlayout: post\n---\nNo date here.\n",
    );
    write_note(
        &fixture,
        "Posts/Bad Date.md",
        "---\nlayout: post\ndate: 2024.12.20\n---\n",
    );

    let report = vaultpress::publish(&config(&fixture)).unwrap();
    assert_eq!(report.total_published(), 1);
    assert_eq!(report.total_failed(), 2);

    let posts = &report.categories[0];
    assert_eq!(posts.destination, Path::new("_posts"));
    assert_eq!(
        posts.published[0].destination,
        Path::new("_posts/2024-12-20-launch-day.md")
    );
    assert_eq!(posts.published[0].stats.links_flattened, 1);

    let reasons: Vec<_> = posts.failed.iter().map(|f| f.reason.as_str()).collect();
    assert_eq!(
        reasons,
        vec![
            "Invalid date front matter provided for a post layout.",
            "Missing date field for post layout",
        ]
    );

    assert_eq!(
        read_site(&fixture, "_posts/2024-12-20-launch-day.md"),
        "---\nlayout: post\ndate: December 20, 2024\ntitle: Launch: Day One\n---\nSee the roadmap.\n"
    );
    let published: Vec<_> = fs::read_dir(fixture.site.join("_posts"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(published.len(), 1);
}

#[test]
fn test_missing_image_skips_only_that_note() {
    let fixture = create_fixture();
    write_note(&fixture, "Projects/A.md", "![[test-image.png]]");
    write_note(&fixture, "Projects/B.md", "![[gone.png]]");
    write_note(&fixture, "Projects/C.md", "![shot](test-image.png)");

    let report = vaultpress::publish(&config(&fixture)).unwrap();
    let projects = &report.categories[1];
    assert_eq!(projects.name, "Projects");
    assert_eq!(projects.published.len(), 2);
    assert_eq!(projects.failed.len(), 1);
    assert_eq!(projects.failed[0].path, Path::new("Publish/Projects/B.md"));

    assert!(!fixture.site.join("_projects/b.md").exists());
    assert_eq!(read_site(&fixture, "_projects/c.md"), "![shot](test-image.png)");
}

#[test]
fn test_republishing_is_idempotent() {
    let fixture = create_fixture();
    write_note(&fixture, "Projects/Tool.md", "Uses ![[test-image.png|Tool|64x32]]");
    let config = config(&fixture);

    vaultpress::publish(&config).unwrap();
    let first = read_site(&fixture, "_projects/tool.md");
    vaultpress::publish(&config).unwrap();
    assert_eq!(read_site(&fixture, "_projects/tool.md"), first);
}

#[test]
fn test_stray_file_in_publish_dir_aborts() {
    let fixture = create_fixture();
    fs::write(fixture.vault.join("Publish/notes.md"), "stray").unwrap();

    let err = vaultpress::publish(&config(&fixture)).unwrap_err();
    assert!(!err.is_recoverable());
    assert!(matches!(err, Error::Structural { .. }));
}

#[test]
fn test_missing_site_category_aborts() {
    let fixture = create_fixture();
    fs::create_dir_all(fixture.vault.join("Publish/Drafts")).unwrap();

    let err = vaultpress::publish(&config(&fixture)).unwrap_err();
    assert!(err.to_string().contains("_drafts"));
}

#[test]
fn test_report_renders_every_format() {
    let fixture = create_fixture();
    write_note(&fixture, "Projects/Hello World!.md", "Hi");
    let report = vaultpress::publish(&config(&fixture)).unwrap();

    let csv = report.render(ReportFormat::Csv).unwrap();
    assert!(csv.contains("Projects,Publish/Projects/Hello World!.md,_projects/hello-world.md,published,"));

    let json = report.render(ReportFormat::Json).unwrap();
    assert!(json.contains("\"destination\": \"_projects/hello-world.md\""));

    let text = report.render(ReportFormat::Text).unwrap();
    assert!(text.ends_with("Published 1 notes (0 images), 0 failed\n"));
}
