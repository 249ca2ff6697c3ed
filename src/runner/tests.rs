//! Runner tests over real directory trees.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::config::{SiteConfig, StageKind};
use crate::dom::HtmlDocument;
use crate::metadata::CommentRecord;
use crate::pipeline::Pipe;

const HOME: &str = r#"<!DOCTYPE html><html><head><title>home</title></head><body>
<span class="site-slogan">Old</span><div class="t3-content"></div>
<div class="copyright"><div class="custom"></div></div></body></html>"#;

const ARTICLE: &str = r#"<!DOCTYPE html><html><head><title>article</title></head><body>
<span class="site-slogan">Old</span>
<ul class="kmt-list"><li class="kmt-empty-comment">none</li></ul>
<div class="copyright"><div class="custom"></div></div></body></html>"#;

fn tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("section/deep")).unwrap();
    fs::write(root.join("index.htm"), HOME).unwrap();
    fs::write(root.join("section/42article-name.html"), ARTICLE).unwrap();
    for i in 0..12 {
        fs::write(root.join(format!("section/deep/{i}page.html")), ARTICLE).unwrap();
    }
    fs::write(root.join("style.css"), "body{}").unwrap();
    fs::write(root.join("notes.txt"), "<p>not a page</p>").unwrap();
    dir
}

fn store() -> MetadataStore {
    MetadataStore::new(
        Vec::new(),
        vec![CommentRecord {
            source_url: "https://example.ru/section/42article-name.html?x=1#hcm=7".into(),
            author_name: "Olga".into(),
            avatar_url: "a.png".into(),
            title: "Re".into(),
            timestamp: "2016-03-01T12:00:00".into(),
            quoted_parent_text: None,
            body_text: "Прекрасно".into(),
            fragment: None,
        }],
        ".hc-comment{margin:0}".into(),
    )
}

fn options(workers: usize) -> RunOptions {
    RunOptions {
        workers,
        quiet: true,
        generated_at: DateTimeUtc::new(2024, 6, 15, 14, 30, 45),
    }
}

fn pipeline() -> Pipeline<HtmlDocument> {
    Pipeline::from_config(&StageKind::ALL, &SiteConfig::default())
}

fn snapshot(root: &Path) -> Vec<(PathBuf, String)> {
    let root = &normalize_path(root);
    discover(root)
        .into_iter()
        .map(|p| {
            let content = fs::read_to_string(&p).unwrap();
            (relative_to(&p, root).to_path_buf(), content)
        })
        .collect()
}

#[test]
fn test_discover_relative_root_gives_absolute_paths() {
    let dir = tempfile::Builder::new()
        .prefix("discover")
        .tempdir_in(".")
        .unwrap();
    assert!(dir.path().is_relative());
    fs::create_dir_all(dir.path().join("section")).unwrap();
    fs::write(dir.path().join("index.htm"), HOME).unwrap();
    fs::write(dir.path().join("section/7story.html"), ARTICLE).unwrap();

    let files = discover(dir.path());
    assert_eq!(files.len(), 2);
    let root = normalize_path(dir.path());
    assert!(files.iter().all(|p| p.is_absolute() && p.starts_with(&root)));
    assert_eq!(relative_to(&files[0], &root), Path::new("index.htm"));
}

#[test]
fn test_discover_html_only_sorted() {
    let dir = tree();
    let files = discover(dir.path());
    assert_eq!(files.len(), 14);
    assert!(files.iter().all(|p| p.is_absolute()));
    assert!(files.windows(2).all(|w| w[0] < w[1]));
    assert!(files.iter().all(|p| is_html_document(p)));
}

#[test]
fn test_run_rewrites_pages() {
    let dir = tree();
    let store = store();
    let report = run(dir.path(), &store, &pipeline(), &options(4)).unwrap();

    assert_eq!(report.processed, 14);
    assert_eq!(report.succeeded, 14);
    assert!(report.is_success());

    let home = fs::read_to_string(dir.path().join("index.htm")).unwrap();
    assert!(home.contains("Архивная версия"));
    assert!(home.contains("proza.html"));
    assert!(home.contains("Обновлено: 2024-06-15 14:30:45 UTC."));

    let article = fs::read_to_string(dir.path().join("section/42article-name.html")).unwrap();
    assert!(article.contains("Прекрасно"));
    assert!(!article.contains("kmt-empty-comment"));
    assert!(!article.contains("proza.html"));

    let other = fs::read_to_string(dir.path().join("section/deep/3page.html")).unwrap();
    assert!(other.contains("kmt-empty-comment"));

    assert_eq!(fs::read_to_string(dir.path().join("notes.txt")).unwrap(), "<p>not a page</p>");
}

#[test]
fn test_worker_count_does_not_change_output() {
    let single = tree();
    let many = tree();
    let store = store();

    run(single.path(), &store, &pipeline(), &options(1)).unwrap();
    run(many.path(), &store, &pipeline(), &options(4)).unwrap();

    assert_eq!(snapshot(single.path()), snapshot(many.path()));
}

#[test]
fn test_non_utf8_page_is_isolated() {
    let dir = tree();
    let bad = dir.path().join("section/99broken.html");
    fs::write(&bad, [0x3c, 0x70, 0x3e, 0xff, 0xfe, 0x3c]).unwrap();

    let report = run(dir.path(), &store(), &pipeline(), &options(3)).unwrap();
    assert_eq!(report.processed, 15);
    assert_eq!(report.succeeded, 14);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].path, bad);
    assert!(report.failures[0].reason.contains("UTF-8"));

    assert_eq!(fs::read(&bad).unwrap(), vec![0x3c, 0x70, 0x3e, 0xff, 0xfe, 0x3c]);
    let home = fs::read_to_string(dir.path().join("index.htm")).unwrap();
    assert!(home.contains("Архивная версия"));
}

struct PanicOn(&'static str);

impl Pipe<HtmlDocument> for PanicOn {
    fn name(&self) -> &'static str {
        "panic-on"
    }

    fn apply(&self, _doc: &mut HtmlDocument, ctx: &PageContext<'_>) {
        if ctx.path.file_name().and_then(|n| n.to_str()) == Some(self.0) {
            panic!("stage blew up on {}", self.0);
        }
    }
}

#[test]
fn test_panicking_page_is_isolated() {
    let dir = tree();
    let pipeline = Pipeline::<HtmlDocument>::from_config(&[StageKind::Slogan], &SiteConfig::default())
        .pipe(PanicOn("5page.html"));

    let report = run(dir.path(), &store(), &pipeline, &options(4)).unwrap();
    assert_eq!(report.failed(), 1);
    assert_eq!(report.succeeded, 13);
    assert!(report.failures[0].reason.contains("stage blew up on 5page.html"));

    let untouched = fs::read_to_string(dir.path().join("section/deep/5page.html")).unwrap();
    assert_eq!(untouched, ARTICLE);
    let rewritten = fs::read_to_string(dir.path().join("section/deep/6page.html")).unwrap();
    assert!(rewritten.contains("Архивная версия"));
}

#[test]
fn test_missing_root_fails_before_work() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let err = run(&missing, &store(), &pipeline(), &options(2)).unwrap_err();
    assert!(matches!(err, RunError::MissingRoot(p) if p == missing));
}

#[test]
fn test_empty_root_reports_nothing() {
    let dir = TempDir::new().unwrap();
    let report = run(dir.path(), &store(), &pipeline(), &options(2)).unwrap();
    assert_eq!(report.processed, 0);
    assert!(report.is_success());
}
