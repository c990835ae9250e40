//! End-to-end tests: fetch a book through a stubbed catalog, analyze it,
//! and run the binary against files on disk.

use bookbot::fetch::{BookSearchResult, Catalog, Person};
use bookbot::{analyze_book, render_report, FetchError, FetchOutcome, InteractiveFetcher};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::process::Command;

const FRANKENSTEIN_OPENING: &str = "You will rejoice to hear that no disaster has accompanied \
the commencement of an enterprise which you have regarded with such evil forebodings.";

struct OfflineCatalog;

impl Catalog for OfflineCatalog {
    fn search_books(&self, query: &str) -> Result<Vec<BookSearchResult>, FetchError> {
        if !query.eq_ignore_ascii_case("frankenstein") {
            return Ok(Vec::new());
        }
        let mut formats = BTreeMap::new();
        formats.insert(
            "text/plain; charset=us-ascii".to_string(),
            "https://www.gutenberg.org/ebooks/84.txt.utf-8".to_string(),
        );
        Ok(vec![BookSearchResult {
            id: 84,
            title: "Frankenstein; Or, The Modern Prometheus".to_string(),
            authors: vec![Person {
                name: "Shelley, Mary Wollstonecraft".to_string(),
                birth_year: Some(1797),
                death_year: Some(1851),
            }],
            formats,
        }])
    }

    fn download_book_content(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Ok(FRANKENSTEIN_OPENING.as_bytes().to_vec())
    }
}

#[test]
fn search_download_and_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let mut output = Vec::new();

    let outcome = InteractiveFetcher::new(
        &OfflineCatalog,
        dir.path(),
        Cursor::new("dracula\nFrankenstein\n1\n"),
        &mut output,
    )
    .run()
    .unwrap();

    let path = match outcome {
        FetchOutcome::Downloaded(path) => path,
        other => panic!("expected a download, got {other:?}"),
    };
    assert_eq!(
        path,
        dir.path()
            .join("frankenstein-or-the-modern-prometheus-84.txt")
    );

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("No books found matching your search term."));
    assert!(transcript.contains(
        "1. Frankenstein; Or, The Modern Prometheus — Shelley, Mary Wollstonecraft (ID 84)"
    ));

    let analysis = analyze_book(&path).unwrap();
    assert_eq!(analysis.report.word_count, 23);
    let rendered = render_report(&analysis, Some(1));
    assert!(rendered.contains("Found 23 total words"));
    assert!(rendered.contains("e: 17\n"));
}

#[test]
fn binary_reports_on_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("fox.txt");
    std::fs::write(&book, "The quick brown fox.").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_bookbot"))
        .arg("--file")
        .arg(&book)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("============ BOOKBOT ============\n"));
    assert!(stdout.contains("Found 4 total words"));
    assert!(stdout.contains("--------- Character Count -------\no: 2\nb: 1\n"));
    assert!(stdout.ends_with("============= END ===============\n"));
}

#[test]
fn binary_fails_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_bookbot"))
        .arg("--file")
        .arg(dir.path().join("missing.txt"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read book at"));
}

#[test]
fn binary_requires_a_source() {
    let output = Command::new(env!("CARGO_BIN_EXE_bookbot")).output().unwrap();
    assert!(!output.status.success());
}
