use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::stats::{self, BookAnalysis};

pub fn read_book_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read book at {}", path.display()))
}

pub fn analyze_book(path: &Path) -> Result<BookAnalysis> {
    let start_time = Instant::now();
    info!(action = "start", component = "book_analysis", path = ?path, "Starting book analysis");

    let text = read_book_text(path)?;
    info!(action = "load", component = "book_analysis", bytes = text.len(), "Loaded book text");

    let report = stats::analyze(&text);

    info!(
        action = "complete",
        component = "book_analysis",
        word_count = report.word_count,
        distinct_characters = report.character_frequencies.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Analysis completed"
    );

    Ok(BookAnalysis {
        path: path.to_path_buf(),
        report,
    })
}

/// Renders the report; `top` limits how many character rows are listed.
pub fn render_report(analysis: &BookAnalysis, top: Option<usize>) -> String {
    let report = &analysis.report;
    let rows = top.unwrap_or(report.character_frequencies.len());

    let mut out = format!(
        "============ BOOKBOT ============\n\
         Analyzing book found at {}...\n\
         ----------- Word Count ----------\n\
         Found {} total words\n\
         --------- Character Count -------\n",
        analysis.path.display(),
        report.word_count
    );
    for (character, count) in report.character_frequencies.iter().take(rows) {
        out.push_str(&format!("{character}: {count}\n"));
    }
    out.push_str("============= END ===============\n");
    out
}

pub fn print_report(analysis: &BookAnalysis, top: Option<usize>) {
    print!("{}", render_report(analysis, top));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn analyzes_file_on_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "The quick brown fox.\nJumps!").unwrap();

        let analysis = analyze_book(file.path()).unwrap();
        assert_eq!(analysis.path, file.path());
        assert_eq!(analysis.report.word_count, 5);
        assert_eq!(analysis.report.character_frequencies[0], ('o', 2));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-book.txt");
        let err = analyze_book(&missing).unwrap_err();
        assert!(err.to_string().contains("no-such-book.txt"));
        assert!(err.to_string().starts_with("Failed to read book at"));
    }

    #[test]
    fn report_layout() {
        let analysis = BookAnalysis {
            path: "books/tiny.txt".into(),
            report: stats::analyze("Bob saw a cab"),
        };
        let expected = "\
============ BOOKBOT ============
Analyzing book found at books/tiny.txt...
----------- Word Count ----------
Found 4 total words
--------- Character Count -------
a: 3
b: 3
c: 1
o: 1
s: 1
w: 1
============= END ===============
";
        assert_eq!(render_report(&analysis, None), expected);
    }

    #[test]
    fn top_limits_rows() {
        let analysis = BookAnalysis {
            path: "books/tiny.txt".into(),
            report: stats::analyze("Bob saw a cab"),
        };
        let rendered = render_report(&analysis, Some(2));
        assert!(rendered.contains("a: 3\nb: 3\n============= END"));
        assert!(!rendered.contains("c: 1"));
    }

    #[test]
    fn empty_book() {
        let analysis = BookAnalysis {
            path: "empty.txt".into(),
            report: stats::analyze(""),
        };
        let rendered = render_report(&analysis, None);
        assert!(rendered.contains("Found 0 total words\n--------- Character Count -------\n============= END"));
    }
}
