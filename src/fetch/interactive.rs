use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use super::spinner::Spinner;
use super::{BookDownloader, BookSearchResult, Catalog, MAX_SEARCH_RESULTS};

const SEARCH_PROMPT: &str = "Search Project Gutenberg (or type 'quit' to exit): ";
const CHOICE_PROMPT: &str = "Choose a number (or press Enter to search again, 'quit' to exit): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded(PathBuf),
    /// A book was chosen but could not be saved.
    Failed,
    Quit,
}

enum Step<T> {
    Proceed(T),
    SearchAgain,
    Quit,
}

/// Prompt-driven search, selection and download of a single book.
pub struct InteractiveFetcher<'a, C: Catalog, R: BufRead, W: Write> {
    catalog: &'a C,
    downloader: BookDownloader<'a, C>,
    input: R,
    output: W,
    show_spinner: bool,
}

impl<'a, C: Catalog, R: BufRead, W: Write> InteractiveFetcher<'a, C, R, W> {
    pub fn new(catalog: &'a C, books_dir: impl Into<PathBuf>, input: R, output: W) -> Self {
        Self {
            catalog,
            downloader: BookDownloader::new(catalog, books_dir),
            input,
            output,
            show_spinner: false,
        }
    }

    pub fn with_spinner(mut self, show_spinner: bool) -> Self {
        self.show_spinner = show_spinner;
        self
    }

    pub fn run(&mut self) -> io::Result<FetchOutcome> {
        info!(action = "start", component = "interactive_fetch", books_dir = ?self.downloader.destination_dir(), "Starting interactive book fetch");
        loop {
            let query = match self.prompt(SEARCH_PROMPT)? {
                Some(query) if !is_quit(&query) => query,
                _ => return self.quit(),
            };

            let books = match self.search(&query)? {
                Step::Proceed(books) => books,
                Step::SearchAgain => continue,
                Step::Quit => return self.quit(),
            };

            if books.is_empty() {
                writeln!(self.output, "No books found matching your search term.")?;
                writeln!(self.output, "Please try a different search term.")?;
                continue;
            }

            let book = match self.select_book(&books)? {
                Step::Proceed(book) => book,
                Step::SearchAgain => continue,
                Step::Quit => return self.quit(),
            };

            return self.download(&book);
        }
    }

    fn search(&mut self, query: &str) -> io::Result<Step<Vec<BookSearchResult>>> {
        let result = {
            let _spinner = self
                .show_spinner
                .then(|| Spinner::start("Searching Project Gutenberg"));
            self.catalog.search_books(query)
        };

        match result {
            Ok(books) => Ok(Step::Proceed(books)),
            Err(e) => {
                warn!(action = "search", component = "interactive_fetch", error = %e, "Catalog search failed");
                writeln!(self.output, "Error: {e}")?;
                writeln!(
                    self.output,
                    "Press Enter to try another search, or type 'quit' to exit"
                )?;
                match self.read_line()? {
                    Some(answer) if !is_quit(&answer) => Ok(Step::SearchAgain),
                    _ => Ok(Step::Quit),
                }
            }
        }
    }

    fn select_book(&mut self, books: &[BookSearchResult]) -> io::Result<Step<BookSearchResult>> {
        let shown = &books[..books.len().min(MAX_SEARCH_RESULTS)];

        writeln!(self.output, "Found {} books with plain text format:", shown.len())?;
        for (i, book) in shown.iter().enumerate() {
            writeln!(
                self.output,
                "{}. {} — {} (ID {})",
                i + 1,
                book.title,
                book.authors_display(),
                book.id
            )?;
        }

        loop {
            let choice = match self.prompt(CHOICE_PROMPT)? {
                Some(choice) => choice,
                None => return Ok(Step::Quit),
            };

            if choice.is_empty() {
                return Ok(Step::SearchAgain);
            }
            if is_quit(&choice) {
                return Ok(Step::Quit);
            }

            match choice.parse::<usize>() {
                Ok(n) if (1..=shown.len()).contains(&n) => {
                    return Ok(Step::Proceed(shown[n - 1].clone()));
                }
                Ok(_) => writeln!(self.output, "Invalid choice. Please try again.")?,
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn download(&mut self, book: &BookSearchResult) -> io::Result<FetchOutcome> {
        match self.downloader.download_book(book) {
            Ok(path) => {
                writeln!(self.output, "Saved to {}", path.display())?;
                Ok(FetchOutcome::Downloaded(path))
            }
            Err(e) => {
                warn!(action = "download", component = "interactive_fetch", book_id = book.id, error = %e, "Book download failed");
                writeln!(self.output, "Error downloading book: {e}")?;
                Ok(FetchOutcome::Failed)
            }
        }
    }

    fn quit(&mut self) -> io::Result<FetchOutcome> {
        writeln!(self.output, "Closing BookBot...")?;
        Ok(FetchOutcome::Quit)
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Trimmed next line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn is_quit(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("quit")
}
