//! Project Gutenberg search and download, backed by the Gutendex API.

pub mod catalog;
pub mod downloader;
pub mod interactive;
pub mod spinner;

use std::fmt;
use thiserror::Error;

pub use catalog::{BookSearchResult, Catalog, GutendexClient, Person};
pub use downloader::{book_filename, slugify, BookDownloader};
pub use interactive::{FetchOutcome, InteractiveFetcher};

pub const GUTENDEX_API_URL: &str = "https://gutendex.com/books";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 60;
pub const MAX_SEARCH_RESULTS: usize = 10;
pub const DEFAULT_BOOKS_DIR: &str = "books";

/// Which catalog call failed, used to word error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Download,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Search => f.write_str("search Project Gutenberg"),
            Operation::Download => f.write_str("download book"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Project Gutenberg API did not respond in time (timeout after {seconds} seconds)")]
    Timeout { seconds: u64 },

    #[error("Could not connect to Project Gutenberg API")]
    Connection,

    #[error("Failed to {operation}: HTTP {code} from {url}")]
    Status {
        operation: Operation,
        code: u16,
        url: String,
    },

    #[error("Failed to {operation}: {reason}")]
    Request { operation: Operation, reason: String },

    #[error("Unexpected response from Project Gutenberg: {0}")]
    Decode(String),

    #[error("No text format available for book: {title}")]
    NoTextFormat { title: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
