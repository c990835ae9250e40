use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::fetch::{DEFAULT_BOOKS_DIR, DEFAULT_TIMEOUT_SECS, GUTENDEX_API_URL};

#[derive(Parser, Debug)]
#[command(
    name = "bookbot",
    about = "Analyze text files from local path or Project Gutenberg",
    version,
    long_about = None
)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "search"])))]
pub struct Args {
    /// Path to the book file to analyze
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Search and download a book from Project Gutenberg
    #[arg(long)]
    pub search: bool,

    /// Number of characters to display, most frequent first
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Directory downloaded books are saved to
    #[arg(long, default_value = DEFAULT_BOOKS_DIR)]
    pub books_dir: PathBuf,

    /// Gutendex catalog endpoint
    #[arg(long, default_value = GUTENDEX_API_URL)]
    pub api_url: String,

    /// Search request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
