pub mod analyzer;
pub mod args;
pub mod fetch;
pub mod stats;
pub mod utils;

pub use analyzer::{analyze_book, print_report, render_report};
pub use args::Args;
pub use fetch::{FetchError, FetchOutcome, GutendexClient, InteractiveFetcher};
pub use stats::{analyze, count_characters, count_words, sort_characters, BookAnalysis, Report};
