use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

use super::{BookSearchResult, Catalog, FetchError};

fn non_slug_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"))
}

pub fn slugify(text: &str) -> String {
    non_slug_chars()
        .replace_all(&text.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

pub fn book_filename(book: &BookSearchResult) -> String {
    format!("{}-{}.txt", slugify(&book.title), book.id)
}

/// Saves book text fetched from a [`Catalog`] into a destination directory.
pub struct BookDownloader<'a, C: Catalog> {
    catalog: &'a C,
    destination_dir: PathBuf,
}

impl<'a, C: Catalog> BookDownloader<'a, C> {
    pub fn new(catalog: &'a C, destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            destination_dir: destination_dir.into(),
        }
    }

    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    pub fn download_book(&self, book: &BookSearchResult) -> Result<PathBuf, FetchError> {
        let text_url = book.text_url().ok_or_else(|| FetchError::NoTextFormat {
            title: book.title.clone(),
        })?;

        fs::create_dir_all(&self.destination_dir)?;

        let content = self.catalog.download_book_content(text_url)?;

        let filepath = self.destination_dir.join(book_filename(book));
        fs::write(&filepath, &content)?;

        info!(action = "save", component = "book_download", book_id = book.id, bytes = content.len(), path = ?filepath, "Saved book text");
        Ok(filepath)
    }
}
