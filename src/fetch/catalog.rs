use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error as _;
use std::io::{self, Read};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::{FetchError, Operation, DEFAULT_TIMEOUT_SECS, DOWNLOAD_TIMEOUT_SECS, GUTENDEX_API_URL};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookSearchResult {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Person>,
    #[serde(default)]
    pub formats: BTreeMap<String, String>,
}

impl BookSearchResult {
    pub fn authors_display(&self) -> String {
        if self.authors.is_empty() {
            return "Unknown".to_string();
        }
        self.authors
            .iter()
            .map(|author| author.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn text_url(&self) -> Option<&str> {
        self.formats
            .iter()
            .find(|(mime_type, _)| mime_type.starts_with("text/plain"))
            .map(|(_, url)| url.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<BookSearchResult>,
}

/// Source of books: something that can be searched and downloaded from.
pub trait Catalog {
    fn search_books(&self, query: &str) -> Result<Vec<BookSearchResult>, FetchError>;

    fn download_book_content(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct GutendexClient {
    base_url: String,
    timeout: Duration,
}

impl Default for GutendexClient {
    fn default() -> Self {
        Self::new(GUTENDEX_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl GutendexClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

impl Catalog for GutendexClient {
    fn search_books(&self, query: &str) -> Result<Vec<BookSearchResult>, FetchError> {
        let start_time = Instant::now();
        info!(action = "start", component = "catalog_search", query = query, url = %self.base_url, "Searching Project Gutenberg");

        let response = agent(self.timeout)
            .get(&self.base_url)
            .query("search", query)
            .query("mime_type", "text/plain")
            .call()
            .map_err(|e| map_request_error(e, Operation::Search, &self.base_url, self.timeout))?;

        let parsed: SearchResponse = response.into_json().map_err(|e| {
            if is_timeout_kind(e.kind()) {
                timeout_error(self.timeout)
            } else {
                FetchError::Decode(e.to_string())
            }
        })?;

        info!(
            action = "complete",
            component = "catalog_search",
            result_count = parsed.results.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Catalog search finished"
        );
        Ok(parsed.results)
    }

    fn download_book_content(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let start_time = Instant::now();
        let timeout = Duration::from_secs(DOWNLOAD_TIMEOUT_SECS);
        info!(action = "start", component = "book_download", url = url, "Downloading book text");

        let response = agent(timeout)
            .get(url)
            .call()
            .map_err(|e| map_request_error(e, Operation::Download, url, timeout))?;

        let mut content = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut content)
            .map_err(|e| {
                if is_timeout_kind(e.kind()) {
                    timeout_error(timeout)
                } else {
                    FetchError::Io(e)
                }
            })?;

        info!(
            action = "complete",
            component = "book_download",
            bytes = content.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Book download finished"
        );
        Ok(content)
    }
}

/// `timeout` bounds connecting and each individual read, not the whole transfer.
fn agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout_read(timeout)
        .build()
}

fn timeout_error(timeout: Duration) -> FetchError {
    FetchError::Timeout {
        seconds: timeout.as_secs(),
    }
}

fn map_request_error(
    error: ureq::Error,
    operation: Operation,
    url: &str,
    timeout: Duration,
) -> FetchError {
    match error {
        ureq::Error::Status(code, _) => {
            warn!(action = "request", component = "catalog_http", status = code, url = url, "Request rejected");
            FetchError::Status {
                operation,
                code,
                url: url.to_string(),
            }
        }
        ureq::Error::Transport(transport) => {
            warn!(action = "request", component = "catalog_http", error = %transport, url = url, "Transport failure");
            let timed_out = transport
                .source()
                .and_then(|source| source.downcast_ref::<io::Error>())
                .is_some_and(|e| is_timeout_kind(e.kind()));
            if timed_out {
                return timeout_error(timeout);
            }
            match (operation, transport.kind()) {
                (Operation::Search, ureq::ErrorKind::Dns | ureq::ErrorKind::ConnectionFailed) => {
                    FetchError::Connection
                }
                _ => FetchError::Request {
                    operation,
                    reason: transport.to_string(),
                },
            }
        }
    }
}

fn is_timeout_kind(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
