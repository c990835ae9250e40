use anyhow::{Context, Result};
use bookbot::fetch::{FetchOutcome, GutendexClient, InteractiveFetcher};
use bookbot::utils::{setup_logging, validate_args};
use bookbot::{analyze_book, print_report, Args};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::error;

fn fetch_book(args: &Args) -> Result<Option<PathBuf>> {
    let client = GutendexClient::new(args.api_url.clone(), Duration::from_secs(args.timeout));
    let stdin = io::stdin();
    let outcome = InteractiveFetcher::new(&client, &args.books_dir, stdin.lock(), io::stdout())
        .with_spinner(io::stderr().is_terminal())
        .run()
        .context("Interactive search failed")?;

    match outcome {
        FetchOutcome::Downloaded(path) => Ok(Some(path)),
        FetchOutcome::Quit => Ok(None),
        FetchOutcome::Failed => anyhow::bail!("No book was downloaded"),
    }
}

fn run(args: &Args) -> Result<()> {
    let book_path = match &args.file {
        Some(path) => path.clone(),
        None => match fetch_book(args)? {
            Some(path) => path,
            None => return Ok(()),
        },
    };

    let analysis = analyze_book(&book_path)?;
    print_report(&analysis, args.top);
    Ok(())
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = validate_args(&args).and_then(|_| run(&args)) {
        error!(error = %e, "bookbot failed");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
