use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;
use url::Url;

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::new(format_description!(
            "[hour]:[minute]:[second].[subsecond digits:3]"
        )))
        .with_writer(std::io::stderr)
        .init();
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if let Some(top) = args.top {
        if top == 0 {
            anyhow::bail!("--top must be greater than 0");
        }
    }

    if args.timeout == 0 {
        anyhow::bail!("--timeout must be greater than 0");
    }

    if let Err(e) = Url::parse(&args.api_url) {
        anyhow::bail!("--api-url is not a valid URL ({}): {}", args.api_url, e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["bookbot", "--file", "book.txt"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_args(&parse(&[])).is_ok());
    }

    #[test]
    fn zero_top_is_rejected() {
        let err = validate_args(&parse(&["--top", "0"])).unwrap_err();
        assert_eq!(err.to_string(), "--top must be greater than 0");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(validate_args(&parse(&["--timeout", "0"])).is_err());
    }

    #[test]
    fn relative_api_url_is_rejected() {
        let err = validate_args(&parse(&["--api-url", "gutendex/books"])).unwrap_err();
        assert!(err.to_string().starts_with("--api-url is not a valid URL"));
    }
}
