//! ghrepos CLI - CSV inventory of GitHub organization repositories.

mod commands;
mod config;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use console::Term;
use ghrepos::report::{IncludeTag, InclusionSet};
use tracing_subscriber::EnvFilter;

use crate::commands::report::{ReportArgs, handle_report};
use crate::progress::ProgressReporter;

#[derive(Parser)]
#[command(name = "ghrepos")]
#[command(version)]
#[command(about = "Export a CSV inventory of GitHub organization repositories")]
#[command(
    long_about = "ghrepos lists every repository of the given GitHub organizations, keeps \
the ones matching --include, looks up each repository's last commit date and writes \
the result as CSV sorted by repository name."
)]
#[command(after_long_help = r#"EXAMPLES
    Report on one organization:
        $ ghrepos rust-lang

    Several organizations, forks included, custom output:
        $ ghrepos rust-lang tokio-rs -i public,private,fork,nonfork -o repos.csv

AUTHENTICATION
    The token is taken from the first of:
      1. --token
      2. GITHUB_TOKEN (a .env file in the current directory is honoured)
      3. ~/.github-token

CONFIGURATION
    ghrepos reads configuration from:
      1. ~/.config/ghrepos/config.toml (or $XDG_CONFIG_HOME/ghrepos/config.toml)
      2. ./ghrepos.toml
      3. Environment variables (GHREPOS_ prefix, e.g., GHREPOS_GITHUB__API_URL)

ENVIRONMENT VARIABLES
    GITHUB_TOKEN                   GitHub personal access token
    GHREPOS_GITHUB__API_URL        API base URL (default: https://api.github.com)
    GHREPOS_GITHUB__TIMEOUT_SECS   Request timeout in seconds (default: 30)
    GHREPOS_REPORT__CONCURRENCY    Concurrent commit lookups (default: 5)
    GHREPOS_REPORT__PAGE_SIZE      Repositories per listing page (default: 100)
"#)]
struct Cli {
    /// Organization name(s)
    #[arg(required = true, value_name = "ORG")]
    orgs: Vec<String>,

    /// GitHub token (takes precedence over GITHUB_TOKEN and ~/.github-token)
    #[arg(long)]
    token: Option<String>,

    /// Output CSV file
    #[arg(short, long, default_value = "github-repos.csv")]
    output: PathBuf,

    /// Repository kinds to include
    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        num_args = 1..,
        default_values = ["public", "private", "nonfork"]
    )]
    include: Vec<IncludeArg>,

    /// Maximum concurrent commit lookups (default from config or 5)
    #[arg(short = 'c', long)]
    concurrency: Option<usize>,
}

/// Repository kind accepted by `--include`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IncludeArg {
    /// Public repositories
    Public,
    /// Private repositories
    Private,
    /// Forks
    Fork,
    /// Repositories that are not forks
    Nonfork,
}

impl From<IncludeArg> for IncludeTag {
    fn from(arg: IncludeArg) -> Self {
        match arg {
            IncludeArg::Public => IncludeTag::Public,
            IncludeArg::Private => IncludeTag::Private,
            IncludeArg::Fork => IncludeTag::Fork,
            IncludeArg::Nonfork => IncludeTag::Nonfork,
        }
    }
}

impl Cli {
    fn into_report_args(self) -> ReportArgs {
        ReportArgs {
            orgs: self.orgs,
            token: self.token,
            output: self.output,
            include: InclusionSet::new(self.include.into_iter().map(IncludeTag::from)),
            concurrency: self.concurrency,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Structured logging only when not attached to a TTY; progress bars otherwise.
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("ghrepos=info,ghrepos_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();

    let cli = Cli::parse();

    let reporter = Arc::new(ProgressReporter::new());
    match handle_report(cli.into_report_args(), &config, &reporter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.fail(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ghrepos").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["acme"]).expect("parse");
        assert_eq!(cli.orgs, vec!["acme"]);
        assert_eq!(cli.output, PathBuf::from("github-repos.csv"));
        assert!(cli.token.is_none());

        let args = cli.into_report_args();
        assert_eq!(args.include, InclusionSet::default());
    }

    #[test]
    fn test_include_accepts_commas_and_repeats() {
        let cli = parse(&["acme", "-i", "public,fork"]).expect("parse");
        assert_eq!(cli.include, vec![IncludeArg::Public, IncludeArg::Fork]);

        let cli = parse(&["acme", "--include", "private", "--include", "nonfork"]).expect("parse");
        assert_eq!(cli.include, vec![IncludeArg::Private, IncludeArg::Nonfork]);
    }

    #[test]
    fn test_multiple_orgs_and_options() {
        let cli = parse(&["acme", "globex", "--token", "t", "-o", "out.csv"]).expect("parse");
        assert_eq!(cli.orgs, vec!["acme", "globex"]);
        assert_eq!(cli.token.as_deref(), Some("t"));
        assert_eq!(cli.output, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_missing_org_is_usage_error() {
        let err = parse(&[]).err().expect("orgs are required");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_unknown_include_value_rejected() {
        let err = parse(&["acme", "-i", "archived"]).err().expect("invalid value");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = parse(&["acme", "--verbose"]).err().expect("unknown flag");
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = parse(&["--help"]).err().expect("help short-circuits");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }
}
