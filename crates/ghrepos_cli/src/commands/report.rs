use std::path::PathBuf;
use std::sync::Arc;

use directories::BaseDirs;
use ghrepos::credentials::{TOKEN_DOTFILE, TokenSources};
use ghrepos::github::{GitHubClient, RateLimitInfo};
use ghrepos::report::{InclusionSet, ReportOptions, run_report, write_report};

use crate::config::Config;
use crate::progress::ProgressReporter;

/// Arguments for a report run, after CLI parsing.
#[derive(Debug, Clone)]
pub(crate) struct ReportArgs {
    pub orgs: Vec<String>,
    pub token: Option<String>,
    pub output: PathBuf,
    pub include: InclusionSet,
    pub concurrency: Option<usize>,
}

/// `~/.github-token`, when a home directory can be determined.
fn token_dotfile() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(TOKEN_DOTFILE))
}

/// Build report options from arguments, falling back to configured defaults.
fn report_options(args: &ReportArgs, config: &Config) -> ReportOptions {
    ReportOptions {
        orgs: args.orgs.clone(),
        include: args.include.clone(),
        page_size: config.report.page_size,
        concurrency: args.concurrency.unwrap_or(config.report.concurrency),
    }
}

fn format_rate_limit(rate: &RateLimitInfo) -> String {
    format!(
        "GitHub API: {}/{} requests remaining (resets {})",
        rate.remaining,
        rate.limit,
        rate.reset_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Resolve the token, run the report and write the CSV.
pub(crate) async fn handle_report(
    args: ReportArgs,
    config: &Config,
    reporter: &Arc<ProgressReporter>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (credential, token_source) =
        TokenSources::from_env(args.token.clone(), token_dotfile()).resolve()?;
    tracing::debug!(source = ?token_source, "Resolved GitHub token");

    let client = GitHubClient::new(&config.github.api_url, &credential, config.timeout())?;
    let options = report_options(&args, config);

    let callback = reporter.as_callback();
    let report = run_report(&client, &options, Some(&callback)).await?;

    write_report(&args.output, &report.records)?;

    reporter.succeed(&format!(
        "Wrote {} repositories to {}",
        report.records.len(),
        args.output.display()
    ));
    if let Some(rate) = client.last_rate_limit() {
        reporter.println(&format_rate_limit(&rate));
    }

    Ok(())
}
