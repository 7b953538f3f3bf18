//! Organization repository reports.
//!
//! # Module Structure
//!
//! - [`types`] - Options, inclusion tags, run summary, constants
//! - [`progress`] - Progress reporting: `ReportProgress`, `ProgressCallback`, `emit()`
//! - [`engine`] - The pipeline: `run_report()` and its stages
//! - [`writer`] - CSV rendering and output

pub mod engine;
mod progress;
mod types;
mod writer;

pub use types::{
    DEFAULT_ENRICH_CONCURRENCY, IncludeTag, InclusionSet, Report, ReportOptions,
};

pub use progress::{ProgressCallback, ReportProgress, emit};

pub use engine::{
    compare_full_names, enrich_repos, fetch_org_repos, fetch_orgs, filter_repos, run_report,
    sort_repos,
};

pub use writer::{CSV_HEADERS, render_csv, write_report};
