//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and `VITALS_*` environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not validate configuration values (see `vitals_config::ConfigLoader`).

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use vitals_config::constants::DEFAULT_SUMMARY_PATH;
use vitals_engine::Report;

#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Post job health reports and maintain a status dashboard in a git repository", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  vitals --owner acme --repo status post --path nightly.md --content 'all good'\n  vitals --owner acme --repo status track --path nightly.md --cadence 1d\n  vitals --repo file:///srv/status dashboard\n  vitals check-files --path /data/export.csv --report-path exports.md\n"
)]
pub struct Cli {
    /// Repository owner on GitHub
    #[arg(long, global = true, env = "VITALS_OWNER")]
    pub owner: Option<String>,

    /// Repository name, or file:///path for a local git working tree
    #[arg(long, global = true, env = "VITALS_REPO")]
    pub repo: Option<String>,

    /// GitHub access token (falls back to GITHUB_TOKEN)
    #[arg(long, global = true, env = "VITALS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL
    #[arg(long, global = true, env = "VITALS_API_URL")]
    pub api_url: Option<String>,

    /// Branch to read from and commit to
    #[arg(long, global = true, env = "VITALS_BRANCH")]
    pub branch: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "VITALS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for transient read failures
    #[arg(long, global = true, env = "VITALS_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Post a job report: write the file with a fresh metadata block
    #[command(group(ArgGroup::new("body").required(true).args(["content", "content_file"])))]
    Post {
        /// Path of the report file in the repository (.md or .org)
        #[arg(long)]
        path: String,

        /// Report body
        #[arg(long)]
        content: Option<String>,

        /// Read the report body from a file ("-" for stdin)
        #[arg(long, value_name = "FILE")]
        content_file: Option<PathBuf>,

        /// Job report (GOOD or BAD)
        #[arg(long, default_value = "GOOD")]
        report: Report,

        /// Optional note shown on the dashboard
        #[arg(long)]
        note: Option<String>,
    },

    /// Refresh the dashboard, write it back and print it
    Dashboard {
        /// Path of the rendered summary (.md or .org)
        #[arg(long, default_value = DEFAULT_SUMMARY_PATH)]
        summary_path: String,

        /// Print the stored summary without fetching job reports
        #[arg(long)]
        no_refresh: bool,

        /// Do not commit the summary and snapshot
        #[arg(long)]
        no_write: bool,

        /// Text appended after the status sections
        #[arg(long)]
        extra_text: Option<String>,

        /// Notification providers as JSON, e.g. '{"telegram": {"token": "...", "chat_id": 1}}'
        #[arg(long, env = "VITALS_NOTIFY", hide_env_values = true)]
        notify: Option<String>,
    },

    /// Add a job to the dashboard, or change its cadence
    Track {
        /// Path of the job's report file (.md or .org)
        #[arg(long)]
        path: String,

        /// Expected reporting cadence: a duration like 10m, 6h, 1d, or a cron expression
        #[arg(long)]
        cadence: String,

        /// Owner of the repository holding the report (defaults to the dashboard's)
        #[arg(long)]
        job_owner: Option<String>,

        /// Repository holding the report (defaults to the dashboard's)
        #[arg(long)]
        job_repo: Option<String>,

        /// Path of the rendered summary (.md or .org)
        #[arg(long, default_value = DEFAULT_SUMMARY_PATH)]
        summary_path: String,
    },

    /// Remove a job from the dashboard
    Untrack {
        /// Path of the job's report file
        #[arg(long)]
        path: String,

        /// Owner of the repository holding the report (defaults to the dashboard's)
        #[arg(long)]
        job_owner: Option<String>,

        /// Repository holding the report (defaults to the dashboard's)
        #[arg(long)]
        job_repo: Option<String>,

        /// Path of the rendered summary (.md or .org)
        #[arg(long, default_value = DEFAULT_SUMMARY_PATH)]
        summary_path: String,
    },

    /// List the jobs tracked by the dashboard
    Jobs {
        /// Path of the rendered summary (.md or .org)
        #[arg(long, default_value = DEFAULT_SUMMARY_PATH)]
        summary_path: String,
    },

    /// Report GOOD if every local path exists, BAD otherwise
    CheckFiles {
        /// Local path to check (repeatable)
        #[arg(long = "path", required = true)]
        paths: Vec<PathBuf>,

        /// Path of the report file in the repository (.md or .org)
        #[arg(long)]
        report_path: String,

        /// Note to post instead of the computed one
        #[arg(long)]
        note: Option<String>,

        /// Report body template; {bad_list} and {good_list} are substituted
        #[arg(long, default_value = crate::commands::check_files::DEFAULT_TEMPLATE)]
        content: String,
    },
}
