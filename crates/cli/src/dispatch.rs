//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use anyhow::Result;
use vitals_config::Config;

use crate::args::Commands;
use crate::commands;
use crate::commands::dashboard::DashboardOptions;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Post {
            path,
            content,
            content_file,
            report,
            note,
        } => {
            commands::post::run(config, &path, content, content_file, report, note.as_deref())
                .await?;
        }
        Commands::Dashboard {
            summary_path,
            no_refresh,
            no_write,
            extra_text,
            notify,
        } => {
            let options = DashboardOptions {
                summary_path: &summary_path,
                refresh: !no_refresh,
                write: !no_write,
                extra_text: extra_text.as_deref(),
                notify: notify.as_deref(),
            };
            commands::dashboard::run(config, options).await?;
        }
        Commands::Track {
            path,
            cadence,
            job_owner,
            job_repo,
            summary_path,
        } => {
            commands::jobs::track(
                config,
                &summary_path,
                &path,
                &cadence,
                job_owner.as_deref(),
                job_repo.as_deref(),
            )
            .await?;
        }
        Commands::Untrack {
            path,
            job_owner,
            job_repo,
            summary_path,
        } => {
            commands::jobs::untrack(
                config,
                &summary_path,
                &path,
                job_owner.as_deref(),
                job_repo.as_deref(),
            )
            .await?;
        }
        Commands::Jobs { summary_path } => {
            commands::jobs::list(config, &summary_path).await?;
        }
        Commands::CheckFiles {
            paths,
            report_path,
            note,
            content,
        } => {
            commands::check_files::run(config, &paths, &report_path, note.as_deref(), &content)
                .await?;
        }
    }
    Ok(())
}
