//! Tracked job management: track, untrack and list.

use anyhow::{Context, Result};
use vitals_client::{ArtifactStore, ClientError, Dashboard};
use vitals_config::Config;
use vitals_engine::{Cadence, JobSpec, Location};

use super::open_store;

/// Location of a job: `--job-repo` (owner defaulting to `--owner`), else the
/// dashboard's own repository.
fn job_location(
    config: &Config,
    dashboard: &Dashboard,
    job_owner: Option<&str>,
    job_repo: Option<&str>,
) -> Result<Location> {
    match job_repo {
        Some(repo) => Location::parse(job_owner.or(config.owner.as_deref()), repo)
            .context("Invalid job repository"),
        None => Ok(dashboard.snapshot().location.clone()),
    }
}

pub async fn track(
    config: &Config,
    summary_path: &str,
    path: &str,
    cadence: &str,
    job_owner: Option<&str>,
    job_repo: Option<&str>,
) -> Result<()> {
    let store = open_store(config)?;
    let mut dashboard = Dashboard::load_or_new(&store, summary_path)
        .await
        .with_context(|| format!("Failed to load dashboard {summary_path}"))?;

    let location = job_location(config, &dashboard, job_owner, job_repo)?;
    let cadence: Cadence = cadence.parse().context("Invalid --cadence")?;
    let job = JobSpec::new(location, path, cadence).context("Invalid job")?;
    let key = job.key();
    let label = job.cadence().to_string();

    let replaced = dashboard.track(job);
    dashboard
        .save_jobs(&store)
        .await
        .context("Failed to save tracked jobs")?;

    let verb = if replaced { "Updated" } else { "Tracking" };
    println!("{verb} {key} (cadence {label})");
    Ok(())
}

pub async fn untrack(
    config: &Config,
    summary_path: &str,
    path: &str,
    job_owner: Option<&str>,
    job_repo: Option<&str>,
) -> Result<()> {
    let store = open_store(config)?;
    let mut dashboard = Dashboard::load(&store, summary_path)
        .await
        .with_context(|| format!("Failed to load dashboard {summary_path}"))?;

    let location = job_location(config, &dashboard, job_owner, job_repo)?;
    if !dashboard.untrack(&location, path) {
        return Err(ClientError::NotFound(format!("{location}:{path}"))).with_context(|| {
            format!("{path} is not tracked by {} in {location}", store.describe())
        });
    }
    dashboard
        .save_jobs(&store)
        .await
        .context("Failed to save tracked jobs")?;

    println!("Untracked {path}");
    Ok(())
}

pub async fn list(config: &Config, summary_path: &str) -> Result<()> {
    let store = open_store(config)?;
    let dashboard = Dashboard::load(&store, summary_path)
        .await
        .with_context(|| format!("Failed to load dashboard {summary_path}"))?;

    for job in dashboard.jobs() {
        println!("{}\t{}\t{}", job.path(), job.cadence(), job.location());
    }
    Ok(())
}
