//! Dashboard command implementation.
//!
//! Loads the snapshot, refreshes every tracked job, commits the summary and
//! snapshot, sends change notifications and prints the rendered summary.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::info;
use vitals_client::{Dashboard, Notifier, NotifyConfig, Sources};
use vitals_config::Config;

use super::open_store;

pub struct DashboardOptions<'a> {
    pub summary_path: &'a str,
    pub refresh: bool,
    pub write: bool,
    pub extra_text: Option<&'a str>,
    pub notify: Option<&'a str>,
}

pub async fn run(config: &Config, options: DashboardOptions<'_>) -> Result<()> {
    if options.write && !options.refresh {
        bail!("Refusing to write the dashboard without refreshing it (pass --no-write)");
    }
    let notifier = options
        .notify
        .map(|json| NotifyConfig::from_json(json).and_then(Notifier::new))
        .transpose()
        .context("Unable to parse --notify")?;

    let store = open_store(config)?;
    let mut dashboard = Dashboard::load(&store, options.summary_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load dashboard {} (add jobs with `vitals track`)",
                options.summary_path
            )
        })?;

    if options.refresh {
        info!("Refreshing summary information");
        let sources = Sources::from_config(config)?;
        let summary = dashboard
            .refresh(&sources, Utc::now(), options.extra_text)
            .await?;

        if options.write {
            info!("Writing summary information to repository");
            dashboard
                .write(&store)
                .await
                .context("Failed to write dashboard")?;
        }

        if let Some(notifier) = &notifier {
            let messages = summary.change_messages();
            if !messages.is_empty() {
                let delivered = notifier.broadcast(&messages).await;
                info!(delivered, total = messages.len(), "Sent change notifications");
            }
        }
    }

    print!("{}", dashboard.rendered().unwrap_or_default());
    Ok(())
}
