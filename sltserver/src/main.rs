use std::{convert::Infallible, fs::File};

use slt_axum::{build, start_server};
use slt_core::models::Classifier;
use slt_sqlite::Db;
use sltserver::{AppConfig, Cli, impls::SltApp, sweep};
use time::UtcOffset;
use tokio::select;
use tracing::{Level, event};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The local offset can only be read while the process is single-threaded.
    let offset = UtcOffset::current_local_offset().unwrap_or_else(|_| {
        event!(Level::WARN, "could not determine the local offset, using UTC");
        UtcOffset::UTC
    });

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(offset))
}

async fn run(offset: UtcOffset) -> anyhow::Result<()> {
    let cli = Cli::import()?;

    let AppConfig {
        server,
        database,
        thresholds,
        sweep: schedule,
    } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let classifier = Classifier::new(thresholds)?;
    let app = SltApp {
        db,
        classifier,
        offset,
    };

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let schema = build(app, server).1;
        serde_json::to_writer_pretty(File::create(path)?, &*schema)?;
        return Ok(());
    }

    let sweeper = app.clone();
    let server_task = tokio::spawn(async move { start_server(server, app).await });

    if schedule.every.is_some() {
        let sweep_task = tokio::spawn(async move {
            // A failed sweep is logged; the next one may well succeed.
            let f = async move |_| {
                if let Err(err) = sweep(&sweeper).await {
                    event!(Level::ERROR, err = err.to_string(), "catalog sweep failed");
                }
                Ok::<(), Infallible>(())
            };
            schedule.schedule(f).await
        });

        select! {
            r = server_task => r??,
            r = sweep_task => r??,
        }
    } else {
        server_task.await??;
    }

    Ok(())
}
