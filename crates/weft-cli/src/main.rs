//! `weft` - run a task list on a fixed pool of workers.
//!
//! Loads the task list, dispatches it, then writes one record per task in
//! completion order. A task list that cannot be loaded aborts the run before
//! any worker starts and no output file is written.

mod config;

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weft_core::app::{DispatchCounts, Dispatcher};
use weft_core::domain::CompletionRecord;
use weft_core::impls::{CsvSink, JsonLinesSink, SimulatedWork, TextTaskSource};
use weft_core::ports::{ResultSink, TaskSource};

use crate::config::{Config, OutputFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weft=info,weft_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(config).await
}

async fn run(config: Config) -> anyhow::Result<()> {
    let tasks = TextTaskSource::new(&config.file)
        .load()
        .with_context(|| format!("could not load tasks from {}", config.file.display()))?;

    info!(count = tasks.len(), "loaded tasks");
    for task in &tasks {
        debug!(task = %task, "queued");
    }

    let runner = Arc::new(SimulatedWork::with_unit(config.time_unit()));
    let dispatcher = Dispatcher::new(runner);
    let progress = tokio::spawn(log_progress(dispatcher.progress()));

    let records = dispatcher
        .run(tasks, config.pool_size.get())
        .await
        .context("dispatch failed")?;
    drop(dispatcher);
    let _ = progress.await;

    info!(path = %config.output.display(), "writing results");
    write_results(&config, &records)
        .with_context(|| format!("could not write {}", config.output.display()))?;
    Ok(())
}

fn write_results(config: &Config, records: &[CompletionRecord]) -> anyhow::Result<()> {
    let file = BufWriter::new(File::create(&config.output)?);
    let mut sink: Box<dyn ResultSink> = match config.format {
        OutputFormat::Csv => Box::new(CsvSink::new(file)),
        OutputFormat::Jsonl => Box::new(JsonLinesSink::new(file)),
    };
    sink.write(records)?;
    Ok(())
}

/// Log every progress snapshot until the dispatcher is dropped.
async fn log_progress(mut progress: watch::Receiver<DispatchCounts>) {
    while progress.changed().await.is_ok() {
        let counts = *progress.borrow_and_update();
        debug!(
            pending = counts.pending,
            in_flight = counts.in_flight,
            completed = counts.completed,
            total = counts.total,
            "progress"
        );
    }
}
