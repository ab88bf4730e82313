// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod cli;
mod output;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use indicatif::ProgressBar;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use cli::{Args, Command, OutputFormat};
use k8stopo::config::{self, Config};
use k8stopo::controls::{ControlRequest, dispatch_control};
use k8stopo::join::RuleSet;
use k8stopo::kubernetes::{KubeControls, KubeResourceApi};
use k8stopo::progress::{ProgressUpdate, create_spinner};
use k8stopo::sync::Synchronizer;
use k8stopo::topology::Catalog;
use k8stopo::topology::kinds::POD;

/// Initialize logging with file output and optional stderr
fn init_logging(verbose: bool) {
    use tracing_rolling_file::{RollingConditionBase, RollingFileAppenderBase};
    use tracing_subscriber::fmt::format::FmtSpan;

    let log_dir = config::base_dir()
        .map(|p| p.join("log"))
        .unwrap_or_else(|_| std::path::PathBuf::from("."));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory: {}", e);
        return;
    }

    // Rotate daily or at 10MB, keeping 5 files
    let log_path = log_dir.join("k8stopo.log");
    let condition = RollingConditionBase::new()
        .daily()
        .max_size(10 * 1024 * 1024);

    let file_appender = match RollingFileAppenderBase::new(log_path, condition, 5) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {}", e);
            return;
        }
    };

    let (non_blocking, guard) = file_appender.get_non_blocking_appender();
    // Leak the guard to keep the background writer alive
    std::mem::forget(guard);

    let filter = if verbose { "k8stopo=debug" } else { "k8stopo=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_span_events(FmtSpan::NONE);

    if verbose {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::NONE);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(stderr_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (aws-lc-rs)
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install rustls crypto provider"))?;

    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.apply(Config::load()?);
    let catalog = Catalog::standard().without(&config.disabled_kinds);

    let spinner = create_spinner("Connecting to Kubernetes...");
    let api = KubeResourceApi::connect(config.context.as_deref()).await?;
    let client = api.client().clone();
    spinner.set_message(format!("Connected to {}...", api.context()));

    let sync = Synchronizer::new(
        Arc::new(api),
        catalog.clone(),
        RuleSet::standard(),
        config.sync_config(),
    )
    .await
    .context("Failed to start synchronizer")?;

    // Subscribe before starting so the initial list is delivered too
    let events = match args.command() {
        Command::Events => Some(sync.subscribe(POD)?),
        _ => None,
    };

    sync.start();
    wait_for_initial_sync(&sync, &spinner).await;
    spinner.finish_and_clear();

    let result = match args.command() {
        Command::Once => {
            println!("{}", output::render(&sync.synchronize(), &args.output));
            Ok(())
        }
        Command::Watch => run_watch(&sync, &config, &args.output).await,
        Command::Events => match events {
            Some(rx) => run_events(&sync, rx, &args.output).await,
            None => Ok(()),
        },
        Command::Control {
            node_id,
            control,
            params,
        } => {
            let request = params
                .into_iter()
                .fold(ControlRequest::new(node_id, control), |req, (k, v)| {
                    req.with_parameter(k, v)
                });
            let handler = KubeControls::new(client, catalog);
            run_control(&sync, &handler, &request).await
        }
    };

    sync.shutdown().await;
    result
}

/// Keep the spinner current until every kind has listed once
async fn wait_for_initial_sync(sync: &Synchronizer, spinner: &ProgressBar) {
    let mut progress_rx = sync.progress().subscribe();
    let wait = sync.wait_for_sync();
    tokio::pin!(wait);

    loop {
        tokio::select! {
            biased;
            _ = &mut wait => break,
            progress = progress_rx.recv() => {
                let (done, total) = sync.progress().progress();
                match progress {
                    Ok(ProgressUpdate::Probing { kind }) => {
                        spinner.set_message(format!("[{}/{}] Probing {}...", done, total, kind));
                    }
                    Ok(ProgressUpdate::Unsupported { kind }) => {
                        spinner.set_message(format!("[{}/{}] {} not served", done, total, kind));
                    }
                    Ok(ProgressUpdate::Listed { kind, items, .. }) => {
                        spinner.set_message(format!("[{}/{}] {}: {} objects", done, total, kind, items));
                    }
                    Ok(ProgressUpdate::WatchRestarted { .. }) => {}
                    Err(_) => {}
                }
            }
        }
    }
}

async fn run_watch(sync: &Synchronizer, config: &Config, format: &OutputFormat) -> Result<()> {
    let mut ticker = tokio::time::interval(config.sync_interval());
    info!(interval_secs = config.sync_interval().as_secs(), "Watching");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                println!("{}", output::render(&sync.synchronize(), format));
            }
            signal = tokio::signal::ctrl_c() => {
                return signal.context("Failed to listen for Ctrl-C");
            }
        }
    }
}

async fn run_events(
    sync: &Synchronizer,
    mut rx: tokio::sync::mpsc::UnboundedReceiver<k8stopo::sync::ResourceEvent>,
    format: &OutputFormat,
) -> Result<()> {
    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else {
                    warn!("Pod notifications closed");
                    return Ok(());
                };
                if let Some(report) = sync.shortcut_report(POD, &event) {
                    println!("{}", output::render(&report, format));
                }
            }
            signal = tokio::signal::ctrl_c() => {
                return signal.context("Failed to listen for Ctrl-C");
            }
        }
    }
}

async fn run_control(
    sync: &Synchronizer,
    handler: &KubeControls,
    request: &ControlRequest,
) -> Result<()> {
    let report = sync.synchronize();
    let response = dispatch_control(&report, handler, request).await?;
    if let Some(output) = response.output {
        println!("{}", output);
    }
    if response.removed {
        println!("{} removed", request.node_id);
    }
    Ok(())
}
