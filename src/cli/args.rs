// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use clap::{Parser, Subcommand, ValueEnum};
use k8stopo::config::Config;

#[derive(Parser, Debug)]
#[command(name = "k8stopo")]
#[command(author, version, about = "Mirror Kubernetes resources into a merged topology graph")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Kubernetes context to use (defaults to the saved or current context)
    #[arg(short, long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Seconds between reports in watch mode
    #[arg(short, long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Only report pods scheduled on this node
    #[arg(long, value_name = "NODE")]
    pub node_name: Option<String>,

    /// Topologies to skip, comma-separated (e.g. "disk,cstor_pool")
    #[arg(long, value_name = "KINDS", value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print a report every interval (default)
    Watch,

    /// Wait for the initial sync and print one report
    Once,

    /// Stream pod add/delete notifications as single-node reports
    Events,

    /// Run a control on a node from the current report
    Control {
        /// Node ID, e.g. "0f3c...;<pod>"
        node_id: String,

        /// Control ID, e.g. "describe" or "scale_up"
        control: String,

        /// Control parameters
        #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

impl Args {
    /// Apply command line overrides on top of the saved config
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(ctx) = &self.context {
            config.context = Some(ctx.clone());
        }
        if let Some(secs) = self.interval {
            config.sync_interval_secs = secs;
        }
        if let Some(node) = &self.node_name {
            config.node_name = Some(node.clone());
        }
        for kind in &self.disable {
            if !config.disabled_kinds.contains(kind) {
                config.disabled_kinds.push(kind.clone());
            }
        }
        config
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Watch)
    }
}
