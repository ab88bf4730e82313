// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::borrow::Cow;
use std::collections::BTreeMap;

use comfy_table::{Table, presets::ASCII_BORDERS_ONLY_CONDENSED};
use k8stopo::report::Report;
use k8stopo::topology::{Topology, keys};

/// Maximum width for the tag breakdown column
const MAX_TAGS_WIDTH: usize = 60;

/// Truncate a string to max_len chars, adding "..." if truncated
fn truncate_value(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        Cow::Borrowed(s)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        Cow::Owned(format!("{}...", truncated))
    }
}

/// Tag counts like `offline=2, reload=1`
fn tag_breakdown(topology: &Topology) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tag in topology.nodes.values().flat_map(|n| n.tags.iter()) {
        *counts.entry(tag.as_str()).or_default() += 1;
    }
    counts
        .iter()
        .map(|(tag, n)| format!("{}={}", tag, n))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parent_edges(topology: &Topology) -> usize {
    topology
        .nodes
        .values()
        .flat_map(|n| n.parents.values())
        .map(|ids| ids.len())
        .sum()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_BORDERS_ONLY_CONDENSED);
    table
}

pub struct TableFormatter;

impl TableFormatter {
    /// One row per topology
    pub fn summary(report: &Report) -> String {
        if report.topologies.is_empty() {
            return format!("(0 topologies, cycle {})", report.cycle);
        }

        let mut table = new_table();
        table.set_header(vec!["topology", "label", "nodes", "parents", "tags"]);
        for topology in report.topologies.values() {
            let tags = tag_breakdown(topology);
            table.add_row(vec![
                Cow::Borrowed(topology.name.as_str()),
                Cow::Borrowed(topology.label.as_str()),
                Cow::Owned(topology.len().to_string()),
                Cow::Owned(parent_edges(topology).to_string()),
                truncate_value(&tags, MAX_TAGS_WIDTH),
            ]);
        }

        format!(
            "{}\n({} topologies, {} nodes, {} edges, cycle {})",
            table,
            report.topologies.len(),
            report.node_count(),
            report.edge_count(),
            report.cycle
        )
    }

    /// One row per node
    pub fn nodes(report: &Report) -> String {
        let mut table = new_table();
        table.set_header(vec!["topology", "namespace", "name", "state", "id"]);
        let mut rows = 0usize;
        for topology in report.topologies.values() {
            for node in topology.nodes.values() {
                let state = node
                    .get(keys::STATE)
                    .or_else(|| node.get(keys::STATUS))
                    .unwrap_or("");
                table.add_row(vec![
                    topology.name.as_str(),
                    node.get(keys::NAMESPACE).unwrap_or(""),
                    node.get(keys::NAME).unwrap_or(""),
                    state,
                    node.id.as_str(),
                ]);
                rows += 1;
            }
        }
        if rows == 0 {
            return "(0 nodes)".to_string();
        }
        format!("{}\n({} nodes)", table, rows)
    }
}
