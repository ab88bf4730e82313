// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! The merged graph returned by every synchronization cycle.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::join::Resolution;
use crate::topology::{Node, Topology};

/// Immutable snapshot of every topology for one cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub cycle: u64,
    /// Single-node report produced by the notification path
    pub shortcut: bool,
    pub topologies: BTreeMap<String, Topology>,
}

impl Report {
    pub fn topology(&self, name: &str) -> Option<&Topology> {
        self.topologies.get(name)
    }

    /// Look a node up by ID across all topologies
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.topologies.values().find_map(|t| t.nodes.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.topologies.values().map(Topology::len).sum()
    }

    /// Number of parent/child edges, counted on the child side
    pub fn edge_count(&self) -> usize {
        self.topologies
            .values()
            .flat_map(|t| t.nodes.values())
            .flat_map(|n| n.parents.values())
            .map(|ids| ids.len())
            .sum()
    }
}

/// Collects topologies and resolver output into a [`Report`]
#[derive(Debug, Default)]
pub struct ReportAssembler {
    cycle: u64,
    shortcut: bool,
    topologies: BTreeMap<String, Topology>,
}

impl ReportAssembler {
    pub fn new(cycle: u64) -> Self {
        Self {
            cycle,
            ..Default::default()
        }
    }

    pub fn shortcut(mut self) -> Self {
        self.shortcut = true;
        self
    }

    /// Add a topology; same-name topologies merge by node ID
    pub fn add_topology(&mut self, topology: Topology) {
        match self.topologies.get_mut(&topology.name) {
            Some(existing) => existing.merge(topology),
            None => {
                self.topologies.insert(topology.name.clone(), topology);
            }
        }
    }

    /// Topologies added so far, before any edges are applied
    pub fn topologies(&self) -> &BTreeMap<String, Topology> {
        &self.topologies
    }

    /// Apply resolved edges.
    ///
    /// Embedded children are copies of the child as built this cycle, without
    /// any edges applied. Edges whose endpoints are missing are dropped.
    pub fn apply(&mut self, resolutions: &[Resolution]) {
        let pristine = self.topologies.clone();
        let mut dropped = 0usize;

        for edge in resolutions.iter().flat_map(|r| r.edges.iter()) {
            let Some(child) = pristine
                .get(&edge.child_topology)
                .and_then(|t| t.nodes.get(&edge.child_id))
            else {
                dropped += 1;
                continue;
            };
            let parent_exists = pristine
                .get(&edge.parent_topology)
                .is_some_and(|t| t.nodes.contains_key(&edge.parent_id));
            if !parent_exists {
                dropped += 1;
                continue;
            }

            if let Some(node) = self.node_mut(&edge.child_topology, &edge.child_id) {
                node.add_parent(&edge.parent_topology, &edge.parent_id);
            }
            if let Some(node) = self.node_mut(&edge.parent_topology, &edge.parent_id) {
                node.add_child(child);
            }
        }

        if dropped > 0 {
            debug!(dropped, "Dropped edges to nodes outside the report");
        }
    }

    fn node_mut(&mut self, topology: &str, id: &str) -> Option<&mut Node> {
        self.topologies.get_mut(topology)?.nodes.get_mut(id)
    }

    pub fn finish(self) -> Report {
        Report {
            cycle: self.cycle,
            shortcut: self.shortcut,
            topologies: self.topologies,
        }
    }
}
