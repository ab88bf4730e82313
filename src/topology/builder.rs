// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Groups mapped nodes into per-kind topologies.

use kube::api::DynamicObject;
use tracing::{debug, warn};

use super::kinds::KindSpec;
use super::mapper::{MapContext, map_object};
use super::{Node, Topology};

/// Builds a fresh [`Topology`] from a point-in-time store snapshot.
///
/// Pure apart from logging; calling it twice on the same snapshot yields the
/// same topology.
#[derive(Debug, Clone, Default)]
pub struct TopologyBuilder {
    /// Only keep nodes whose host attribute equals this value
    node_name: Option<String>,
}

impl TopologyBuilder {
    pub fn new(node_name: Option<String>) -> Self {
        Self { node_name }
    }

    /// Empty topology carrying the kind's templates and controls
    pub fn empty(spec: &KindSpec) -> Topology {
        let mut topology = Topology::new(spec.topology, spec.label);
        topology.templates = spec.templates.to_vec();
        topology.controls = spec
            .controls
            .iter()
            .map(|c| (c.id.to_string(), c.clone()))
            .collect();
        topology
    }

    pub fn build(&self, spec: &KindSpec, objects: &[DynamicObject], ctx: &MapContext) -> Topology {
        let mut topology = Self::empty(spec);

        for obj in objects {
            let node = match map_object(spec, obj, ctx) {
                Ok(node) => node,
                Err(e) => {
                    warn!(kind = %spec.topology, error = %e, "Skipping unmappable object");
                    continue;
                }
            };
            if !self.keeps(spec, &node) {
                continue;
            }
            topology.add_node(node);
        }

        debug!(kind = %spec.topology, nodes = topology.len(), "Built topology");
        topology
    }

    fn keeps(&self, spec: &KindSpec, node: &Node) -> bool {
        match (&self.node_name, spec.host_key) {
            (Some(wanted), Some(key)) => node.get(key) == Some(wanted.as_str()),
            _ => true,
        }
    }
}
