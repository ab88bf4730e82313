// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Per-kind node sets and the machinery that produces them.

pub mod builder;
pub mod keys;
pub mod kinds;
pub mod mapper;
pub mod node;

use serde::Serialize;
use std::collections::BTreeMap;

pub use builder::TopologyBuilder;
pub use kinds::{Catalog, KindSpec};
pub use mapper::{MapContext, map_object};
pub use node::{Node, make_node_id};

/// Delimiter used when a single attribute carries a list of identifiers
pub const SCOPE_DELIM: &str = "\u{1e}";

/// Display template for one attribute key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataTemplate {
    pub id: &'static str,
    pub label: &'static str,
    pub priority: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<&'static str>,
}

/// A globally available action for the nodes of one topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub id: &'static str,
    pub human: &'static str,
    pub icon: &'static str,
    pub rank: u32,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<&'static str>,
}

/// All nodes of one kind for one cycle plus its static schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topology {
    pub name: String,
    pub label: String,
    pub nodes: BTreeMap<String, Node>,
    pub templates: Vec<MetadataTemplate>,
    pub controls: BTreeMap<String, Control>,
}

impl Topology {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            nodes: BTreeMap::new(),
            templates: Vec::new(),
            controls: BTreeMap::new(),
        }
    }

    /// Insert a node, merging with an existing node of the same ID
    pub fn add_node(&mut self, node: Node) {
        match self.nodes.get_mut(&node.id) {
            Some(existing) => existing.merge(node),
            None => {
                self.nodes.insert(node.id.clone(), node);
            }
        }
    }

    /// Node-ID union with another topology of the same name
    pub fn merge(&mut self, other: Topology) {
        for node in other.nodes.into_values() {
            self.add_node(node);
        }
        for template in other.templates {
            if !self.templates.iter().any(|t| t.id == template.id) {
                self.templates.push(template);
            }
        }
        self.controls.extend(other.controls);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_merge_is_node_union() {
        let mut a = Topology::new("pod", "Pods");
        a.add_node(Node::new("1;<pod>", "pod").with_latest("name", "a"));
        let mut b = Topology::new("pod", "Pods");
        b.add_node(Node::new("2;<pod>", "pod").with_latest("name", "b"));
        let mut dup = Node::new("1;<pod>", "pod");
        dup.adjacency.insert("x".into());
        b.add_node(dup);

        a.merge(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.nodes["1;<pod>"].get("name"), Some("a"));
        assert!(a.nodes["1;<pod>"].adjacency.contains("x"));
    }
}
