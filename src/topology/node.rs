// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Uniform graph vertex produced for every mirrored resource.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Prefix under which object labels are flattened into `latest`
pub const LABEL_PREFIX: &str = "kubernetes_labels_";

/// Build a node ID from an identity (UID or name) and a topology tag,
/// e.g. `0f3c...;<pod>`
pub fn make_node_id(identity: &str, tag: &str) -> String {
    format!("{identity};<{tag}>")
}

/// One mapped resource instance.
///
/// All collections are ordered so that two nodes built from the same input
/// compare and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: String,
    pub topology: String,
    pub latest: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub adjacency: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, Node>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parents: BTreeMap<String, BTreeSet<String>>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub controls: BTreeSet<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, topology: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            topology: topology.into(),
            ..Default::default()
        }
    }

    pub fn with_latest(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.latest.insert(key.into(), value.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_control(mut self, control: impl Into<String>) -> Self {
        self.controls.insert(control.into());
        self
    }

    /// Attribute lookup; `None` when absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.latest.get(key).map(String::as_str)
    }

    /// Labels recovered from the flattened `kubernetes_labels_*` entries
    pub fn labels(&self) -> BTreeMap<&str, &str> {
        self.latest
            .range(LABEL_PREFIX.to_string()..)
            .take_while(|(k, _)| k.starts_with(LABEL_PREFIX))
            .map(|(k, v)| (&k[LABEL_PREFIX.len()..], v.as_str()))
            .collect()
    }

    /// Record that `parent_id` in `topology` owns this node
    pub fn add_parent(&mut self, topology: &str, parent_id: &str) {
        self.parents
            .entry(topology.to_string())
            .or_default()
            .insert(parent_id.to_string());
    }

    /// Record a "connects to" edge plus an embedded copy of the child
    pub fn add_child(&mut self, child: &Node) {
        self.adjacency.insert(child.id.clone());
        self.children.insert(child.id.clone(), child.clone());
    }

    /// Union-merge another version of the same node into this one.
    ///
    /// `latest` is last-write-wins per key; every set is extended, never cleared.
    pub fn merge(&mut self, other: Node) {
        self.latest.extend(other.latest);
        self.tags.extend(other.tags);
        self.adjacency.extend(other.adjacency);
        self.controls.extend(other.controls);
        for (id, child) in other.children {
            match self.children.get_mut(&id) {
                Some(existing) => existing.merge(child),
                None => {
                    self.children.insert(id, child);
                }
            }
        }
        for (topology, ids) in other.parents {
            self.parents.entry(topology).or_default().extend(ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_node_id() {
        assert_eq!(make_node_id("abc-123", "pod"), "abc-123;<pod>");
    }

    #[test]
    fn test_labels_are_recovered_from_latest() {
        let node = Node::new("a;<pod>", "pod")
            .with_latest("kubernetes_labels_app", "web")
            .with_latest("kubernetes_labels_tier", "front")
            .with_latest("name", "web-0")
            .with_latest("namespace", "ns");

        let labels = node.labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("app"), Some(&"web"));
        assert_eq!(labels.get("tier"), Some(&"front"));
    }

    #[test]
    fn test_merge_unions_sets_and_overwrites_latest() {
        let mut a = Node::new("a;<pod>", "pod")
            .with_latest("status", "pending")
            .with_tag("pending");
        a.add_parent("service", "s1;<service>");
        a.adjacency.insert("x".into());

        let mut b = Node::new("a;<pod>", "pod").with_latest("status", "running");
        b.add_parent("service", "s2;<service>");
        b.adjacency.insert("y".into());

        a.merge(b);
        assert_eq!(a.get("status"), Some("running"));
        assert!(a.tags.contains("pending"));
        assert_eq!(a.adjacency.len(), 2);
        assert_eq!(a.parents["service"].len(), 2);
    }

    #[test]
    fn test_add_child_embeds_copy() {
        let mut parent = Node::new("p;<service>", "service");
        let mut child = Node::new("c;<pod>", "pod").with_latest("name", "web-0");
        parent.add_child(&child);

        child.latest.insert("name".into(), "changed".into());
        assert!(parent.adjacency.contains("c;<pod>"));
        assert_eq!(parent.children["c;<pod>"].get("name"), Some("web-0"));
    }
}
