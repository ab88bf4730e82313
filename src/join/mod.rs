// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Relationship resolution between topologies.
//!
//! A [`JoinRule`] names a parent topology, a child topology and a [`Matcher`].
//! Resolving a rule yields an ordered set of [`Edge`]s; applying them to the
//! report is the assembler's job.

pub mod rules;
pub mod selector;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::error::SyncError;
use crate::topology::{Node, SCOPE_DELIM, Topology, keys};

pub use rules::RuleSet;
pub use selector::Selector;

/// Value rewrite applied identically on both sides of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Split on `delim` and keep segment `index`
    Segment { delim: char, index: usize },
}

impl Transform {
    pub fn apply<'a>(&self, value: &'a str) -> Option<&'a str> {
        match *self {
            Transform::Segment { delim, index } => value.split(delim).nth(index),
        }
    }
}

/// A parent attribute compared against a child attribute
#[derive(Debug, Clone, Copy)]
pub struct KeyPair {
    pub parent: &'static str,
    pub child: &'static str,
    pub transform: Option<Transform>,
}

impl KeyPair {
    pub const fn new(parent: &'static str, child: &'static str) -> Self {
        Self {
            parent,
            child,
            transform: None,
        }
    }

    /// Same key on both sides
    pub const fn same(key: &'static str) -> Self {
        Self::new(key, key)
    }

    pub const fn transformed(key: &'static str, transform: Transform) -> Self {
        Self {
            parent: key,
            child: key,
            transform: Some(transform),
        }
    }

    fn parent_value<'a>(&self, node: &'a Node) -> Option<&'a str> {
        self.value(node.get(self.parent)?)
    }

    fn child_value<'a>(&self, node: &'a Node) -> Option<&'a str> {
        self.value(node.get(self.child)?)
    }

    fn value<'a>(&self, raw: &'a str) -> Option<&'a str> {
        match self.transform {
            Some(t) => t.apply(raw),
            None => Some(raw),
        }
    }
}

/// How a parent finds its children
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Parent's `selector` attribute matched against child labels, same namespace
    Selector,
    /// Every pair must compare equal
    Equal(&'static [KeyPair]),
    /// Each element of the parent's `list` attribute compared against the
    /// child's `child` attribute (itself a list when `child_is_list`), plus
    /// the `also` pairs
    Member {
        list: &'static str,
        child: &'static str,
        child_is_list: bool,
        also: &'static [KeyPair],
    },
}

#[derive(Debug, Clone, Copy)]
pub struct JoinRule {
    pub name: &'static str,
    pub parent: &'static str,
    pub child: &'static str,
    pub matcher: Matcher,
    /// Stop after the first child (in ID order) per parent element
    pub first_only: bool,
}

/// A directed parent/child relation between two nodes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub parent_topology: String,
    pub parent_id: String,
    pub child_topology: String,
    pub child_id: String,
}

/// Output of one rule
#[derive(Debug, Default)]
pub struct Resolution {
    pub rule: String,
    pub edges: BTreeSet<Edge>,
    pub errors: Vec<SyncError>,
}

impl Resolution {
    fn push(&mut self, rule: &JoinRule, parent: &Node, child: &Node) {
        self.edges.insert(Edge {
            parent_topology: rule.parent.to_string(),
            parent_id: parent.id.clone(),
            child_topology: rule.child.to_string(),
            child_id: child.id.clone(),
        });
    }
}

/// Resolve every rule whose topologies are present, in rule order
pub fn resolve_all(rules: &RuleSet, topologies: &BTreeMap<String, Topology>) -> Vec<Resolution> {
    rules
        .rules()
        .iter()
        .map(|rule| resolve(rule, topologies))
        .collect()
}

/// Compute the edges of one rule. Missing topologies resolve to nothing.
pub fn resolve(rule: &JoinRule, topologies: &BTreeMap<String, Topology>) -> Resolution {
    let mut resolution = Resolution {
        rule: rule.name.to_string(),
        ..Default::default()
    };
    let (Some(parents), Some(children)) =
        (topologies.get(rule.parent), topologies.get(rule.child))
    else {
        return resolution;
    };

    match rule.matcher {
        Matcher::Selector => resolve_selector(rule, parents, children, &mut resolution),
        Matcher::Equal(pairs) => resolve_equal(rule, pairs, parents, children, &mut resolution),
        Matcher::Member {
            list,
            child,
            child_is_list,
            also,
        } => resolve_member(
            rule,
            MemberSpec {
                list,
                child,
                child_is_list,
                also,
            },
            parents,
            children,
            &mut resolution,
        ),
    }

    for e in &resolution.errors {
        warn!(rule = %rule.name, error = %e, "Join rule skipped a node");
    }
    resolution
}

fn resolve_selector(rule: &JoinRule, parents: &Topology, children: &Topology, out: &mut Resolution) {
    for parent in parents.nodes.values() {
        let Some(raw) = parent.get(keys::SELECTOR) else {
            continue;
        };
        let selector: Selector = match raw.parse() {
            Ok(s) => s,
            Err(e) => {
                out.errors.push(SyncError::Resolution {
                    rule: rule.name.to_string(),
                    node: parent.id.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let namespace = parent.get(keys::NAMESPACE);
        for child in children.nodes.values() {
            if child.get(keys::NAMESPACE) != namespace || !selector.matches(&child.labels()) {
                continue;
            }
            out.push(rule, parent, child);
            if rule.first_only {
                break;
            }
        }
    }
}

/// Children indexed by their values for `pairs`, each bucket in ID order
fn index_children<'a>(
    pairs: &[KeyPair],
    children: &'a Topology,
) -> BTreeMap<Vec<&'a str>, Vec<&'a Node>> {
    let mut index: BTreeMap<Vec<&str>, Vec<&Node>> = BTreeMap::new();
    for child in children.nodes.values() {
        let key: Option<Vec<&str>> = pairs.iter().map(|p| p.child_value(child)).collect();
        if let Some(key) = key {
            index.entry(key).or_default().push(child);
        }
    }
    index
}

fn resolve_equal(
    rule: &JoinRule,
    pairs: &[KeyPair],
    parents: &Topology,
    children: &Topology,
    out: &mut Resolution,
) {
    let index = index_children(pairs, children);
    for parent in parents.nodes.values() {
        let key: Option<Vec<&str>> = pairs.iter().map(|p| p.parent_value(parent)).collect();
        let Some(matched) = key.and_then(|k| index.get(&k)) else {
            continue;
        };
        let take = if rule.first_only { 1 } else { matched.len() };
        for child in matched.iter().take(take) {
            out.push(rule, parent, child);
        }
    }
}

struct MemberSpec {
    list: &'static str,
    child: &'static str,
    child_is_list: bool,
    also: &'static [KeyPair],
}

fn resolve_member(
    rule: &JoinRule,
    spec: MemberSpec,
    parents: &Topology,
    children: &Topology,
    out: &mut Resolution,
) {
    // element -> children carrying it, in ID order
    let mut index: BTreeMap<&str, Vec<&Node>> = BTreeMap::new();
    for child in children.nodes.values() {
        let Some(raw) = child.get(spec.child) else {
            continue;
        };
        if spec.child_is_list {
            let mut seen = BTreeSet::new();
            for item in raw.split(SCOPE_DELIM).filter(|i| !i.is_empty()) {
                if seen.insert(item) {
                    index.entry(item).or_default().push(child);
                }
            }
        } else {
            index.entry(raw).or_default().push(child);
        }
    }

    for parent in parents.nodes.values() {
        let Some(list) = parent.get(spec.list) else {
            continue;
        };
        for element in list.split(SCOPE_DELIM).filter(|e| !e.is_empty()) {
            let Some(candidates) = index.get(element) else {
                continue;
            };
            let matching = candidates.iter().filter(|child| {
                spec.also.iter().all(|pair| {
                    let p = pair.parent_value(parent);
                    p.is_some() && p == pair.child_value(child)
                })
            });
            for child in matching.take(if rule.first_only { 1 } else { usize::MAX }) {
                out.push(rule, parent, child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::node::LABEL_PREFIX;

    fn node(topology: &str, id: &str, attrs: &[(&str, &str)]) -> Node {
        let mut n = Node::new(format!("{id};<{topology}>"), topology);
        for (k, v) in attrs {
            n.latest.insert(k.to_string(), v.to_string());
        }
        n
    }

    fn label(key: &str) -> String {
        format!("{LABEL_PREFIX}{key}")
    }

    fn topologies(nodes: Vec<Node>) -> BTreeMap<String, Topology> {
        let mut map: BTreeMap<String, Topology> = BTreeMap::new();
        for n in nodes {
            map.entry(n.topology.clone())
                .or_insert_with(|| Topology::new(n.topology.clone(), n.topology.clone()))
                .add_node(n);
        }
        map
    }

    fn rule(parent: &'static str, child: &'static str, matcher: Matcher) -> JoinRule {
        JoinRule {
            name: "test",
            parent,
            child,
            matcher,
            first_only: false,
        }
    }

    fn child_ids(res: &Resolution) -> Vec<(&str, &str)> {
        res.edges
            .iter()
            .map(|e| (e.parent_id.as_str(), e.child_id.as_str()))
            .collect()
    }

    #[test]
    fn test_selector_requires_same_namespace() {
        let app = label("app");
        let app = app.as_str();
        let topos = topologies(vec![
            node("service", "s1", &[("selector", "app=web"), ("namespace", "a")]),
            node("pod", "p1", &[(app, "web"), ("namespace", "a")]),
            node("pod", "p2", &[(app, "web"), ("namespace", "b")]),
            node("pod", "p3", &[(app, "db"), ("namespace", "a")]),
        ]);
        let res = resolve(&rule("service", "pod", Matcher::Selector), &topos);
        assert_eq!(child_ids(&res), vec![("s1;<service>", "p1;<pod>")]);
        assert!(res.errors.is_empty());
    }

    #[test]
    fn test_malformed_selector_is_recorded() {
        let app = label("app");
        let app = app.as_str();
        let topos = topologies(vec![
            node("service", "bad", &[("selector", "app in (web")]),
            node("service", "good", &[("selector", "app=web")]),
            node("pod", "p1", &[(app, "web")]),
        ]);
        let res = resolve(&rule("service", "pod", Matcher::Selector), &topos);
        assert_eq!(child_ids(&res), vec![("good;<service>", "p1;<pod>")]);
        assert_eq!(res.errors.len(), 1);
        assert!(matches!(&res.errors[0], SyncError::Resolution { node, .. } if node == "bad;<service>"));
    }

    #[test]
    fn test_member_matches_whole_elements_only() {
        let topos = topologies(vec![
            node("pool", "x", &[("devices", "dev1\u{1e}dev2")]),
            node("disk", "a", &[("name", "dev1")]),
            node("disk", "b", &[("name", "dev2")]),
            node("disk", "c", &[("name", "dev")]),
            node("disk", "d", &[("name", "dev12")]),
        ]);
        let matcher = Matcher::Member {
            list: "devices",
            child: "name",
            child_is_list: false,
            also: &[],
        };
        let res = resolve(&rule("pool", "disk", matcher), &topos);
        assert_eq!(
            child_ids(&res),
            vec![("x;<pool>", "a;<disk>"), ("x;<pool>", "b;<disk>")]
        );
    }

    #[test]
    fn test_member_against_child_list_with_extra_pair() {
        const HOST: &[KeyPair] = &[KeyPair::same("host")];
        let topos = topologies(vec![
            node("pool", "x", &[("disks", "/dev/a"), ("host", "n1")]),
            node("disk", "a", &[("links", "/dev/a\u{1e}/dev/b"), ("host", "n1")]),
            node("disk", "b", &[("links", "/dev/a"), ("host", "n2")]),
        ]);
        let matcher = Matcher::Member {
            list: "disks",
            child: "links",
            child_is_list: true,
            also: HOST,
        };
        let res = resolve(&rule("pool", "disk", matcher), &topos);
        assert_eq!(child_ids(&res), vec![("x;<pool>", "a;<disk>")]);
    }

    #[test]
    fn test_equal_with_transform() {
        const PAIRS: &[KeyPair] = &[
            KeyPair::same("host"),
            KeyPair::transformed("name", Transform::Segment { delim: '-', index: 1 }),
        ];
        let topos = topologies(vec![
            node("bd", "1", &[("name", "blockdevice-abc"), ("host", "n1")]),
            node("disk", "1", &[("name", "disk-abc"), ("host", "n1")]),
            node("disk", "2", &[("name", "disk-abc"), ("host", "n2")]),
            node("disk", "3", &[("name", "diskabc"), ("host", "n1")]),
        ]);
        let res = resolve(&rule("bd", "disk", Matcher::Equal(PAIRS)), &topos);
        assert_eq!(child_ids(&res), vec![("1;<bd>", "1;<disk>")]);
    }

    #[test]
    fn test_first_only_takes_lowest_id() {
        const PAIRS: &[KeyPair] = &[KeyPair::new("target", "name")];
        let topos = topologies(vec![
            node("claim", "c", &[("target", "bd")]),
            node("device", "z", &[("name", "bd")]),
            node("device", "a", &[("name", "bd")]),
        ]);
        let mut r = rule("claim", "device", Matcher::Equal(PAIRS));
        r.first_only = true;
        let res = resolve(&r, &topos);
        assert_eq!(child_ids(&res), vec![("c;<claim>", "a;<device>")]);
    }

    #[test]
    fn test_missing_attribute_or_topology_is_no_match() {
        const PAIRS: &[KeyPair] = &[KeyPair::new("volume", "name")];
        let topos = topologies(vec![
            node("claim", "c", &[]),
            node("volume", "v", &[("name", "v")]),
        ]);
        let res = resolve(&rule("claim", "volume", Matcher::Equal(PAIRS)), &topos);
        assert!(res.edges.is_empty());

        let res = resolve(&rule("claim", "absent", Matcher::Equal(PAIRS)), &topos);
        assert!(res.edges.is_empty());
        assert!(res.errors.is_empty());
    }
}
