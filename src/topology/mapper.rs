// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Generic object-to-node conversion.
//!
//! Every kind is described by a [`KindSpec`] whose field table lists which
//! attribute keys are read from where. [`map_object`] walks that table; there
//! is no per-kind mapping code.

use kube::api::DynamicObject;
use serde_json::Value;

use super::kinds::{Identity, KindSpec};
use super::node::{LABEL_PREFIX, Node, make_node_id};
use super::{SCOPE_DELIM, keys};
use crate::error::{SyncError, SyncResult};
use crate::join::selector;

/// Tag applied when a status is absent or not in the kind's table
pub const UNKNOWN: &str = "unknown";

const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

/// Per-cycle inputs shared by every mapped node
#[derive(Debug, Clone)]
pub struct MapContext {
    /// Identifies the synchronizer instance that produced the node
    pub epoch: String,
}

/// How one attribute value is read from an object.
///
/// Paths are relative to the object body (`spec`, `status`, `data`, ...);
/// numeric segments index into arrays.
#[derive(Debug, Clone, Copy)]
pub enum Extract {
    Path(&'static [&'static str]),
    Label(&'static str),
    Annotation(&'static str),
    /// First extractor producing a value
    FirstOf(&'static [Extract]),
    /// Byte count rendered as whole GiB, e.g. `"10 GiB"`
    GiB(&'static [&'static str]),
    /// Float rendered with two decimals
    Fixed2(&'static [&'static str]),
    /// Length of an array
    Count(&'static [&'static str]),
    /// `item` below every element of the array at `list`, joined with the scope delimiter
    Collect {
        list: &'static [&'static str],
        item: &'static [&'static str],
    },
    /// Label selector (plain map or matchLabels/matchExpressions) as a selector string
    Selector(&'static [&'static str]),
    Custom(fn(&DynamicObject) -> Option<String>),
}

/// One row of a kind's field table
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub extract: Extract,
}

/// Where the status lives and how it maps to tags. An empty tag means healthy.
#[derive(Debug, Clone, Copy)]
pub struct StatusRule {
    pub key: &'static str,
    pub extract: Extract,
    pub table: &'static [(&'static str, &'static str)],
}

/// A control that is active on a node, optionally only when `when` holds
#[derive(Debug, Clone, Copy)]
pub struct ControlRule {
    pub id: &'static str,
    pub when: Option<fn(&DynamicObject) -> bool>,
}

impl ControlRule {
    pub const fn always(id: &'static str) -> Self {
        Self { id, when: None }
    }

    pub const fn when(id: &'static str, when: fn(&DynamicObject) -> bool) -> Self {
        Self {
            id,
            when: Some(when),
        }
    }
}

/// Walk `path` below the object body
pub fn lookup<'a>(obj: &'a DynamicObject, path: &[&str]) -> Option<&'a Value> {
    lookup_value(&obj.data, path)
}

fn lookup_value<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |value, segment| match value {
        Value::Object(map) => map.get(*segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Scalar rendering; empty strings, nulls and containers count as absent
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

impl Extract {
    pub fn apply(&self, obj: &DynamicObject) -> Option<String> {
        match self {
            Extract::Path(path) => lookup(obj, path).and_then(scalar),
            Extract::Label(key) => non_empty(obj.metadata.labels.as_ref()?.get(*key)),
            Extract::Annotation(key) => non_empty(obj.metadata.annotations.as_ref()?.get(*key)),
            Extract::FirstOf(options) => options.iter().find_map(|e| e.apply(obj)),
            Extract::GiB(path) => {
                let bytes = lookup(obj, path).and_then(as_u64)?;
                Some(format!("{} GiB", bytes / BYTES_PER_GIB))
            }
            Extract::Fixed2(path) => {
                let value = lookup(obj, path).and_then(as_f64)?;
                Some(format!("{:.2}", value))
            }
            Extract::Count(path) => match lookup(obj, path)? {
                Value::Array(items) => Some(items.len().to_string()),
                _ => None,
            },
            Extract::Collect { list, item } => {
                let items = lookup(obj, list)?.as_array()?;
                let collected: Vec<String> = items
                    .iter()
                    .filter_map(|entry| lookup_value(entry, item).and_then(scalar))
                    .collect();
                join_list(collected)
            }
            Extract::Selector(path) => lookup(obj, path).and_then(selector::render_selector),
            Extract::Custom(f) => f(obj),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Join identifiers with the scope delimiter; `None` for an empty list
pub fn join_list(items: Vec<String>) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(SCOPE_DELIM))
    }
}

/// Tag for a raw status through a kind's lookup table
pub fn status_tag(table: &[(&str, &'static str)], status: Option<&str>) -> &'static str {
    let Some(status) = status else {
        return UNKNOWN;
    };
    let lowered = status.to_lowercase();
    table
        .iter()
        .find(|(raw, _)| *raw == lowered)
        .map(|(_, tag)| *tag)
        .unwrap_or(UNKNOWN)
}

/// Render a metadata timestamp the way the API server serializes it
fn creation_timestamp(obj: &DynamicObject) -> Option<String> {
    let ts = obj.metadata.creation_timestamp.as_ref()?;
    serde_json::to_value(ts)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
}

/// Convert one object into a node of `spec`'s topology.
///
/// Fails only when the object has no usable identity.
pub fn map_object(spec: &KindSpec, obj: &DynamicObject, ctx: &MapContext) -> SyncResult<Node> {
    let kind = spec.descriptor.kind;
    let name = obj
        .metadata
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| SyncError::mapping(kind, "<unnamed>", "missing metadata.name"))?;
    let uid = obj.metadata.uid.as_deref().filter(|u| !u.is_empty());

    let identity = match spec.identity {
        Identity::Uid => uid.ok_or_else(|| SyncError::mapping(kind, name, "missing metadata.uid"))?,
        Identity::Name => name,
    };

    let mut node = Node::new(make_node_id(identity, spec.topology), spec.topology)
        .with_latest(keys::NAME, name)
        .with_latest(keys::NODE_TYPE, spec.node_type)
        .with_latest(keys::API_VERSION, spec.descriptor.api_version())
        .with_latest(keys::EPOCH, ctx.epoch.as_str());

    if let Some(uid) = uid {
        node.latest.insert(keys::UID.to_string(), uid.to_string());
    }
    if spec.descriptor.namespaced
        && let Some(ns) = obj.metadata.namespace.as_deref().filter(|n| !n.is_empty())
    {
        node.latest.insert(keys::NAMESPACE.to_string(), ns.to_string());
    }
    if let Some(created) = creation_timestamp(obj) {
        node.latest.insert(keys::CREATED.to_string(), created);
    }
    if let Some(labels) = &obj.metadata.labels {
        for (k, v) in labels {
            node.latest.insert(format!("{LABEL_PREFIX}{k}"), v.clone());
        }
    }

    for field in spec.fields {
        if let Some(value) = field.extract.apply(obj) {
            node.latest.insert(field.key.to_string(), value);
        }
    }

    if let Some(rule) = &spec.status {
        let raw = rule.extract.apply(obj);
        let tag = status_tag(rule.table, raw.as_deref());
        node.latest.insert(
            rule.key.to_string(),
            raw.unwrap_or_else(|| UNKNOWN.to_string()),
        );
        if !tag.is_empty() {
            node.tags.insert(tag.to_string());
        }
    }

    for control in spec.node_controls {
        if control.when.is_none_or(|when| when(obj)) {
            node.controls.insert(control.id.to_string());
        }
    }

    Ok(node)
}
