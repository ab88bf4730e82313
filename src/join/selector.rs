// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Label selector strings.
//!
//! Grammar (comma-joined requirements):
//! - `k=v`, `k==v`, `k!=v`
//! - `k in (a,b)`, `k notin (a,b)`
//! - `k`, `!k`

use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::warn;

static SET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9._/-]+)\s+(in|notin)\s*\(([^()]*)\)$").unwrap()
});

static EQUALITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9._/-]+)\s*(==|!=|=)\s*([A-Za-z0-9._-]*)$").unwrap());

static EXISTS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(!?)\s*([A-Za-z0-9._/-]+)$").unwrap());

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("invalid selector requirement '{0}'")]
    InvalidRequirement(String),
    #[error("unbalanced parentheses in selector '{0}'")]
    Unbalanced(String),
}

/// One parsed requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Equals(String, String),
    NotEquals(String, String),
    In(String, BTreeSet<String>),
    NotIn(String, BTreeSet<String>),
    Exists(String),
    DoesNotExist(String),
}

impl Requirement {
    fn matches(&self, labels: &BTreeMap<&str, &str>) -> bool {
        match self {
            Requirement::Equals(k, v) => labels.get(k.as_str()) == Some(&v.as_str()),
            Requirement::NotEquals(k, v) => labels.get(k.as_str()) != Some(&v.as_str()),
            Requirement::In(k, values) => labels
                .get(k.as_str())
                .is_some_and(|actual| values.contains(*actual)),
            Requirement::NotIn(k, values) => labels
                .get(k.as_str())
                .is_none_or(|actual| !values.contains(*actual)),
            Requirement::Exists(k) => labels.contains_key(k.as_str()),
            Requirement::DoesNotExist(k) => !labels.contains_key(k.as_str()),
        }
    }
}

impl FromStr for Requirement {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(caps) = SET_PATTERN.captures(s) {
            let values: BTreeSet<String> = caps[3]
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect();
            let key = caps[1].to_string();
            return Ok(match &caps[2] {
                "in" => Requirement::In(key, values),
                _ => Requirement::NotIn(key, values),
            });
        }
        if let Some(caps) = EQUALITY_PATTERN.captures(s) {
            let (key, value) = (caps[1].to_string(), caps[3].to_string());
            return Ok(match &caps[2] {
                "!=" => Requirement::NotEquals(key, value),
                _ => Requirement::Equals(key, value),
            });
        }
        if let Some(caps) = EXISTS_PATTERN.captures(s) {
            let key = caps[2].to_string();
            return Ok(if caps[1].is_empty() {
                Requirement::Exists(key)
            } else {
                Requirement::DoesNotExist(key)
            });
        }
        Err(SelectorError::InvalidRequirement(s.to_string()))
    }
}

/// A parsed selector. An empty selector matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    requirements: Vec<Requirement>,
}

impl Selector {
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn matches(&self, labels: &BTreeMap<&str, &str>) -> bool {
        !self.is_empty() && self.requirements.iter().all(|r| r.matches(labels))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let requirements = split_requirements(s)?
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { requirements })
    }
}

/// Split on commas that are not inside a value set
fn split_requirements(s: &str) -> Result<Vec<&str>, SelectorError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| SelectorError::Unbalanced(s.to_string()))?;
            }
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(SelectorError::Unbalanced(s.to_string()));
    }
    parts.push(&s[start..]);
    Ok(parts)
}

/// Render a selector object as a selector string.
///
/// Accepts both a plain label map (services) and the
/// `matchLabels`/`matchExpressions` form (workload controllers). Requirements
/// are sorted so the same selector always renders the same way.
pub fn render_selector(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    let mut requirements = Vec::new();

    if map.contains_key("matchLabels") || map.contains_key("matchExpressions") {
        if let Some(labels) = map.get("matchLabels").and_then(Value::as_object) {
            requirements.extend(render_equalities(labels));
        }
        if let Some(exprs) = map.get("matchExpressions").and_then(Value::as_array) {
            requirements.extend(exprs.iter().filter_map(render_expression));
        }
    } else {
        requirements.extend(render_equalities(map));
    }

    if requirements.is_empty() {
        return None;
    }
    requirements.sort();
    Some(requirements.join(","))
}

fn render_equalities(labels: &serde_json::Map<String, Value>) -> impl Iterator<Item = String> + '_ {
    labels
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|v| format!("{k}={v}")))
}

fn render_expression(expr: &Value) -> Option<String> {
    let key = expr.get("key")?.as_str()?;
    let operator = expr.get("operator")?.as_str()?;
    let mut values: Vec<&str> = expr
        .get("values")
        .and_then(Value::as_array)
        .map(|vs| vs.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    values.sort_unstable();

    match operator {
        "In" => Some(format!("{key} in ({})", values.join(","))),
        "NotIn" => Some(format!("{key} notin ({})", values.join(","))),
        "Exists" => Some(key.to_string()),
        "DoesNotExist" => Some(format!("!{key}")),
        other => {
            // Kept verbatim so the selector fails to parse instead of widening
            warn!(key, operator = other, "Unknown selector operator");
            Some(format!("{key} {other} ({})", values.join(",")))
        }
    }
}
