// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Node actions.
//!
//! The engine only checks that an action is currently valid on a node; the
//! handler performs it against the cluster.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::info;

use crate::error::{SyncError, SyncResult};
use crate::report::Report;
use crate::topology::Node;

/// One action invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    pub node_id: String,
    pub control: String,
    pub parameters: BTreeMap<String, String>,
}

impl ControlRequest {
    pub fn new(node_id: impl Into<String>, control: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            control: control.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Result of a performed action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlResponse {
    /// Human-readable output, e.g. a describe dump
    pub output: Option<String>,
    /// The node is gone after the action
    pub removed: bool,
}

#[async_trait]
pub trait ControlHandler: Send + Sync {
    async fn handle(&self, node: &Node, request: &ControlRequest) -> anyhow::Result<ControlResponse>;
}

/// Validate `request` against `report` and hand it to `handler`.
///
/// Fails with [`SyncError::UnknownControl`] when the node is absent or the
/// control is not active on it.
pub async fn dispatch_control(
    report: &Report,
    handler: &dyn ControlHandler,
    request: &ControlRequest,
) -> anyhow::Result<ControlResponse> {
    let node = active_node(report, request)?;
    info!(node = %request.node_id, control = %request.control, "Dispatching control");
    handler.handle(node, request).await
}

fn active_node<'a>(report: &'a Report, request: &ControlRequest) -> SyncResult<&'a Node> {
    report
        .node(&request.node_id)
        .filter(|n| n.controls.contains(&request.control))
        .ok_or_else(|| SyncError::UnknownControl {
            node: request.node_id.clone(),
            control: request.control.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ControlHandler for Recorder {
        async fn handle(&self, node: &Node, request: &ControlRequest) -> anyhow::Result<ControlResponse> {
            self.seen
                .lock()
                .unwrap()
                .push((node.id.clone(), request.control.clone()));
            Ok(ControlResponse {
                output: Some("ok".to_string()),
                removed: false,
            })
        }
    }

    fn report() -> Report {
        let mut pods = Topology::new("pod", "Pods");
        pods.add_node(Node::new("u1;<pod>", "pod").with_control("describe"));
        Report {
            cycle: 1,
            shortcut: false,
            topologies: [("pod".to_string(), pods)].into_iter().collect(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_active_control() {
        let handler = Recorder::default();
        let resp = dispatch_control(&report(), &handler, &ControlRequest::new("u1;<pod>", "describe"))
            .await
            .unwrap();
        assert_eq!(resp.output.as_deref(), Some("ok"));
        assert_eq!(handler.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_inactive_or_unknown() {
        let handler = Recorder::default();
        let err = dispatch_control(&report(), &handler, &ControlRequest::new("u1;<pod>", "delete_pod"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::UnknownControl { .. })
        ));

        let err = dispatch_control(&report(), &handler, &ControlRequest::new("nope", "describe"))
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<SyncError>().is_some());
        assert!(handler.seen.lock().unwrap().is_empty());
    }
}
