// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Node actions against a live cluster.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DeleteParams, DynamicObject, LogParams, Patch, PatchParams, PostParams};
use kube::Client;
use serde_json::json;
use tracing::info;

use crate::controls::{ControlHandler, ControlRequest, ControlResponse};
use crate::topology::kinds::{self, Catalog};
use crate::topology::{Node, keys};

/// Lines returned by `get_logs`
const LOG_TAIL_LINES: i64 = 100;

/// Field manager recorded on our patches
const FIELD_MANAGER: &str = "k8stopo";

pub struct KubeControls {
    client: Client,
    catalog: Catalog,
}

impl KubeControls {
    pub fn new(client: Client, catalog: Catalog) -> Self {
        Self { client, catalog }
    }

    fn api_for(&self, node: &Node) -> Result<Api<DynamicObject>> {
        let spec = self
            .catalog
            .get(&node.topology)
            .ok_or_else(|| anyhow!("Unknown topology '{}'", node.topology))?;
        let ar = spec.descriptor.api_resource();
        Ok(match node.get(keys::NAMESPACE) {
            Some(ns) if spec.descriptor.namespaced => {
                Api::namespaced_with(self.client.clone(), ns, &ar)
            }
            _ => Api::all_with(self.client.clone(), &ar),
        })
    }

    fn snapshot_api(&self, namespace: &str) -> Result<Api<DynamicObject>> {
        let spec = self
            .catalog
            .get(kinds::VOLUME_SNAPSHOT)
            .context("Volume snapshots are not mirrored")?;
        Ok(Api::namespaced_with(
            self.client.clone(),
            namespace,
            &spec.descriptor.api_resource(),
        ))
    }

    async fn describe(&self, node: &Node, name: &str) -> Result<ControlResponse> {
        let obj = self
            .api_for(node)?
            .get(name)
            .await
            .with_context(|| format!("Failed to fetch {}", name))?;
        let output = serde_yaml::to_string(&obj).context("Failed to render object")?;
        Ok(ControlResponse {
            output: Some(output),
            removed: false,
        })
    }

    async fn logs(&self, node: &Node, name: &str) -> Result<ControlResponse> {
        let ns = namespace(node)?;
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), ns);
        let params = LogParams {
            tail_lines: Some(LOG_TAIL_LINES),
            ..Default::default()
        };
        let output = pods
            .logs(name, &params)
            .await
            .with_context(|| format!("Failed to fetch logs for pod {}/{}", ns, name))?;
        Ok(ControlResponse {
            output: Some(output),
            removed: false,
        })
    }

    async fn delete(&self, api: Api<DynamicObject>, name: &str) -> Result<ControlResponse> {
        api.delete(name, &DeleteParams::default())
            .await
            .with_context(|| format!("Failed to delete {}", name))?;
        Ok(ControlResponse {
            output: None,
            removed: true,
        })
    }

    async fn scale(&self, node: &Node, name: &str, delta: i64) -> Result<ControlResponse> {
        let api = self.api_for(node)?;
        let current = api
            .get(name)
            .await
            .with_context(|| format!("Failed to fetch {}", name))?
            .data
            .pointer("/spec/replicas")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(0);
        let replicas = (current + delta).max(0);

        let patch = json!({"spec": {"replicas": replicas}});
        let params = PatchParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..Default::default()
        };
        api.patch(name, &params, &Patch::Merge(&patch))
            .await
            .with_context(|| format!("Failed to scale {}", name))?;
        Ok(ControlResponse {
            output: Some(format!("scaled {} from {} to {}", name, current, replicas)),
            removed: false,
        })
    }

    async fn create_snapshot(
        &self,
        node: &Node,
        name: &str,
        request: &ControlRequest,
    ) -> Result<ControlResponse> {
        let ns = namespace(node)?;
        let snapshot_name = request
            .parameters
            .get("name")
            .cloned()
            .unwrap_or_else(|| format!("{}-{}", name, short_id()));

        let mut spec = json!({"source": {"persistentVolumeClaimName": name}});
        if let Some(class) = request.parameters.get("snapshot_class") {
            spec["volumeSnapshotClassName"] = json!(class);
        }
        let obj: DynamicObject = serde_json::from_value(json!({
            "apiVersion": "snapshot.storage.k8s.io/v1",
            "kind": "VolumeSnapshot",
            "metadata": {"name": snapshot_name, "namespace": ns},
            "spec": spec,
        }))
        .context("Failed to build snapshot")?;

        self.snapshot_api(ns)?
            .create(&PostParams::default(), &obj)
            .await
            .with_context(|| format!("Failed to snapshot claim {}/{}", ns, name))?;
        Ok(ControlResponse {
            output: Some(format!("created snapshot {}", snapshot_name)),
            removed: false,
        })
    }

    async fn clone_snapshot(
        &self,
        node: &Node,
        name: &str,
        request: &ControlRequest,
    ) -> Result<ControlResponse> {
        let ns = namespace(node)?;
        let claim_name = request
            .parameters
            .get("claim_name")
            .cloned()
            .unwrap_or_else(|| format!("{}-clone-{}", name, short_id()));
        let capacity = request
            .parameters
            .get("capacity")
            .map(String::as_str)
            .or_else(|| node.get(keys::RESTORE_SIZE))
            .context("Snapshot has no restore size; pass a capacity")?;

        let mut spec = json!({
            "accessModes": ["ReadWriteOnce"],
            "resources": {"requests": {"storage": capacity}},
            "dataSource": {
                "apiGroup": "snapshot.storage.k8s.io",
                "kind": "VolumeSnapshot",
                "name": name,
            },
        });
        if let Some(class) = request.parameters.get("storage_class") {
            spec["storageClassName"] = json!(class);
        }
        let claim: DynamicObject = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "PersistentVolumeClaim",
            "metadata": {"name": claim_name, "namespace": ns},
            "spec": spec,
        }))
        .context("Failed to build claim")?;

        let claims = self
            .catalog
            .get(kinds::PERSISTENT_VOLUME_CLAIM)
            .context("Volume claims are not mirrored")?;
        Api::<DynamicObject>::namespaced_with(
            self.client.clone(),
            ns,
            &claims.descriptor.api_resource(),
        )
        .create(&PostParams::default(), &claim)
        .await
        .with_context(|| format!("Failed to clone snapshot {}/{}", ns, name))?;
        Ok(ControlResponse {
            output: Some(format!("created claim {}", claim_name)),
            removed: false,
        })
    }
}

fn namespace(node: &Node) -> Result<&str> {
    node.get(keys::NAMESPACE)
        .ok_or_else(|| anyhow!("Node {} has no namespace", node.id))
}

fn short_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[async_trait]
impl ControlHandler for KubeControls {
    async fn handle(&self, node: &Node, request: &ControlRequest) -> Result<ControlResponse> {
        let name = node
            .get(keys::NAME)
            .ok_or_else(|| anyhow!("Node {} has no name", node.id))?;
        info!(node = %node.id, control = %request.control, "Running control");

        match request.control.as_str() {
            kinds::DESCRIBE => self.describe(node, name).await,
            kinds::GET_LOGS => self.logs(node, name).await,
            kinds::DELETE_POD => self.delete(self.api_for(node)?, name).await,
            kinds::SCALE_UP => self.scale(node, name, 1).await,
            kinds::SCALE_DOWN => self.scale(node, name, -1).await,
            kinds::CREATE_VOLUME_SNAPSHOT => self.create_snapshot(node, name, request).await,
            kinds::CLONE_VOLUME_SNAPSHOT => self.clone_snapshot(node, name, request).await,
            kinds::DELETE_VOLUME_SNAPSHOT => {
                self.delete(self.snapshot_api(namespace(node)?)?, name).await
            }
            other => Err(anyhow!("Unsupported control '{}'", other)),
        }
    }
}
