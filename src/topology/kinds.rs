// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Catalog of mirrored kinds.
//!
//! Each [`KindSpec`] carries the kind's REST coordinates, its field table,
//! status lookup, controls and display templates. The [`Catalog`] is passed
//! explicitly to the synchronizer and builder; there is no global registry.

use k8s_openapi::api::{
    apps::v1::{DaemonSet, Deployment, StatefulSet},
    batch::v1::{CronJob, Job},
    core::v1::{Namespace, PersistentVolume, PersistentVolumeClaim, Pod, Service},
    storage::v1::StorageClass,
};
use kube::api::DynamicObject;
use serde_json::Value;

use super::keys;
use super::mapper::{ControlRule, Extract, Field, StatusRule, join_list, lookup};
use super::{Control, MetadataTemplate};
use crate::kubernetes::discovery::{KindDescriptor, core_kind};

// Topology names
pub const POD: &str = "pod";
pub const SERVICE: &str = "service";
pub const DEPLOYMENT: &str = "deployment";
pub const DAEMON_SET: &str = "daemonset";
pub const STATEFUL_SET: &str = "statefulset";
pub const JOB: &str = "job";
pub const CRON_JOB: &str = "cronjob";
pub const NAMESPACE: &str = "namespace";
pub const PERSISTENT_VOLUME: &str = "persistent_volume";
pub const PERSISTENT_VOLUME_CLAIM: &str = "persistent_volume_claim";
pub const STORAGE_CLASS: &str = "storage_class";
pub const VOLUME_SNAPSHOT: &str = "volume_snapshot";
pub const VOLUME_SNAPSHOT_CLASS: &str = "volume_snapshot_class";
pub const VOLUME_SNAPSHOT_CONTENT: &str = "volume_snapshot_content";
pub const DISK: &str = "disk";
pub const BLOCK_DEVICE: &str = "block_device";
pub const BLOCK_DEVICE_CLAIM: &str = "block_device_claim";
pub const STORAGE_POOL_CLAIM: &str = "storage_pool_claim";
pub const CSTOR_POOL: &str = "cstor_pool";
pub const CSTOR_VOLUME: &str = "cstor_volume";
pub const CSTOR_VOLUME_REPLICA: &str = "cstor_volume_replica";
pub const CSTOR_POOL_CLUSTER: &str = "cstor_pool_cluster";
pub const CSTOR_POOL_INSTANCE: &str = "cstor_pool_instance";

// Control identifiers
pub const DESCRIBE: &str = "describe";
pub const GET_LOGS: &str = "get_logs";
pub const DELETE_POD: &str = "delete_pod";
pub const SCALE_UP: &str = "scale_up";
pub const SCALE_DOWN: &str = "scale_down";
pub const CREATE_VOLUME_SNAPSHOT: &str = "create_volume_snapshot";
pub const CLONE_VOLUME_SNAPSHOT: &str = "clone_volume_snapshot";
pub const DELETE_VOLUME_SNAPSHOT: &str = "delete_volume_snapshot";

/// How a node's ID is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    Uid,
    Name,
}

/// Everything the engine knows about one kind
#[derive(Debug, Clone)]
pub struct KindSpec {
    pub topology: &'static str,
    pub label: &'static str,
    pub node_type: &'static str,
    pub descriptor: KindDescriptor,
    pub identity: Identity,
    pub fields: &'static [Field],
    pub status: Option<StatusRule>,
    pub node_controls: &'static [ControlRule],
    pub templates: &'static [MetadataTemplate],
    pub controls: &'static [Control],
    /// Offers edge-triggered add/delete notifications
    pub notify: bool,
    /// Attribute compared against the configured host when filtering by node
    pub host_key: Option<&'static str>,
}

/// Ordered set of kind specs, keyed by topology name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    kinds: Vec<KindSpec>,
}

impl Catalog {
    pub fn new(kinds: Vec<KindSpec>) -> Self {
        Self { kinds }
    }

    /// Workload, volume, snapshot and OpenEBS storage kinds
    pub fn standard() -> Self {
        Self::new(STANDARD_KINDS.to_vec())
    }

    /// Drop kinds by topology name (used for `disabled_kinds` in the config)
    pub fn without(mut self, disabled: &[String]) -> Self {
        self.kinds
            .retain(|k| !disabled.iter().any(|d| d == k.topology));
        self
    }

    pub fn kinds(&self) -> &[KindSpec] {
        &self.kinds
    }

    pub fn get(&self, topology: &str) -> Option<&KindSpec> {
        self.kinds.iter().find(|k| k.topology == topology)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Status tables
// ---------------------------------------------------------------------------

const CSTOR_STATUS: &[(&str, &str)] = &[
    ("degraded", "degraded"),
    ("error", "failed"),
    ("healthy", ""),
    ("init", "pending"),
    ("invalid", "notpermitted"),
    ("offline", "offline"),
    ("online", ""),
    ("rebuilding", "reload"),
    ("inactive", "offline"),
    ("active", ""),
];

const POD_PHASE: &[(&str, &str)] = &[
    ("running", ""),
    ("succeeded", ""),
    ("pending", "pending"),
    ("failed", "failed"),
];

const VOLUME_PHASE: &[(&str, &str)] = &[
    ("bound", ""),
    ("available", ""),
    ("pending", "pending"),
    ("released", "offline"),
    ("failed", "failed"),
    ("lost", "failed"),
];

const BLOCK_DEVICE_STATE: &[(&str, &str)] = &[("active", ""), ("inactive", "offline")];

const CLAIM_PHASE: &[(&str, &str)] = &[("bound", ""), ("pending", "pending"), ("unbound", "offline")];

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

const fn control(
    id: &'static str,
    human: &'static str,
    icon: &'static str,
    rank: u32,
    confirmation: Option<&'static str>,
) -> Control {
    Control {
        id,
        human,
        icon,
        rank,
        category: "kubernetes",
        confirmation,
    }
}

const DESCRIBE_CONTROL: Control = control(DESCRIBE, "Describe", "fa fa-file-text", 2, None);
const GET_LOGS_CONTROL: Control = control(GET_LOGS, "Get logs", "fa fa-desktop", 0, None);
const DELETE_POD_CONTROL: Control = control(
    DELETE_POD,
    "Delete",
    "fa fa-trash-o",
    1,
    Some("Are you sure you want to delete this pod?"),
);
const SCALE_UP_CONTROL: Control = control(SCALE_UP, "Scale up", "fa fa-arrow-up", 0, None);
const SCALE_DOWN_CONTROL: Control = control(SCALE_DOWN, "Scale down", "fa fa-arrow-down", 1, None);
const CREATE_SNAPSHOT_CONTROL: Control =
    control(CREATE_VOLUME_SNAPSHOT, "Create snapshot", "fa fa-camera", 0, None);
const CLONE_SNAPSHOT_CONTROL: Control =
    control(CLONE_VOLUME_SNAPSHOT, "Clone snapshot", "fa fa-clone", 0, None);
const DELETE_SNAPSHOT_CONTROL: Control = control(
    DELETE_VOLUME_SNAPSHOT,
    "Delete snapshot",
    "fa fa-trash-o",
    1,
    Some("Are you sure you want to delete this snapshot?"),
);

const DESCRIBE_ONLY: &[Control] = &[DESCRIBE_CONTROL];
const DESCRIBE_RULE: &[ControlRule] = &[ControlRule::always(DESCRIBE)];

fn has_replicas(obj: &DynamicObject) -> bool {
    lookup(obj, &["spec", "replicas"])
        .and_then(Value::as_u64)
        .is_some_and(|n| n > 0)
}

fn is_bound(obj: &DynamicObject) -> bool {
    lookup(obj, &["status", "phase"]).and_then(Value::as_str) == Some("Bound")
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

const fn template(id: &'static str, label: &'static str, priority: f64) -> MetadataTemplate {
    MetadataTemplate {
        id,
        label,
        priority,
        datatype: None,
    }
}

const fn number(id: &'static str, label: &'static str, priority: f64) -> MetadataTemplate {
    MetadataTemplate {
        id,
        label,
        priority,
        datatype: Some("number"),
    }
}

const NAME_TEMPLATE: MetadataTemplate = template(keys::NAME, "Name", 1.0);
const NAMESPACE_TEMPLATE: MetadataTemplate = template(keys::NAMESPACE, "Namespace", 2.0);
const CREATED_TEMPLATE: MetadataTemplate = MetadataTemplate {
    id: keys::CREATED,
    label: "Created",
    priority: 3.0,
    datatype: Some("datetime"),
};
const STATUS_TEMPLATE: MetadataTemplate = template(keys::STATUS, "Status", 4.0);

// ---------------------------------------------------------------------------
// Custom extractors
// ---------------------------------------------------------------------------

fn restart_count(obj: &DynamicObject) -> Option<String> {
    let statuses = lookup(obj, &["status", "containerStatuses"])?.as_array()?;
    let total: u64 = statuses
        .iter()
        .filter_map(|s| s.get("restartCount").and_then(Value::as_u64))
        .sum();
    Some(total.to_string())
}

fn service_ports(obj: &DynamicObject) -> Option<String> {
    let ports = lookup(obj, &["spec", "ports"])?.as_array()?;
    let rendered: Vec<String> = ports
        .iter()
        .filter_map(|p| {
            let port = p.get("port")?.as_u64()?;
            let protocol = p.get("protocol").and_then(Value::as_str).unwrap_or("TCP");
            Some(format!("{port}/{protocol}"))
        })
        .collect();
    if rendered.is_empty() {
        None
    } else {
        Some(rendered.join(", "))
    }
}

fn access_modes(obj: &DynamicObject) -> Option<String> {
    let modes = lookup(obj, &["spec", "accessModes"])?.as_array()?;
    let modes: Vec<&str> = modes.iter().filter_map(Value::as_str).collect();
    if modes.is_empty() {
        None
    } else {
        Some(modes.join(", "))
    }
}

/// Claims restored from a snapshot reference it through dataSource
fn claim_snapshot_source(obj: &DynamicObject) -> Option<String> {
    let source = lookup(obj, &["spec", "dataSource"])?;
    if source.get("kind").and_then(Value::as_str) != Some("VolumeSnapshot") {
        return None;
    }
    source
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .map(String::from)
}

/// Local device volumes are backed by a claim named `bdc-<volume>`
fn volume_block_device_claim(obj: &DynamicObject) -> Option<String> {
    let cas_type = obj.metadata.labels.as_ref()?.get("openebs.io/cas-type")?;
    if cas_type != "local-device" {
        return None;
    }
    obj.metadata.name.as_ref().map(|name| format!("bdc-{name}"))
}

/// Pool claim named in the `cas.openebs.io/config` annotation of a storage class.
///
/// The annotation is a YAML list of `name`/`value` pairs.
fn storage_class_pool_claim(obj: &DynamicObject) -> Option<String> {
    let config = obj
        .metadata
        .annotations
        .as_ref()?
        .get("cas.openebs.io/config")?;
    let entries: Vec<serde_yaml::Value> = serde_yaml::from_str(config).ok()?;
    entries.iter().find_map(|entry| {
        let name = entry.get("name")?.as_str()?;
        if name != "StoragePoolClaim" {
            return None;
        }
        entry
            .get("value")?
            .as_str()
            .map(|v| v.trim_matches('"').to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Block device names grouped under `groups[].devices[].<name_key>`
fn nested_names(
    obj: &DynamicObject,
    groups: &str,
    devices: &str,
    name_key: &str,
) -> Option<String> {
    let groups = lookup(obj, &["spec", groups])?.as_array()?;
    let names: Vec<String> = groups
        .iter()
        .filter_map(|g| g.get(devices)?.as_array())
        .flatten()
        .filter_map(|d| d.get(name_key)?.as_str())
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect();
    join_list(names)
}

fn pool_block_devices(obj: &DynamicObject) -> Option<String> {
    nested_names(obj, "group", "blockDevice", "name")
}

fn instance_block_devices(obj: &DynamicObject) -> Option<String> {
    nested_names(obj, "dataRaidGroups", "blockDevices", "blockDeviceName")
}

// ---------------------------------------------------------------------------
// Kind specs
// ---------------------------------------------------------------------------

const HOSTNAME_LABEL: Extract = Extract::Label("kubernetes.io/hostname");

const STANDARD_KINDS: &[KindSpec] = &[
    KindSpec {
        topology: POD,
        label: "Pods",
        node_type: "Pod",
        descriptor: core_kind!(Pod, namespaced),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::HOST_NODE, extract: Extract::Path(&["spec", "nodeName"]) },
            Field { key: keys::IP, extract: Extract::Path(&["status", "podIP"]) },
            Field { key: keys::RESTART_COUNT, extract: Extract::Custom(restart_count) },
            Field {
                key: keys::VOLUME_CLAIMS,
                extract: Extract::Collect {
                    list: &["spec", "volumes"],
                    item: &["persistentVolumeClaim", "claimName"],
                },
            },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "phase"]),
            table: POD_PHASE,
        }),
        node_controls: &[
            ControlRule::always(DESCRIBE),
            ControlRule::always(GET_LOGS),
            ControlRule::always(DELETE_POD),
        ],
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::IP, "IP", 5.0),
            template(keys::HOST_NODE, "Node", 6.0),
            number(keys::RESTART_COUNT, "Restart #", 7.0),
        ],
        controls: &[DESCRIBE_CONTROL, GET_LOGS_CONTROL, DELETE_POD_CONTROL],
        notify: true,
        host_key: Some(keys::HOST_NODE),
    },
    KindSpec {
        topology: SERVICE,
        label: "Services",
        node_type: "Service",
        descriptor: core_kind!(Service, namespaced),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::SELECTOR, extract: Extract::Selector(&["spec", "selector"]) },
            Field { key: keys::CLUSTER_IP, extract: Extract::Path(&["spec", "clusterIP"]) },
            Field { key: keys::SERVICE_TYPE, extract: Extract::Path(&["spec", "type"]) },
            Field { key: keys::PORTS, extract: Extract::Custom(service_ports) },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            template(keys::CLUSTER_IP, "Internal IP", 4.0),
            template(keys::SERVICE_TYPE, "Type", 5.0),
            template(keys::PORTS, "Ports", 6.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: DEPLOYMENT,
        label: "Deployments",
        node_type: "Deployment",
        descriptor: core_kind!(Deployment, namespaced),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::SELECTOR, extract: Extract::Selector(&["spec", "selector"]) },
            Field { key: keys::DESIRED_REPLICAS, extract: Extract::Path(&["spec", "replicas"]) },
            Field { key: keys::REPLICAS, extract: Extract::Path(&["status", "replicas"]) },
            Field {
                key: keys::AVAILABLE_REPLICAS,
                extract: Extract::Path(&["status", "availableReplicas"]),
            },
            Field { key: keys::STRATEGY, extract: Extract::Path(&["spec", "strategy", "type"]) },
        ],
        status: None,
        node_controls: &[
            ControlRule::always(DESCRIBE),
            ControlRule::always(SCALE_UP),
            ControlRule::when(SCALE_DOWN, has_replicas),
        ],
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            number(keys::DESIRED_REPLICAS, "Desired replicas", 4.0),
            number(keys::REPLICAS, "Replicas", 5.0),
            number(keys::AVAILABLE_REPLICAS, "Available replicas", 6.0),
            template(keys::STRATEGY, "Strategy", 7.0),
        ],
        controls: &[DESCRIBE_CONTROL, SCALE_UP_CONTROL, SCALE_DOWN_CONTROL],
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: DAEMON_SET,
        label: "Daemon sets",
        node_type: "DaemonSet",
        descriptor: core_kind!(DaemonSet, namespaced),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::SELECTOR, extract: Extract::Selector(&["spec", "selector"]) },
            Field {
                key: keys::DESIRED_SCHEDULED,
                extract: Extract::Path(&["status", "desiredNumberScheduled"]),
            },
            Field {
                key: keys::CURRENT_SCHEDULED,
                extract: Extract::Path(&["status", "currentNumberScheduled"]),
            },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            number(keys::DESIRED_SCHEDULED, "Desired replicas", 4.0),
            number(keys::CURRENT_SCHEDULED, "Replicas", 5.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: STATEFUL_SET,
        label: "Stateful sets",
        node_type: "StatefulSet",
        descriptor: core_kind!(StatefulSet, namespaced),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::SELECTOR, extract: Extract::Selector(&["spec", "selector"]) },
            Field { key: keys::DESIRED_REPLICAS, extract: Extract::Path(&["spec", "replicas"]) },
            Field { key: keys::REPLICAS, extract: Extract::Path(&["status", "replicas"]) },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            number(keys::DESIRED_REPLICAS, "Desired replicas", 4.0),
            number(keys::REPLICAS, "Replicas", 5.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: JOB,
        label: "Jobs",
        node_type: "Job",
        descriptor: core_kind!(Job, namespaced),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::SELECTOR, extract: Extract::Selector(&["spec", "selector"]) },
            Field { key: keys::COMPLETIONS, extract: Extract::Path(&["spec", "completions"]) },
            Field { key: keys::SUCCEEDED, extract: Extract::Path(&["status", "succeeded"]) },
            Field { key: keys::FAILED, extract: Extract::Path(&["status", "failed"]) },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            number(keys::COMPLETIONS, "Completions", 4.0),
            number(keys::SUCCEEDED, "Succeeded", 5.0),
            number(keys::FAILED, "Failed", 6.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: CRON_JOB,
        label: "Cron jobs",
        node_type: "CronJob",
        descriptor: core_kind!(CronJob, namespaced),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::SCHEDULE, extract: Extract::Path(&["spec", "schedule"]) },
            Field { key: keys::SUSPENDED, extract: Extract::Path(&["spec", "suspend"]) },
            Field {
                key: keys::ACTIVE_JOBS,
                extract: Extract::Collect { list: &["status", "active"], item: &["name"] },
            },
            Field { key: keys::ACTIVE_JOB_COUNT, extract: Extract::Count(&["status", "active"]) },
            Field {
                key: keys::LAST_SCHEDULED,
                extract: Extract::Path(&["status", "lastScheduleTime"]),
            },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            template(keys::SCHEDULE, "Schedule", 4.0),
            template(keys::LAST_SCHEDULED, "Last scheduled", 5.0),
            template(keys::SUSPENDED, "Suspended", 6.0),
            number(keys::ACTIVE_JOB_COUNT, "Active jobs", 7.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: NAMESPACE,
        label: "Namespaces",
        node_type: "Namespace",
        descriptor: core_kind!(Namespace, cluster),
        identity: Identity::Uid,
        fields: &[Field { key: keys::STATE, extract: Extract::Path(&["status", "phase"]) }],
        status: None,
        node_controls: &[],
        templates: &[NAME_TEMPLATE, CREATED_TEMPLATE, template(keys::STATE, "State", 3.0)],
        controls: &[],
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: PERSISTENT_VOLUME,
        label: "Persistent volumes",
        node_type: "Persistent Volume",
        descriptor: core_kind!(PersistentVolume, cluster),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::VOLUME_CLAIM, extract: Extract::Path(&["spec", "claimRef", "name"]) },
            Field {
                key: keys::STORAGE_CLASS_NAME,
                extract: Extract::Path(&["spec", "storageClassName"]),
            },
            Field { key: keys::CAPACITY, extract: Extract::Path(&["spec", "capacity", "storage"]) },
            Field { key: keys::ACCESS_MODES, extract: Extract::Custom(access_modes) },
            Field {
                key: keys::RECLAIM_POLICY,
                extract: Extract::Path(&["spec", "persistentVolumeReclaimPolicy"]),
            },
            Field { key: keys::CAS_TYPE, extract: Extract::Label("openebs.io/cas-type") },
            Field {
                key: keys::BLOCK_DEVICE_CLAIM_NAME,
                extract: Extract::Custom(volume_block_device_claim),
            },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "phase"]),
            table: VOLUME_PHASE,
        }),
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::VOLUME_CLAIM, "Volume claim", 5.0),
            template(keys::STORAGE_CLASS_NAME, "Storage class", 6.0),
            template(keys::CAPACITY, "Capacity", 7.0),
            template(keys::ACCESS_MODES, "Access modes", 8.0),
            template(keys::RECLAIM_POLICY, "Reclaim policy", 9.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: PERSISTENT_VOLUME_CLAIM,
        label: "Persistent volume claims",
        node_type: "Persistent Volume Claim",
        descriptor: core_kind!(PersistentVolumeClaim, namespaced),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::VOLUME_NAME, extract: Extract::Path(&["spec", "volumeName"]) },
            Field {
                key: keys::STORAGE_CLASS_NAME,
                extract: Extract::FirstOf(&[
                    Extract::Annotation("volume.beta.kubernetes.io/storage-class"),
                    Extract::Path(&["spec", "storageClassName"]),
                ]),
            },
            Field {
                key: keys::CAPACITY,
                extract: Extract::Path(&["status", "capacity", "storage"]),
            },
            Field { key: keys::ACCESS_MODES, extract: Extract::Custom(access_modes) },
            Field {
                key: keys::VOLUME_SNAPSHOT_NAME,
                extract: Extract::FirstOf(&[
                    Extract::Annotation("snapshot.alpha.kubernetes.io/snapshot"),
                    Extract::Custom(claim_snapshot_source),
                ]),
            },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "phase"]),
            table: VOLUME_PHASE,
        }),
        node_controls: &[
            ControlRule::always(DESCRIBE),
            ControlRule::when(CREATE_VOLUME_SNAPSHOT, is_bound),
        ],
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::VOLUME_NAME, "Volume", 5.0),
            template(keys::STORAGE_CLASS_NAME, "Storage class", 6.0),
            template(keys::CAPACITY, "Capacity", 7.0),
            template(keys::ACCESS_MODES, "Access modes", 8.0),
        ],
        controls: &[DESCRIBE_CONTROL, CREATE_SNAPSHOT_CONTROL],
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: STORAGE_CLASS,
        label: "Storage classes",
        node_type: "Storage Class",
        descriptor: core_kind!(StorageClass, cluster),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::PROVISIONER, extract: Extract::Path(&["provisioner"]) },
            Field { key: keys::RECLAIM_POLICY, extract: Extract::Path(&["reclaimPolicy"]) },
            Field {
                key: keys::VOLUME_BINDING_MODE,
                extract: Extract::Path(&["volumeBindingMode"]),
            },
            Field { key: keys::CAS_TYPE, extract: Extract::Annotation("openebs.io/cas-type") },
            Field {
                key: keys::STORAGE_POOL_CLAIM,
                extract: Extract::Custom(storage_class_pool_claim),
            },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            CREATED_TEMPLATE,
            template(keys::PROVISIONER, "Provisioner", 3.0),
            template(keys::RECLAIM_POLICY, "Reclaim policy", 4.0),
            template(keys::VOLUME_BINDING_MODE, "Binding mode", 5.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: VOLUME_SNAPSHOT,
        label: "Volume snapshots",
        node_type: "Volume Snapshot",
        descriptor: KindDescriptor::custom(
            "snapshot.storage.k8s.io",
            "v1",
            "VolumeSnapshot",
            "volumesnapshots",
            true,
        ),
        identity: Identity::Uid,
        fields: &[
            Field {
                key: keys::VOLUME_CLAIM,
                extract: Extract::Path(&["spec", "source", "persistentVolumeClaimName"]),
            },
            Field {
                key: keys::SNAPSHOT_CLASS,
                extract: Extract::Path(&["spec", "volumeSnapshotClassName"]),
            },
            Field {
                key: keys::SNAPSHOT_CONTENT,
                extract: Extract::Path(&["status", "boundVolumeSnapshotContentName"]),
            },
            Field { key: keys::READY_TO_USE, extract: Extract::Path(&["status", "readyToUse"]) },
            Field { key: keys::RESTORE_SIZE, extract: Extract::Path(&["status", "restoreSize"]) },
        ],
        status: None,
        node_controls: &[
            ControlRule::always(DESCRIBE),
            ControlRule::always(CLONE_VOLUME_SNAPSHOT),
            ControlRule::always(DELETE_VOLUME_SNAPSHOT),
        ],
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            template(keys::VOLUME_CLAIM, "Volume claim", 4.0),
            template(keys::SNAPSHOT_CLASS, "Snapshot class", 5.0),
            template(keys::READY_TO_USE, "Ready", 6.0),
            template(keys::RESTORE_SIZE, "Restore size", 7.0),
        ],
        controls: &[DESCRIBE_CONTROL, CLONE_SNAPSHOT_CONTROL, DELETE_SNAPSHOT_CONTROL],
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: VOLUME_SNAPSHOT_CLASS,
        label: "Volume snapshot classes",
        node_type: "Volume Snapshot Class",
        descriptor: KindDescriptor::custom(
            "snapshot.storage.k8s.io",
            "v1",
            "VolumeSnapshotClass",
            "volumesnapshotclasses",
            false,
        ),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::DRIVER, extract: Extract::Path(&["driver"]) },
            Field { key: keys::DELETION_POLICY, extract: Extract::Path(&["deletionPolicy"]) },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            CREATED_TEMPLATE,
            template(keys::DRIVER, "Driver", 3.0),
            template(keys::DELETION_POLICY, "Deletion policy", 4.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: VOLUME_SNAPSHOT_CONTENT,
        label: "Volume snapshot contents",
        node_type: "Volume Snapshot Content",
        descriptor: KindDescriptor::custom(
            "snapshot.storage.k8s.io",
            "v1",
            "VolumeSnapshotContent",
            "volumesnapshotcontents",
            false,
        ),
        identity: Identity::Uid,
        fields: &[
            Field {
                key: keys::VOLUME_SNAPSHOT_NAME,
                extract: Extract::Path(&["spec", "volumeSnapshotRef", "name"]),
            },
            Field {
                key: keys::VOLUME_SNAPSHOT_NAMESPACE,
                extract: Extract::Path(&["spec", "volumeSnapshotRef", "namespace"]),
            },
            Field { key: keys::DRIVER, extract: Extract::Path(&["spec", "driver"]) },
            Field {
                key: keys::DELETION_POLICY,
                extract: Extract::Path(&["spec", "deletionPolicy"]),
            },
            Field {
                key: keys::SNAPSHOT_HANDLE,
                extract: Extract::Path(&["status", "snapshotHandle"]),
            },
            Field { key: keys::READY_TO_USE, extract: Extract::Path(&["status", "readyToUse"]) },
            Field { key: keys::RESTORE_SIZE, extract: Extract::Path(&["status", "restoreSize"]) },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            CREATED_TEMPLATE,
            template(keys::VOLUME_SNAPSHOT_NAME, "Volume snapshot", 3.0),
            template(keys::DRIVER, "Driver", 4.0),
            template(keys::DELETION_POLICY, "Deletion policy", 5.0),
            template(keys::RESTORE_SIZE, "Restore size", 6.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: DISK,
        label: "Disks",
        node_type: "Disk",
        descriptor: KindDescriptor::custom("openebs.io", "v1alpha1", "Disk", "disks", false),
        identity: Identity::Uid,
        fields: &[
            Field {
                key: keys::PHYSICAL_SECTOR_SIZE,
                extract: Extract::Path(&["spec", "capacity", "physicalSectorSize"]),
            },
            Field {
                key: keys::LOGICAL_SECTOR_SIZE,
                extract: Extract::Path(&["spec", "capacity", "logicalSectorSize"]),
            },
            Field { key: keys::STORAGE, extract: Extract::GiB(&["spec", "capacity", "storage"]) },
            Field {
                key: keys::FIRMWARE_REVISION,
                extract: Extract::Path(&["spec", "details", "firmwareRevision"]),
            },
            Field { key: keys::MODEL, extract: Extract::Path(&["spec", "details", "model"]) },
            Field {
                key: keys::ROTATION_RATE,
                extract: Extract::Path(&["spec", "details", "rotationRate"]),
            },
            Field { key: keys::SERIAL, extract: Extract::Path(&["spec", "details", "serial"]) },
            Field { key: keys::VENDOR, extract: Extract::Path(&["spec", "details", "vendor"]) },
            Field { key: keys::HOST_NAME, extract: HOSTNAME_LABEL },
            Field { key: keys::PATH, extract: Extract::Path(&["spec", "path"]) },
            Field {
                key: keys::DEVICE_LIST,
                extract: Extract::FirstOf(&[
                    Extract::Collect { list: &["spec", "devlinks", "0", "links"], item: &[] },
                    Extract::Path(&["spec", "path"]),
                ]),
            },
            Field {
                key: keys::CURRENT_TEMPERATURE,
                extract: Extract::Path(&["stats", "tempInfo", "currentTemperature"]),
            },
            Field {
                key: keys::HIGHEST_TEMPERATURE,
                extract: Extract::Path(&["stats", "tempInfo", "highestTemperature"]),
            },
            Field {
                key: keys::LOWEST_TEMPERATURE,
                extract: Extract::Path(&["stats", "tempInfo", "lowestTemperature"]),
            },
            Field {
                key: keys::TOTAL_BYTES_READ,
                extract: Extract::Path(&["stats", "totalBytesRead"]),
            },
            Field {
                key: keys::TOTAL_BYTES_WRITTEN,
                extract: Extract::Path(&["stats", "totalBytesWritten"]),
            },
            Field {
                key: keys::DEVICE_UTILIZATION_RATE,
                extract: Extract::Fixed2(&["stats", "deviceUtilizationRate"]),
            },
            Field {
                key: keys::PERCENT_ENDURANCE_USED,
                extract: Extract::Fixed2(&["stats", "percentEnduranceUsed"]),
            },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "state"]),
            table: CSTOR_STATUS,
        }),
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::HOST_NAME, "Host", 5.0),
            template(keys::PATH, "Path", 6.0),
            template(keys::STORAGE, "Size", 7.0),
            template(keys::MODEL, "Model", 8.0),
            template(keys::VENDOR, "Vendor", 9.0),
            template(keys::SERIAL, "Serial", 10.0),
            number(keys::CURRENT_TEMPERATURE, "Temperature", 11.0),
            template(keys::DEVICE_UTILIZATION_RATE, "Utilization", 12.0),
            template(keys::PERCENT_ENDURANCE_USED, "Endurance used", 13.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: BLOCK_DEVICE,
        label: "Block devices",
        node_type: "Block Device",
        descriptor: KindDescriptor::custom(
            "openebs.io",
            "v1alpha1",
            "BlockDevice",
            "blockdevices",
            true,
        ),
        identity: Identity::Uid,
        fields: &[
            Field {
                key: keys::LOGICAL_SECTOR_SIZE,
                extract: Extract::Path(&["spec", "capacity", "logicalSectorSize"]),
            },
            Field { key: keys::STORAGE, extract: Extract::GiB(&["spec", "capacity", "storage"]) },
            Field {
                key: keys::FIRMWARE_REVISION,
                extract: Extract::Path(&["spec", "details", "firmwareRevision"]),
            },
            Field { key: keys::MODEL, extract: Extract::Path(&["spec", "details", "model"]) },
            Field { key: keys::SERIAL, extract: Extract::Path(&["spec", "details", "serial"]) },
            Field { key: keys::VENDOR, extract: Extract::Path(&["spec", "details", "vendor"]) },
            Field { key: keys::HOST_NAME, extract: HOSTNAME_LABEL },
            Field { key: keys::PATH, extract: Extract::Path(&["spec", "path"]) },
            Field { key: keys::CLAIM_STATE, extract: Extract::Path(&["status", "claimState"]) },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "state"]),
            table: BLOCK_DEVICE_STATE,
        }),
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::HOST_NAME, "Host", 5.0),
            template(keys::PATH, "Path", 6.0),
            template(keys::STORAGE, "Size", 7.0),
            template(keys::CLAIM_STATE, "Claim state", 8.0),
            template(keys::MODEL, "Model", 9.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: BLOCK_DEVICE_CLAIM,
        label: "Block device claims",
        node_type: "Block Device Claim",
        descriptor: KindDescriptor::custom(
            "openebs.io",
            "v1alpha1",
            "BlockDeviceClaim",
            "blockdeviceclaims",
            true,
        ),
        identity: Identity::Uid,
        fields: &[
            Field {
                key: keys::BLOCK_DEVICE_NAME,
                extract: Extract::Path(&["spec", "blockDeviceName"]),
            },
            Field {
                key: keys::HOST_NAME,
                extract: Extract::FirstOf(&[
                    Extract::Path(&["spec", "blockDeviceNodeAttributes", "hostName"]),
                    Extract::Path(&["spec", "hostName"]),
                ]),
            },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "phase"]),
            table: CLAIM_PHASE,
        }),
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::BLOCK_DEVICE_NAME, "Block device", 5.0),
            template(keys::HOST_NAME, "Host", 6.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: STORAGE_POOL_CLAIM,
        label: "Storage pool claims",
        node_type: "Storage Pool Claim",
        descriptor: KindDescriptor::custom(
            "openebs.io",
            "v1alpha1",
            "StoragePoolClaim",
            "storagepoolclaims",
            false,
        ),
        identity: Identity::Uid,
        fields: &[
            Field {
                key: keys::POOL_TYPE,
                extract: Extract::Path(&["spec", "poolSpec", "poolType"]),
            },
            Field { key: keys::MAX_POOLS, extract: Extract::Path(&["spec", "maxPools"]) },
            Field { key: keys::STATE, extract: Extract::Path(&["status", "phase"]) },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            CREATED_TEMPLATE,
            template(keys::POOL_TYPE, "Pool type", 3.0),
            number(keys::MAX_POOLS, "Max pools", 4.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: CSTOR_POOL,
        label: "cStor pools",
        node_type: "CStor Pool",
        descriptor: KindDescriptor::custom(
            "openebs.io",
            "v1alpha1",
            "CStorPool",
            "cstorpools",
            false,
        ),
        identity: Identity::Uid,
        fields: &[
            Field {
                key: keys::STORAGE_POOL_CLAIM,
                extract: Extract::Label("openebs.io/storage-pool-claim"),
            },
            Field { key: keys::HOST_NAME, extract: HOSTNAME_LABEL },
            Field {
                key: keys::POOL_TYPE,
                extract: Extract::Path(&["spec", "poolSpec", "poolType"]),
            },
            Field { key: keys::BLOCK_DEVICE_LIST, extract: Extract::Custom(pool_block_devices) },
            Field {
                key: keys::DISK_LIST,
                extract: Extract::Collect { list: &["spec", "disks", "diskList"], item: &[] },
            },
            Field { key: keys::TOTAL_SIZE, extract: Extract::Path(&["status", "capacity", "total"]) },
            Field { key: keys::FREE_SIZE, extract: Extract::Path(&["status", "capacity", "free"]) },
            Field { key: keys::USED_SIZE, extract: Extract::Path(&["status", "capacity", "used"]) },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "phase"]),
            table: CSTOR_STATUS,
        }),
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::HOST_NAME, "Host", 4.0),
            template(keys::POOL_TYPE, "Pool type", 5.0),
            template(keys::TOTAL_SIZE, "Total", 6.0),
            template(keys::FREE_SIZE, "Free", 7.0),
            template(keys::USED_SIZE, "Used", 8.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: CSTOR_VOLUME,
        label: "cStor volumes",
        node_type: "CStor Volume",
        descriptor: KindDescriptor::custom(
            "openebs.io",
            "v1alpha1",
            "CStorVolume",
            "cstorvolumes",
            true,
        ),
        identity: Identity::Name,
        fields: &[
            Field {
                key: keys::VOLUME_NAME,
                extract: Extract::Label("openebs.io/persistent-volume"),
            },
            Field {
                key: keys::CONSISTENCY_FACTOR,
                extract: Extract::Path(&["spec", "consistencyFactor"]),
            },
            Field {
                key: keys::REPLICATION_FACTOR,
                extract: Extract::Path(&["spec", "replicationFactor"]),
            },
            Field { key: keys::IQN, extract: Extract::Path(&["spec", "iqn"]) },
            Field { key: keys::TARGET_PORTAL, extract: Extract::Path(&["spec", "targetPortal"]) },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "phase"]),
            table: CSTOR_STATUS,
        }),
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::VOLUME_NAME, "Volume", 5.0),
            number(keys::REPLICATION_FACTOR, "Replication factor", 6.0),
            number(keys::CONSISTENCY_FACTOR, "Consistency factor", 7.0),
            template(keys::IQN, "IQN", 8.0),
            template(keys::TARGET_PORTAL, "Target portal", 9.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: CSTOR_VOLUME_REPLICA,
        label: "cStor volume replicas",
        node_type: "CStor Volume Replica",
        descriptor: KindDescriptor::custom(
            "cstor.openebs.io",
            "v1",
            "CStorVolumeReplica",
            "cstorvolumereplicas",
            true,
        ),
        identity: Identity::Uid,
        fields: &[
            Field {
                key: keys::CSTOR_VOLUME_NAME,
                extract: Extract::Label("cstorvolume.openebs.io/name"),
            },
            Field { key: keys::CSTOR_POOL_UID, extract: Extract::Label("cstorpool.openebs.io/uid") },
            Field {
                key: keys::CSTOR_POOL_INSTANCE_UID,
                extract: Extract::Label("cstorpoolinstance.openebs.io/uid"),
            },
            Field { key: keys::TOTAL_SIZE, extract: Extract::Path(&["status", "capacity", "total"]) },
            Field { key: keys::USED_SIZE, extract: Extract::Path(&["status", "capacity", "used"]) },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "phase"]),
            table: CSTOR_STATUS,
        }),
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::CSTOR_VOLUME_NAME, "cStor volume", 5.0),
            template(keys::TOTAL_SIZE, "Total", 6.0),
            template(keys::USED_SIZE, "Used", 7.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: CSTOR_POOL_CLUSTER,
        label: "cStor pool clusters",
        node_type: "CStor Pool Cluster",
        descriptor: KindDescriptor::custom(
            "cstor.openebs.io",
            "v1",
            "CStorPoolCluster",
            "cstorpoolclusters",
            true,
        ),
        identity: Identity::Uid,
        fields: &[
            Field {
                key: keys::PROVISIONED_INSTANCES,
                extract: Extract::Path(&["status", "provisionedInstances"]),
            },
            Field {
                key: keys::DESIRED_INSTANCES,
                extract: Extract::Path(&["status", "desiredInstances"]),
            },
            Field {
                key: keys::HEALTHY_INSTANCES,
                extract: Extract::Path(&["status", "healthyInstances"]),
            },
        ],
        status: None,
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            number(keys::DESIRED_INSTANCES, "Desired instances", 4.0),
            number(keys::PROVISIONED_INSTANCES, "Provisioned instances", 5.0),
            number(keys::HEALTHY_INSTANCES, "Healthy instances", 6.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
    KindSpec {
        topology: CSTOR_POOL_INSTANCE,
        label: "cStor pool instances",
        node_type: "CStor Pool Instance",
        descriptor: KindDescriptor::custom(
            "cstor.openebs.io",
            "v1",
            "CStorPoolInstance",
            "cstorpoolinstances",
            true,
        ),
        identity: Identity::Uid,
        fields: &[
            Field { key: keys::TOTAL_SIZE, extract: Extract::Path(&["status", "capacity", "total"]) },
            Field { key: keys::FREE_SIZE, extract: Extract::Path(&["status", "capacity", "free"]) },
            Field { key: keys::USED_SIZE, extract: Extract::Path(&["status", "capacity", "used"]) },
            Field {
                key: keys::LOGICAL_USED,
                extract: Extract::Path(&["status", "capacity", "zfs", "logicalUsed"]),
            },
            Field { key: keys::READ_ONLY, extract: Extract::Path(&["status", "readOnly"]) },
            Field {
                key: keys::PROVISIONED_REPLICAS,
                extract: Extract::Path(&["status", "provisionedReplicas"]),
            },
            Field {
                key: keys::HEALTHY_REPLICAS,
                extract: Extract::Path(&["status", "healthyReplicas"]),
            },
            Field {
                key: keys::BLOCK_DEVICE_LIST,
                extract: Extract::Custom(instance_block_devices),
            },
            Field {
                key: keys::CSTOR_POOL_CLUSTER,
                extract: Extract::Label("openebs.io/cstor-pool-cluster"),
            },
            Field {
                key: keys::HOST_NAME,
                extract: Extract::FirstOf(&[HOSTNAME_LABEL, Extract::Path(&["spec", "hostName"])]),
            },
        ],
        status: Some(StatusRule {
            key: keys::STATUS,
            extract: Extract::Path(&["status", "phase"]),
            table: CSTOR_STATUS,
        }),
        node_controls: DESCRIBE_RULE,
        templates: &[
            NAME_TEMPLATE,
            NAMESPACE_TEMPLATE,
            CREATED_TEMPLATE,
            STATUS_TEMPLATE,
            template(keys::HOST_NAME, "Host", 5.0),
            template(keys::TOTAL_SIZE, "Total", 6.0),
            template(keys::FREE_SIZE, "Free", 7.0),
            template(keys::USED_SIZE, "Used", 8.0),
            template(keys::READ_ONLY, "Read only", 9.0),
            number(keys::HEALTHY_REPLICAS, "Healthy replicas", 10.0),
        ],
        controls: DESCRIBE_ONLY,
        notify: false,
        host_key: None,
    },
];
