// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Attribute keys written into `Node::latest`.

// Common metadata
pub const NAME: &str = "name";
pub const NAMESPACE: &str = "namespace";
pub const UID: &str = "uid";
pub const CREATED: &str = "created";
pub const NODE_TYPE: &str = "node_type";
pub const API_VERSION: &str = "api_version";
pub const EPOCH: &str = "epoch";
pub const STATUS: &str = "status";
pub const STATE: &str = "state";
pub const SELECTOR: &str = "selector";

// Workloads
pub const HOST_NODE: &str = "host_node";
pub const IP: &str = "ip";
pub const RESTART_COUNT: &str = "restart_count";
pub const VOLUME_CLAIMS: &str = "volume_claims";
pub const CLUSTER_IP: &str = "cluster_ip";
pub const SERVICE_TYPE: &str = "service_type";
pub const PORTS: &str = "ports";
pub const REPLICAS: &str = "replicas";
pub const DESIRED_REPLICAS: &str = "desired_replicas";
pub const AVAILABLE_REPLICAS: &str = "available_replicas";
pub const STRATEGY: &str = "strategy";
pub const DESIRED_SCHEDULED: &str = "desired_scheduled";
pub const CURRENT_SCHEDULED: &str = "current_scheduled";
pub const SCHEDULE: &str = "schedule";
pub const SUSPENDED: &str = "suspended";
pub const ACTIVE_JOBS: &str = "active_jobs";
pub const ACTIVE_JOB_COUNT: &str = "active_job_count";
pub const LAST_SCHEDULED: &str = "last_scheduled";
pub const COMPLETIONS: &str = "completions";
pub const SUCCEEDED: &str = "succeeded";
pub const FAILED: &str = "failed";

// Volumes and snapshots
pub const VOLUME_NAME: &str = "volume_name";
pub const VOLUME_CLAIM: &str = "volume_claim";
pub const STORAGE_CLASS_NAME: &str = "storage_class_name";
pub const CAPACITY: &str = "capacity";
pub const ACCESS_MODES: &str = "access_modes";
pub const RECLAIM_POLICY: &str = "reclaim_policy";
pub const PROVISIONER: &str = "provisioner";
pub const VOLUME_BINDING_MODE: &str = "volume_binding_mode";
pub const CAS_TYPE: &str = "cas_type";
pub const BLOCK_DEVICE_CLAIM_NAME: &str = "block_device_claim_name";
pub const VOLUME_SNAPSHOT_NAME: &str = "volume_snapshot_name";
pub const VOLUME_SNAPSHOT_NAMESPACE: &str = "volume_snapshot_namespace";
pub const SNAPSHOT_CLASS: &str = "snapshot_class";
pub const SNAPSHOT_CONTENT: &str = "snapshot_content";
pub const READY_TO_USE: &str = "ready_to_use";
pub const RESTORE_SIZE: &str = "restore_size";
pub const DRIVER: &str = "driver";
pub const DELETION_POLICY: &str = "deletion_policy";
pub const SNAPSHOT_HANDLE: &str = "snapshot_handle";

// Node disk manager
pub const HOST_NAME: &str = "host_name";
pub const PATH: &str = "path";
pub const STORAGE: &str = "storage";
pub const LOGICAL_SECTOR_SIZE: &str = "logical_sector_size";
pub const PHYSICAL_SECTOR_SIZE: &str = "physical_sector_size";
pub const FIRMWARE_REVISION: &str = "firmware_revision";
pub const MODEL: &str = "model";
pub const SERIAL: &str = "serial";
pub const VENDOR: &str = "vendor";
pub const ROTATION_RATE: &str = "rotation_rate";
pub const DEVICE_LIST: &str = "device_list";
pub const CURRENT_TEMPERATURE: &str = "current_temperature";
pub const HIGHEST_TEMPERATURE: &str = "highest_temperature";
pub const LOWEST_TEMPERATURE: &str = "lowest_temperature";
pub const TOTAL_BYTES_READ: &str = "total_bytes_read";
pub const TOTAL_BYTES_WRITTEN: &str = "total_bytes_written";
pub const DEVICE_UTILIZATION_RATE: &str = "device_utilization_rate";
pub const PERCENT_ENDURANCE_USED: &str = "percent_endurance_used";
pub const CLAIM_STATE: &str = "claim_state";
pub const BLOCK_DEVICE_NAME: &str = "block_device_name";

// cStor
pub const POOL_TYPE: &str = "pool_type";
pub const MAX_POOLS: &str = "max_pools";
pub const STORAGE_POOL_CLAIM: &str = "storage_pool_claim";
pub const CSTOR_POOL_CLUSTER: &str = "cstor_pool_cluster";
pub const BLOCK_DEVICE_LIST: &str = "block_device_list";
pub const DISK_LIST: &str = "disk_list";
pub const CSTOR_VOLUME_NAME: &str = "cstor_volume_name";
pub const CSTOR_POOL_UID: &str = "cstor_pool_uid";
pub const CSTOR_POOL_INSTANCE_UID: &str = "cstor_pool_instance_uid";
pub const CONSISTENCY_FACTOR: &str = "consistency_factor";
pub const REPLICATION_FACTOR: &str = "replication_factor";
pub const IQN: &str = "iqn";
pub const TARGET_PORTAL: &str = "target_portal";
pub const TOTAL_SIZE: &str = "total_size";
pub const FREE_SIZE: &str = "free_size";
pub const USED_SIZE: &str = "used_size";
pub const LOGICAL_USED: &str = "logical_used";
pub const READ_ONLY: &str = "read_only";
pub const PROVISIONED_REPLICAS: &str = "provisioned_replicas";
pub const HEALTHY_REPLICAS: &str = "healthy_replicas";
pub const PROVISIONED_INSTANCES: &str = "provisioned_instances";
pub const DESIRED_INSTANCES: &str = "desired_instances";
pub const HEALTHY_INSTANCES: &str = "healthy_instances";
