// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! The standard relationship rules for workload and storage kinds.

use super::{JoinRule, KeyPair, Matcher, Transform};
use crate::topology::keys;
use crate::topology::kinds::*;

/// Ordered list of join rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<JoinRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<JoinRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }

    pub fn rules(&self) -> &[JoinRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

const fn rule(
    name: &'static str,
    parent: &'static str,
    child: &'static str,
    matcher: Matcher,
) -> JoinRule {
    JoinRule {
        name,
        parent,
        child,
        matcher,
        first_only: false,
    }
}

const fn first(mut rule: JoinRule) -> JoinRule {
    rule.first_only = true;
    rule
}

const SAME_NAMESPACE: &[KeyPair] = &[KeyPair::same(keys::NAMESPACE)];

const STANDARD_RULES: &[JoinRule] = &[
    // Workloads
    rule("service_pods", SERVICE, POD, Matcher::Selector),
    rule("deployment_pods", DEPLOYMENT, POD, Matcher::Selector),
    rule("daemonset_pods", DAEMON_SET, POD, Matcher::Selector),
    rule("statefulset_pods", STATEFUL_SET, POD, Matcher::Selector),
    rule("job_pods", JOB, POD, Matcher::Selector),
    rule(
        "cronjob_jobs",
        CRON_JOB,
        JOB,
        Matcher::Member {
            list: keys::ACTIVE_JOBS,
            child: keys::NAME,
            child_is_list: false,
            also: SAME_NAMESPACE,
        },
    ),
    // Volumes
    rule(
        "pod_claims",
        POD,
        PERSISTENT_VOLUME_CLAIM,
        Matcher::Member {
            list: keys::VOLUME_CLAIMS,
            child: keys::NAME,
            child_is_list: false,
            also: SAME_NAMESPACE,
        },
    ),
    rule(
        "claim_volume",
        PERSISTENT_VOLUME_CLAIM,
        PERSISTENT_VOLUME,
        Matcher::Equal(&[KeyPair::new(keys::VOLUME_NAME, keys::NAME)]),
    ),
    rule(
        "storage_class_claims",
        STORAGE_CLASS,
        PERSISTENT_VOLUME_CLAIM,
        Matcher::Equal(&[KeyPair::new(keys::NAME, keys::STORAGE_CLASS_NAME)]),
    ),
    rule(
        "storage_class_pool_claim",
        STORAGE_CLASS,
        STORAGE_POOL_CLAIM,
        Matcher::Equal(&[KeyPair::new(keys::STORAGE_POOL_CLAIM, keys::NAME)]),
    ),
    rule(
        "volume_cstor_volume",
        PERSISTENT_VOLUME,
        CSTOR_VOLUME,
        Matcher::Equal(&[KeyPair::new(keys::NAME, keys::VOLUME_NAME)]),
    ),
    first(rule(
        "volume_block_device_claim",
        PERSISTENT_VOLUME,
        BLOCK_DEVICE_CLAIM,
        Matcher::Equal(&[KeyPair::new(keys::BLOCK_DEVICE_CLAIM_NAME, keys::NAME)]),
    )),
    // Snapshots
    rule(
        "volume_snapshots",
        PERSISTENT_VOLUME,
        VOLUME_SNAPSHOT,
        Matcher::Equal(&[KeyPair::same(keys::VOLUME_CLAIM)]),
    ),
    rule(
        "snapshot_restored_claims",
        VOLUME_SNAPSHOT,
        PERSISTENT_VOLUME_CLAIM,
        Matcher::Equal(&[
            KeyPair::new(keys::NAME, keys::VOLUME_SNAPSHOT_NAME),
            KeyPair::same(keys::NAMESPACE),
        ]),
    ),
    rule(
        "snapshot_content",
        VOLUME_SNAPSHOT,
        VOLUME_SNAPSHOT_CONTENT,
        Matcher::Equal(&[
            KeyPair::new(keys::NAME, keys::VOLUME_SNAPSHOT_NAME),
            KeyPair::new(keys::NAMESPACE, keys::VOLUME_SNAPSHOT_NAMESPACE),
        ]),
    ),
    rule(
        "snapshot_class_snapshots",
        VOLUME_SNAPSHOT_CLASS,
        VOLUME_SNAPSHOT,
        Matcher::Equal(&[KeyPair::new(keys::NAME, keys::SNAPSHOT_CLASS)]),
    ),
    // cStor
    rule(
        "cstor_volume_replicas",
        CSTOR_VOLUME,
        CSTOR_VOLUME_REPLICA,
        Matcher::Equal(&[KeyPair::new(keys::NAME, keys::CSTOR_VOLUME_NAME)]),
    ),
    first(rule(
        "replica_pool",
        CSTOR_VOLUME_REPLICA,
        CSTOR_POOL,
        Matcher::Equal(&[KeyPair::new(keys::CSTOR_POOL_UID, keys::UID)]),
    )),
    first(rule(
        "replica_pool_instance",
        CSTOR_VOLUME_REPLICA,
        CSTOR_POOL_INSTANCE,
        Matcher::Equal(&[KeyPair::new(keys::CSTOR_POOL_INSTANCE_UID, keys::UID)]),
    )),
    rule(
        "pool_claim_pools",
        STORAGE_POOL_CLAIM,
        CSTOR_POOL,
        Matcher::Equal(&[KeyPair::new(keys::NAME, keys::STORAGE_POOL_CLAIM)]),
    ),
    rule(
        "pool_cluster_instances",
        CSTOR_POOL_CLUSTER,
        CSTOR_POOL_INSTANCE,
        Matcher::Equal(&[
            KeyPair::new(keys::NAME, keys::CSTOR_POOL_CLUSTER),
            KeyPair::same(keys::NAMESPACE),
        ]),
    ),
    first(rule(
        "pool_instance_block_devices",
        CSTOR_POOL_INSTANCE,
        BLOCK_DEVICE,
        Matcher::Member {
            list: keys::BLOCK_DEVICE_LIST,
            child: keys::NAME,
            child_is_list: false,
            also: SAME_NAMESPACE,
        },
    )),
    rule(
        "pool_block_devices",
        CSTOR_POOL,
        BLOCK_DEVICE,
        Matcher::Member {
            list: keys::BLOCK_DEVICE_LIST,
            child: keys::NAME,
            child_is_list: false,
            also: &[],
        },
    ),
    rule(
        "pool_disks",
        CSTOR_POOL,
        DISK,
        Matcher::Member {
            list: keys::DISK_LIST,
            child: keys::DEVICE_LIST,
            child_is_list: true,
            also: &[KeyPair::same(keys::HOST_NAME)],
        },
    ),
    // Node disk manager
    first(rule(
        "claim_block_device",
        BLOCK_DEVICE_CLAIM,
        BLOCK_DEVICE,
        Matcher::Equal(&[
            KeyPair::new(keys::BLOCK_DEVICE_NAME, keys::NAME),
            KeyPair::same(keys::NAMESPACE),
        ]),
    )),
    rule(
        "block_device_disk",
        BLOCK_DEVICE,
        DISK,
        Matcher::Equal(&[
            KeyPair::same(keys::PATH),
            KeyPair::same(keys::HOST_NAME),
            KeyPair::transformed(keys::NAME, Transform::Segment { delim: '-', index: 1 }),
        ]),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::resolve;
    use crate::topology::{Node, Topology, make_node_id};
    use std::collections::{BTreeMap, BTreeSet};

    fn node(topology: &str, id: &str, attrs: &[(&str, &str)]) -> Node {
        let mut n = Node::new(make_node_id(id, topology), topology);
        for (k, v) in attrs {
            n.latest.insert(k.to_string(), v.to_string());
        }
        n
    }

    fn rule_named(name: &str) -> JoinRule {
        RuleSet::standard()
            .rules()
            .iter()
            .find(|r| r.name == name)
            .copied()
            .unwrap()
    }

    fn topologies(nodes: Vec<Node>) -> BTreeMap<String, Topology> {
        let mut map: BTreeMap<String, Topology> = BTreeMap::new();
        for n in nodes {
            map.entry(n.topology.clone())
                .or_insert_with(|| Topology::new(n.topology.clone(), ""))
                .add_node(n);
        }
        map
    }

    #[test]
    fn test_rule_names_are_unique_and_reference_catalog_kinds() {
        let rules = RuleSet::standard();
        let catalog = Catalog::standard();
        let names: BTreeSet<_> = rules.rules().iter().map(|r| r.name).collect();
        assert_eq!(names.len(), rules.len());
        for r in rules.rules() {
            assert!(catalog.get(r.parent).is_some(), "{} parent", r.name);
            assert!(catalog.get(r.child).is_some(), "{} child", r.name);
        }
    }

    #[test]
    fn test_block_device_to_disk_by_path_host_and_name_suffix() {
        let topos = topologies(vec![
            node(
                BLOCK_DEVICE,
                "bd",
                &[
                    (keys::NAME, "blockdevice-0f1e"),
                    (keys::PATH, "/dev/sdb"),
                    (keys::HOST_NAME, "n1"),
                ],
            ),
            node(
                DISK,
                "d1",
                &[
                    (keys::NAME, "disk-0f1e"),
                    (keys::PATH, "/dev/sdb"),
                    (keys::HOST_NAME, "n1"),
                ],
            ),
            node(
                DISK,
                "d2",
                &[
                    (keys::NAME, "disk-0f1e"),
                    (keys::PATH, "/dev/sdc"),
                    (keys::HOST_NAME, "n1"),
                ],
            ),
        ]);
        let res = resolve(&rule_named("block_device_disk"), &topos);
        let children: Vec<_> = res.edges.iter().map(|e| e.child_id.as_str()).collect();
        assert_eq!(children, vec!["d1;<disk>"]);
    }

    #[test]
    fn test_pool_disks_match_any_device_link_on_same_host() {
        let topos = topologies(vec![
            node(
                CSTOR_POOL,
                "pool",
                &[
                    (keys::DISK_LIST, "/dev/disk/by-id/a\u{1e}/dev/disk/by-id/c"),
                    (keys::HOST_NAME, "n1"),
                ],
            ),
            node(
                DISK,
                "a",
                &[
                    (keys::DEVICE_LIST, "/dev/disk/by-id/a\u{1e}/dev/disk/by-path/a"),
                    (keys::HOST_NAME, "n1"),
                ],
            ),
            node(
                DISK,
                "b",
                &[(keys::DEVICE_LIST, "/dev/disk/by-id/b"), (keys::HOST_NAME, "n1")],
            ),
            node(
                DISK,
                "c",
                &[(keys::DEVICE_LIST, "/dev/disk/by-id/c"), (keys::HOST_NAME, "n2")],
            ),
        ]);
        let res = resolve(&rule_named("pool_disks"), &topos);
        let children: Vec<_> = res.edges.iter().map(|e| e.child_id.as_str()).collect();
        assert_eq!(children, vec!["a;<disk>"]);
    }

    #[test]
    fn test_pool_block_devices_records_every_named_device() {
        let topos = topologies(vec![
            node(CSTOR_POOL, "pool", &[(keys::BLOCK_DEVICE_LIST, "bd-1")]),
            node(
                BLOCK_DEVICE,
                "a",
                &[(keys::NAME, "bd-1"), (keys::NAMESPACE, "openebs")],
            ),
            node(
                BLOCK_DEVICE,
                "b",
                &[(keys::NAME, "bd-1"), (keys::NAMESPACE, "other")],
            ),
            node(BLOCK_DEVICE, "c", &[(keys::NAME, "bd-10")]),
        ]);
        let res = resolve(&rule_named("pool_block_devices"), &topos);
        let children: Vec<_> = res.edges.iter().map(|e| e.child_id.as_str()).collect();
        assert_eq!(children, vec!["a;<block_device>", "b;<block_device>"]);
    }

    #[test]
    fn test_snapshot_content_uses_reference_namespace() {
        let topos = topologies(vec![
            node(
                VOLUME_SNAPSHOT,
                "s",
                &[(keys::NAME, "snap"), (keys::NAMESPACE, "apps")],
            ),
            node(
                VOLUME_SNAPSHOT_CONTENT,
                "c1",
                &[
                    (keys::VOLUME_SNAPSHOT_NAME, "snap"),
                    (keys::VOLUME_SNAPSHOT_NAMESPACE, "apps"),
                ],
            ),
            node(
                VOLUME_SNAPSHOT_CONTENT,
                "c2",
                &[
                    (keys::VOLUME_SNAPSHOT_NAME, "snap"),
                    (keys::VOLUME_SNAPSHOT_NAMESPACE, "other"),
                ],
            ),
        ]);
        let res = resolve(&rule_named("snapshot_content"), &topos);
        assert_eq!(res.edges.len(), 1);
        assert_eq!(
            res.edges.iter().next().map(|e| e.child_id.as_str()),
            Some("c1;<volume_snapshot_content>")
        );
    }
}
