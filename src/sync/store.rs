// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory mirror of one resource kind.

use kube::api::DynamicObject;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::events::{ResourceEvent, Subscribers};
use crate::error::{SyncError, SyncResult};
use crate::kubernetes::WatchEvent;

/// Lifecycle of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Waiting for the first complete list
    Pending,
    Synced,
    /// The server does not serve this kind; nothing will ever be listed
    Unsupported,
}

#[derive(Debug, Clone)]
pub struct StoreEntry {
    pub object: DynamicObject,
    /// `metadata.resourceVersion` when last seen
    pub revision: Option<String>,
}

impl StoreEntry {
    fn new(object: DynamicObject) -> Self {
        let revision = object.metadata.resource_version.clone();
        Self { object, revision }
    }
}

/// `namespace/name`, or `name` for cluster-scoped objects
pub fn store_key(obj: &DynamicObject) -> Option<String> {
    let name = obj.metadata.name.as_deref().filter(|n| !n.is_empty())?;
    Some(match obj.metadata.namespace.as_deref().filter(|n| !n.is_empty()) {
        Some(ns) => format!("{ns}/{name}"),
        None => name.to_string(),
    })
}

/// Entries of one kind, written by its mirror task and read by `synchronize`.
///
/// All mutations are idempotent: re-adding overwrites, removing a missing key
/// does nothing.
#[derive(Debug)]
pub struct ResourceStore {
    topology: &'static str,
    entries: RwLock<HashMap<String, StoreEntry>>,
    state: watch::Sender<StoreState>,
    /// Present only for kinds that offer notifications
    subscribers: Option<Subscribers>,
}

impl ResourceStore {
    pub fn new(topology: &'static str, notify: bool) -> Self {
        let (state, _) = watch::channel(StoreState::Pending);
        Self {
            topology,
            entries: RwLock::new(HashMap::new()),
            state,
            subscribers: notify.then(Subscribers::default),
        }
    }

    pub fn topology(&self) -> &'static str {
        self.topology
    }

    fn notify(&self, event: ResourceEvent) {
        if let Some(subs) = &self.subscribers {
            subs.notify(&event);
        }
    }

    /// Insert or overwrite an object
    pub fn upsert(&self, object: DynamicObject) {
        let Some(key) = store_key(&object) else {
            warn!(kind = %self.topology, "Ignoring object without a name");
            return;
        };
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, StoreEntry::new(object.clone()));
        self.notify(ResourceEvent::Added(object));
    }

    /// Remove an object by key; a missing key is a no-op
    pub fn remove(&self, object: &DynamicObject) -> Option<DynamicObject> {
        let key = store_key(object)?;
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let removed = entries.remove(&key)?.object;
        self.notify(ResourceEvent::Deleted(removed.clone()));
        Some(removed)
    }

    /// Atomically swap in a complete listing.
    ///
    /// Subscribers see an add for every new or changed entry and a delete for
    /// every entry that disappeared.
    pub fn replace(&self, objects: Vec<DynamicObject>) {
        let fresh: HashMap<String, StoreEntry> = objects
            .into_iter()
            .filter_map(|obj| store_key(&obj).map(|k| (k, StoreEntry::new(obj))))
            .collect();

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let old = std::mem::replace(&mut *entries, fresh);

        if self.subscribers.is_some() {
            let mut deleted: Vec<_> = old
                .iter()
                .filter(|(k, _)| !entries.contains_key(*k))
                .collect();
            deleted.sort_by(|a, b| a.0.cmp(b.0));
            for (_, entry) in deleted {
                self.notify(ResourceEvent::Deleted(entry.object.clone()));
            }

            let mut added: Vec<_> = entries
                .iter()
                .filter(|(k, entry)| {
                    old.get(*k)
                        .is_none_or(|prev| prev.revision.is_none() || prev.revision != entry.revision)
                })
                .collect();
            added.sort_by(|a, b| a.0.cmp(b.0));
            for (_, entry) in added {
                self.notify(ResourceEvent::Added(entry.object.clone()));
            }
        }
        debug!(kind = %self.topology, before = old.len(), after = entries.len(), "Replaced store");
    }

    /// Apply one watch event, returning the revision it carries
    pub fn apply(&self, event: WatchEvent) -> Option<String> {
        match event {
            WatchEvent::Added(obj) | WatchEvent::Modified(obj) => {
                let revision = obj.metadata.resource_version.clone();
                self.upsert(obj);
                revision
            }
            WatchEvent::Deleted(obj) => {
                let revision = obj.metadata.resource_version.clone();
                self.remove(&obj);
                revision
            }
            WatchEvent::Bookmark(revision) => Some(revision),
        }
    }

    /// Point-in-time copy of every object, ordered by key
    pub fn snapshot(&self) -> Vec<DynamicObject> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let ordered: BTreeMap<&String, &StoreEntry> = entries.iter().collect();
        ordered.into_values().map(|e| e.object.clone()).collect()
    }

    pub fn get(&self, key: &str) -> Option<StoreEntry> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn state(&self) -> StoreState {
        *self.state.borrow()
    }

    pub fn mark_synced(&self) {
        self.state.send_replace(StoreState::Synced);
    }

    pub fn mark_unsupported(&self) {
        self.state.send_replace(StoreState::Unsupported);
    }

    /// Wait until the store leaves `Pending`
    pub async fn wait_settled(&self) -> StoreState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|s| *s != StoreState::Pending).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        }
    }

    pub fn state_receiver(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// New subscriber channel; only for kinds that offer notifications
    pub fn subscribe(&self) -> SyncResult<UnboundedReceiver<ResourceEvent>> {
        self.subscribers
            .as_ref()
            .map(Subscribers::subscribe)
            .ok_or_else(|| SyncError::NotSubscribable(self.topology.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pod(name: &str, rv: &str) -> DynamicObject {
        serde_json::from_value(json!({
            "apiVersion": "v1", "kind": "Pod",
            "metadata": {"name": name, "namespace": "ns", "resourceVersion": rv}
        }))
        .unwrap()
    }

    fn names(store: &ResourceStore) -> Vec<String> {
        store
            .snapshot()
            .into_iter()
            .filter_map(|o| o.metadata.name)
            .collect()
    }

    #[test]
    fn test_store_key() {
        assert_eq!(store_key(&pod("a", "1")).as_deref(), Some("ns/a"));
        let ns: DynamicObject = serde_json::from_value(json!({
            "apiVersion": "v1", "kind": "Namespace", "metadata": {"name": "kube-system"}
        }))
        .unwrap();
        assert_eq!(store_key(&ns).as_deref(), Some("kube-system"));
    }

    #[test]
    fn test_mutations_are_idempotent() {
        let store = ResourceStore::new("pod", false);
        store.upsert(pod("a", "1"));
        store.upsert(pod("a", "1"));
        store.upsert(pod("b", "2"));
        assert_eq!(store.len(), 2);

        assert!(store.remove(&pod("a", "3")).is_some());
        assert!(store.remove(&pod("a", "3")).is_none());
        assert!(store.remove(&pod("never", "1")).is_none());
        assert_eq!(names(&store), vec!["b"]);
    }

    #[test]
    fn test_apply_returns_revisions() {
        let store = ResourceStore::new("pod", false);
        assert_eq!(store.apply(WatchEvent::Added(pod("a", "5"))).as_deref(), Some("5"));
        assert_eq!(store.apply(WatchEvent::Modified(pod("a", "6"))).as_deref(), Some("6"));
        assert_eq!(store.get("ns/a").and_then(|e| e.revision).as_deref(), Some("6"));
        assert_eq!(store.apply(WatchEvent::Bookmark("9".into())).as_deref(), Some("9"));
        store.apply(WatchEvent::Deleted(pod("a", "10")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_is_ordered() {
        let store = ResourceStore::new("pod", false);
        for name in ["c", "a", "b"] {
            store.upsert(pod(name, "1"));
        }
        assert_eq!(names(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_replace_emits_diff() {
        let store = ResourceStore::new("pod", true);
        store.upsert(pod("keep", "1"));
        store.upsert(pod("gone", "1"));
        store.upsert(pod("changed", "1"));
        let mut rx = store.subscribe().unwrap();

        store.replace(vec![pod("keep", "1"), pod("changed", "2"), pod("new", "1")]);

        let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|e| (e.is_deleted(), e.object().metadata.name.clone().unwrap_or_default()))
            .collect();
        assert_eq!(
            events,
            vec![
                (true, "gone".to_string()),
                (false, "changed".to_string()),
                (false, "new".to_string()),
            ]
        );
        assert_eq!(names(&store), vec!["changed", "keep", "new"]);
    }

    #[test]
    fn test_subscribe_requires_notifying_kind() {
        let store = ResourceStore::new("service", false);
        assert!(matches!(store.subscribe(), Err(SyncError::NotSubscribable(_))));
    }

    #[tokio::test]
    async fn test_wait_settled() {
        let store = std::sync::Arc::new(ResourceStore::new("disk", false));
        assert_eq!(store.state(), StoreState::Pending);

        let waiter = {
            let store = store.clone();
            tokio::spawn(async move { store.wait_settled().await })
        };
        store.mark_unsupported();
        assert_eq!(waiter.await.unwrap(), StoreState::Unsupported);
    }
}
