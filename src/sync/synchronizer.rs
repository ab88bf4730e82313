// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Orchestrates one mirror task per kind and assembles reports from the
//! resulting stores.

use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::backoff::{Backoff, sleep_or_shutdown, until_shutdown};
use super::events::ResourceEvent;
use super::store::{ResourceStore, StoreState};
use crate::error::{SyncError, SyncResult};
use crate::join::{self, RuleSet};
use crate::kubernetes::ResourceApi;
use crate::progress::{ProgressHandle, create_progress_handle};
use crate::report::{Report, ReportAssembler};
use crate::topology::builder::TopologyBuilder;
use crate::topology::kinds::{Catalog, KindSpec};
use crate::topology::mapper::MapContext;
use crate::topology::{Node, keys};

/// Delay before the first retry
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(100);
/// Cap on retry delays
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(300);

/// An empty watch closing sooner than this is treated as a failure
const MIN_WATCH_DURATION: Duration = Duration::from_secs(1);

/// Runtime knobs of the synchronizer
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Only report pods scheduled on this node
    pub node_name: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            node_name: None,
        }
    }
}

/// Owns the per-kind stores and their background tasks
pub struct Synchronizer {
    api: Arc<dyn ResourceApi>,
    catalog: Catalog,
    rules: RuleSet,
    config: SyncConfig,
    context: MapContext,
    builder: TopologyBuilder,
    stores: Vec<(KindSpec, Arc<ResourceStore>)>,
    cycle: AtomicU64,
    shutdown: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    progress: ProgressHandle,
}

impl Synchronizer {
    /// Validate the configuration and check that the server is reachable.
    ///
    /// No background work starts until [`Synchronizer::start`].
    pub async fn new(
        api: Arc<dyn ResourceApi>,
        catalog: Catalog,
        rules: RuleSet,
        config: SyncConfig,
    ) -> SyncResult<Self> {
        if catalog.is_empty() {
            return Err(SyncError::FatalConfig("no resource kinds configured".into()));
        }
        if config.max_backoff < config.initial_backoff {
            return Err(SyncError::FatalConfig(format!(
                "max backoff {:?} is below initial backoff {:?}",
                config.max_backoff, config.initial_backoff
            )));
        }
        api.check_connectivity().await.map_err(|e| match e {
            SyncError::FatalConfig(_) => e,
            other => SyncError::FatalConfig(other.to_string()),
        })?;

        let stores = catalog
            .kinds()
            .iter()
            .map(|spec| {
                let store = Arc::new(ResourceStore::new(spec.topology, spec.notify));
                (spec.clone(), store)
            })
            .collect();
        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            api,
            builder: TopologyBuilder::new(config.node_name.clone()),
            context: MapContext {
                epoch: uuid::Uuid::new_v4().to_string(),
            },
            catalog,
            rules,
            config,
            stores,
            cycle: AtomicU64::new(0),
            shutdown,
            tasks: Mutex::new(Vec::new()),
            progress: create_progress_handle(),
        })
    }

    /// Spawn one mirror task per kind. Calling it again does nothing.
    pub fn start(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        if !tasks.is_empty() {
            return;
        }
        info!(kinds = self.stores.len(), "Starting resource mirrors");
        self.progress.start(self.stores.len());

        for (spec, store) in &self.stores {
            let task = MirrorTask {
                api: self.api.clone(),
                spec: spec.clone(),
                store: store.clone(),
                progress: self.progress.clone(),
                shutdown: self.shutdown.subscribe(),
                backoff: Backoff::new(self.config.initial_backoff, self.config.max_backoff),
            };
            tasks.push(tokio::spawn(task.run()));
        }
    }

    /// Build a fresh report from the current store contents
    pub fn synchronize(&self) -> Arc<Report> {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        let mut assembler = ReportAssembler::new(cycle);

        for (spec, store) in &self.stores {
            if store.state() == StoreState::Unsupported {
                continue;
            }
            let snapshot = store.snapshot();
            assembler.add_topology(self.builder.build(spec, &snapshot, &self.context));
        }

        let resolutions = join::resolve_all(&self.rules, assembler.topologies());
        for resolution in &resolutions {
            for error in &resolution.errors {
                warn!(rule = %resolution.rule, error = %error, "Partial resolution");
            }
        }
        assembler.apply(&resolutions);

        let report = assembler.finish();
        debug!(
            cycle,
            nodes = report.node_count(),
            edges = report.edge_count(),
            "Assembled report"
        );
        Arc::new(report)
    }

    /// Add/delete notifications for a kind that offers them
    pub fn subscribe(&self, topology: &str) -> SyncResult<UnboundedReceiver<ResourceEvent>> {
        self.store(topology)
            .ok_or_else(|| SyncError::NotSubscribable(topology.to_string()))?
            .subscribe()
    }

    /// Single-node report for one notification.
    ///
    /// Deleted objects are reported with `state = deleted`. Returns `None`
    /// when the object cannot be mapped or is filtered out.
    pub fn shortcut_report(&self, topology: &str, event: &ResourceEvent) -> Option<Arc<Report>> {
        let spec = self.catalog.get(topology)?;
        let mut built = self
            .builder
            .build(spec, std::slice::from_ref(event.object()), &self.context);
        if built.is_empty() {
            return None;
        }
        if event.is_deleted() {
            built.nodes = std::mem::take(&mut built.nodes)
                .into_values()
                .map(tombstone)
                .map(|node| (node.id.clone(), node))
                .collect();
        }

        let mut assembler = ReportAssembler::new(self.cycle.load(Ordering::SeqCst)).shortcut();
        assembler.add_topology(built);
        Some(Arc::new(assembler.finish()))
    }

    /// Wait until every store has listed once or was found unsupported
    pub async fn wait_for_sync(&self) {
        for (_, store) in &self.stores {
            store.wait_settled().await;
        }
    }

    pub fn store(&self, topology: &str) -> Option<&Arc<ResourceStore>> {
        self.stores
            .iter()
            .find(|(spec, _)| spec.topology == topology)
            .map(|(_, store)| store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Identifier stamped into every node this instance produces
    pub fn epoch(&self) -> &str {
        &self.context.epoch
    }

    pub fn progress(&self) -> &ProgressHandle {
        &self.progress
    }

    /// Stop every mirror task and wait for them to exit
    pub async fn shutdown(&self) {
        self.shutdown.send_replace(true);
        let tasks = std::mem::take(&mut *self.tasks.lock().unwrap_or_else(|e| e.into_inner()));
        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "Mirror task did not exit cleanly");
            }
        }
        info!("Resource mirrors stopped");
    }
}

fn tombstone(node: Node) -> Node {
    let mut gone = Node::new(node.id.clone(), node.topology.clone()).with_latest(keys::STATE, "deleted");
    for key in [keys::NAME, keys::NAMESPACE, keys::UID] {
        if let Some(value) = node.get(key) {
            gone = gone.with_latest(key, value);
        }
    }
    gone
}

/// How a watch ended
enum WatchEnd {
    /// Server closed the stream; resume from the last revision.
    /// `premature` when it closed quickly without delivering anything.
    Closed { premature: bool },
    /// Revision too old; relist immediately
    Expired,
    Failed(SyncError),
    Shutdown,
}

impl From<SyncError> for WatchEnd {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Expired { .. } => WatchEnd::Expired,
            other => WatchEnd::Failed(other),
        }
    }
}

/// State of one kind's background loop
struct MirrorTask {
    api: Arc<dyn ResourceApi>,
    spec: KindSpec,
    store: Arc<ResourceStore>,
    progress: ProgressHandle,
    shutdown: watch::Receiver<bool>,
    backoff: Backoff,
}

impl MirrorTask {
    async fn run(mut self) {
        let kind = self.spec.topology;
        if !self.probe().await {
            return;
        }

        'relist: loop {
            let Some(mut revision) = self.list().await else {
                break;
            };
            loop {
                match self.watch(&mut revision).await {
                    WatchEnd::Closed { premature: false } => {
                        debug!(kind = %kind, revision = %revision, "Watch closed, resuming");
                    }
                    WatchEnd::Closed { premature: true } => {
                        let e = SyncError::transient(kind, "watch closed without delivering events");
                        if !self.pause(&e, "watch").await {
                            break 'relist;
                        }
                    }
                    WatchEnd::Expired => {
                        info!(kind = %kind, "Watch revision expired, relisting");
                        self.progress.watch_restarted(kind, "expired");
                        continue 'relist;
                    }
                    WatchEnd::Failed(e) => {
                        self.progress.watch_restarted(kind, &e.to_string());
                        if !self.pause(&e, "watch").await {
                            break 'relist;
                        }
                        continue 'relist;
                    }
                    WatchEnd::Shutdown => break 'relist,
                }
            }
        }
        debug!(kind = %kind, "Mirror task exiting");
    }

    /// Back off after a failure. `false` means shutdown was requested.
    async fn pause(&mut self, error: &SyncError, stage: &str) -> bool {
        let delay = self.backoff.next_delay();
        warn!(
            kind = %self.spec.topology,
            stage,
            error = %error,
            delay_ms = delay.as_millis() as u64,
            "Retrying after failure"
        );
        sleep_or_shutdown(delay, &mut self.shutdown).await
    }

    /// One-time capability check. `false` means stop: unsupported or shutdown.
    async fn probe(&mut self) -> bool {
        let kind = self.spec.topology;
        loop {
            self.progress.probing(kind);
            let probed = until_shutdown(
                &mut self.shutdown,
                self.api.is_kind_supported(&self.spec.descriptor),
            )
            .await;
            match probed {
                None => return false,
                Some(Ok(true)) => {
                    self.backoff.reset();
                    return true;
                }
                Some(Ok(false)) => {
                    let reason = SyncError::UnsupportedKind {
                        kind: kind.to_string(),
                    };
                    info!(
                        kind = %kind,
                        api_version = %self.spec.descriptor.api_version(),
                        "{reason}, skipping"
                    );
                    self.store.mark_unsupported();
                    self.progress.unsupported(kind);
                    return false;
                }
                Some(Err(e)) => {
                    if !self.pause(&e, "probe").await {
                        return false;
                    }
                }
            }
        }
    }

    /// List until it succeeds, replacing the store. Returns the list revision.
    async fn list(&mut self) -> Option<String> {
        let kind = self.spec.topology;
        loop {
            let started = Instant::now();
            match until_shutdown(&mut self.shutdown, self.api.list(&self.spec.descriptor)).await? {
                Ok(listed) => {
                    let initial = self.store.state() == StoreState::Pending;
                    let items = listed.items.len();
                    self.store.replace(listed.items);
                    if initial {
                        self.store.mark_synced();
                    }
                    let elapsed_ms = started.elapsed().as_millis() as u64;
                    debug!(kind = %kind, items, elapsed_ms, "Listed");
                    self.progress.listed(kind, items, elapsed_ms, initial);
                    return Some(listed.revision);
                }
                Err(e) => {
                    if !self.pause(&e, "list").await {
                        return None;
                    }
                }
            }
        }
    }

    /// Apply watch events until the stream ends, tracking the last revision.
    ///
    /// The backoff is reset once a watch delivers something.
    async fn watch(&mut self, revision: &mut String) -> WatchEnd {
        let opened_at = Instant::now();
        let mut delivered = 0usize;
        let opened = until_shutdown(
            &mut self.shutdown,
            self.api.watch(&self.spec.descriptor, revision),
        )
        .await;
        let mut stream = match opened {
            None => return WatchEnd::Shutdown,
            Some(Ok(stream)) => stream,
            Some(Err(e)) => return e.into(),
        };

        loop {
            match until_shutdown(&mut self.shutdown, stream.next()).await {
                None => return WatchEnd::Shutdown,
                Some(None) => {
                    return WatchEnd::Closed {
                        premature: delivered == 0 && opened_at.elapsed() < MIN_WATCH_DURATION,
                    };
                }
                Some(Some(Ok(event))) => {
                    if delivered == 0 {
                        self.backoff.reset();
                    }
                    delivered += 1;
                    if let Some(rv) = self.store.apply(event) {
                        *revision = rv;
                    }
                }
                Some(Some(Err(e))) => return e.into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubernetes::{KindDescriptor, ListResult, WatchEvent, WatchStream};
    use crate::topology::kinds;
    use async_trait::async_trait;
    use futures::stream;
    use kube::api::DynamicObject;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Semaphore;

    type Script = Vec<SyncResult<WatchEvent>>;

    /// In-memory API serving the kinds present in `objects`.
    ///
    /// Each watch plays the next queued script and then closes; with no
    /// script left it stays open forever.
    #[derive(Default)]
    struct FakeResourceApi {
        objects: Mutex<HashMap<&'static str, Vec<DynamicObject>>>,
        unreachable: bool,
        probe_failures: AtomicUsize,
        probes: Mutex<HashMap<String, usize>>,
        lists: Mutex<HashMap<String, usize>>,
        scripts: Mutex<VecDeque<Script>>,
        /// Every watch closes immediately without events
        empty_watches: bool,
        watch_revisions: Mutex<Vec<String>>,
        /// When set, every list after the first waits for a permit
        relist_gate: Option<Arc<Semaphore>>,
    }

    impl FakeResourceApi {
        fn with(self, kind: &'static str, objects: Vec<DynamicObject>) -> Self {
            self.set_objects(kind, objects);
            self
        }

        fn set_objects(&self, kind: &'static str, objects: Vec<DynamicObject>) {
            self.objects.lock().unwrap().insert(kind, objects);
        }

        fn script(self, events: Script) -> Self {
            self.scripts.lock().unwrap().push_back(events);
            self
        }

        fn revisions(&self) -> Vec<String> {
            self.watch_revisions.lock().unwrap().clone()
        }

        fn count(map: &Mutex<HashMap<String, usize>>, kind: &str) -> usize {
            map.lock().unwrap().get(kind).copied().unwrap_or(0)
        }

        fn bump(map: &Mutex<HashMap<String, usize>>, kind: &str) {
            *map.lock().unwrap().entry(kind.to_string()).or_default() += 1;
        }
    }

    #[async_trait]
    impl ResourceApi for FakeResourceApi {
        async fn check_connectivity(&self) -> SyncResult<()> {
            if self.unreachable {
                return Err(SyncError::transient("cluster", "connection refused"));
            }
            Ok(())
        }

        async fn is_kind_supported(&self, kind: &KindDescriptor) -> SyncResult<bool> {
            Self::bump(&self.probes, kind.kind);
            let failures = self.probe_failures.load(Ordering::SeqCst);
            if failures > 0 {
                self.probe_failures.store(failures - 1, Ordering::SeqCst);
                return Err(SyncError::transient(kind.kind, "503 Service Unavailable"));
            }
            Ok(self.objects.lock().unwrap().contains_key(kind.kind))
        }

        async fn list(&self, kind: &KindDescriptor) -> SyncResult<ListResult> {
            let relist = Self::count(&self.lists, kind.kind) > 0;
            Self::bump(&self.lists, kind.kind);
            if let (true, Some(gate)) = (relist, &self.relist_gate) {
                gate.acquire().await.unwrap().forget();
            }
            let items = self
                .objects
                .lock()
                .unwrap()
                .get(kind.kind)
                .cloned()
                .unwrap_or_default();
            Ok(ListResult {
                items,
                revision: "1".to_string(),
            })
        }

        async fn watch(&self, _kind: &KindDescriptor, revision: &str) -> SyncResult<WatchStream> {
            self.watch_revisions.lock().unwrap().push(revision.to_string());
            if self.empty_watches {
                return Ok(stream::empty().boxed());
            }
            let script = self.scripts.lock().unwrap().pop_front();
            Ok(match script {
                Some(events) => stream::iter(events).boxed(),
                None => stream::pending().boxed(),
            })
        }
    }

    fn object(value: serde_json::Value) -> DynamicObject {
        serde_json::from_value(value).unwrap()
    }

    fn pod(name: &str, app: &str) -> DynamicObject {
        object(json!({
            "apiVersion": "v1", "kind": "Pod",
            "metadata": {
                "name": name, "namespace": "default", "uid": format!("uid-{name}"),
                "resourceVersion": "1", "labels": {"app": app}
            },
            "spec": {"nodeName": "node-1"},
            "status": {"phase": "Running"}
        }))
    }

    fn pod_at(name: &str, revision: &str) -> DynamicObject {
        let mut obj = pod(name, "web");
        obj.metadata.resource_version = Some(revision.to_string());
        obj
    }

    /// Poll until `check` holds, failing after five seconds
    async fn eventually(mut check: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !check() {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .unwrap();
    }

    fn service(name: &str, app: &str) -> DynamicObject {
        object(json!({
            "apiVersion": "v1", "kind": "Service",
            "metadata": {"name": name, "namespace": "default", "uid": format!("uid-{name}")},
            "spec": {"selector": {"app": app}, "clusterIP": "10.0.0.1", "type": "ClusterIP"}
        }))
    }

    fn claim(name: &str, volume: &str, rv: &str) -> DynamicObject {
        object(json!({
            "apiVersion": "v1", "kind": "PersistentVolumeClaim",
            "metadata": {
                "name": name, "namespace": "default", "uid": format!("uid-{name}"),
                "resourceVersion": rv
            },
            "spec": {"volumeName": volume},
            "status": {"phase": "Bound"}
        }))
    }

    fn volume(name: &str) -> DynamicObject {
        object(json!({
            "apiVersion": "v1", "kind": "PersistentVolume",
            "metadata": {"name": name, "uid": format!("uid-{name}")},
            "spec": {"capacity": {"storage": "1Gi"}},
            "status": {"phase": "Bound"}
        }))
    }

    fn catalog(topologies: &[&str]) -> Catalog {
        let standard = Catalog::standard();
        Catalog::new(
            topologies
                .iter()
                .filter_map(|t| standard.get(t).cloned())
                .collect(),
        )
    }

    fn fast() -> SyncConfig {
        SyncConfig {
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(10),
            node_name: None,
        }
    }

    async fn started(api: Arc<FakeResourceApi>, topologies: &[&str]) -> Synchronizer {
        let sync = Synchronizer::new(api, catalog(topologies), RuleSet::standard(), fast())
            .await
            .unwrap();
        sync.start();
        tokio::time::timeout(Duration::from_secs(5), sync.wait_for_sync())
            .await
            .unwrap();
        sync
    }

    #[tokio::test]
    async fn test_unreachable_server_is_fatal() {
        let api = Arc::new(FakeResourceApi {
            unreachable: true,
            ..Default::default()
        });
        let result = Synchronizer::new(api, Catalog::standard(), RuleSet::standard(), fast()).await;
        assert!(matches!(result, Err(SyncError::FatalConfig(_))));
    }

    #[tokio::test]
    async fn test_invalid_config_is_fatal() {
        let api = Arc::new(FakeResourceApi::default());
        let config = SyncConfig {
            initial_backoff: Duration::from_secs(10),
            max_backoff: Duration::from_secs(1),
            node_name: None,
        };
        let result = Synchronizer::new(api.clone(), Catalog::standard(), RuleSet::standard(), config).await;
        assert!(matches!(result, Err(SyncError::FatalConfig(_))));

        let empty = Synchronizer::new(api, Catalog::default(), RuleSet::standard(), fast()).await;
        assert!(matches!(empty, Err(SyncError::FatalConfig(_))));
    }

    #[tokio::test]
    async fn test_unsupported_kind_is_probed_once_and_never_reported() {
        let api = Arc::new(FakeResourceApi::default().with("Pod", vec![pod("a", "web")]));
        let sync = started(api.clone(), &[kinds::POD, kinds::DISK]).await;

        assert_eq!(sync.store(kinds::DISK).unwrap().state(), StoreState::Unsupported);
        assert_eq!(FakeResourceApi::count(&api.probes, "Disk"), 1);
        assert_eq!(FakeResourceApi::count(&api.lists, "Disk"), 0);

        let report = sync.synchronize();
        assert!(report.topology(kinds::DISK).is_none());
        assert_eq!(report.topology(kinds::POD).map(|t| t.len()), Some(1));
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_transient_probe_failures_are_retried() {
        let api = Arc::new(FakeResourceApi {
            probe_failures: AtomicUsize::new(2),
            ..Default::default()
        }
        .with("Pod", vec![pod("a", "web")]));
        let sync = started(api.clone(), &[kinds::POD]).await;

        assert_eq!(FakeResourceApi::count(&api.probes, "Pod"), 3);
        assert_eq!(sync.store(kinds::POD).unwrap().state(), StoreState::Synced);
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_synchronize_is_idempotent() {
        let api = Arc::new(
            FakeResourceApi::default()
                .with("Pod", vec![pod("a", "web"), pod("b", "web")])
                .with("Service", vec![service("web", "web")]),
        );
        let sync = started(api, &[kinds::POD, kinds::SERVICE]).await;

        let first = sync.synchronize();
        let second = sync.synchronize();
        assert_eq!(first.topologies, second.topologies);
        assert_eq!(second.cycle, first.cycle + 1);
        assert!(!second.shortcut);
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_pod_service_end_to_end() {
        let api = Arc::new(
            FakeResourceApi::default()
                .with("Pod", vec![pod("a", "web"), pod("b", "db")])
                .with("Service", vec![service("web", "web"), service("web-2", "web")]),
        );
        let sync = started(api, &[kinds::POD, kinds::SERVICE]).await;
        let report = sync.synchronize();

        let a = report.node("uid-a;<pod>").unwrap();
        let parents: Vec<_> = a.parents[kinds::SERVICE].iter().cloned().collect();
        assert_eq!(parents, vec!["uid-web-2;<service>", "uid-web;<service>"]);
        assert_eq!(a.get(keys::EPOCH), Some(sync.epoch()));

        let b = report.node("uid-b;<pod>").unwrap();
        assert!(b.parents.is_empty());

        let web = report.node("uid-web;<service>").unwrap();
        assert!(web.adjacency.contains("uid-a;<pod>"));
        assert!(web.children["uid-a;<pod>"].parents.is_empty());
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_retargeted_claim_moves_volume_edge() {
        let api = Arc::new(
            FakeResourceApi::default()
                .with("PersistentVolumeClaim", vec![claim("data", "pv-1", "1")])
                .with("PersistentVolume", vec![volume("pv-1"), volume("pv-2")]),
        );
        let sync = started(
            api,
            &[kinds::PERSISTENT_VOLUME_CLAIM, kinds::PERSISTENT_VOLUME],
        )
        .await;

        let before = sync.synchronize();
        let pv1 = before.node("uid-pv-1;<persistent_volume>").unwrap();
        assert!(pv1.parents[kinds::PERSISTENT_VOLUME_CLAIM].contains("uid-data;<persistent_volume_claim>"));

        sync.store(kinds::PERSISTENT_VOLUME_CLAIM)
            .unwrap()
            .upsert(claim("data", "pv-2", "2"));
        let after = sync.synchronize();

        assert!(after.node("uid-pv-1;<persistent_volume>").unwrap().parents.is_empty());
        let pv2 = after.node("uid-pv-2;<persistent_volume>").unwrap();
        assert!(pv2.parents[kinds::PERSISTENT_VOLUME_CLAIM].contains("uid-data;<persistent_volume_claim>"));
        let data = after.node("uid-data;<persistent_volume_claim>").unwrap();
        assert_eq!(
            data.adjacency.iter().collect::<Vec<_>>(),
            vec!["uid-pv-2;<persistent_volume>"]
        );
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_only_pods_are_subscribable() {
        let api = Arc::new(
            FakeResourceApi::default()
                .with("Pod", vec![pod("a", "web")])
                .with("Service", vec![service("web", "web")]),
        );
        let sync = Synchronizer::new(
            api,
            catalog(&[kinds::POD, kinds::SERVICE]),
            RuleSet::standard(),
            fast(),
        )
        .await
        .unwrap();

        let mut pods = sync.subscribe(kinds::POD).unwrap();
        assert!(matches!(
            sync.subscribe(kinds::SERVICE),
            Err(SyncError::NotSubscribable(_))
        ));
        assert!(matches!(
            sync.subscribe("no_such_kind"),
            Err(SyncError::NotSubscribable(_))
        ));

        sync.start();
        let event = tokio::time::timeout(Duration::from_secs(5), pods.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(!event.is_deleted());
        assert_eq!(event.object().metadata.name.as_deref(), Some("a"));
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_shortcut_report_for_deleted_pod() {
        let api = Arc::new(FakeResourceApi::default().with("Pod", vec![pod("a", "web")]));
        let sync = started(api, &[kinds::POD]).await;
        let mut events = sync.subscribe(kinds::POD).unwrap();

        let store = sync.store(kinds::POD).unwrap();
        store.remove(&pod("a", "web"));
        let event = events.try_recv().unwrap();

        let report = sync.shortcut_report(kinds::POD, &event).unwrap();
        assert!(report.shortcut);
        assert_eq!(report.node_count(), 1);
        let gone = report.node("uid-a;<pod>").unwrap();
        assert_eq!(gone.get(keys::STATE), Some("deleted"));
        assert_eq!(gone.get(keys::NAME), Some("a"));

        let added = ResourceEvent::Added(pod("c", "web"));
        let report = sync.shortcut_report(kinds::POD, &added).unwrap();
        assert_eq!(report.node("uid-c;<pod>").and_then(|n| n.get(keys::STATE)), None);
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_tasks() {
        let api = Arc::new(FakeResourceApi::default().with("Pod", vec![]));
        let sync = started(api, &[kinds::POD]).await;
        tokio::time::timeout(Duration::from_secs(5), sync.shutdown())
            .await
            .unwrap();
        assert!(sync.tasks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_watch_events_reach_the_store() {
        let api = Arc::new(
            FakeResourceApi::default()
                .with("Pod", vec![pod("a", "web")])
                .script(vec![
                    Ok(WatchEvent::Added(pod_at("b", "5"))),
                    Ok(WatchEvent::Deleted(pod_at("a", "6"))),
                ]),
        );
        let sync = started(api.clone(), &[kinds::POD]).await;
        let store = sync.store(kinds::POD).unwrap().clone();

        eventually(|| store.get("default/a").is_none()).await;
        assert!(store.get("default/b").is_some());
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_expired_watch_relists_and_keeps_entries_meanwhile() {
        let gate = Arc::new(Semaphore::new(0));
        let api = Arc::new(
            FakeResourceApi {
                relist_gate: Some(gate.clone()),
                ..Default::default()
            }
            .with("Pod", vec![pod("a", "web")])
            .script(vec![
                Ok(WatchEvent::Added(pod_at("b", "5"))),
                Err(SyncError::Expired { kind: "Pod".into() }),
            ]),
        );
        let sync = started(api.clone(), &[kinds::POD]).await;
        let store = sync.store(kinds::POD).unwrap().clone();

        eventually(|| FakeResourceApi::count(&api.lists, "Pod") == 2).await;
        assert!(store.get("default/a").is_some());
        assert!(store.get("default/b").is_some());

        api.set_objects("Pod", vec![pod("a", "web"), pod("c", "web")]);
        gate.add_permits(1);
        eventually(|| store.get("default/c").is_some()).await;
        assert!(store.get("default/b").is_none());
        assert_eq!(store.len(), 2);

        eventually(|| api.revisions().len() == 2).await;
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_clean_close_resumes_from_last_revision() {
        let api = Arc::new(
            FakeResourceApi::default()
                .with("Pod", vec![])
                .script(vec![Ok(WatchEvent::Added(pod_at("b", "7")))]),
        );
        let sync = started(api.clone(), &[kinds::POD]).await;

        eventually(|| api.revisions().len() == 2).await;
        assert_eq!(api.revisions(), vec!["1", "7"]);
        assert_eq!(FakeResourceApi::count(&api.lists, "Pod"), 1);
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_bookmark_advances_revision() {
        let api = Arc::new(
            FakeResourceApi::default()
                .with("Pod", vec![])
                .script(vec![Ok(WatchEvent::Bookmark("42".into()))]),
        );
        let sync = started(api.clone(), &[kinds::POD]).await;

        eventually(|| api.revisions().len() == 2).await;
        assert_eq!(api.revisions()[1], "42");
        sync.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_watches_back_off() {
        let api = Arc::new(
            FakeResourceApi {
                empty_watches: true,
                ..Default::default()
            }
            .with("Pod", vec![]),
        );
        let sync = started(api.clone(), &[kinds::POD]).await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        let watches = api.revisions().len();
        assert!(watches >= 2, "watch was not retried");
        assert!(watches < 100, "{} watches in 200ms", watches);
        assert_eq!(FakeResourceApi::count(&api.lists, "Pod"), 1);

        tokio::time::timeout(Duration::from_secs(5), sync.shutdown())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_watch_error_backs_off_then_relists() {
        let api = Arc::new(
            FakeResourceApi::default()
                .with("Pod", vec![pod("a", "web")])
                .script(vec![Err(SyncError::transient("Pod", "connection reset"))]),
        );
        let sync = started(api.clone(), &[kinds::POD]).await;

        eventually(|| FakeResourceApi::count(&api.lists, "Pod") == 2).await;
        assert!(sync.store(kinds::POD).unwrap().get("default/a").is_some());
        sync.shutdown().await;
    }
}
