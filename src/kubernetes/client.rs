// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! [`ResourceApi`] backed by a live cluster.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use kube::api::{DynamicObject, ListParams, ObjectList, WatchParams};
use kube::core::TypeMeta;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::api::{ListResult, ResourceApi, WatchEvent, WatchStream};
use super::discovery::KindDescriptor;
use crate::error::{SyncError, SyncResult};

/// Timeout for connecting to K8s API
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for reading K8s API responses
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Server-side watch timeout, kept below the read timeout
const WATCH_TIMEOUT_SECS: u32 = 25;

/// Maximum retry attempts for transient failures within one list call
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (doubles each retry)
const RETRY_BASE_DELAY: Duration = Duration::from_millis(100);

/// Page size for paginated list requests
const PAGE_SIZE: u32 = 500;

/// HTTP status of an expired watch revision
const GONE: u16 = 410;

pub struct KubeResourceApi {
    client: Client,
    context: String,
}

impl KubeResourceApi {
    /// Build a client for `context`, or the kubeconfig's current context.
    ///
    /// Falls back to in-cluster configuration when no kubeconfig is present.
    pub async fn connect(context: Option<&str>) -> Result<Self> {
        let start = Instant::now();
        let (mut config, context_name) = match Kubeconfig::read() {
            Ok(kubeconfig) => {
                let context_name = context
                    .map(String::from)
                    .or_else(|| kubeconfig.current_context.clone())
                    .ok_or_else(|| {
                        anyhow!("No context specified and no current context in kubeconfig")
                    })?;

                if !kubeconfig.contexts.iter().any(|c| c.name == context_name) {
                    return Err(anyhow!(
                        "Context '{}' not found in kubeconfig",
                        context_name
                    ));
                }

                let config = Config::from_custom_kubeconfig(
                    kubeconfig,
                    &KubeConfigOptions {
                        context: Some(context_name.clone()),
                        ..Default::default()
                    },
                )
                .await
                .with_context(|| {
                    format!("Failed to load kubeconfig for context '{}'", context_name)
                })?;
                (config, context_name)
            }
            Err(e) if context.is_none() => {
                debug!(error = %e, "No kubeconfig, trying in-cluster configuration");
                let config = Config::incluster().context("Failed to load in-cluster config")?;
                (config, "in-cluster".to_string())
            }
            Err(e) => return Err(e).context("Failed to read kubeconfig"),
        };

        // Set timeouts for reliability
        config.connect_timeout = Some(CONNECT_TIMEOUT);
        config.read_timeout = Some(READ_TIMEOUT);

        let client = Client::try_from(config)
            .with_context(|| format!("Failed to create client for context '{}'", context_name))?;

        info!(
            context = %context_name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Created Kubernetes client"
        );

        Ok(Self {
            client,
            context: context_name,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    fn api(&self, kind: &KindDescriptor) -> Api<DynamicObject> {
        Api::all_with(self.client.clone(), &kind.api_resource())
    }

    /// Fetch a single page with retry logic
    async fn list_page_with_retry(
        &self,
        api: &Api<DynamicObject>,
        params: &ListParams,
        kind: &KindDescriptor,
    ) -> SyncResult<ObjectList<DynamicObject>> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match api.list(params).await {
                Ok(list) => return Ok(list),
                Err(e) => {
                    if is_retryable_error(&e) {
                        let delay = RETRY_BASE_DELAY * 2u32.pow(attempt);
                        warn!(
                            kind = %kind.kind,
                            context = %self.context,
                            attempt = attempt + 1,
                            max_attempts = MAX_RETRIES,
                            delay_ms = delay.as_millis(),
                            error = %e,
                            "Retryable error, backing off"
                        );
                        tokio::time::sleep(delay).await;
                        last_error = Some(e);
                    } else {
                        debug!(kind = %kind.kind, error = %e, "Non-retryable error");
                        return Err(SyncError::transient(kind.kind, e));
                    }
                }
            }
        }

        Err(SyncError::transient(
            kind.kind,
            format!(
                "failed after {} retries: {}",
                MAX_RETRIES,
                last_error.map(|e| e.to_string()).unwrap_or_default()
            ),
        ))
    }
}

/// Check if an error is retryable (transient failures)
fn is_retryable_error(err: &kube::Error) -> bool {
    match err {
        // Network/connection errors are retryable
        kube::Error::HyperError(_) => true,
        // API errors: retry on 429 (rate limit), 503 (unavailable), 504 (timeout)
        kube::Error::Api(api_err) => matches!(api_err.code, 429 | 503 | 504),
        _ => false,
    }
}

fn convert_event(kind: &str, event: kube::api::WatchEvent<DynamicObject>) -> SyncResult<WatchEvent> {
    use kube::api::WatchEvent as Raw;
    match event {
        Raw::Added(obj) => Ok(WatchEvent::Added(obj)),
        Raw::Modified(obj) => Ok(WatchEvent::Modified(obj)),
        Raw::Deleted(obj) => Ok(WatchEvent::Deleted(obj)),
        Raw::Bookmark(b) => Ok(WatchEvent::Bookmark(b.metadata.resource_version)),
        Raw::Error(err) if err.code == GONE => Err(SyncError::Expired {
            kind: kind.to_string(),
        }),
        Raw::Error(err) => Err(SyncError::transient(kind, err.message)),
    }
}

#[async_trait]
impl ResourceApi for KubeResourceApi {
    async fn check_connectivity(&self) -> SyncResult<()> {
        let version = self.client.apiserver_version().await.map_err(|e| {
            SyncError::FatalConfig(format!(
                "cannot reach API server for context '{}': {}",
                self.context, e
            ))
        })?;
        info!(
            context = %self.context,
            version = %version.git_version,
            "Connected to API server"
        );
        Ok(())
    }

    async fn is_kind_supported(&self, kind: &KindDescriptor) -> SyncResult<bool> {
        let resources = if kind.group.is_empty() {
            self.client.list_core_api_resources(kind.version).await
        } else {
            self.client
                .list_api_group_resources(&kind.api_version())
                .await
        };
        match resources {
            Ok(list) => Ok(kind.is_listed_in(&list)),
            Err(kube::Error::Api(ref err)) if err.code == 404 => Ok(false),
            Err(e) => Err(SyncError::transient(kind.kind, e)),
        }
    }

    async fn list(&self, kind: &KindDescriptor) -> SyncResult<ListResult> {
        let api = self.api(kind);
        let mut items: Vec<DynamicObject> = Vec::new();
        let mut continue_token: Option<String> = None;
        let mut revision = String::new();
        let mut page_count = 0u32;

        loop {
            let mut params = ListParams::default().limit(PAGE_SIZE);
            if let Some(ref token) = continue_token {
                params = params.continue_token(token);
            }

            let list = self.list_page_with_retry(&api, &params, kind).await?;
            page_count += 1;
            items.extend(list.items);
            if let Some(rv) = list.metadata.resource_version {
                revision = rv;
            }

            match list.metadata.continue_ {
                Some(token) if !token.is_empty() => {
                    debug!(
                        kind = %kind.kind,
                        page = page_count,
                        total_so_far = items.len(),
                        "Fetched page, continuing"
                    );
                    continue_token = Some(token);
                }
                _ => break,
            }
        }

        // List responses omit per-item apiVersion and kind
        let types = TypeMeta {
            api_version: kind.api_version(),
            kind: kind.kind.to_string(),
        };
        for item in &mut items {
            item.types.get_or_insert_with(|| types.clone());
        }

        debug!(
            kind = %kind.kind,
            pages = page_count,
            items = items.len(),
            revision = %revision,
            "List complete"
        );
        Ok(ListResult { items, revision })
    }

    async fn watch(&self, kind: &KindDescriptor, revision: &str) -> SyncResult<WatchStream> {
        // Bookmarks are requested by default
        let params = WatchParams::default().timeout(WATCH_TIMEOUT_SECS);
        let name = kind.kind;
        let stream = self
            .api(kind)
            .watch(&params, revision)
            .await
            .map_err(|e| match e {
                kube::Error::Api(ref err) if err.code == GONE => SyncError::Expired {
                    kind: name.to_string(),
                },
                e => SyncError::transient(name, e),
            })?;

        Ok(stream
            .map_err(move |e| SyncError::transient(name, e))
            .and_then(move |event| futures::future::ready(convert_event(name, event)))
            .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(code: u16, reason: &str) -> serde_json::Value {
        json!({"status": "Failure", "message": "boom", "reason": reason, "code": code})
    }

    fn api_error(code: u16) -> kube::Error {
        kube::Error::Api(serde_json::from_value(status(code, "Test")).unwrap())
    }

    fn error_event(code: u16, reason: &str) -> kube::api::WatchEvent<DynamicObject> {
        serde_json::from_value(json!({"type": "ERROR", "object": status(code, reason)})).unwrap()
    }

    #[test]
    fn test_is_retryable_error() {
        assert!(is_retryable_error(&api_error(429)));
        assert!(is_retryable_error(&api_error(503)));
        assert!(is_retryable_error(&api_error(504)));
        assert!(!is_retryable_error(&api_error(404)));
        assert!(!is_retryable_error(&api_error(403)));
    }

    #[test]
    fn test_convert_gone_is_expired() {
        assert!(matches!(
            convert_event("Pod", error_event(GONE, "Expired")),
            Err(SyncError::Expired { .. })
        ));
    }

    #[test]
    fn test_convert_other_error_is_transient() {
        let err = convert_event("Pod", error_event(500, "InternalError")).unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, SyncError::Transient { .. }));
    }

    #[test]
    fn test_convert_bookmark() {
        let event: kube::api::WatchEvent<DynamicObject> = serde_json::from_value(json!({
            "type": "BOOKMARK",
            "object": {"apiVersion": "v1", "kind": "Pod", "metadata": {"resourceVersion": "12345"}}
        }))
        .unwrap();
        assert!(matches!(
            convert_event("Pod", event),
            Ok(WatchEvent::Bookmark(rv)) if rv == "12345"
        ));
    }
}
