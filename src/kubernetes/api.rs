// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! The narrow fetch interface the mirror is built on.

use async_trait::async_trait;
use futures::stream::BoxStream;
use kube::api::DynamicObject;

use super::discovery::KindDescriptor;
use crate::error::SyncResult;

/// Full listing of one kind
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    pub items: Vec<DynamicObject>,
    /// List resourceVersion to start watching from
    pub revision: String,
}

/// One watch notification.
///
/// An expired revision is reported as [`crate::error::SyncError::Expired`] on
/// the stream instead of a variant here.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    Added(DynamicObject),
    Modified(DynamicObject),
    Deleted(DynamicObject),
    /// Revision checkpoint without an object change
    Bookmark(String),
}

pub type WatchStream = BoxStream<'static, SyncResult<WatchEvent>>;

/// List/watch access to the API server, one generic path for every kind
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Fails with a fatal error when the server cannot be reached at all
    async fn check_connectivity(&self) -> SyncResult<()>;

    /// Whether the server serves the kind. `Ok(false)` is permanent.
    async fn is_kind_supported(&self, kind: &KindDescriptor) -> SyncResult<bool>;

    /// All objects of the kind across namespaces
    async fn list(&self, kind: &KindDescriptor) -> SyncResult<ListResult>;

    /// Changes after `revision`; the stream ends when the server closes it
    async fn watch(&self, kind: &KindDescriptor, revision: &str) -> SyncResult<WatchStream>;
}
