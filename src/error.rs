// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Error taxonomy for the synchronization and join engine.
//!
//! Only [`SyncError::FatalConfig`] ever reaches the caller of
//! [`crate::sync::Synchronizer::new`]; the rest degrade into partial data.

/// Errors raised by the resource mirror, the node mapper and the join engine.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Network or API hiccup during probe, list or watch. Retried with backoff.
    #[error("transient error for {kind}: {message}")]
    Transient { kind: String, message: String },

    /// The cluster does not serve this kind. Recorded once, never retried.
    #[error("kind {kind} is not supported by the cluster")]
    UnsupportedKind { kind: String },

    /// A watch stream reported that our revision is gone (410).
    #[error("watch revision expired for {kind}")]
    Expired { kind: String },

    /// A single object could not be turned into a node.
    #[error("cannot map {kind} {name}: {reason}")]
    Mapping {
        kind: String,
        name: String,
        reason: String,
    },

    /// A join rule hit malformed input on one parent node.
    #[error("rule {rule} skipped node {node}: {reason}")]
    Resolution {
        rule: String,
        node: String,
        reason: String,
    },

    /// The engine could not be constructed.
    #[error("fatal configuration error: {0}")]
    FatalConfig(String),

    /// Subscriptions are only offered for kinds flagged for notification.
    #[error("kind {0} does not offer add/delete notifications")]
    NotSubscribable(String),

    /// The requested control is not active on the node in the given report.
    #[error("control {control} is not available on node {node}")]
    UnknownControl { node: String, control: String },
}

impl SyncError {
    pub fn transient(kind: &str, err: impl std::fmt::Display) -> Self {
        SyncError::Transient {
            kind: kind.to_string(),
            message: err.to_string(),
        }
    }

    pub fn mapping(kind: &str, name: &str, reason: impl Into<String>) -> Self {
        SyncError::Mapping {
            kind: kind.to_string(),
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the per-kind task should back off and try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Transient { .. } | SyncError::Expired { .. })
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
