// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Eventually-consistent mirror of the cluster, one store per kind.

mod backoff;
mod events;
mod store;
mod synchronizer;

pub use backoff::Backoff;
pub use events::ResourceEvent;
pub use store::{ResourceStore, StoreEntry, StoreState, store_key};
pub use synchronizer::{DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_BACKOFF, SyncConfig, Synchronizer};
