// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod api;
mod client;
mod controls;
pub mod discovery;

pub use api::{ListResult, ResourceApi, WatchEvent, WatchStream};
pub use client::KubeResourceApi;
pub use controls::KubeControls;
pub use discovery::KindDescriptor;
