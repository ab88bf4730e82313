// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Mirror of Kubernetes workload and storage resources, joined into one
//! topology graph per synchronization cycle.

pub mod config;
pub mod controls;
pub mod error;
pub mod join;
pub mod kubernetes;
pub mod progress;
pub mod report;
pub mod sync;
pub mod topology;
