// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Generic kind descriptors.
//!
//! Every mirrored kind is addressed through a [`KindDescriptor`] instead of a
//! typed API, so list/watch/probe code never branches on the kind.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube::discovery::ApiResource;

/// REST coordinates of one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindDescriptor {
    /// API group, empty for the core group
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    pub plural: &'static str,
    pub namespaced: bool,
}

impl KindDescriptor {
    /// Descriptor for a custom resource
    pub const fn custom(
        group: &'static str,
        version: &'static str,
        kind: &'static str,
        plural: &'static str,
        namespaced: bool,
    ) -> Self {
        Self {
            group,
            version,
            kind,
            plural,
            namespaced,
        }
    }

    /// Full apiVersion string, `v1` or `group/version`
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_string()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.to_string(),
            version: self.version.to_string(),
            api_version: self.api_version(),
            kind: self.kind.to_string(),
            plural: self.plural.to_string(),
        }
    }

    /// Whether a discovery listing for our group/version serves this kind
    pub fn is_listed_in(&self, resources: &APIResourceList) -> bool {
        resources
            .resources
            .iter()
            .any(|r| r.name == self.plural && r.kind == self.kind)
    }
}

/// Build a [`KindDescriptor`] from a k8s-openapi type at compile time.
///
/// Scope is given explicitly since the Resource trait exposes it as a type.
macro_rules! core_kind {
    ($type:ty, namespaced) => {
        core_kind!(@inner $type, true)
    };
    ($type:ty, cluster) => {
        core_kind!(@inner $type, false)
    };
    (@inner $type:ty, $namespaced:expr) => {
        $crate::kubernetes::discovery::KindDescriptor {
            group: <$type as k8s_openapi::Resource>::GROUP,
            version: <$type as k8s_openapi::Resource>::VERSION,
            kind: <$type as k8s_openapi::Resource>::KIND,
            plural: <$type as k8s_openapi::Resource>::URL_PATH_SEGMENT,
            namespaced: $namespaced,
        }
    };
}

pub(crate) use core_kind;
