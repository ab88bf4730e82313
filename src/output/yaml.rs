// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use k8stopo::report::Report;

pub struct YamlFormatter;

impl YamlFormatter {
    pub fn format(report: &Report) -> String {
        serde_yaml::to_string(report).unwrap_or_else(|_| "{}".to_string())
    }
}
