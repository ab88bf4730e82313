// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod json;
mod table;
mod yaml;

pub use json::JsonFormatter;
pub use table::TableFormatter;
pub use yaml::YamlFormatter;

use k8stopo::report::Report;

use crate::cli::OutputFormat;

/// Render a report in the requested format.
///
/// Tables summarize full reports per topology and list the nodes of
/// shortcut reports; JSON and YAML always carry the whole report.
pub fn render(report: &Report, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Table if report.shortcut => TableFormatter::nodes(report),
        OutputFormat::Table => TableFormatter::summary(report),
        OutputFormat::Json => JsonFormatter::format(report),
        OutputFormat::Yaml => YamlFormatter::format(report),
    }
}
