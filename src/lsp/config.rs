// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::path::PathBuf;

use serde_json::Value;

/// Workspace settings, read from `initializationOptions` and
/// `workspace/didChangeConfiguration` under the `asm1802Lsp` key.
#[derive(Debug, Clone, Default)]
pub struct LspConfig {
    /// Fallback directories searched when an include does not resolve
    /// next to the including document.
    pub include_paths: Vec<PathBuf>,
}

impl LspConfig {
    pub fn update_from_workspace_settings(&mut self, settings: Option<&Value>) {
        let Some(settings) = settings else {
            return;
        };
        let Some(root) = settings.get("asm1802Lsp") else {
            return;
        };
        if let Some(paths) = read_string_array(root.get("includePaths")) {
            self.include_paths = paths.into_iter().map(PathBuf::from).collect();
        }
    }
}

fn read_string_array(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(ToString::to_string)
            .collect()
    })
}
