// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::path::PathBuf;

use crate::core::source::{split_lines, uri_to_path};

/// One open editor document, kept in sync via didOpen/didChange/didSave.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub uri: String,
    pub path: Option<PathBuf>,
    pub version: i64,
    pub text: String,
    pub lines: Vec<String>,
}

impl DocumentState {
    pub fn new(uri: String, version: i64, text: String) -> Self {
        let path = uri_to_path(&uri);
        let lines = split_lines(&text);
        Self {
            uri,
            path,
            version,
            text,
            lines,
        }
    }

    pub fn update_text(&mut self, version: i64, text: String) {
        self.version = version;
        self.lines = split_lines(&text);
        self.text = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_state_splits_lines() {
        let state = DocumentState::new(
            "file:///tmp/test.asm".to_string(),
            1,
            "START: NOP\n LDI 5\n".to_string(),
        );
        assert_eq!(state.lines, vec!["START: NOP", " LDI 5", ""]);
        assert_eq!(state.path, Some(PathBuf::from("/tmp/test.asm")));
    }

    #[test]
    fn update_replaces_text_and_lines() {
        let mut state =
            DocumentState::new("file:///tmp/test.asm".to_string(), 1, "A".to_string());
        state.update_text(2, "B\nC".to_string());
        assert_eq!(state.version, 2);
        assert_eq!(state.lines, vec!["B", "C"]);
    }
}
