// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::core::source::{DocumentSource, FileSource};
use crate::core::symbols::{build_symbol_table, SymbolTable};
use crate::core::text_utils::{is_word_char, trim};
use crate::lsp::config::LspConfig;
use crate::lsp::definition::definition_location;
use crate::lsp::document_state::DocumentState;
use crate::lsp::hover::hover_response;

#[derive(Debug, Clone)]
pub enum OutboundMessage {
    Response {
        id: Value,
        result: Value,
    },
    Error {
        id: Value,
        code: i64,
        message: String,
    },
    Notification {
        method: String,
        params: Value,
    },
}

/// Server state: workspace settings plus the open-document store.
///
/// Each hover/definition request builds a fresh symbol table from the
/// requesting document; nothing resolution-related survives between
/// requests.
#[derive(Debug, Default)]
pub struct LspSession {
    config: LspConfig,
    documents: HashMap<String, DocumentState>,
    shutdown_requested: bool,
}

impl LspSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_exit(&self) -> bool {
        self.shutdown_requested
    }

    pub fn handle_message(&mut self, message: &Value) -> Vec<OutboundMessage> {
        let method = message.get("method").and_then(Value::as_str);
        let id = message.get("id").cloned();

        let Some(method) = method else {
            return Vec::new();
        };
        let params = message.get("params").cloned().unwrap_or(Value::Null);

        if let Some(id) = id {
            return match self.handle_request(method, &params) {
                Ok(result) => vec![OutboundMessage::Response { id, result }],
                Err((code, msg)) => vec![OutboundMessage::Error {
                    id,
                    code,
                    message: msg,
                }],
            };
        }

        self.handle_notification(method, &params);
        Vec::new()
    }

    fn handle_request(&mut self, method: &str, params: &Value) -> Result<Value, (i64, String)> {
        match method {
            "initialize" => Ok(self.handle_initialize(params)),
            "shutdown" => Ok(Value::Null),
            "textDocument/hover" => Ok(self.handle_hover(params)),
            "textDocument/definition" => Ok(self.handle_definition(params)),
            _ => Err((-32601, format!("method not found: {method}"))),
        }
    }

    fn handle_notification(&mut self, method: &str, params: &Value) {
        match method {
            "initialized" => {}
            "exit" => self.shutdown_requested = true,
            "workspace/didChangeConfiguration" => self
                .config
                .update_from_workspace_settings(params.get("settings")),
            "textDocument/didOpen" => self.handle_did_open(params),
            "textDocument/didChange" => self.handle_did_change(params),
            "textDocument/didSave" => self.handle_did_save(params),
            "textDocument/didClose" => self.handle_did_close(params),
            _ => {}
        }
    }

    fn handle_initialize(&mut self, params: &Value) -> Value {
        self.config
            .update_from_workspace_settings(params.get("initializationOptions"));
        json!({
            "capabilities": {
                "textDocumentSync": {
                    "openClose": true,
                    "change": 1,
                    "save": { "includeText": true }
                },
                "hoverProvider": true,
                "definitionProvider": true
            },
            "serverInfo": {
                "name": "asm1802-lsp",
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn handle_did_open(&mut self, params: &Value) {
        let Some(doc) = params.get("textDocument") else {
            return;
        };
        let Some(uri) = doc.get("uri").and_then(Value::as_str) else {
            return;
        };
        let text = doc
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let version = doc.get("version").and_then(Value::as_i64).unwrap_or(0);
        self.documents
            .insert(uri.to_string(), DocumentState::new(uri.to_string(), version, text));
    }

    fn handle_did_change(&mut self, params: &Value) {
        let Some(doc) = params.get("textDocument") else {
            return;
        };
        let Some(uri) = doc.get("uri").and_then(Value::as_str) else {
            return;
        };
        let version = doc.get("version").and_then(Value::as_i64).unwrap_or(0);
        // Full-document sync: the last content change carries the text.
        let Some(text) = params
            .get("contentChanges")
            .and_then(Value::as_array)
            .and_then(|changes| changes.last())
            .and_then(|entry| entry.get("text"))
            .and_then(Value::as_str)
        else {
            return;
        };
        match self.documents.get_mut(uri) {
            Some(state) => state.update_text(version, text.to_string()),
            None => {
                self.documents.insert(
                    uri.to_string(),
                    DocumentState::new(uri.to_string(), version, text.to_string()),
                );
            }
        }
    }

    fn handle_did_save(&mut self, params: &Value) {
        let Some(uri) = params
            .get("textDocument")
            .and_then(|value| value.get("uri"))
            .and_then(Value::as_str)
        else {
            return;
        };
        if let Some(text) = params.get("text").and_then(Value::as_str) {
            if let Some(state) = self.documents.get_mut(uri) {
                let version = state.version;
                state.update_text(version, text.to_string());
            }
        }
    }

    fn handle_did_close(&mut self, params: &Value) {
        if let Some(uri) = params
            .get("textDocument")
            .and_then(|value| value.get("uri"))
            .and_then(Value::as_str)
        {
            self.documents.remove(uri);
        }
    }

    fn handle_hover(&self, params: &Value) -> Value {
        let Some((uri, line, character)) = request_position(params) else {
            return Value::Null;
        };
        let Some(lines) = self.lines(&uri) else {
            return Value::Null;
        };
        let Some(line_text) = lines.get(line) else {
            return Value::Null;
        };
        if !position_in_code(line_text, character) {
            return Value::Null;
        }
        let word = token_word_at(line_text, character);
        let table = self.build_table(&uri);
        hover_response(self, &table, &uri, line, &word).unwrap_or(Value::Null)
    }

    fn handle_definition(&self, params: &Value) -> Value {
        let Some((uri, line, character)) = request_position(params) else {
            return Value::Null;
        };
        let Some(lines) = self.lines(&uri) else {
            return Value::Null;
        };
        let Some(line_text) = lines.get(line) else {
            return Value::Null;
        };
        if !position_in_code(line_text, character) {
            return Value::Null;
        }
        let word = token_word_at(line_text, character);
        let table = self.build_table(&uri);
        definition_location(&table, &uri, line, &word).unwrap_or(Value::Null)
    }

    fn build_table(&self, uri: &str) -> SymbolTable {
        let table = build_symbol_table(self, uri, &self.config.include_paths);
        for note in &table.diagnostics {
            eprintln!("asm1802-lsp: {note}");
        }
        table
    }
}

impl DocumentSource for LspSession {
    fn lines(&self, uri: &str) -> Option<Vec<String>> {
        if let Some(doc) = self.documents.get(uri) {
            return Some(doc.lines.clone());
        }
        FileSource.lines(uri)
    }
}

fn request_position(params: &Value) -> Option<(String, usize, usize)> {
    let uri = params
        .get("textDocument")
        .and_then(|value| value.get("uri"))
        .and_then(Value::as_str)?;
    let line = params
        .get("position")
        .and_then(|value| value.get("line"))
        .and_then(Value::as_u64)? as usize;
    let character = params
        .get("position")
        .and_then(|value| value.get("character"))
        .and_then(Value::as_u64)? as usize;
    Some((uri.to_string(), line, character))
}

/// A request position sitting in the stripped comment tail of its line
/// produces no result at all.
fn position_in_code(line_text: &str, character: usize) -> bool {
    character < trim(line_text).chars().count()
}

fn token_word_at(line: &str, char_index: usize) -> String {
    let bytes = line.as_bytes();
    if bytes.is_empty() {
        return String::new();
    }
    let mut start = char_index.min(bytes.len());
    if start == bytes.len() && start > 0 {
        start -= 1;
    }
    while start > 0 && is_word_char(bytes[start - 1] as char) {
        start -= 1;
    }
    let mut end = char_index.min(bytes.len());
    while end < bytes.len() && is_word_char(bytes[end] as char) {
        end += 1;
    }
    line.get(start..end).unwrap_or_default().to_string()
}
