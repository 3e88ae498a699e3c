// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use serde_json::{json, Value};

use crate::core::opcodes;
use crate::core::symbols::SymbolTable;

/// Resolve a go-to-definition request to an LSP `Location`.
///
/// Opcode and directive mnemonics have no definition site; they
/// short-circuit to no result before symbol resolution.
pub fn definition_location(
    table: &SymbolTable,
    uri: &str,
    line: usize,
    word: &str,
) -> Option<Value> {
    if word.is_empty() || opcodes::is_mnemonic(word) {
        return None;
    }
    let definition = table.resolve(word, uri, line)?;
    Some(json!({
        "uri": definition.uri,
        "range": {
            "start": {"line": definition.line, "character": 0},
            "end": {"line": definition.line, "character": 0},
        }
    }))
}
