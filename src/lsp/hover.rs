// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use serde_json::{json, Value};

use crate::core::line::classify_source_line;
use crate::core::opcodes;
use crate::core::source::{uri_basename, DocumentSource};
use crate::core::symbols::SymbolTable;
use crate::core::text_utils::trim;

/// Build the hover response for a word at a request position.
///
/// Lookup order: opcode/directive metadata, then an `EQU` definition,
/// then macro and subroutine definition text, then a plain label
/// location. Opcode metadata wins before any symbol resolution is
/// attempted.
pub fn hover_response(
    provider: &dyn DocumentSource,
    table: &SymbolTable,
    uri: &str,
    line: usize,
    word: &str,
) -> Option<Value> {
    if word.is_empty() {
        return None;
    }
    let display = word.to_ascii_uppercase();

    if let Some(info) = opcodes::lookup(word) {
        return Some(markdown_hover(format!(
            "### {} ({})\n\n**{}**\n\n```\n{}\n```\n",
            display,
            info.cpu.as_str(),
            info.name,
            info.description
        )));
    }

    let resolved = table.resolve(word, uri, line);

    if let Some(definition) = &resolved {
        if let Some(target_line) = provider
            .lines(&definition.uri)
            .and_then(|lines| lines.get(definition.line).cloned())
        {
            let is_equate = classify_source_line(&trim(&target_line))
                .and_then(|source| source.mnemonic)
                .is_some_and(|mnemonic| mnemonic.eq_ignore_ascii_case("equ"));
            if is_equate {
                return Some(markdown_hover(format!(
                    "### {display} (EQUate)\n\n{target_line}"
                )));
            }
        }
    }

    if let Some(definition) = table.macro_definition(provider, word) {
        if !definition.text.is_empty() {
            return Some(markdown_hover(format!(
                "### {display} (Macro)\n\nDefined in: {} ({})\n\n```\n{}\n```\n",
                uri_basename(&definition.uri),
                definition.line + 1,
                definition.text
            )));
        }
    }

    if let Some(definition) = table.subroutine_definition(provider, word) {
        if !definition.text.is_empty() {
            return Some(markdown_hover(format!(
                "### {display} (Subroutine)\n\nDefined in: {} ({})\n\n```\n{}\n```\n",
                uri_basename(&definition.uri),
                definition.line + 1,
                definition.text
            )));
        }
    }

    if let Some(definition) = resolved {
        return Some(markdown_hover(format!(
            "### {display} (Label)\n\nDefined in: {} ({})\n",
            uri_basename(&definition.uri),
            definition.line + 1
        )));
    }

    None
}

fn markdown_hover(value: String) -> Value {
    json!({
        "contents": {
            "kind": "markdown",
            "value": value,
        }
    })
}
