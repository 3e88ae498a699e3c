// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Scoped symbol table construction and name resolution.
//!
//! The dialect has three symbol namespaces: global labels, macro names,
//! and subroutine-local labels. `SUBROUTINE`/`SUB` opens a scope that
//! `ENDSUB` closes; `MACRO` opens a scope that `ENDM`/`ENDMACRO` closes.
//! Only one scope of each kind can be open at a time; opening a new one
//! while the previous is still open drops tracking of the previous
//! (last-opened-wins, a known limitation of the dialect).
//!
//! A table is built fresh for every resolution request and discarded
//! afterwards; nothing is shared across requests.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::core::line::{
    classify_preprocessor, classify_source_line, include_argument, scope_marker, ScopeMarker,
};
use crate::core::source::{path_to_file_uri, resolve_include_uri, DocumentSource};
use crate::core::text_utils::trim;

/// Location a name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDefinition {
    pub uri: String,
    pub line: usize,
}

/// A macro or subroutine body with its private label namespace.
///
/// `end_line` stays `None` while the block is open; resolution treats an
/// unclosed block as extending to the end of its document.
#[derive(Debug, Clone)]
pub struct Block {
    pub uri: String,
    pub start_line: usize,
    pub end_line: Option<usize>,
    pub symbols: HashMap<String, SymbolDefinition>,
}

impl Block {
    fn new(uri: &str, start_line: usize) -> Self {
        Self {
            uri: uri.to_string(),
            start_line,
            end_line: None,
            symbols: HashMap::new(),
        }
    }

    fn contains(&self, uri: &str, line: usize) -> bool {
        self.uri == uri
            && self.start_line <= line
            && line <= self.end_line.unwrap_or(usize::MAX)
    }
}

/// Extracted source text of a macro or subroutine definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionText {
    pub uri: String,
    pub text: String,
    pub line: usize,
}

/// Symbol collections for one resolution request.
///
/// All keys are lower-cased; lookups canonicalize before searching.
#[derive(Debug, Default)]
pub struct SymbolTable {
    pub globals: HashMap<String, SymbolDefinition>,
    pub macros: HashMap<String, Block>,
    pub subroutines: HashMap<String, Block>,
    pub diagnostics: Vec<String>,
}

/// Scan state threaded through the recursive document walk.
#[derive(Debug, Default)]
struct ScanState {
    current_subroutine: Option<String>,
    current_macro: Option<String>,
    visited: HashSet<String>,
    diagnostics: Vec<String>,
}

/// Build the symbol table for `root_uri` and everything it includes.
///
/// `include_paths` are fallback directories tried in order when an
/// include does not resolve next to the including document. A missing
/// include target never fails the build; it is recorded in
/// [`SymbolTable::diagnostics`] and skipped.
pub fn build_symbol_table(
    provider: &dyn DocumentSource,
    root_uri: &str,
    include_paths: &[PathBuf],
) -> SymbolTable {
    let mut table = SymbolTable::default();
    let mut state = ScanState::default();
    state.visited.insert(root_uri.to_string());
    match provider.lines(root_uri) {
        Some(lines) => scan(provider, root_uri, &lines, include_paths, &mut state, &mut table),
        None => state
            .diagnostics
            .push(format!("cannot read source document: {root_uri}")),
    }
    table.diagnostics = state.diagnostics;
    table
}

fn scan(
    provider: &dyn DocumentSource,
    uri: &str,
    lines: &[String],
    include_paths: &[PathBuf],
    state: &mut ScanState,
    table: &mut SymbolTable,
) {
    for (line_number, raw) in lines.iter().enumerate() {
        let line = trim(raw);

        if let Some(directive) = classify_preprocessor(&line) {
            if directive.directive == "include" {
                if let Some(target) = directive.argument.as_deref().and_then(include_argument) {
                    enter_include(provider, uri, target, include_paths, state, table);
                    continue;
                }
            }
            // Any other directive falls through; `#`-prefixed lines then
            // fail source classification and are skipped.
        }

        let Some(source) = classify_source_line(&line) else {
            continue;
        };
        let marker = source.mnemonic.as_deref().and_then(scope_marker);
        match (source.label.as_deref(), marker) {
            (Some(label), Some(ScopeMarker::SubroutineOpen)) => {
                let key = label.to_ascii_lowercase();
                // The declaring label is global; the block owns only the
                // labels defined inside it.
                table.globals.insert(
                    key.clone(),
                    SymbolDefinition {
                        uri: uri.to_string(),
                        line: line_number,
                    },
                );
                table.subroutines.insert(key.clone(), Block::new(uri, line_number));
                state.current_subroutine = Some(key);
            }
            (Some(label), Some(ScopeMarker::MacroOpen)) => {
                let key = label.to_ascii_lowercase();
                table.macros.insert(key.clone(), Block::new(uri, line_number));
                state.current_macro = Some(key);
            }
            (Some(label), _) => register_label(table, state, label, uri, line_number),
            (None, Some(ScopeMarker::SubroutineClose)) => {
                if let Some(name) = state.current_subroutine.take() {
                    if let Some(block) = table.subroutines.get_mut(&name) {
                        block.end_line = Some(line_number);
                    }
                }
            }
            (None, Some(ScopeMarker::MacroClose)) => {
                if let Some(name) = state.current_macro.take() {
                    if let Some(block) = table.macros.get_mut(&name) {
                        block.end_line = Some(line_number);
                    }
                }
            }
            (None, _) => {}
        }
    }
}

fn enter_include(
    provider: &dyn DocumentSource,
    from_uri: &str,
    target: &str,
    include_paths: &[PathBuf],
    state: &mut ScanState,
    table: &mut SymbolTable,
) {
    let mut candidates = vec![resolve_include_uri(from_uri, target)];
    for dir in include_paths {
        candidates.push(path_to_file_uri(&dir.join(target)));
    }

    for candidate in candidates {
        if state.visited.contains(&candidate) {
            // Already scanned into the shared table; also the cycle guard.
            return;
        }
        if let Some(lines) = provider.lines(&candidate) {
            state.visited.insert(candidate.clone());
            scan(provider, &candidate, &lines, include_paths, state, table);
            return;
        }
    }
    state
        .diagnostics
        .push(format!("include target not found: {target} (from {from_uri})"));
}

fn register_label(
    table: &mut SymbolTable,
    state: &ScanState,
    label: &str,
    uri: &str,
    line_number: usize,
) {
    let key = label.to_ascii_lowercase();
    let definition = SymbolDefinition {
        uri: uri.to_string(),
        line: line_number,
    };
    if let Some(name) = &state.current_subroutine {
        if let Some(block) = table.subroutines.get_mut(name) {
            block.symbols.insert(key, definition);
            return;
        }
    }
    table.globals.insert(key, definition);
}

impl SymbolTable {
    /// Resolve a name as seen from `from_uri`:`from_line`.
    ///
    /// Priority: macro name, then a local label of the subroutine whose
    /// line range encloses the request position, then a global label.
    pub fn resolve(&self, name: &str, from_uri: &str, from_line: usize) -> Option<SymbolDefinition> {
        let key = name.to_ascii_lowercase();
        if let Some(block) = self.macros.get(&key) {
            return Some(SymbolDefinition {
                uri: block.uri.clone(),
                line: block.start_line,
            });
        }
        for block in self.subroutines.values() {
            if block.contains(from_uri, from_line) {
                if let Some(definition) = block.symbols.get(&key) {
                    return Some(definition.clone());
                }
            }
        }
        self.globals.get(&key).cloned()
    }

    /// Source text of a macro definition, for display.
    ///
    /// Covers the full body through the closing directive, plus any `;;`
    /// documentation comment lines immediately above the declaration.
    pub fn macro_definition(
        &self,
        provider: &dyn DocumentSource,
        name: &str,
    ) -> Option<DefinitionText> {
        let block = self.macros.get(&name.to_ascii_lowercase())?;
        let lines = provider.lines(&block.uri)?;
        let end = block.end_line.unwrap_or(block.start_line);
        Some(DefinitionText {
            uri: block.uri.clone(),
            text: block_text(&lines, block.start_line, end),
            line: block.start_line,
        })
    }

    /// Source text of a subroutine declaration, for display.
    ///
    /// Deliberately covers only the declaration line (plus `;;` doc
    /// comments above it), not the body.
    pub fn subroutine_definition(
        &self,
        provider: &dyn DocumentSource,
        name: &str,
    ) -> Option<DefinitionText> {
        let block = self.subroutines.get(&name.to_ascii_lowercase())?;
        let lines = provider.lines(&block.uri)?;
        Some(DefinitionText {
            uri: block.uri.clone(),
            text: block_text(&lines, block.start_line, block.start_line),
            line: block.start_line,
        })
    }
}

fn block_text(lines: &[String], start_line: usize, end_line: usize) -> String {
    if lines.is_empty() || start_line >= lines.len() {
        return String::new();
    }
    let mut start = start_line;
    while start > 0 && lines[start - 1].starts_with(";;") {
        start -= 1;
    }
    let end = end_line.min(lines.len() - 1);
    lines[start..=end]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MapSource(HashMap<String, Vec<String>>);

    impl MapSource {
        fn new(documents: &[(&str, &[&str])]) -> Self {
            Self(
                documents
                    .iter()
                    .map(|(uri, lines)| {
                        (
                            uri.to_string(),
                            lines.iter().map(ToString::to_string).collect(),
                        )
                    })
                    .collect(),
            )
        }
    }

    impl DocumentSource for MapSource {
        fn lines(&self, uri: &str) -> Option<Vec<String>> {
            self.0.get(uri).cloned()
        }
    }

    const MAIN: &str = "file:///proj/main.asm";

    fn build(source: &MapSource) -> SymbolTable {
        build_symbol_table(source, MAIN, &[])
    }

    #[test]
    fn subroutine_scope_shadows_global() {
        let lines: &[&str] = &[
            "",                    // 0
            "",                    // 1
            "FOO:  LDI 1",         // 2  global FOO
            "",                    // 3
            "",                    // 4
            "",                    // 5
            "",                    // 6
            "",                    // 7
            "",                    // 8
            "",                    // 9
            "BAR:  SUBROUTINE",    // 10
            "",                    // 11
            "FOO:  LDI 2",         // 12 local FOO inside BAR
            "",                    // 13
            "",                    // 14
            "",                    // 15
            "",                    // 16
            "",                    // 17
            "",                    // 18
            "",                    // 19
            "      ENDSUB",        // 20
        ];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);

        let inside = table.resolve("FOO", MAIN, 15).unwrap();
        assert_eq!(inside.line, 12);
        let outside = table.resolve("foo", MAIN, 25).unwrap();
        assert_eq!(outside.line, 2);
        // The subroutine's own name stays global.
        assert_eq!(table.resolve("BAR", MAIN, 0).unwrap().line, 10);
        assert!(!table.subroutines["bar"].symbols.contains_key("bar"));
    }

    #[test]
    fn macro_name_wins_over_global_label() {
        let lines: &[&str] = &[
            "BLIT:  LDI 0",       // 0  global BLIT
            "BLIT:  MACRO",       // 1  macro BLIT
            "       LDI 1",       // 2
            "       ENDM",        // 3
        ];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);
        assert_eq!(table.resolve("blit", MAIN, 0).unwrap().line, 1);
    }

    #[test]
    fn macro_name_is_not_a_global() {
        let lines: &[&str] = &["CLRSCR: MACRO", "        LDI 0", "        ENDM"];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);
        assert!(table.globals.get("clrscr").is_none());
        assert!(table.macros.contains_key("clrscr"));
        assert_eq!(table.macros["clrscr"].end_line, Some(2));
    }

    #[test]
    fn included_symbols_accumulate_into_one_table() {
        let source = MapSource::new(&[
            (
                MAIN,
                &[
                    "#include \"defs.inc\"",
                    "        LDI STACK",
                    "START:  BR START",
                ] as &[&str],
            ),
            (
                "file:///proj/defs.inc",
                &["STACK:  EQU 7", "#include \"main.asm\""] as &[&str],
            ),
        ]);
        let table = build(&source);

        let stack = table.resolve("stack", MAIN, 1).unwrap();
        assert_eq!(stack.uri, "file:///proj/defs.inc");
        assert_eq!(stack.line, 0);
        // Visible in both directions of the include graph.
        let start = table.resolve("start", "file:///proj/defs.inc", 0).unwrap();
        assert_eq!(start.uri, MAIN);
        assert_eq!(start.line, 2);
    }

    #[test]
    fn mutual_includes_terminate() {
        let source = MapSource::new(&[
            (MAIN, &["#include \"other.asm\"", "A:  LDI 1"] as &[&str]),
            (
                "file:///proj/other.asm",
                &["#include \"main.asm\"", "B:  LDI 2"] as &[&str],
            ),
        ]);
        let table = build(&source);
        assert!(table.globals.contains_key("a"));
        assert!(table.globals.contains_key("b"));
    }

    #[test]
    fn missing_include_is_skipped_with_diagnostic() {
        let source = MapSource::new(&[(
            MAIN,
            &["#include \"gone.inc\"", "HERE:  LDI 1"] as &[&str],
        )]);
        let table = build(&source);
        assert!(table.globals.contains_key("here"));
        assert_eq!(table.diagnostics.len(), 1);
        assert!(table.diagnostics[0].contains("gone.inc"));
    }

    #[test]
    fn include_paths_are_fallback_directories() {
        let source = MapSource::new(&[
            (MAIN, &["#include \"shared.inc\""] as &[&str]),
            ("file:///lib/shared.inc", &["COMMON:  EQU 1"] as &[&str]),
        ]);
        let table = build_symbol_table(&source, MAIN, &[PathBuf::from("/lib")]);
        assert!(table.globals.contains_key("common"));
    }

    #[test]
    fn unclosed_subroutine_extends_to_end_of_document() {
        let lines: &[&str] = &[
            "OPEN:  SUBROUTINE",  // 0
            "LOCAL: LDI 1",       // 1
            "       BR LOCAL",    // 2
        ];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);
        assert_eq!(table.subroutines["open"].end_line, None);
        assert_eq!(table.resolve("local", MAIN, 2).unwrap().line, 1);
        // Leniency applies to any line at or after the opening.
        assert_eq!(table.resolve("local", MAIN, 99).unwrap().line, 1);
    }

    #[test]
    fn locals_do_not_leak_into_other_documents() {
        let source = MapSource::new(&[
            (
                MAIN,
                &[
                    "#include \"sub.inc\"",
                    "       BR DONE",
                ] as &[&str],
            ),
            (
                "file:///proj/sub.inc",
                &["S:  SUBROUTINE", "DONE:  LDI 0", "    ENDSUB"] as &[&str],
            ),
        ]);
        let table = build(&source);
        // Line 1 of main.asm sits inside sub.inc's block line range, but
        // the block belongs to a different document.
        assert_eq!(table.resolve("done", MAIN, 1), None);
        assert_eq!(
            table.resolve("done", "file:///proj/sub.inc", 1).unwrap().line,
            1
        );
    }

    #[test]
    fn reopening_a_scope_drops_the_previous_one() {
        let lines: &[&str] = &[
            "A:  SUBROUTINE",  // 0
            "X:  LDI 1",       // 1
            "B:  SUBROUTINE",  // 2  A never closed; tracking moves to B
            "Y:  LDI 2",       // 3
            "    ENDSUB",      // 4
        ];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);
        assert_eq!(table.subroutines["a"].end_line, None);
        assert_eq!(table.subroutines["b"].end_line, Some(4));
        // B's name was registered while A was still open, so it landed in
        // the globals as the declaring label of a subroutine.
        assert_eq!(table.resolve("y", MAIN, 3).unwrap().line, 3);
    }

    #[test]
    fn end_to_end_scenario() {
        let lines: &[&str] = &[
            "START: SUBROUTINE",
            " LDI 5",
            " STR",
            "LOOP: BR LOOP",
            " ENDSUB",
        ];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);

        let sub = &table.subroutines["start"];
        assert_eq!((sub.start_line, sub.end_line), (0, Some(4)));
        assert_eq!(table.resolve("LOOP", MAIN, 3).unwrap().line, 3);
        for line in [0, 2, 4, 10] {
            assert_eq!(table.resolve("START", MAIN, line).unwrap().line, 0);
        }
    }

    #[test]
    fn equ_labels_register_where_defined() {
        let lines: &[&str] = &[
            "CR:    EQU 0DH",
            "S:     SUBROUTINE",
            "LF:    EQU 0AH",
            "       ENDSUB",
        ];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);
        assert_eq!(table.resolve("cr", MAIN, 3).unwrap().line, 0);
        // LF is local to S.
        assert_eq!(table.resolve("lf", MAIN, 2).unwrap().line, 2);
        assert_eq!(table.resolve("lf", MAIN, 50), None);
    }

    #[test]
    fn macro_definition_text_includes_doc_comments_and_body() {
        let lines: &[&str] = &[
            "",                        // 0
            ";; Clear the screen.",    // 1
            ";; Clobbers D.",          // 2
            "CLS:  MACRO",             // 3
            "      LDI 0",             // 4
            "",                        // 5  blank line inside body is dropped
            "      ENDM",              // 6
        ];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);
        let text = table.macro_definition(&source, "cls").unwrap();
        assert_eq!(text.line, 3);
        assert_eq!(
            text.text,
            ";; Clear the screen.\n;; Clobbers D.\nCLS:  MACRO\n      LDI 0\n      ENDM"
        );
    }

    #[test]
    fn subroutine_definition_text_is_declaration_only() {
        let lines: &[&str] = &[
            ";; Write D to the terminal.",  // 0
            "PUTC:  SUBROUTINE",            // 1
            "       OUT 3",                 // 2
            "       ENDSUB",                // 3
        ];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);
        let text = table.subroutine_definition(&source, "PUTC").unwrap();
        assert_eq!(text.line, 1);
        assert_eq!(text.text, ";; Write D to the terminal.\nPUTC:  SUBROUTINE");
    }

    #[test]
    fn comment_only_and_directive_lines_contribute_nothing() {
        let lines: &[&str] = &[
            "; just a comment",
            "#ifdef DEBUG",
            "#endif",
            "   ",
        ];
        let source = MapSource::new(&[(MAIN, lines)]);
        let table = build(&source);
        assert!(table.globals.is_empty());
        assert!(table.macros.is_empty());
        assert!(table.subroutines.is_empty());
    }
}
