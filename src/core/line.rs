// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Classification of trimmed source lines.
//!
//! Both classifiers expect input that already went through
//! [`crate::core::text_utils::trim`]; they never look for comments.

use crate::core::text_utils::{is_space, is_word_char};

/// A preprocessor directive line (`#include "file.asm"` and friends).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessorLine {
    pub directive: String,
    pub argument: Option<String>,
}

/// A normal source line split into its optional token positions.
///
/// A word starting in column 0 is a label (optionally `:`-suffixed); an
/// indented word is a mnemonic; operands are the free-form remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    pub operands: Option<String>,
}

/// Scope transitions encoded by the dialect's block mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMarker {
    SubroutineOpen,
    MacroOpen,
    SubroutineClose,
    MacroClose,
}

/// Map a mnemonic to the scope transition it encodes, if any.
pub fn scope_marker(mnemonic: &str) -> Option<ScopeMarker> {
    match mnemonic.to_ascii_uppercase().as_str() {
        "SUBROUTINE" | "SUB" => Some(ScopeMarker::SubroutineOpen),
        "MACRO" => Some(ScopeMarker::MacroOpen),
        "ENDSUB" => Some(ScopeMarker::SubroutineClose),
        "ENDM" | "ENDMACRO" => Some(ScopeMarker::MacroClose),
        _ => None,
    }
}

/// Classify a trimmed line as a preprocessor directive.
///
/// Grammar: optional leading `#`, a word naming the directive, then either
/// end of line or whitespace followed by the raw argument text.
pub fn classify_preprocessor(line: &str) -> Option<PreprocessorLine> {
    let chars: Vec<char> = line.chars().collect();
    let mut pos = 0usize;
    if chars.get(pos) == Some(&'#') {
        pos += 1;
    }
    let directive = take_word(&chars, &mut pos)?;
    if pos == chars.len() {
        return Some(PreprocessorLine {
            directive,
            argument: None,
        });
    }
    if !is_space(chars[pos]) {
        return None;
    }
    while pos < chars.len() && is_space(chars[pos]) {
        pos += 1;
    }
    let argument: String = chars[pos..].iter().collect();
    Some(PreprocessorLine {
        directive,
        argument: Some(argument),
    })
}

/// Classify a trimmed line into label / mnemonic / operand positions.
///
/// Returns `None` for blank lines and for lines that do not fit the
/// dialect grammar (the builder skips those silently).
pub fn classify_source_line(line: &str) -> Option<SourceLine> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let mut pos = 0usize;
    let label = if is_word_char(chars[0]) {
        let word = take_word(&chars, &mut pos)?;
        if chars.get(pos) == Some(&':') {
            pos += 1;
        }
        while pos < chars.len() && is_space(chars[pos]) {
            pos += 1;
        }
        Some(word)
    } else {
        while pos < chars.len() && is_space(chars[pos]) {
            pos += 1;
        }
        if pos == 0 {
            // Neither a label nor indentation; not a source line.
            return None;
        }
        None
    };

    if pos == chars.len() {
        // Whitespace-only lines carry no tokens at all.
        return label.map(|label| SourceLine {
            label: Some(label),
            mnemonic: None,
            operands: None,
        });
    }

    let mnemonic = take_word(&chars, &mut pos)?;
    if pos == chars.len() {
        return Some(SourceLine {
            label,
            mnemonic: Some(mnemonic),
            operands: None,
        });
    }
    if !is_space(chars[pos]) {
        return None;
    }
    while pos < chars.len() && is_space(chars[pos]) {
        pos += 1;
    }
    let operands: String = chars[pos..].iter().collect();
    Some(SourceLine {
        label,
        mnemonic: Some(mnemonic),
        operands: Some(operands),
    })
}

/// Extract the filename from an include argument (`"file"` or `<file>`).
///
/// The delimiters are not required to pair up, matching the dialect's
/// lenient grammar; the inner text must be non-empty and free of closing
/// delimiter characters.
pub fn include_argument(argument: &str) -> Option<&str> {
    let bytes = argument.as_bytes();
    if bytes.len() < 3 {
        return None;
    }
    if !matches!(bytes[0], b'<' | b'"') || !matches!(bytes[bytes.len() - 1], b'>' | b'"') {
        return None;
    }
    let inner = &argument[1..argument.len() - 1];
    if inner.is_empty() || inner.contains('>') || inner.contains('"') {
        return None;
    }
    Some(inner)
}

fn take_word(chars: &[char], pos: &mut usize) -> Option<String> {
    let start = *pos;
    while *pos < chars.len() && is_word_char(chars[*pos]) {
        *pos += 1;
    }
    if *pos == start {
        return None;
    }
    Some(chars[start..*pos].iter().collect())
}
