// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Shared text utilities for line scanning.

/// Check if a character can appear in a label or mnemonic token.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check if a character is line-internal whitespace (space or tab).
#[inline]
pub fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Strip the trailing comment and whitespace from a raw source line.
///
/// A `;` starts a comment unless it appears inside a single- or
/// double-quoted string. Inside a string, `\` escapes exactly the next
/// character; the escaped character is copied verbatim and never opens or
/// closes a quote. Unterminated quotes are not an error, the scan simply
/// runs to the end of the line in whatever state it reached.
pub fn trim(input: &str) -> String {
    let mut in_single = false;
    let mut in_double = false;
    let mut in_escape = false;
    let mut output = String::with_capacity(input.len());

    for ch in input.chars() {
        if in_escape {
            in_escape = false;
            output.push(ch);
            continue;
        }
        if in_single {
            output.push(ch);
            match ch {
                '\\' => in_escape = true,
                '\'' => in_single = false,
                _ => {}
            }
            continue;
        }
        if in_double {
            output.push(ch);
            match ch {
                '\\' => in_escape = true,
                '"' => in_double = false,
                _ => {}
            }
            continue;
        }
        match ch {
            ';' => break,
            '\'' => {
                in_single = true;
                output.push(ch);
            }
            '"' => {
                in_double = true;
                output.push(ch);
            }
            _ => output.push(ch),
        }
    }

    output.trim_end_matches([' ', '\t', '\r', '\n']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_comment_and_trailing_whitespace() {
        assert_eq!(trim("mov r1,2 ; comment"), "mov r1,2");
        assert_eq!(trim("  ldi 5\t"), "  ldi 5");
        assert_eq!(trim("; full line comment"), "");
        assert_eq!(trim(""), "");
    }

    #[test]
    fn semicolon_inside_string_is_preserved() {
        assert_eq!(trim("mov r1, \"a;b\""), "mov r1, \"a;b\"");
        assert_eq!(trim("db 'x;y' ; trailing"), "db 'x;y'");
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        assert_eq!(trim("db \"a\\\";b\" ; c"), "db \"a\\\";b\"");
        assert_eq!(trim("db 'don\\'t;x'"), "db 'don\\'t;x'");
    }

    #[test]
    fn quote_of_other_kind_is_literal_inside_string() {
        assert_eq!(trim("db \"it's ; fine\""), "db \"it's ; fine\"");
        assert_eq!(trim("db '\" ; still quoted'"), "db '\" ; still quoted'");
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        assert_eq!(trim("db \"open ; not a comment"), "db \"open ; not a comment");
        assert_eq!(trim("db 'open   "), "db 'open");
    }

    proptest! {
        #[test]
        fn trim_is_idempotent(input in ".*") {
            let once = trim(&input);
            prop_assert_eq!(trim(&once), once.clone());
        }

        #[test]
        fn trim_never_grows(input in ".*") {
            prop_assert!(trim(&input).len() <= input.len());
        }
    }
}
