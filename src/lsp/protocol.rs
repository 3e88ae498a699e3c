// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::io::{self, BufRead, BufReader, Write};

use serde_json::{json, Value};

use crate::lsp::session::{LspSession, OutboundMessage};

/// Run the language server over stdio until the client disconnects or
/// sends `exit`.
pub fn run_stdio() -> io::Result<()> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut writer = io::BufWriter::new(stdout.lock());
    let mut session = LspSession::new();

    while let Some(message) = read_lsp_message(&mut reader)? {
        for item in session.handle_message(&message) {
            write_lsp_message(&mut writer, &outbound_to_json(item))?;
        }
        writer.flush()?;
        if session.should_exit() {
            break;
        }
    }
    Ok(())
}

fn read_lsp_message(reader: &mut impl BufRead) -> io::Result<Option<Value>> {
    loop {
        let mut content_length: Option<usize> = None;

        loop {
            let mut line = String::new();
            let read = reader.read_line(&mut line)?;
            if read == 0 {
                return Ok(None);
            }
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.is_empty() {
                break;
            }
            if let Some((name, value)) = trimmed.split_once(':') {
                if name.eq_ignore_ascii_case("Content-Length") {
                    content_length = value.trim().parse::<usize>().ok();
                }
            }
        }

        // A header block without Content-Length cannot be framed; skip it
        // and try the next message.
        let Some(length) = content_length else {
            continue;
        };
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body)?;
        let value = serde_json::from_slice::<Value>(&body).unwrap_or_else(|_| json!({}));
        return Ok(Some(value));
    }
}

fn write_lsp_message(writer: &mut impl Write, payload: &Value) -> io::Result<()> {
    let body = payload.to_string();
    write!(writer, "Content-Length: {}\r\n\r\n{}", body.len(), body)
}

fn outbound_to_json(message: OutboundMessage) -> Value {
    match message {
        OutboundMessage::Response { id, result } => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result,
        }),
        OutboundMessage::Error { id, code, message } => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": code,
                "message": message,
            }
        }),
        OutboundMessage::Notification { method, params } => json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_framed_message() {
        let body = r#"{"method":"initialized"}"#;
        let framed = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);
        let mut reader = Cursor::new(framed.into_bytes());
        let message = read_lsp_message(&mut reader).unwrap().unwrap();
        assert_eq!(message["method"], "initialized");
        assert!(read_lsp_message(&mut reader).unwrap().is_none());
    }

    #[test]
    fn skips_header_block_without_content_length() {
        let body = r#"{"id":1}"#;
        let framed = format!("X-Custom: 1\r\n\r\nContent-Length: {}\r\n\r\n{}", body.len(), body);
        let mut reader = Cursor::new(framed.into_bytes());
        let message = read_lsp_message(&mut reader).unwrap().unwrap();
        assert_eq!(message["id"], 1);
    }

    #[test]
    fn writes_framed_message() {
        let mut out = Vec::new();
        write_lsp_message(&mut out, &json!({"id": 1})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Content-Length: 8\r\n\r\n{\"id\":1}");
    }

    #[test]
    fn error_responses_carry_code_and_message() {
        let value = outbound_to_json(OutboundMessage::Error {
            id: json!(3),
            code: -32601,
            message: "method not found: x".to_string(),
        });
        assert_eq!(value["error"]["code"], -32601);
        assert_eq!(value["id"], 3);
    }
}
