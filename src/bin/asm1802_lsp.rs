// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

fn main() -> Result<(), Box<dyn std::error::Error>> {
    asm1802::lsp::protocol::run_stdio()?;
    Ok(())
}
