// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint: inspect symbol tables without an editor attached.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use asm1802::core::source::{path_to_file_uri, DocumentSource, FileSource};
use asm1802::core::symbols::{build_symbol_table, Block, SymbolTable};

#[derive(Parser, Debug)]
#[command(name = "asm1802", version, about = "CDP1802 assembly symbol inspector")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Extra directories searched for include files.
    #[arg(short = 'I', long = "include-path", global = true)]
    include_paths: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dump the symbol table built from a source file and its includes.
    Symbols {
        /// Root source file.
        file: PathBuf,
    },
    /// Resolve a name as seen from a line of the given file.
    Resolve {
        /// Root source file.
        file: PathBuf,
        /// Zero-based line number the name is used from.
        line: usize,
        /// Name to resolve.
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Symbols { file } => run_symbols(&file, &cli.include_paths),
        Command::Resolve { file, line, name } => {
            run_resolve(&file, line, &name, &cli.include_paths)
        }
    }
}

fn build_for_file(file: &Path, include_paths: &[PathBuf]) -> Result<(String, SymbolTable), String> {
    let uri = path_to_file_uri(file);
    let source = FileSource;
    if source.lines(&uri).is_none() {
        return Err(format!("cannot read {}", file.display()));
    }
    let table = build_symbol_table(&source, &uri, include_paths);
    for note in &table.diagnostics {
        eprintln!("asm1802: {note}");
    }
    Ok((uri, table))
}

fn run_symbols(file: &Path, include_paths: &[PathBuf]) -> ExitCode {
    let (_, table) = match build_for_file(file, include_paths) {
        Ok(built) => built,
        Err(message) => {
            eprintln!("asm1802: {message}");
            return ExitCode::FAILURE;
        }
    };

    println!("SUBROUTINES");
    for (name, block) in sorted_blocks(&table.subroutines) {
        println!("{name} : {}", block_span(block));
        for (local, definition) in sorted(&block.symbols) {
            println!("    {local} : {} ({})", definition.uri, definition.line);
        }
    }
    println!("GLOBALS");
    for (name, definition) in sorted(&table.globals) {
        println!("    {name} : {} ({})", definition.uri, definition.line);
    }
    println!("MACROS");
    for (name, block) in sorted_blocks(&table.macros) {
        println!("{name} : {}", block_span(block));
    }
    ExitCode::SUCCESS
}

fn run_resolve(file: &Path, line: usize, name: &str, include_paths: &[PathBuf]) -> ExitCode {
    let (uri, table) = match build_for_file(file, include_paths) {
        Ok(built) => built,
        Err(message) => {
            eprintln!("asm1802: {message}");
            return ExitCode::FAILURE;
        }
    };
    match table.resolve(name, &uri, line) {
        Some(definition) => {
            println!("{} ({})", definition.uri, definition.line);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("asm1802: unresolved: {name}");
            ExitCode::FAILURE
        }
    }
}

fn block_span(block: &Block) -> String {
    match block.end_line {
        Some(end) => format!("{} ({}-{})", block.uri, block.start_line, end),
        None => format!("{} ({}-eof)", block.uri, block.start_line),
    }
}

fn sorted<'a, V>(map: &'a std::collections::HashMap<String, V>) -> Vec<(&'a str, &'a V)> {
    let mut items: Vec<(&str, &V)> = map.iter().map(|(key, value)| (key.as_str(), value)).collect();
    items.sort_by_key(|(key, _)| *key);
    items
}

fn sorted_blocks<'a>(
    map: &'a std::collections::HashMap<String, Block>,
) -> Vec<(&'a str, &'a Block)> {
    sorted(map)
}
