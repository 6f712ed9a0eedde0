//! Talus CLI — tokenize, parse, and check Talus source files.

mod render;
mod tree;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use talus_core::{parse_module, tokenize, Kind};

#[derive(Parser, Debug)]
#[command(name = "talus", version, about = "Talus compiler front end — tokenize, parse, and check source files")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Maximum width (in columns) of wrapped source-line excerpts in
    /// diagnostic output (§10.3).
    #[arg(long, global = true, default_value_t = 100)]
    max_width: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the logical token stream, one token per line.
    Tokenize {
        /// Source file to read, or `-` for stdin.
        file: PathBuf,
    },
    /// Parse a module and print its AST.
    Parse {
        /// Source file to read, or `-` for stdin.
        file: PathBuf,
        /// Print the AST as JSON instead of a pretty-printed tree.
        #[arg(long)]
        json: bool,
    },
    /// Parse a file and report diagnostics only.
    Check {
        /// Source file to read, or `-` for stdin.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Command::Tokenize { file } => cmd_tokenize(file),
        Command::Parse { file, json } => cmd_parse(file, *json),
        Command::Check { file } => cmd_check(file, cli.max_width),
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading source from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn filename_of(path: &Path) -> String {
    if path.as_os_str() == "-" { "<stdin>".to_string() } else { path.display().to_string() }
}

fn cmd_tokenize(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    for token in tokenize(&source, filename_of(path)) {
        let is_eof = token.kind == Kind::Eof;
        println!("{:?}({:?}) @ {}:{}", token.kind, token.text(), token.location.line, token.location.column);
        if is_eof {
            break;
        }
    }
    Ok(())
}

fn cmd_parse(path: &Path, json: bool) -> Result<()> {
    let source = read_source(path)?;
    let module = parse_module(tokenize(&source, filename_of(path)));
    if json {
        println!("{}", serde_json::to_string_pretty(&module).context("serialising AST to JSON")?);
    } else {
        print!("{}", tree::print_module(&module));
    }
    Ok(())
}

fn cmd_check(path: &Path, max_width: usize) -> Result<()> {
    let source = read_source(path)?;
    let module = parse_module(tokenize(&source, filename_of(path)));
    let diagnostics = tree::collect_diagnostics(&module);
    render::render_diagnostics(&source, &diagnostics, max_width);
    if render::has_errors(&diagnostics) {
        process::exit(1);
    }
    Ok(())
}
