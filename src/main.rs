//! compdoc CLI — run the extraction engine over checked-program snapshots.
//!
//! Two modes:
//!
//! - **stdin mode**: `compdoc < snapshot.json` prints entity records to stdout
//! - **file mode**: `compdoc -o docs/api snapshots/*.json` writes one `.json`
//!   per snapshot

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use compdoc::{EntityDoc, ExtractOptions, Extractor, FixtureProgram};

#[derive(Parser)]
#[command(
    name = "compdoc",
    about = "Extract component documentation records from checked-program snapshots"
)]
struct Cli {
    /// Snapshot files (glob patterns supported). If omitted, reads one
    /// snapshot from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Collapse unions of string literals into enumerated value sets
    #[arg(long)]
    enum_literals: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: read one snapshot from stdin, write entity JSON to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let program =
        FixtureProgram::from_str(&input).context("failed to parse snapshot from stdin")?;
    let docs = extract_all(&program, cli.enum_literals);
    println!("{}", serde_json::to_string_pretty(&docs)?);
    Ok(())
}

/// file mode: process multiple snapshots, write one output file each.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let input_files = expand_globs(&cli.files)?;

    for path in &input_files {
        let program = FixtureProgram::from_path(path)
            .with_context(|| format!("failed to load snapshot: {}", path.display()))?;
        let docs = extract_all(&program, cli.enum_literals);

        let name = derive_output_name(path);
        let out_path = output_dir.join(format!("{}.json", name));
        let mut json = serde_json::to_string_pretty(&docs)?;
        json.push('\n');
        fs::write(&out_path, json)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// Extract every module in the snapshot, in the snapshot's stable order.
fn extract_all(program: &FixtureProgram, enum_literals: bool) -> Vec<EntityDoc> {
    let opts = ExtractOptions {
        extract_literal_values_from_enum: enum_literals,
        name_resolver: None,
    };
    let modules = program.module_names();
    Extractor::with_options(program, opts).extract(&modules)
}

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for snapshot files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directory: take the .json files inside (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("json") {
                    files.push(p);
                }
            }
            continue;
        }
        // Try as glob
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Output file name (without extension) for a snapshot path.
/// "snapshots/button.json" → "button"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_from_json() {
        assert_eq!(
            derive_output_name(Path::new("snapshots/button.json")),
            "button"
        );
        assert_eq!(derive_output_name(Path::new("button.json")), "button");
    }

    #[test]
    fn output_name_no_extension() {
        assert_eq!(derive_output_name(Path::new("Makefile")), "Makefile");
    }
}
