//! MusicXML structural diff CLI.
//!
//! Computes diff tokens between two XML documents and optionally projects
//! them back onto the documents as a colored overlay.

use std::fs;
use std::io::{self, BufWriter, Write};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use musicxml_diff::{compute_xml_diff_tokens, process_musicxml_diff};

/// MusicXML structural diff and overlay tool
#[derive(Parser)]
#[command(name = "mxd")]
#[command(version)]
#[command(about = "MusicXML structural diff and overlay tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute diff tokens between two documents and emit them as JSON
    #[command(visible_alias = "t")]
    Tokens {
        /// Old document
        old: String,
        /// New document
        new: String,
        /// Output file (default: stdout)
        output: Option<String>,
    },

    /// Compute tokens and write both documents with overlay coloring
    #[command(visible_alias = "o")]
    Overlay {
        /// Old document
        old: String,
        /// New document
        new: String,
        /// Output path for the colored old document
        old_out: String,
        /// Output path for the colored new document
        new_out: String,
    },
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tokens { old, new, output } => run_tokens(&old, &new, output.as_deref()),
        Commands::Overlay {
            old,
            new,
            old_out,
            new_out,
        } => run_overlay(&old, &new, &old_out, &new_out),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

/// Computes tokens and prints the JSON stream.
fn run_tokens(
    old_path: &str,
    new_path: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let old_xml = fs::read_to_string(old_path)?;
    let new_xml = fs::read_to_string(new_path)?;

    let tokens = compute_xml_diff_tokens(&old_xml, &new_xml)?;
    eprintln!("{} tokens", tokens.len());

    let mut output: Box<dyn Write> = match output_path {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    serde_json::to_writer_pretty(&mut output, &tokens)?;
    writeln!(output)?;

    Ok(())
}

/// Computes tokens, projects the overlay and writes both colored documents.
fn run_overlay(
    old_path: &str,
    new_path: &str,
    old_out: &str,
    new_out: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let old_xml = fs::read_to_string(old_path)?;
    let new_xml = fs::read_to_string(new_path)?;

    let tokens = compute_xml_diff_tokens(&old_xml, &new_xml)?;
    eprintln!("{} tokens", tokens.len());

    let result = process_musicxml_diff(&old_xml, &new_xml, &tokens)?;

    fs::write(old_out, &result.old_xml)?;
    fs::write(new_out, &result.new_xml)?;

    if result.unused_tokens.is_empty() {
        eprintln!("Overlay complete.");
    } else {
        eprintln!(
            "Overlay complete with {} unused tokens:",
            result.unused_tokens.len()
        );
        serde_json::to_writer_pretty(io::stderr(), &result.unused_tokens)?;
        eprintln!();
    }

    Ok(())
}
