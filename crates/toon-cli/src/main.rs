//! `toon` CLI — encode, decode, and inspect TOON documents from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to TOON (stdin -> stdout)
//! echo '{"name":"Alice","age":30}' | toon encode
//!
//! # Encode from file to file
//! toon encode -i data.json -o data.toon
//!
//! # Decode TOON back to pretty-printed JSON
//! toon decode -i data.toon
//!
//! # Decode leniently, reporting diagnostics instead of failing
//! toon decode --lenient -i data.toon
//!
//! # Show size statistics
//! toon stats -i data.json
//! ```

mod json;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};

use json::{json_to_value, value_to_json};

#[derive(Parser)]
#[command(
    name = "toon",
    version,
    about = "TOON (Token-Oriented Object Notation) CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to TOON format
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Field delimiter used inside tabular rows
        #[arg(long, default_value_t = ',')]
        delimiter: char,
        /// Omit the trailing ':' after a list's length header
        #[arg(long)]
        no_length_marker: bool,
    },
    /// Decode TOON back to JSON format
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Use the error-recovering decoder and print diagnostics to stderr
        /// instead of failing on the first malformed construct
        #[arg(long)]
        lenient: bool,
    },
    /// Show TOON-vs-JSON size statistics
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            delimiter,
            no_length_marker,
        } => {
            let json_text = read_input(input.as_deref())?;
            let json: serde_json::Value =
                serde_json::from_str(&json_text).context("Failed to parse JSON input")?;
            let value = json_to_value(json);
            let options = toon::EncodeOptions::default()
                .with_delimiter(delimiter)
                .with_length_marker(!no_length_marker);
            let toon_text = toon::encode(&value, &options).context("Failed to encode to TOON")?;
            write_output(output.as_deref(), &toon_text)?;
        }
        Commands::Decode {
            input,
            output,
            lenient,
        } => {
            let toon_text = read_input(input.as_deref())?;
            let value = if lenient {
                let (value, diagnostics) = toon::decode_lenient(&toon_text);
                for d in &diagnostics {
                    eprintln!("warning: line {}, column {}: {}", d.line, d.column, d.message);
                }
                value.unwrap_or(toon::Value::Null)
            } else {
                toon::decode_strict(&toon_text).context("Failed to decode TOON input")?
            };
            let json = value_to_json(&value);
            let pretty = serde_json::to_string_pretty(&json)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Stats { input } => {
            let json_text = read_input(input.as_deref())?;
            let json: serde_json::Value =
                serde_json::from_str(&json_text).context("Failed to parse JSON input")?;
            let value = json_to_value(json);
            let toon_text =
                toon::encode(&value, &toon::EncodeOptions::default()).context("Failed to encode to TOON")?;
            let json_bytes = json_text.len();
            let toon_bytes = toon_text.len();
            let ratio = if json_bytes > 0 {
                (1.0 - (toon_bytes as f64 / json_bytes as f64)) * 100.0
            } else {
                0.0
            };
            println!("JSON size:  {} bytes", json_bytes);
            println!("TOON size:  {} bytes", toon_bytes);
            println!("Reduction:  {:.1}%", ratio);
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
