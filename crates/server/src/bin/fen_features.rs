//! Print classifier feature vectors for FEN strings.
//!
//! Usage: cargo run --bin fen-features -- "<fen>" ["<fen>" ...]
//!        cargo run --bin fen-features < positions.txt
//!
//! Emits one JSON object per input line. Exits with status 1 if any FEN
//! could not be encoded.

use std::io::{self, BufRead, Write};

use chess_core::extract_features;
use serde_json::{json, Value as JsonValue};
use server::error::AppError;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    if args.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (record, ok) = feature_record(&line);
            writeln!(out, "{record}")?;
            failures += usize::from(!ok);
        }
    } else {
        for fen in &args {
            let (record, ok) = feature_record(fen);
            writeln!(out, "{record}")?;
            failures += usize::from(!ok);
        }
    }
    out.flush()?;

    if failures > 0 {
        eprintln!("{failures} position(s) could not be encoded");
        std::process::exit(1);
    }
    Ok(())
}

fn feature_record(fen: &str) -> (JsonValue, bool) {
    match extract_features(fen) {
        Ok(features) => (json!({ "fen": fen, "features": features }), true),
        Err(_) => (json!({ "fen": fen, "error": AppError::InvalidPosition.to_string() }), false),
    }
}
