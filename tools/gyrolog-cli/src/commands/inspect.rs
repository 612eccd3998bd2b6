//! Summarize a CSV export.

use std::path::PathBuf;

use gyrolog_common::clock::format_elapsed;
use gyrolog_export::{read_csv_file, summarize};

pub fn run(path: PathBuf, json: bool) -> anyhow::Result<()> {
    let samples = read_csv_file(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;

    let Some(summary) = summarize(&samples) else {
        println!("{}: no samples", path.display());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Recording: {}", path.display());
    println!("  Samples: {}", summary.samples);
    println!(
        "  Duration: {} ({} ms)",
        format_elapsed(summary.duration_ms()),
        summary.duration_ms()
    );
    match summary.sample_rate_hz() {
        Some(hz) => println!("  Mean rate: {hz:.1} Hz"),
        None => println!("  Mean rate: n/a"),
    }
    println!();

    println!("  {:<12} {:>12} {:>12} {:>12}", "Column", "Min", "Max", "Mean");
    for column in &summary.columns {
        println!(
            "  {:<12} {:>12.4} {:>12.4} {:>12.4}",
            column.name, column.min, column.max, column.mean
        );
    }

    Ok(())
}
