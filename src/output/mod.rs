use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::pipeline::FetchResult;

/// Write text to a file verbatim, as plain UTF-8 with no header or format.
pub fn save_text(content: &str, path: &Path) -> Result<()> {
    fs_err::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Print a fetched transcript and its synopsis under section headings.
pub fn print_fetch(result: &FetchResult, sentence_count: usize) {
    println!("{}", style("=== Full Transcript ===").bold());
    println!("{}", result.transcript);
    println!();
    println!(
        "{}",
        style(format!("=== Summary (first {} sentences) ===", sentence_count)).bold()
    );
    println!("{}", result.synopsis);
}

/// Print an analysis report to the console.
pub fn print_report(report: &str) {
    println!("{}", report);
}
