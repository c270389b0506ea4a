use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

/// Print every info dictionary entry, not just the standard keys.
pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let doc = PdfDocument::open(&path)?;

    let entries = doc.info_entries();
    if entries.is_empty() {
        println!("No metadata");
        return Ok(());
    }

    for (key, value) in entries {
        println!("{}: {}", key, value);
    }

    Ok(())
}
