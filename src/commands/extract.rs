use crate::commands::warn_skipped;
use crate::pdf::{select_pages, PdfDocument};
use crate::ranges::parse_ranges;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &str, output: Q) -> Result<()> {
    let doc = PdfDocument::open(&input)?;
    let total = doc.page_count();

    let indices = parse_ranges(pages, Some(total))?;
    let (selected, skipped) = select_pages(&indices, total);
    warn_skipped(&skipped, total);

    if selected.is_empty() {
        anyhow::bail!("No pages selected");
    }

    let mut new_doc = doc.extract_pages(&selected)?;
    PdfDocument::save(&mut new_doc, output.as_ref())?;

    println!(
        "Extracted {} page(s) to {}",
        selected.len(),
        output.as_ref().display()
    );

    Ok(())
}
