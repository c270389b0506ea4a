use crate::commands::warn_skipped;
use crate::pdf::{select_pages, PdfDocument};
use crate::ranges::parse_groups;
use anyhow::{Context, Result};
use std::path::Path;

/// Split a document into one output file per comma-separated group of the
/// range expression: "1-3,10-12" produces two files, not one merged set.
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    ranges: &str,
    output_dir: Q,
    prefix: &str,
) -> Result<()> {
    let output_dir = output_dir.as_ref();

    let doc = PdfDocument::open(&input)?;
    let total = doc.page_count();

    // Parse every group before any file is written
    let groups = parse_groups(ranges, Some(total))?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let mut written = 0;
    for (position, group) in groups.iter().enumerate() {
        let (selected, skipped) = select_pages(group, total);
        warn_skipped(&skipped, total);
        if selected.is_empty() {
            continue;
        }

        // File numbers track the group's position in the expression, so a
        // fully out-of-range group leaves a gap rather than renumbering
        // everything after it
        let output_path = output_dir.join(format!("{}_{:02}.pdf", prefix, position + 1));

        let mut new_doc = doc.extract_pages(&selected)?;
        PdfDocument::save(&mut new_doc, &output_path)?;
        println!("Saved: {}", output_path.display());
        written += 1;
    }

    println!(
        "Split {} into {} file(s) in {}",
        input.as_ref().display(),
        written,
        output_dir.display()
    );

    Ok(())
}
