use crate::commands::warn_skipped;
use crate::pdf::{select_pages, PdfDocument, Rotation};
use crate::ranges::parse_ranges;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    pages: &str,
    angle: u32,
    output: Q,
) -> Result<()> {
    let Some(rotation) = Rotation::from_degrees(angle) else {
        anyhow::bail!("Rotation angle must be 90, 180 or 270, got {}", angle);
    };

    let mut doc = PdfDocument::open(&input)?;
    let total = doc.page_count();

    let indices = parse_ranges(pages, Some(total))?;
    let (selected, skipped) = select_pages(&indices, total);
    warn_skipped(&skipped, total);

    if selected.is_empty() {
        anyhow::bail!("No pages selected");
    }

    doc.rotate_pages(&selected, rotation)?;
    PdfDocument::save(&mut doc.doc, output.as_ref())?;

    println!(
        "Rotated {} page(s) by {}° into {}",
        selected.len(),
        angle,
        output.as_ref().display()
    );

    Ok(())
}
