use crate::pdf::{document::MetadataUpdate, PdfDocument};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    update: &MetadataUpdate,
    output: Q,
) -> Result<()> {
    if update.is_empty() {
        anyhow::bail!("No metadata fields given; use --title, --author, --subject or --keywords");
    }

    let mut doc = PdfDocument::open(&input)?;
    doc.set_info(update);
    PdfDocument::save(&mut doc.doc, output.as_ref())?;

    println!("Saved metadata to {}", output.as_ref().display());

    Ok(())
}
