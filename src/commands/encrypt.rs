use crate::pdf::{crypt, PdfDocument};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    opts: &crypt::EncryptOptions,
    output: Q,
) -> Result<()> {
    let mut doc = PdfDocument::open(&input)?;

    crypt::encrypt_document(&mut doc.doc, opts)?;
    PdfDocument::save(&mut doc.doc, output.as_ref())?;

    println!("Encrypted {}", output.as_ref().display());

    Ok(())
}
