use crate::pdf::{crypt, PdfDocument};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, password: &str, output: Q) -> Result<()> {
    let mut doc = PdfDocument::open(&input)?;

    crypt::decrypt_document(&mut doc.doc, password)?;
    PdfDocument::save(&mut doc.doc, output.as_ref())?;

    println!("Decrypted {}", output.as_ref().display());

    Ok(())
}
