use crate::pdf::{merge::merge_documents, PdfDocument, PdfError};
use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;

pub fn run<P: AsRef<Path>>(inputs: &[P], output: P) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    if inputs.len() == 1 {
        // Just copy the single file
        std::fs::copy(&inputs[0], &output).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                inputs[0].as_ref().display(),
                output.as_ref().display()
            )
        })?;
        println!("Copied 1 file to {}", output.as_ref().display());
        return Ok(());
    }

    let mut docs = Vec::new();
    for input in inputs {
        let path = input.as_ref();
        let doc = Document::load(path).map_err(|source| PdfError::Load {
            path: path.display().to_string(),
            source,
        })?;
        docs.push(doc);
    }

    let mut merged = merge_documents(docs)?;
    let total_pages = merged.get_pages().len();

    PdfDocument::save(&mut merged, output.as_ref())?;

    println!(
        "Merged {} files ({} pages) into {}",
        inputs.len(),
        total_pages,
        output.as_ref().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::write_test_pdf;

    #[test]
    fn test_merge_appends_all_pages() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pdf");
        let b = dir.path().join("b.pdf");
        let out = dir.path().join("merged.pdf");
        write_test_pdf(2, &a);
        write_test_pdf(3, &b);

        run(&[a.as_path(), b.as_path()], out.as_path()).unwrap();

        let merged = PdfDocument::open(&out).unwrap();
        assert_eq!(merged.page_count(), 5);
    }

    #[test]
    fn test_merge_single_input_copies() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pdf");
        let out = dir.path().join("copy.pdf");
        write_test_pdf(4, &a);

        run(&[a.as_path()], out.as_path()).unwrap();

        assert_eq!(PdfDocument::open(&out).unwrap().page_count(), 4);
    }

    #[test]
    fn test_merge_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");
        let out = dir.path().join("merged.pdf");
        write_test_pdf(1, &dir.path().join("a.pdf"));

        let result = run(
            &[dir.path().join("a.pdf").as_path(), missing.as_path()],
            out.as_path(),
        );
        assert!(result.is_err());
        assert!(!out.exists());
    }
}
