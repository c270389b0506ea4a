pub mod crypt;
pub mod document;
pub mod merge;

pub use document::PdfDocument;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF {path}: {source}")]
    Load { path: String, source: lopdf::Error },

    #[error("Failed to save PDF {path}: {source}")]
    Save { path: String, source: lopdf::Error },

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Document structure error: {0}")]
    Malformed(String),
}

/// A quarter-turn page rotation, always clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Right, // 90°
    Down,  // 180°
    Left,  // 270°
}

impl Rotation {
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            90 => Some(Rotation::Right),
            180 => Some(Rotation::Down),
            270 => Some(Rotation::Left),
            _ => None,
        }
    }

    pub fn degrees(self) -> i64 {
        match self {
            Rotation::Right => 90,
            Rotation::Down => 180,
            Rotation::Left => 270,
        }
    }
}

/// Partition zero-based parser output against a document of `total` pages.
///
/// Returns `(selected, skipped)`, both as 1-based page numbers with the
/// input order preserved. Indices past the end of the document land in
/// `skipped` so callers can warn instead of failing the whole operation.
pub fn select_pages(indices: &[u32], total: u32) -> (Vec<u32>, Vec<u32>) {
    let mut selected = Vec::new();
    let mut skipped = Vec::new();
    for &idx in indices {
        if idx < total {
            selected.push(idx + 1);
        } else {
            skipped.push(idx + 1);
        }
    }
    (selected, skipped)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_pages_partitions() {
        let (selected, skipped) = select_pages(&[0, 1, 2, 9, 11], 10);
        assert_eq!(selected, vec![1, 2, 3, 10]);
        assert_eq!(skipped, vec![12]);
    }

    #[test]
    fn test_select_pages_all_in_bounds() {
        let (selected, skipped) = select_pages(&[0, 4], 5);
        assert_eq!(selected, vec![1, 5]);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(Rotation::from_degrees(90), Some(Rotation::Right));
        assert_eq!(Rotation::from_degrees(180), Some(Rotation::Down));
        assert_eq!(Rotation::from_degrees(270), Some(Rotation::Left));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::from_degrees(0), None);
        assert_eq!(Rotation::Left.degrees(), 270);
    }
}
