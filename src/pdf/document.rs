use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use std::collections::HashSet;
use std::path::Path;

use super::{PdfError, Rotation};

pub struct PdfDocument {
    pub doc: Document,
    #[allow(dead_code)]
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PdfError> {
        let path_str = path.as_ref().display().to_string();
        let doc = Document::load(&path).map_err(|source| PdfError::Load {
            path: path_str.clone(),
            source,
        })?;
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get metadata from the document info dictionary
    pub fn get_info(&self) -> PdfInfo {
        let mut info = PdfInfo::default();

        if let Some(dict) = self.info_dict() {
            info.title = get_string_from_dict(dict, b"Title");
            info.author = get_string_from_dict(dict, b"Author");
            info.subject = get_string_from_dict(dict, b"Subject");
            info.keywords = get_string_from_dict(dict, b"Keywords");
            info.creator = get_string_from_dict(dict, b"Creator");
            info.producer = get_string_from_dict(dict, b"Producer");
            info.creation_date = get_string_from_dict(dict, b"CreationDate");
            info.mod_date = get_string_from_dict(dict, b"ModDate");
        }

        info.page_count = self.page_count();
        info
    }

    /// Every entry of the info dictionary in order, including non-standard
    /// keys, for raw metadata display.
    pub fn info_entries(&self) -> Vec<(String, String)> {
        let Some(dict) = self.info_dict() else {
            return Vec::new();
        };
        dict.iter()
            .map(|(key, value)| {
                let key = String::from_utf8_lossy(key).into_owned();
                let value = match value {
                    Object::String(bytes, _) => {
                        decode_pdf_string(bytes).unwrap_or_else(|| format!("{:?}", value))
                    }
                    other => format!("{:?}", other),
                };
                (key, value)
            })
            .collect()
    }

    /// Merge the provided fields into the info dictionary, creating it if
    /// the document has none. Entries not named by `update` are preserved.
    pub fn set_info(&mut self, update: &MetadataUpdate) {
        let mut dict = match self.info_dict() {
            Some(existing) => existing.clone(),
            None => Dictionary::new(),
        };

        for (key, value) in [
            (b"Title".as_slice(), &update.title),
            (b"Author".as_slice(), &update.author),
            (b"Subject".as_slice(), &update.subject),
            (b"Keywords".as_slice(), &update.keywords),
        ] {
            if let Some(value) = value {
                dict.set(key, encode_pdf_string(value));
            }
        }

        let info_id = self.doc.add_object(Object::Dictionary(dict));
        self.doc.trailer.set("Info", Object::Reference(info_id));
    }

    /// Extract the given 1-based pages into a new document, preserving the
    /// original. Callers pass in-bounds page numbers only.
    pub fn extract_pages(&self, page_numbers: &[u32]) -> Result<Document, PdfError> {
        let keep: HashSet<u32> = page_numbers.iter().copied().collect();
        let total = self.page_count();

        let pages_to_delete: Vec<u32> = (1..=total).filter(|n| !keep.contains(n)).collect();

        let mut new_doc = self.doc.clone();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        // Drop resources only the deleted pages referenced
        new_doc.prune_objects();
        new_doc.compress();

        Ok(new_doc)
    }

    /// Rotate the given 1-based pages in place, adding to any rotation the
    /// page already carries.
    pub fn rotate_pages(
        &mut self,
        page_numbers: &[u32],
        rotation: Rotation,
    ) -> Result<(), PdfError> {
        let pages = self.doc.get_pages();
        let ids: Vec<ObjectId> = page_numbers
            .iter()
            .filter_map(|n| pages.get(n).copied())
            .collect();

        for page_id in ids {
            let current = self.page_rotation(page_id);
            let new_rotation = (current + rotation.degrees()).rem_euclid(360);
            let dict = self.doc.get_dictionary_mut(page_id).map_err(|e| {
                PdfError::Malformed(format!("cannot access page dictionary: {}", e))
            })?;
            dict.set("Rotate", Object::Integer(new_rotation));
        }
        Ok(())
    }

    /// Save to a file, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<(), PdfError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PdfError::Malformed(format!(
                        "cannot create output directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        doc.save(path).map_err(|source| PdfError::Save {
            path: path.display().to_string(),
            source: lopdf::Error::IO(source),
        })?;
        Ok(())
    }

    fn info_dict(&self) -> Option<&Dictionary> {
        match self.doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => match self.doc.get_object(*id).ok()? {
                Object::Dictionary(dict) => Some(dict),
                _ => None,
            },
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Effective /Rotate for a page, walking /Parent for inherited values.
    fn page_rotation(&self, page_id: ObjectId) -> i64 {
        let mut current = page_id;
        loop {
            let Ok(dict) = self.doc.get_object(current).and_then(Object::as_dict) else {
                return 0;
            };
            if let Ok(rotate) = dict.get(b"Rotate").and_then(Object::as_i64) {
                return rotate;
            }
            match dict.get(b"Parent").and_then(Object::as_reference) {
                Ok(parent) => current = parent,
                Err(_) => return 0,
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
    pub page_count: u32,
}

#[derive(Debug, Default, Clone)]
pub struct MetadataUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
}

impl MetadataUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
    }
}

fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => None,
    })
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    // Check for UTF-16 BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        // UTF-16 BE
        let u16_chars: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|chunk| {
                if chunk.len() == 2 {
                    Some(u16::from_be_bytes([chunk[0], chunk[1]]))
                } else {
                    None
                }
            })
            .collect();
        String::from_utf16(&u16_chars).ok()
    } else {
        // Try as Latin-1 / PDFDocEncoding (simplified)
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}

/// Write-side mirror of decode_pdf_string: plain ASCII stays literal,
/// anything else becomes UTF-16 BE with a BOM.
fn encode_pdf_string(text: &str) -> Object {
    if text.is_ascii() {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::create_test_pdf;

    fn wrap(doc: Document) -> PdfDocument {
        PdfDocument {
            doc,
            path: "test.pdf".to_string(),
        }
    }

    #[test]
    fn test_page_count() {
        let doc = wrap(create_test_pdf(5));
        assert_eq!(doc.page_count(), 5);
    }

    #[test]
    fn test_extract_pages_keeps_selection() {
        let doc = wrap(create_test_pdf(5));
        let extracted = doc.extract_pages(&[2, 4]).unwrap();
        assert_eq!(extracted.get_pages().len(), 2);
        // Original untouched
        assert_eq!(doc.page_count(), 5);
    }

    #[test]
    fn test_extract_single_page() {
        let doc = wrap(create_test_pdf(3));
        let extracted = doc.extract_pages(&[1]).unwrap();
        assert_eq!(extracted.get_pages().len(), 1);
    }

    #[test]
    fn test_rotate_sets_rotate_key() {
        let mut doc = wrap(create_test_pdf(3));
        doc.rotate_pages(&[2], Rotation::Right).unwrap();

        let pages = doc.doc.get_pages();
        let rotated = doc.doc.get_dictionary(pages[&2]).unwrap();
        assert_eq!(rotated.get(b"Rotate").unwrap().as_i64().unwrap(), 90);

        // Unselected pages stay unrotated
        let untouched = doc.doc.get_dictionary(pages[&1]).unwrap();
        assert!(untouched.get(b"Rotate").is_err());
    }

    #[test]
    fn test_rotate_accumulates_and_wraps() {
        let mut doc = wrap(create_test_pdf(1));
        doc.rotate_pages(&[1], Rotation::Left).unwrap();
        doc.rotate_pages(&[1], Rotation::Down).unwrap();

        let pages = doc.doc.get_pages();
        let dict = doc.doc.get_dictionary(pages[&1]).unwrap();
        // 270 + 180 = 450 -> 90
        assert_eq!(dict.get(b"Rotate").unwrap().as_i64().unwrap(), 90);
    }

    #[test]
    fn test_set_info_then_get_info() {
        let mut doc = wrap(create_test_pdf(2));
        doc.set_info(&MetadataUpdate {
            title: Some("Quarterly Report".to_string()),
            author: Some("Bureau".to_string()),
            ..Default::default()
        });

        let info = doc.get_info();
        assert_eq!(info.title.as_deref(), Some("Quarterly Report"));
        assert_eq!(info.author.as_deref(), Some("Bureau"));
        assert_eq!(info.subject, None);
        assert_eq!(info.page_count, 2);
    }

    #[test]
    fn test_set_info_preserves_existing_fields() {
        let mut doc = wrap(create_test_pdf(1));
        doc.set_info(&MetadataUpdate {
            title: Some("First".to_string()),
            author: Some("Original Author".to_string()),
            ..Default::default()
        });
        doc.set_info(&MetadataUpdate {
            title: Some("Second".to_string()),
            ..Default::default()
        });

        let info = doc.get_info();
        assert_eq!(info.title.as_deref(), Some("Second"));
        assert_eq!(info.author.as_deref(), Some("Original Author"));
    }

    #[test]
    fn test_info_entries_lists_all_keys() {
        let mut doc = wrap(create_test_pdf(1));
        doc.set_info(&MetadataUpdate {
            title: Some("T".to_string()),
            keywords: Some("k1, k2".to_string()),
            ..Default::default()
        });

        let entries = doc.info_entries();
        assert!(entries.iter().any(|(k, v)| k == "Title" && v == "T"));
        assert!(entries
            .iter()
            .any(|(k, v)| k == "Keywords" && v == "k1, k2"));
    }

    #[test]
    fn test_unicode_metadata_round_trip() {
        let mut doc = wrap(create_test_pdf(1));
        doc.set_info(&MetadataUpdate {
            title: Some("Résumé, naïve".to_string()),
            ..Default::default()
        });
        assert_eq!(doc.get_info().title.as_deref(), Some("Résumé, naïve"));
    }
}
