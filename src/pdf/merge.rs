use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

use super::PdfError;

/// Merge documents into one, appending pages in input order.
///
/// The first document is the base. Every later document has its objects
/// remapped past the destination's max_id so references never collide, then
/// its pages are appended and the root page tree rebuilt.
pub fn merge_documents(documents: Vec<Document>) -> Result<Document, PdfError> {
    if documents.is_empty() {
        return Err(PdfError::Malformed("no documents to merge".to_string()));
    }

    let mut documents = documents;
    let mut dest = documents.remove(0);
    if documents.is_empty() {
        return Ok(dest);
    }

    let mut dest_max_id = dest.max_id;
    let mut dest_page_refs: Vec<ObjectId> = dest.get_pages().values().copied().collect();

    for source in documents {
        let source_pages: Vec<ObjectId> = source.get_pages().values().copied().collect();

        let id_offset = dest_max_id;

        let mut remapped_objects = BTreeMap::new();
        for (old_id, object) in source.objects.into_iter() {
            let new_id = (old_id.0 + id_offset, old_id.1);
            remapped_objects.insert(new_id, remap_object_refs(object, id_offset));
        }
        for (id, object) in remapped_objects {
            dest.objects.insert(id, object);
        }

        for old_page_ref in source_pages {
            dest_page_refs.push((old_page_ref.0 + id_offset, old_page_ref.1));
        }

        dest_max_id = (source.max_id + id_offset).max(dest_max_id);
    }

    update_page_tree(&mut dest, dest_page_refs)?;
    dest.max_id = dest_max_id;

    // Source catalogs and page-tree nodes are unreachable now
    dest.prune_objects();
    dest.compress();

    Ok(dest)
}

/// Recursively remap object references in an object
fn remap_object_refs(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(arr) => Object::Array(
            arr.into_iter()
                .map(|o| remap_object_refs(o, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Point the destination's root page tree at the full page list and reparent
/// every page to it.
fn update_page_tree(doc: &mut Document, page_refs: Vec<ObjectId>) -> Result<(), PdfError> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| PdfError::Malformed("no document catalog".to_string()))?;

    let pages_id = doc
        .get_dictionary(catalog_id)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|_| PdfError::Malformed("catalog has no page tree".to_string()))?;

    {
        let pages_dict = doc
            .get_dictionary_mut(pages_id)
            .map_err(|_| PdfError::Malformed("invalid page tree dictionary".to_string()))?;

        let kids = page_refs
            .iter()
            .map(|&id| Object::Reference(id))
            .collect::<Vec<_>>();
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(page_refs.len() as i64));
    }

    // Appended pages still point at their old parents
    for page_id in page_refs {
        if let Ok(page_dict) = doc.get_dictionary_mut(page_id) {
            page_dict.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok(())
}
