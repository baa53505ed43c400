//! Structural PDF edits: applying a crop box to the first page.
//!
//! Works entirely on in-memory byte buffers. The edit is atomic: either the
//! whole re-serialized document comes back, or an error does and the caller
//! keeps whatever artifact it already had.

use lopdf::{Document, Object, ObjectId};

use crate::error::{CropError, Result};
use crate::geometry::{CropBox, PageGeometry};

/// Loads `source`, sets the first page's `/CropBox` to `crop`, and
/// re-serializes the full document. Every other page, resource, and piece of
/// metadata is carried over untouched; only the one page dictionary gains
/// the new box.
pub fn apply_crop(source: &[u8], crop: CropBox) -> Result<Vec<u8>> {
    let mut doc = Document::load_mem(source)?;
    let page_id = first_page_id(&doc)?;

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page_dict.set(
        "CropBox",
        Object::Array(vec![
            crop.x.into(),
            crop.y.into(),
            (crop.x + crop.width).into(),
            (crop.y + crop.height).into(),
        ]),
    );

    let mut output = Vec::new();
    doc.save_to(&mut output)?;
    Ok(output)
}

/// Read-only peek at the first page's intrinsic size, from `/MediaBox`
/// (following `/Parent` inheritance).
pub fn page_geometry(source: &[u8]) -> Result<PageGeometry> {
    let doc = Document::load_mem(source)?;
    let page_id = first_page_id(&doc)?;
    let [llx, lly, urx, ury] = page_rect(&doc, page_id, b"MediaBox")?;

    Ok(PageGeometry::new(urx - llx, ury - lly))
}

/// Reads the first page's `/CropBox` back out of a document, used to verify
/// applied output.
pub fn crop_box(source: &[u8]) -> Result<CropBox> {
    let doc = Document::load_mem(source)?;
    let page_id = first_page_id(&doc)?;
    let [llx, lly, urx, ury] = page_rect(&doc, page_id, b"CropBox")?;

    Ok(CropBox {
        x: llx,
        y: lly,
        width: urx - llx,
        height: ury - lly,
    })
}

/// Number of pages in the document.
pub fn page_count(source: &[u8]) -> Result<usize> {
    let doc = Document::load_mem(source)?;
    Ok(doc.get_pages().len())
}

fn first_page_id(doc: &Document) -> Result<ObjectId> {
    doc.get_pages()
        .values()
        .next()
        .copied()
        .ok_or(CropError::PageAccess)
}

/// Resolves a four-number rectangle entry on a page dictionary, walking the
/// `/Parent` chain for inheritable keys. A page whose geometry cannot be
/// resolved is not addressable for cropping.
fn page_rect(doc: &Document, page_id: ObjectId, key: &[u8]) -> Result<[f32; 4]> {
    let mut dict = doc.get_object(page_id)?.as_dict()?;

    loop {
        if let Ok(entry) = dict.get(key) {
            let array = match entry {
                Object::Reference(id) => doc.get_object(*id)?.as_array()?,
                other => other.as_array()?,
            };
            if array.len() == 4 {
                if let (Some(llx), Some(lly), Some(urx), Some(ury)) = (
                    obj_to_f32(&array[0]),
                    obj_to_f32(&array[1]),
                    obj_to_f32(&array[2]),
                    obj_to_f32(&array[3]),
                ) {
                    return Ok([llx, lly, urx, ury]);
                }
            }
            return Err(CropError::PageAccess);
        }

        match dict.get(b"Parent") {
            Ok(parent) => dict = doc.get_object(parent.as_reference()?)?.as_dict()?,
            Err(_) => return Err(CropError::PageAccess),
        }
    }
}

fn obj_to_f32(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    /// Minimal single-page document with an inherited MediaBox.
    fn single_page_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize test pdf");
        bytes
    }

    fn zero_page_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize test pdf");
        bytes
    }

    #[test]
    fn geometry_follows_parent_inheritance() {
        let page = page_geometry(&single_page_pdf()).unwrap();
        assert_eq!(page, PageGeometry::new(612.0, 792.0));
    }

    #[test]
    fn apply_crop_round_trips() {
        let crop = CropBox {
            x: 102.0,
            y: 537.0,
            width: 204.0,
            height: 153.0,
        };

        let output = apply_crop(&single_page_pdf(), crop).unwrap();
        let restored = crop_box(&output).unwrap();

        assert!((restored.x - crop.x).abs() < 1e-6);
        assert!((restored.y - crop.y).abs() < 1e-6);
        assert!((restored.width - crop.width).abs() < 1e-6);
        assert!((restored.height - crop.height).abs() < 1e-6);
    }

    #[test]
    fn cropped_output_is_still_loadable() {
        let crop = CropBox {
            x: 0.0,
            y: 0.0,
            width: 612.0,
            height: 792.0,
        };
        let output = apply_crop(&single_page_pdf(), crop).unwrap();
        assert_eq!(page_count(&output).unwrap(), 1);
        assert_eq!(
            page_geometry(&output).unwrap(),
            PageGeometry::new(612.0, 792.0)
        );
    }

    #[test]
    fn malformed_bytes_fail_to_load() {
        let err = apply_crop(b"definitely not a pdf", CropBox {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        })
        .unwrap_err();
        assert!(matches!(err, CropError::Load(_)));
    }

    #[test]
    fn zero_page_document_is_rejected() {
        let err = apply_crop(&zero_page_pdf(), CropBox {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        })
        .unwrap_err();
        assert!(matches!(err, CropError::PageAccess));
    }
}
