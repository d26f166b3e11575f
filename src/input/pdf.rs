//! PDF text and link extraction
//!
//! Text is pulled per page with `lopdf` so page order is preserved, with a
//! whole-document `pdf-extract` fallback for files whose content streams
//! `lopdf` cannot decode. Link URIs come from each page's `/Annots` entries,
//! which plain text extractors do not surface.

use crate::error::{Result, ResumeRankerError};
use log::{debug, warn};
use lopdf::{Document, Object};

/// Extractor output: page-ordered text plus embedded link URIs in
/// page-then-annotation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedText {
    pub pages: Vec<String>,
    pub links: Vec<String>,
}

impl ExtractedText {
    pub fn from_text(text: String) -> Self {
        Self {
            pages: vec![text],
            links: Vec::new(),
        }
    }

    /// Concatenated text of all pages in page order.
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}

/// Extract page text and link annotations from an in-memory PDF.
pub fn extract_pdf(bytes: &[u8]) -> Result<ExtractedText> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ResumeRankerError::DocumentParse(format!("not a valid PDF: {}", e)))?;

    let mut pages = Vec::new();
    for (page_num, _page_id) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(text) => pages.push(text),
            Err(e) => {
                debug!("no text recovered from page {}: {}", page_num, e);
                pages.push(String::new());
            }
        }
    }

    let mut extracted = ExtractedText {
        links: extract_links(&doc),
        pages,
    };

    // Some generators produce content streams lopdf cannot decode; retry the
    // whole buffer with pdf-extract before declaring the document textless.
    if extracted.is_empty() {
        match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) if !text.trim().is_empty() => {
                extracted.pages = vec![text];
            }
            Ok(_) => {}
            Err(e) => warn!("fallback text extraction failed: {}", e),
        }
    }

    Ok(extracted)
}

/// Walk every page's `/Annots` array and collect `/A` → `/URI` action targets.
fn extract_links(doc: &Document) -> Vec<String> {
    let mut links = Vec::new();

    for (_page_num, page_id) in doc.get_pages() {
        let annots = match doc
            .get_dictionary(page_id)
            .and_then(|page| page.get(b"Annots"))
        {
            Ok(annots) => annots,
            Err(_) => continue,
        };
        let annots = match resolve(doc, annots).as_array() {
            Ok(annots) => annots,
            Err(_) => continue,
        };

        for annot in annots {
            if let Some(uri) = annotation_uri(doc, annot) {
                links.push(uri);
            }
        }
    }

    links
}

fn annotation_uri(doc: &Document, annot: &Object) -> Option<String> {
    let annot = resolve(doc, annot).as_dict().ok()?;
    let action = resolve(doc, annot.get(b"A").ok()?).as_dict().ok()?;

    let uri = match resolve(doc, action.get(b"URI").ok()?) {
        Object::String(bytes, _) => String::from_utf8_lossy(bytes).into_owned(),
        _ => return None,
    };
    if uri.is_empty() {
        None
    } else {
        Some(uri)
    }
}

/// Follow an indirect reference to its target object.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn pdf_with_links(uris: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let annot_ids: Vec<Object> = uris
            .iter()
            .map(|uri| {
                doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "A" => dictionary! {
                        "S" => "URI",
                        "URI" => Object::string_literal(*uri),
                    },
                })
                .into()
            })
            .collect();

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Annots" => annot_ids,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_invalid_bytes_fail_parse() {
        let result = extract_pdf(b"this is not a pdf");
        assert!(matches!(result, Err(ResumeRankerError::DocumentParse(_))));
    }

    #[test]
    fn test_link_annotations_in_order() {
        let bytes = pdf_with_links(&[
            "https://linkedin.com/in/janedoe",
            "https://github.com/janedoe",
        ]);

        let extracted = extract_pdf(&bytes).unwrap();
        assert_eq!(
            extracted.links,
            vec![
                "https://linkedin.com/in/janedoe".to_string(),
                "https://github.com/janedoe".to_string(),
            ]
        );
    }

    #[test]
    fn test_pages_without_content_yield_empty_text() {
        let bytes = pdf_with_links(&["https://github.com/janedoe"]);
        let extracted = extract_pdf(&bytes).unwrap();
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_from_text_carries_no_links() {
        let extracted = ExtractedText::from_text("plain resume".to_string());
        assert_eq!(extracted.text(), "plain resume");
        assert!(extracted.links.is_empty());
    }
}
