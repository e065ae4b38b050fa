//! PDF access built on lopdf (structure, page images) and pdf-extract (text layer).

use image::{DynamicImage, ImageBuffer, Luma, Rgb};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;
use tracing::{debug, trace};

use super::Result;
use crate::error::PdfError;

/// An opened PDF document.
///
/// Keeps both the parsed object tree (for page and image access) and the raw
/// bytes (pdf-extract works on the serialized form). Dropped at the end of a
/// single invocation; nothing is cached across documents.
pub struct PdfDocument {
    document: Document,
    raw_data: Vec<u8>,
}

impl PdfDocument {
    /// Open a PDF from a filesystem path.
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| PdfError::Parse(e.to_string()))?;
        Self::load(&data)
    }

    /// Load a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document =
            Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Empty-password encryption is common in generated documents; anything
        // stronger is rejected.
        let raw_data = if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");
            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(e.to_string()))?;
            decrypted
        } else {
            data.to_vec()
        };

        if document.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        Ok(Self { document, raw_data })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Extract the embedded text layer of the whole document.
    pub fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Recover the scanned raster of a page, if any.
    ///
    /// Scanned contracts carry one full-page image per page; when a page
    /// references several image XObjects the largest one wins. Pages whose
    /// resources reference no decodable image fall back to a document-order
    /// scan of all image streams.
    pub fn page_image(&self, page: u32) -> Result<Option<DynamicImage>> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        let mut candidates: Vec<DynamicImage> = Vec::new();
        if let Some(resources) = self.page_resources(page_id) {
            if let Ok(xobjects) = resources.get(b"XObject") {
                if let Ok((_, Object::Dictionary(xobjects))) =
                    self.document.dereference(xobjects)
                {
                    for (_name, reference) in xobjects.iter() {
                        if let Ok((_, object)) = self.document.dereference(reference) {
                            if let Some(image) = decode_image_object(&self.document, object) {
                                candidates.push(image);
                            }
                        }
                    }
                }
            }
        }

        if candidates.is_empty() {
            trace!("no XObject image on page {page}, scanning document streams");
            let mut all = self.all_images();
            if all.is_empty() {
                return Ok(None);
            }
            let index = ((page - 1) as usize).min(all.len() - 1);
            return Ok(Some(all.swap_remove(index)));
        }

        Ok(candidates
            .into_iter()
            .max_by_key(|image| u64::from(image.width()) * u64::from(image.height())))
    }

    /// Resolve the resource dictionary of a page, following Parent links for
    /// inherited resources.
    fn page_resources(&self, node: ObjectId) -> Option<Dictionary> {
        let mut current = Some(node);
        while let Some(id) = current {
            let Ok(Object::Dictionary(dict)) = self.document.get_object(id) else {
                return None;
            };
            if let Ok(resources) = dict.get(b"Resources") {
                if let Ok((_, Object::Dictionary(resources))) =
                    self.document.dereference(resources)
                {
                    return Some(resources.clone());
                }
            }
            current = match dict.get(b"Parent") {
                Ok(Object::Reference(parent)) => Some(*parent),
                _ => None,
            };
        }
        None
    }

    /// Decode every image stream in the document, in object order.
    fn all_images(&self) -> Vec<DynamicImage> {
        let mut images = Vec::new();
        for (_id, object) in self.document.objects.iter() {
            if let Some(image) = decode_image_object(&self.document, object) {
                images.push(image);
            }
        }
        debug!("found {} image streams in document", images.len());
        images
    }
}

/// Decode an image XObject stream into a raster.
///
/// Handles DCTDecode (JPEG) and uncompressed 8-bit DeviceRGB/DeviceGray data.
/// JPEG 2000 and fax encodings are skipped.
fn decode_image_object(doc: &Document, object: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = object else {
        return None;
    };
    let dict = &stream.dict;
    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
    let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;

    let filter = dict.get(b"Filter").ok().and_then(|f| match f {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(array) => array.first().and_then(|o| o.as_name().ok()),
        _ => None,
    });

    match filter {
        Some(b"DCTDecode") => {
            // Stream content is the JPEG itself.
            return image::load_from_memory_with_format(
                &stream.content,
                image::ImageFormat::Jpeg,
            )
            .ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("skipping {width}x{height} image with unsupported filter");
            return None;
        }
        _ => {}
    }

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        trace!("skipping image with {bits} bits per component");
        return None;
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(array) => array.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    match color_space {
        b"DeviceGray" | b"G" | b"CalGray" => {
            let expected = width as usize * height as usize;
            if data.len() < expected {
                return None;
            }
            ImageBuffer::<Luma<u8>, _>::from_raw(width, height, data[..expected].to_vec())
                .map(DynamicImage::ImageLuma8)
        }
        _ => {
            let expected = width as usize * height as usize * 3;
            if data.len() < expected {
                return None;
            }
            ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, data[..expected].to_vec())
                .map(DynamicImage::ImageRgb8)
        }
    }
}
