//! # PDF Serializer
//!
//! Takes laid-out pages and writes a PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. The subset a ficha needs is small:
//! two standard Type1 fonts, filled and stroked paths, and text. Nothing is
//! embedded, so a page costs a few kilobytes.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- catalog, page tree, fonts, pages, content streams
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Output is deterministic: no timestamps or random IDs are written, so the
//! same pages always produce the same bytes.

pub mod canvas;

use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use miniz_oxide::deflate::compress_to_vec_zlib;
use tracing::debug;

use crate::error::FichaError;
use crate::font::{StandardFont, MM_PER_PT};
use crate::layout::LayoutPage;
use crate::model::Metadata;

pub use canvas::PdfCanvas;
use canvas::encode_text;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// `(font, object id)` in resource order: index `i` is `/F{i}`.
    font_objects: Vec<(StandardFont, usize)>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    ///
    /// Fails without producing any bytes if a page holds a non-finite
    /// coordinate.
    pub fn write(&self, pages: &[LayoutPage], metadata: &Metadata) -> Result<Vec<u8>, FichaError> {
        for (index, page) in pages.iter().enumerate() {
            if let Some(bad) = page.commands.iter().find(|c| !c.is_finite()) {
                return Err(FichaError::Render(format!(
                    "page {} has a non-finite coordinate in {:?}",
                    index + 1,
                    bad
                )));
            }
        }

        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, then content streams and page objects
        for _ in 0..3 {
            builder.objects.push(PdfObject { data: vec![] });
        }

        self.register_fonts(&mut builder);
        let font_resources = self.build_font_resource_dict(&builder.font_objects);

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in pages {
            let content = self.build_content_stream(page);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                page.width / MM_PER_PT,
                page.height / MM_PER_PT,
                content_obj_id,
                font_resources
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        // Info dictionary (metadata)
        let info_obj_id = builder.objects.len();
        let mut info = String::from("<< ");
        if let Some(ref title) = metadata.title {
            let _ = write!(info, "/Title ({}) ", encode_text(title));
        }
        if let Some(ref author) = metadata.author {
            let _ = write!(info, "/Author ({}) ", encode_text(author));
        }
        if let Some(ref subject) = metadata.subject {
            let _ = write!(info, "/Subject ({}) ", encode_text(subject));
        }
        let _ = write!(
            info,
            "/Producer (ficha {}) /Creator (ficha) >>",
            env!("CARGO_PKG_VERSION")
        );
        builder.objects.push(PdfObject {
            data: info.into_bytes(),
        });

        let bytes = self.serialize(&builder, info_obj_id);
        debug!(pages = pages.len(), bytes = bytes.len(), "pdf serialized");
        Ok(bytes)
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &LayoutPage) -> String {
        let mut canvas = PdfCanvas::new(page.height);
        page.replay(&mut canvas);
        canvas.finish()
    }

    /// Both faces are always registered so resource names never depend on
    /// page content.
    fn register_fonts(&self, builder: &mut PdfBuilder) {
        for font in StandardFont::ALL {
            let obj_id = builder.objects.len();
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: font_dict.into_bytes(),
            });
            builder.font_objects.push((font, obj_id));
        }
    }

    fn build_font_resource_dict(&self, font_objects: &[(StandardFont, usize)]) -> String {
        font_objects
            .iter()
            .map(|(font, obj_id)| format!("/{} {} 0 R", font.resource_name(), obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}
