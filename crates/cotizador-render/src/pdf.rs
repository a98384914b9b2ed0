//! # PDF Output
//!
//! Lays a [`QuoteDocument`] out on a single A4 page and writes it as PDF.
//!
//! ## Page Geometry
//! ```text
//!   0mm ┌─────────────────────────────────────────┐
//!       │ ┌──────┐ logo: x=10mm y=8mm w=40mm      │
//!  10mm │ │ logo │   Title (centered)             │ ← first line
//!       │ └──────┘                                │
//!       │ ▏Folio: COT 0042                        │ ← x = 11mm
//!       │ ▏...          one line per 10mm pitch   │
//!       │                                         │
//! 287mm │ - - - - - - - bottom margin - - - - - - │
//! 297mm └─────────────────────────────────────────┘
//! ```
//!
//! When the content is taller than the printable area the line pitch and
//! gaps shrink by a common factor, so the quote never spills onto a second
//! page. Text is set in the standard Helvetica faces with WinAnsi encoding.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::{debug, info};

use crate::document::{Block, QuoteDocument};
use crate::error::{RenderError, RenderResult};
use crate::fonts::{self, Face};
use crate::logo::{load_logo, ColorSpace, ImageFilter, LogoImage};

/// MIME type of the rendered output.
pub const PDF_MIME: &str = "application/pdf";

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 10.0;
const CELL_PADDING_MM: f64 = 1.0;
const LINE_PITCH_MM: f64 = 10.0;

const LOGO_X_MM: f64 = 10.0;
const LOGO_Y_MM: f64 = 8.0;
const LOGO_WIDTH_MM: f64 = 40.0;

const TITLE_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 12.0;
const NOTE_SIZE: f64 = 11.0;

fn pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

fn real(value: f64) -> Object {
    Object::Real(value as _)
}

// =============================================================================
// Layout
// =============================================================================

/// A text run placed on the page, in points from the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub face: Face,
    pub size: f64,
    pub x: f64,
    pub baseline: f64,
    pub text: String,
}

/// Result of laying out a document.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub texts: Vec<PlacedText>,
    /// Factor applied to pitch and gaps; 1.0 unless the content overflowed.
    pub scale: f64,
}

enum Row {
    Text { face: Face, size: f64, centered: bool, text: String },
    Gap(f64),
}

/// Positions every text run of `document`.
pub fn layout(document: &QuoteDocument) -> PageLayout {
    let text_width_pt = pt(PAGE_WIDTH_MM - 2.0 * MARGIN_MM - 2.0 * CELL_PADDING_MM);

    let mut rows = Vec::new();
    for block in document.blocks() {
        match block {
            Block::Title(text) => rows.push(Row::Text {
                face: Face::Bold,
                size: TITLE_SIZE,
                centered: true,
                text: text.clone(),
            }),
            Block::Line(text) => rows.push(Row::Text {
                face: Face::Regular,
                size: BODY_SIZE,
                centered: false,
                text: text.clone(),
            }),
            Block::Gap(mm) => rows.push(Row::Gap(*mm)),
            Block::Note(text) => rows.extend(
                fonts::wrap(Face::Oblique, NOTE_SIZE, text, text_width_pt)
                    .into_iter()
                    .map(|line| Row::Text {
                        face: Face::Oblique,
                        size: NOTE_SIZE,
                        centered: false,
                        text: line,
                    }),
            ),
        }
    }

    let natural: f64 = rows
        .iter()
        .map(|row| match row {
            Row::Text { .. } => LINE_PITCH_MM,
            Row::Gap(mm) => *mm,
        })
        .sum();
    let available = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;
    let scale = if natural > available {
        available / natural
    } else {
        1.0
    };
    if scale < 1.0 {
        debug!(natural_mm = natural, scale, "Compressing line pitch to fit one page");
    }

    let pitch = LINE_PITCH_MM * scale;
    let page_width_pt = pt(PAGE_WIDTH_MM);
    let page_height_pt = pt(PAGE_HEIGHT_MM);
    let mut top_mm = MARGIN_MM;
    let mut texts = Vec::new();

    for row in rows {
        match row {
            Row::Gap(mm) => top_mm += mm * scale,
            Row::Text { face, size, centered, text } => {
                // vertically centered in its cell
                let baseline_mm = top_mm + pitch / 2.0 + 0.3 * size * 25.4 / 72.0;
                let x = if centered {
                    (page_width_pt - fonts::text_width(face, size, &text)) / 2.0
                } else {
                    pt(MARGIN_MM + CELL_PADDING_MM)
                };
                texts.push(PlacedText {
                    face,
                    size,
                    x,
                    baseline: page_height_pt - pt(baseline_mm),
                    text,
                });
                top_mm += pitch;
            }
        }
    }

    PageLayout { texts, scale }
}

// =============================================================================
// Renderer
// =============================================================================

/// Where and how the quote was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub path: PathBuf,
    pub mime: &'static str,
    pub size: u64,
}

/// Writes quote documents as one-page PDFs.
///
/// ## Example
/// ```rust,no_run
/// use cotizador_render::PdfRenderer;
///
/// let renderer = PdfRenderer::new("cotizacion.pdf").with_logo("logo_mcsi.png");
/// assert_eq!(renderer.output_path().to_str(), Some("cotizacion.pdf"));
/// ```
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    output_path: PathBuf,
    logo_path: Option<PathBuf>,
}

impl PdfRenderer {
    /// A renderer writing to `output_path`, without a logo.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        PdfRenderer {
            output_path: output_path.into(),
            logo_path: None,
        }
    }

    /// Places the logo at `path` when the file exists and is usable.
    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = Some(path.into());
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Renders and writes the document, replacing any previous file.
    pub fn render(&self, document: &QuoteDocument) -> RenderResult<RenderedDocument> {
        let bytes = self.to_bytes(document)?;

        fs::write(&self.output_path, &bytes).map_err(|source| RenderError::Write {
            path: self.output_path.clone(),
            source,
        })?;

        info!(
            path = %self.output_path.display(),
            size = bytes.len(),
            "Quote document written"
        );

        Ok(RenderedDocument {
            path: self.output_path.clone(),
            mime: PDF_MIME,
            size: bytes.len() as u64,
        })
    }

    /// Renders the document to PDF bytes without touching the output path.
    pub fn to_bytes(&self, document: &QuoteDocument) -> RenderResult<Vec<u8>> {
        let logo = self.logo_path.as_deref().and_then(load_logo);
        let page = layout(document);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for face in Face::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource(), font_id);
        }

        let mut resources = dictionary! { "Font" => fonts };
        let mut operations = Vec::new();

        if let Some(logo) = &logo {
            let image_id = doc.add_object(image_stream(logo));
            resources.set("XObject", dictionary! { "Im1" => image_id });
            operations.extend(logo_operations(logo));
        }

        for placed in &page.texts {
            operations.extend(text_operations(placed));
        }

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let resources_id = doc.add_object(resources);

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1_i64,
                "MediaBox" => vec![
                    real(0.0),
                    real(0.0),
                    real(pt(PAGE_WIDTH_MM)),
                    real(pt(PAGE_HEIGHT_MM)),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(fonts::encode_win_ansi(document.title()), StringFormat::Literal),
            "Producer" => Object::string_literal("cotizador"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| RenderError::Encode(e.to_string()))?;

        debug!(
            texts = page.texts.len(),
            scale = page.scale,
            logo = logo.is_some(),
            bytes = bytes.len(),
            "PDF encoded"
        );
        Ok(bytes)
    }
}

// =============================================================================
// Content Stream Helpers
// =============================================================================

fn text_operations(placed: &PlacedText) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(placed.face.resource().as_bytes().to_vec()), real(placed.size)],
        ),
        Operation::new("Td", vec![real(placed.x), real(placed.baseline)]),
        Operation::new(
            "Tj",
            vec![Object::String(
                fonts::encode_win_ansi(&placed.text),
                StringFormat::Literal,
            )],
        ),
        Operation::new("ET", vec![]),
    ]
}

fn logo_operations(logo: &LogoImage) -> Vec<Operation> {
    let width = pt(LOGO_WIDTH_MM);
    let height = width * logo.aspect();
    let x = pt(LOGO_X_MM);
    let y = pt(PAGE_HEIGHT_MM - LOGO_Y_MM) - height;

    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![real(width), real(0.0), real(0.0), real(height), real(x), real(y)],
        ),
        Operation::new("Do", vec![Object::Name(b"Im1".to_vec())]),
        Operation::new("Q", vec![]),
    ]
}

fn image_stream(logo: &LogoImage) -> Stream {
    let color_space = match &logo.color_space {
        ColorSpace::Gray => Object::Name(b"DeviceGray".to_vec()),
        ColorSpace::Rgb => Object::Name(b"DeviceRGB".to_vec()),
        ColorSpace::Cmyk => Object::Name(b"DeviceCMYK".to_vec()),
        ColorSpace::Indexed(palette) => Object::Array(vec![
            Object::Name(b"Indexed".to_vec()),
            Object::Name(b"DeviceRGB".to_vec()),
            Object::Integer((palette.len() / 3) as i64 - 1),
            Object::String(palette.clone(), StringFormat::Hexadecimal),
        ]),
    };

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(logo.width),
        "Height" => i64::from(logo.height),
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8_i64,
    };

    match logo.filter {
        ImageFilter::Dct => {
            dict.set("Filter", "DCTDecode");
            if logo.color_space == ColorSpace::Cmyk {
                // Adobe CMYK JPEGs are stored inverted
                dict.set(
                    "Decode",
                    Object::Array((0..4).flat_map(|_| [real(1.0), real(0.0)]).collect()),
                );
            }
        }
        ImageFilter::Flate { png_predictor } => {
            dict.set("Filter", "FlateDecode");
            if png_predictor {
                dict.set(
                    "DecodeParms",
                    dictionary! {
                        "Predictor" => 15_i64,
                        "Colors" => i64::from(logo.color_space.components()),
                        "BitsPerComponent" => 8_i64,
                        "Columns" => i64::from(logo.width),
                    },
                );
            }
        }
    }

    Stream::new(dict, logo.data.clone()).with_compression(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use cotizador_core::validation::validate_form;
    use cotizador_core::{Folio, PricingPolicy, PricingTier, Quote, QuoteForm};
    use tempfile::TempDir;

    fn document(duration: u32, items: usize) -> QuoteDocument {
        let mut form = QuoteForm::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        form.client_name = "Ana".into();
        form.email = "ana@example.com".into();
        form.phone = "5512345678".into();
        form.start_time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        form.duration_hours = duration;
        form.equipment = (1..=items).map(|i| format!("Equipo {i}")).collect();
        let request = validate_form(&form).unwrap();

        let policy = PricingPolicy::default();
        let quote = Quote::new(
            Folio::new(7),
            policy.price(items, PricingTier::Normal).unwrap(),
        );
        QuoteDocument::compose(&request, &quote, form.service_date, policy.tax_rate)
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_layout_natural_pitch() {
        let page = layout(&document(4, 3));
        assert_eq!(page.scale, 1.0);

        let folio = &page.texts[1];
        let client = &page.texts[3];
        assert_eq!(folio.text, "Folio: COT 0007");
        assert!((folio.baseline - client.baseline - 2.0 * pt(LINE_PITCH_MM)).abs() < 1e-6);
        assert!((folio.x - pt(11.0)).abs() < 1e-9);

        let title = &page.texts[0];
        assert_eq!(title.face, Face::Bold);
        assert!(title.x > folio.x);
    }

    #[test]
    fn test_layout_compresses_to_one_page() {
        let page = layout(&document(12, 40));
        assert!(page.scale < 1.0);

        let bottom = pt(MARGIN_MM);
        for text in &page.texts {
            assert!(text.baseline > bottom, "{} falls off the page", text.text);
        }
        assert!(page.texts.last().unwrap().face == Face::Oblique);
    }

    #[test]
    fn test_note_wraps_inside_margins() {
        let page = layout(&document(11, 1));
        let note: Vec<_> = page.texts.iter().filter(|t| t.face == Face::Oblique).collect();
        assert!(note.len() >= 2);

        let limit = pt(PAGE_WIDTH_MM - MARGIN_MM - CELL_PADDING_MM);
        for line in note {
            assert!(line.x + fonts::text_width(line.face, line.size, &line.text) <= limit);
        }
    }

    #[test]
    fn test_render_writes_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cotizacion.pdf");
        fs::write(&path, b"previous").unwrap();

        let rendered = PdfRenderer::new(&path)
            .with_logo(dir.path().join("missing.png"))
            .render(&document(4, 2))
            .unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(rendered.path, path);
        assert_eq!(rendered.mime, "application/pdf");
        assert_eq!(rendered.size, bytes.len() as u64);
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, b"Folio: COT 0007"));
        assert!(contains(&bytes, b"Total: $3,240.00"));
        assert!(contains(&bytes, b"Helvetica-Bold"));
        assert!(contains(&bytes, b"WinAnsiEncoding"));
        assert!(!contains(&bytes, b"/Im1"));
    }

    #[test]
    fn test_volume_note_in_output() {
        let renderer = PdfRenderer::new("unused.pdf");
        let short = renderer.to_bytes(&document(10, 1)).unwrap();
        let long = renderer.to_bytes(&document(11, 1)).unwrap();

        assert!(!contains(&short, b"Nota: Por tratarse"));
        assert!(contains(&long, b"Nota: Por tratarse"));
        assert!(contains(&long, b"Helvetica-Oblique"));
    }

    #[test]
    fn test_logo_embedded() {
        let dir = TempDir::new().unwrap();
        let logo = dir.path().join("logo_mcsi.png");
        fs::write(&logo, crate::logo::tests::png(2, 2, 2, &[0; 12])).unwrap();

        let bytes = PdfRenderer::new("unused.pdf")
            .with_logo(&logo)
            .to_bytes(&document(4, 1))
            .unwrap();

        assert!(contains(&bytes, b"/Im1"));
        assert!(contains(&bytes, b"DeviceRGB"));
        assert!(contains(&bytes, b"Predictor"));
    }

    #[test]
    fn test_unwritable_output() {
        let dir = TempDir::new().unwrap();
        let result = PdfRenderer::new(dir.path().join("no").join("such").join("q.pdf"))
            .render(&document(4, 1));
        assert!(matches!(result, Err(RenderError::Write { .. })));
    }
}
