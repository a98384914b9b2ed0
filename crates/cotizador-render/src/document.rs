//! # Quote Document
//!
//! Pure composition of the printable quote: which text goes on the page, in
//! what order and in which style. No layout arithmetic and no I/O happen
//! here; see [`crate::pdf`] for that.
//!
//! ## Content Order
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ [logo]                                       │
//! │        Cotización de Renta de Maquinaria     │  Title (bold 14)
//! │                                              │  Gap 10mm
//! │ Folio: COT 0042                              │
//! │ Fecha de solicitud: 01/06/2024               │
//! │ Cliente / Correo / Teléfono                  │
//! │                                              │  Gap 5mm
//! │ Fecha del servicio / Hora de inicio          │
//! │ Duración estimada / Tipo de tarifa aplicada  │
//! │                                              │  Gap 5mm
//! │ Equipos solicitados:                         │
//! │ - Retroexcavadora                            │
//! │                                              │  Gap 5mm
//! │ Subtotal / IVA (8%) / Total                  │
//! │                                              │  Gap 5mm    ┐ only when
//! │ Nota: Por tratarse de un período ...         │  Note       ┘ > 10 hours
//! └──────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use cotizador_core::{Quote, QuoteRequest, TaxRate, DATE_FORMAT, VOLUME_NOTE_THRESHOLD_HOURS};

/// Document title.
pub const TITLE: &str = "Cotización de Renta de Maquinaria";

/// Advisory paragraph for long rentals.
pub const VOLUME_NOTE: &str = "Nota: Por tratarse de un período de renta superior a 10 días, \
     puede solicitar una propuesta ajustada según volumen. Nuestro equipo con gusto le \
     atenderá para ofrecerle condiciones preferenciales.";

/// One vertical element of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Bold 14pt, centered.
    Title(String),
    /// Regular 12pt, left aligned, one line pitch.
    Line(String),
    /// Blank vertical space in millimetres.
    Gap(f64),
    /// Italic 11pt paragraph, wrapped to the page width.
    Note(String),
}

/// The composed quote, ready for a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteDocument {
    title: String,
    blocks: Vec<Block>,
}

impl QuoteDocument {
    /// Composes the document for an issued quote.
    ///
    /// `issued_on` is printed as the request date; `tax_rate` only labels the
    /// IVA line, the amount comes from `quote`.
    pub fn compose(
        request: &QuoteRequest,
        quote: &Quote,
        issued_on: NaiveDate,
        tax_rate: TaxRate,
    ) -> Self {
        let mut blocks = vec![Block::Title(TITLE.to_string()), Block::Gap(10.0)];

        let mut line = |text: String| blocks.push(Block::Line(text));
        line(format!("Folio: {}", quote.folio));
        line(format!("Fecha de solicitud: {}", issued_on.format(DATE_FORMAT)));
        line(format!("Cliente: {}", request.client_name()));
        line(format!("Correo: {}", request.email()));
        line(format!("Teléfono: {}", request.phone()));

        blocks.push(Block::Gap(5.0));
        let mut line = |text: String| blocks.push(Block::Line(text));
        line(format!("Fecha del servicio: {}", request.service_date_label()));
        line(format!("Hora de inicio: {}", request.start_time_label()));
        line(format!("Duración estimada: {} horas", request.duration_hours()));
        line(format!("Tipo de tarifa aplicada: {}", quote.tier.label()));

        blocks.push(Block::Gap(5.0));
        blocks.push(Block::Line("Equipos solicitados:".to_string()));
        blocks.extend(
            request
                .equipment()
                .iter()
                .map(|item| Block::Line(format!("- {item}"))),
        );

        blocks.push(Block::Gap(5.0));
        blocks.push(Block::Line(format!("Subtotal: {}", quote.subtotal)));
        blocks.push(Block::Line(format!(
            "IVA ({}): {}",
            tax_rate.percent_label(),
            quote.tax
        )));
        blocks.push(Block::Line(format!("Total: {}", quote.total)));

        if request.duration_hours() > VOLUME_NOTE_THRESHOLD_HOURS {
            blocks.push(Block::Gap(5.0));
            blocks.push(Block::Note(VOLUME_NOTE.to_string()));
        }

        QuoteDocument {
            title: format!("{TITLE} {}", quote.folio),
            blocks,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Title for the document metadata, including the folio.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Every printed text, in page order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Title(text) | Block::Line(text) | Block::Note(text) => Some(text.as_str()),
            Block::Gap(_) => None,
        })
    }

    pub fn has_volume_note(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::Note(_)))
    }
}
