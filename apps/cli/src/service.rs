//! # Quote Service
//!
//! Runs one submitted form through the whole pipeline.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  QuoteForm ──► validate_form ──✗──► Submission::Rejected(errors)        │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  1. pricing_tier(date, time)        Normal / Hora Extra / Día Festivo   │
//! │  2. PricingPolicy::price            subtotal, IVA, total                │
//! │  3. FolioSequencer::next_folio      COT 0042     ← counter file written │
//! │  4. PdfRenderer::render             cotizacion.pdf                      │
//! │  5. Ledger::append                  clientes.csv                        │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  Submission::Issued(IssuedQuote)                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Rollback
//! Steps 4 and 5 run after the folio is consumed. If either fails the counter
//! stays incremented (and the document may already be written); the failure
//! is logged with the folio so the operator can reconcile by hand.

use chrono::NaiveDate;
use cotizador_core::calendar::pricing_tier;
use cotizador_core::validation::validate_form;
use cotizador_core::{LedgerRecord, PricingPolicy, Quote, QuoteForm, QuoteRequest, ValidationError};
use cotizador_render::{PdfRenderer, QuoteDocument, RenderedDocument};
use cotizador_store::{FolioSequencer, Ledger};
use tracing::{debug, error, info};

use crate::error::AppResult;

/// Acknowledgment shown after a quote is issued.
pub const SUCCESS_MESSAGE: &str = "Cotización generada y guardada correctamente.";

/// A quote that went through every step.
#[derive(Debug, Clone)]
pub struct IssuedQuote {
    pub request: QuoteRequest,
    pub quote: Quote,
    pub document: RenderedDocument,
}

impl IssuedQuote {
    pub fn message(&self) -> &'static str {
        SUCCESS_MESSAGE
    }
}

/// Outcome of one form submission.
#[derive(Debug, Clone)]
pub enum Submission {
    /// The form was cancelled; nothing happened.
    NotSubmitted,
    /// The form was submitted with missing or invalid fields.
    Rejected(Vec<ValidationError>),
    /// Quote issued, rendered and recorded.
    Issued(IssuedQuote),
}

/// The quoting pipeline over a folio sequencer and a ledger.
pub struct QuoteService<F, L> {
    folios: F,
    ledger: L,
    renderer: PdfRenderer,
    policy: PricingPolicy,
}

impl<F: FolioSequencer, L: Ledger> QuoteService<F, L> {
    pub fn new(folios: F, ledger: L, renderer: PdfRenderer) -> Self {
        QuoteService {
            folios,
            ledger,
            renderer,
            policy: PricingPolicy::default(),
        }
    }

    pub fn folios(&self) -> &F {
        &self.folios
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Processes a form; `None` means the user cancelled it.
    ///
    /// `today` is printed on the document as the request date.
    pub fn submit(&mut self, form: Option<&QuoteForm>, today: NaiveDate) -> AppResult<Submission> {
        let Some(form) = form else {
            debug!("Form cancelled");
            return Ok(Submission::NotSubmitted);
        };

        let request = match validate_form(form) {
            Ok(request) => request,
            Err(errors) => {
                debug!(errors = errors.len(), "Form rejected");
                return Ok(Submission::Rejected(errors));
            }
        };

        let tier = pricing_tier(request.service_date(), request.start_time());
        let breakdown = self.policy.price(request.equipment().len(), tier)?;
        debug!(%tier, total = %breakdown.total, "Quote priced");

        let folio = self.folios.next_folio()?;
        let quote = Quote::new(folio, breakdown);
        info!(%folio, %tier, total = %quote.total, "Folio issued");

        match self.finish(&request, &quote, today) {
            Ok(document) => Ok(Submission::Issued(IssuedQuote {
                request,
                quote,
                document,
            })),
            Err(e) => {
                error!(%folio, error = %e, "Quote failed after its folio was issued");
                Err(e)
            }
        }
    }

    /// Steps that run after the folio is consumed.
    fn finish(
        &mut self,
        request: &QuoteRequest,
        quote: &Quote,
        today: NaiveDate,
    ) -> AppResult<RenderedDocument> {
        let document = QuoteDocument::compose(request, quote, today, self.policy.tax_rate);
        let rendered = self.renderer.render(&document)?;

        self.ledger.append(&LedgerRecord::from_quote(request, quote))?;
        info!(folio = %quote.folio, path = %rendered.path.display(), "Quote recorded");

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use cotizador_core::{Folio, PricingTier};
    use cotizador_store::{MemoryFolioSequencer, MemoryLedger};
    use tempfile::TempDir;

    fn form(date: (i32, u32, u32), hour: u32, equipment: &[&str]) -> QuoteForm {
        let service_date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        let mut form = QuoteForm::new(service_date);
        form.client_name = "Ana López".into();
        form.email = "ana@example.com".into();
        form.phone = "5512345678".into();
        form.start_time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
        form.equipment = equipment.iter().map(|s| s.to_string()).collect();
        form
    }

    fn service(dir: &TempDir) -> QuoteService<MemoryFolioSequencer, MemoryLedger> {
        QuoteService::new(
            MemoryFolioSequencer::new(),
            MemoryLedger::new(),
            PdfRenderer::new(dir.path().join("cotizacion.pdf")),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_cancelled_form_does_nothing() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir);

        let outcome = service.submit(None, today()).unwrap();
        assert!(matches!(outcome, Submission::NotSubmitted));
        assert_eq!(service.folios().current().unwrap(), None);
        assert!(!dir.path().join("cotizacion.pdf").exists());
    }

    #[test]
    fn test_rejected_form_consumes_no_folio() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir);
        let mut bad = form((2024, 6, 3), 9, &[]);
        bad.phone = "  ".into();

        let Submission::Rejected(errors) = service.submit(Some(&bad), today()).unwrap() else {
            panic!("expected rejection");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, ["phone", "equipment"]);
        assert_eq!(service.folios().current().unwrap(), None);
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn test_issue_weekday_morning() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir);
        // Monday 03/06/2024 at 09:00
        let request = form((2024, 6, 3), 9, &["Retroexcavadora", "Bailarina", "Generador"]);

        let Submission::Issued(issued) = service.submit(Some(&request), today()).unwrap() else {
            panic!("expected issue");
        };
        assert_eq!(issued.quote.folio, Folio::FIRST);
        assert_eq!(issued.quote.tier, PricingTier::Normal);
        assert_eq!(issued.quote.total.to_decimal_string(), "4860.00");
        assert_eq!(issued.message(), "Cotización generada y guardada correctamente.");
        assert_eq!(issued.document.mime, "application/pdf");
        assert!(issued.document.path.exists());

        let rows = service.ledger().records().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].folio, "COT 0001");
        assert_eq!(rows[0].equipment, "Retroexcavadora, Bailarina, Generador");
        assert_eq!(rows[0].total, "4860.00");
    }

    #[test]
    fn test_issue_overtime_and_sequence() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir);

        service
            .submit(Some(&form((2024, 6, 3), 9, &["Bailarina"])), today())
            .unwrap();
        // Tuesday 04/06/2024 at 16:00
        let outcome = service
            .submit(Some(&form((2024, 6, 4), 16, &["Bailarina", "Compactador"])), today())
            .unwrap();

        let Submission::Issued(issued) = outcome else {
            panic!("expected issue");
        };
        assert_eq!(issued.quote.folio.to_string(), "COT 0002");
        assert_eq!(issued.quote.tier, PricingTier::Overtime);
        assert_eq!(issued.quote.subtotal.to_decimal_string(), "3750.00");
        assert_eq!(issued.quote.total.to_decimal_string(), "4050.00");

        let folios: Vec<String> = service
            .ledger()
            .records()
            .unwrap()
            .into_iter()
            .map(|r| r.folio)
            .collect();
        assert_eq!(folios, ["COT 0001", "COT 0002"]);
    }

    #[test]
    fn test_render_failure_keeps_folio_consumed() {
        let dir = TempDir::new().unwrap();
        let mut service = QuoteService::new(
            MemoryFolioSequencer::new(),
            MemoryLedger::new(),
            PdfRenderer::new(dir.path().join("missing").join("cotizacion.pdf")),
        );

        let result = service.submit(Some(&form((2024, 6, 3), 9, &["Generador"])), today());
        assert!(matches!(result, Err(crate::error::AppError::Render(_))));
        assert_eq!(service.folios().current().unwrap(), Some(Folio::FIRST));
        assert!(service.ledger().is_empty());
    }
}
