//! # Domain Types
//!
//! Core domain types used throughout Cotizador.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   QuoteForm     │──►│  QuoteRequest   │──►│     Quote       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  raw input      │   │  validated      │   │  folio          │       │
//! │  │  may be empty   │   │  immutable      │   │  tier, amounts  │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌────────▼────────┐       │
//! │  │    TaxRate      │   │  PricingTier    │   │  LedgerRecord   │       │
//! │  │  bps (u32)      │   │  Normal         │   │  one CSV row    │       │
//! │  │  800 = 8%       │   │  Overtime       │   │                 │       │
//! │  └─────────────────┘   │  Holiday        │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::pricing::PriceBreakdown;
use crate::{DATE_FORMAT, DEFAULT_DURATION_HOURS, FOLIO_PREFIX, FOLIO_WIDTH, TIME_FORMAT};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the 8% IVA line is `TaxRate::from_bps(800)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Whole-percent label for documents, e.g. `8%` or `8.25%`.
    pub fn percent_label(&self) -> String {
        if self.0 % 100 == 0 {
            format!("{}%", self.0 / 100)
        } else {
            format!("{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Pricing Tier
// =============================================================================

/// Rate class of the requested time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingTier {
    /// Regular business hours.
    Normal,
    /// Saturday afternoon or weekday evening.
    Overtime,
    /// Sunday or one of the fixed holidays.
    Holiday,
}

impl PricingTier {
    /// Label printed on the quote ("Tipo de tarifa aplicada").
    pub const fn label(&self) -> &'static str {
        match self {
            PricingTier::Normal => "Normal",
            PricingTier::Overtime => "Hora Extra",
            PricingTier::Holiday => "Día Festivo",
        }
    }

    /// Whether the surcharge applies.
    #[inline]
    pub const fn is_premium(&self) -> bool {
        !matches!(self, PricingTier::Normal)
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Folio
// =============================================================================

/// Sequential quote identifier.
///
/// Displays as `COT 0001`; numbers past 9999 simply grow wider (`COT 10000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Folio(u64);

impl Folio {
    /// The first folio ever issued.
    pub const FIRST: Folio = Folio(1);

    /// Wraps a sequence number.
    #[inline]
    pub const fn new(number: u64) -> Self {
        Folio(number)
    }

    /// The raw sequence number.
    #[inline]
    pub const fn number(&self) -> u64 {
        self.0
    }

    /// The folio after this one, `None` once the number space is used up.
    #[inline]
    pub const fn next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(number) => Some(Folio(number)),
            None => None,
        }
    }

    /// Zero-padded number without prefix, as stored in the counter file.
    pub fn padded(&self) -> String {
        format!("{:0width$}", self.0, width = FOLIO_WIDTH)
    }
}

impl fmt::Display for Folio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", FOLIO_PREFIX, self.padded())
    }
}

// =============================================================================
// Quote Form (raw input)
// =============================================================================

/// Raw intake form contents, exactly as the user typed them.
///
/// Nothing here is trusted; [`crate::validation::validate_form`] turns it into
/// a [`QuoteRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteForm {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub service_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: u32,
    pub equipment: Vec<String>,
}

impl QuoteForm {
    /// An empty form with the default date (today), 07:00 start and 4 hours.
    pub fn new(today: NaiveDate) -> Self {
        QuoteForm {
            client_name: String::new(),
            email: String::new(),
            phone: String::new(),
            service_date: today,
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
            duration_hours: DEFAULT_DURATION_HOURS,
            equipment: Vec::new(),
        }
    }
}

// =============================================================================
// Quote Request
// =============================================================================

/// A validated quote request.
///
/// Only [`crate::validation::validate_form`] builds one, so every instance
/// has non-empty contact fields, a duration inside the allowed range and at
/// least one distinct equipment item. There are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRequest {
    pub(crate) client_name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) service_date: NaiveDate,
    pub(crate) start_time: NaiveTime,
    pub(crate) duration_hours: u32,
    pub(crate) equipment: Vec<String>,
}

impl QuoteRequest {
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn service_date(&self) -> NaiveDate {
        self.service_date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }

    /// Selected equipment, in selection order, without duplicates.
    pub fn equipment(&self) -> &[String] {
        &self.equipment
    }

    /// Service date as printed (`dd/mm/YYYY`).
    pub fn service_date_label(&self) -> String {
        self.service_date.format(DATE_FORMAT).to_string()
    }

    /// Start time as printed (`HH:MM`).
    pub fn start_time_label(&self) -> String {
        self.start_time.format(TIME_FORMAT).to_string()
    }

    /// Equipment joined the way the ledger stores it.
    pub fn equipment_joined(&self) -> String {
        self.equipment.join(", ")
    }
}

// =============================================================================
// Quote
// =============================================================================

/// An issued quote. Computed once per request; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub folio: Folio,
    pub tier: PricingTier,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl Quote {
    /// Binds a folio to computed amounts.
    pub fn new(folio: Folio, breakdown: PriceBreakdown) -> Self {
        Quote {
            folio,
            tier: breakdown.tier,
            subtotal: breakdown.subtotal,
            tax: breakdown.tax,
            total: breakdown.total,
        }
    }
}

// =============================================================================
// Ledger Record
// =============================================================================

/// One row of the ledger.
///
/// Field order and the serde names are the ledger's column layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    #[serde(rename = "Folio")]
    pub folio: String,
    #[serde(rename = "Nombre")]
    pub client_name: String,
    #[serde(rename = "Correo")]
    pub email: String,
    #[serde(rename = "Teléfono")]
    pub phone: String,
    #[serde(rename = "Fecha de servicio")]
    pub service_date: String,
    #[serde(rename = "Hora")]
    pub start_time: String,
    #[serde(rename = "Equipos")]
    pub equipment: String,
    #[serde(rename = "Total")]
    pub total: String,
}

impl LedgerRecord {
    /// Column headers, in order.
    pub const COLUMNS: [&'static str; 8] = [
        "Folio",
        "Nombre",
        "Correo",
        "Teléfono",
        "Fecha de servicio",
        "Hora",
        "Equipos",
        "Total",
    ];

    /// Builds the row recorded for an issued quote.
    pub fn from_quote(request: &QuoteRequest, quote: &Quote) -> Self {
        LedgerRecord {
            folio: quote.folio.to_string(),
            client_name: request.client_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            service_date: request.service_date_label(),
            start_time: request.start_time_label(),
            equipment: request.equipment_joined(),
            total: quote.total.to_decimal_string(),
        }
    }

    /// Fields in column order.
    pub fn fields(&self) -> [&str; 8] {
        [
            self.folio.as_str(),
            self.client_name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.service_date.as_str(),
            self.start_time.as_str(),
            self.equipment.as_str(),
            self.total.as_str(),
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
