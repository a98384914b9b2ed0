//! # cotizador-core: Pure Business Logic for Cotizador
//!
//! This crate holds every rule of the machinery-rental quote as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cotizador Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Intake form (apps/cli, dialoguer)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteForm                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ cotizador-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ calendar  │  │  pricing  │  │ validation│  │   │
//! │  │   │  Request  │  │  tiers    │  │   Quote   │  │   form    │  │   │
//! │  │   │  Folio    │  │ holidays  │  │   Money   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO TERMINAL • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                │                                  │                     │
//! │  ┌─────────────▼──────────────┐   ┌───────────────▼─────────────────┐  │
//! │  │ cotizador-store            │   │ cotizador-render                │  │
//! │  │ folio.txt, clientes.csv    │   │ cotizacion.pdf                  │  │
//! │  └────────────────────────────┘   └─────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (QuoteRequest, Folio, PricingTier, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`calendar`] - Holiday and overtime rules
//! - [`pricing`] - Quote calculator
//! - [`error`] - Domain error types
//! - [`validation`] - Intake form validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use cotizador_core::calendar::pricing_tier;
//! use cotizador_core::pricing::PricingPolicy;
//! use cotizador_core::PricingTier;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(); // Wednesday
//! let time = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
//! let tier = pricing_tier(date, time);
//! assert_eq!(tier, PricingTier::Overtime);
//!
//! let breakdown = PricingPolicy::default().price(2, tier).unwrap();
//! assert_eq!(breakdown.total.cents(), 405_000); // $4,050.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calendar;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::{PriceBreakdown, PricingPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Equipment offered by the intake form, in display order.
pub const EQUIPMENT_CATALOG: [&str; 6] = [
    "Retroexcavadora",
    "Bailarina",
    "Camión de volteo",
    "Compactador",
    "Generador",
    "Motoconformadora",
];

/// Shortest rental accepted by the form, in hours.
pub const MIN_DURATION_HOURS: u32 = 1;

/// Longest rental accepted by the form, in hours.
pub const MAX_DURATION_HOURS: u32 = 24;

/// Duration the form starts with.
pub const DEFAULT_DURATION_HOURS: u32 = 4;

/// Rentals longer than this get the volume-proposal note on the document.
pub const VOLUME_NOTE_THRESHOLD_HOURS: u32 = 10;

/// Prefix of every folio identifier ("COT 0001").
pub const FOLIO_PREFIX: &str = "COT";

/// Minimum digits of the zero-padded folio number.
pub const FOLIO_WIDTH: usize = 4;

/// Date format used on documents and in the ledger.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Time format used on documents and in the ledger.
pub const TIME_FORMAT: &str = "%H:%M";
