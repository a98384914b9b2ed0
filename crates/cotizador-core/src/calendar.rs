//! # Calendar Rules
//!
//! Classifies a requested service slot into a [`PricingTier`].
//!
//! ## Rule Order (first match wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Sunday, or a fixed holiday (any year)  ──────────►  Holiday        │
//! │  2. Saturday, start hour ≥ 12              ──────────►  Overtime       │
//! │  3. Monday–Friday, start hour ≥ 16         ──────────►  Overtime       │
//! │  4. anything else                          ──────────►  Normal         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Holidays win over the hour checks: 25/12 at 07:00 on a weekday is still
//! a holiday slot.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

use crate::types::PricingTier;

/// Fixed holidays as (day, month). The year is ignored.
pub const HOLIDAYS: [(u32, u32); 7] = [
    (1, 1),   // Año Nuevo
    (5, 2),   // Constitución
    (21, 3),  // Natalicio de Benito Juárez
    (1, 5),   // Día del Trabajo
    (16, 9),  // Independencia
    (20, 11), // Revolución
    (25, 12), // Navidad
];

/// Saturday slots starting at or after this hour are overtime.
pub const SATURDAY_OVERTIME_HOUR: u32 = 12;

/// Weekday slots starting at or after this hour are overtime.
pub const WEEKDAY_OVERTIME_HOUR: u32 = 16;

/// Returns true iff the date's day and month match a fixed holiday.
pub fn is_holiday(date: NaiveDate) -> bool {
    HOLIDAYS
        .iter()
        .any(|&(day, month)| date.day() == day && date.month() == month)
}

/// Classifies a service slot.
///
/// Total over every valid date/time; never fails.
///
/// ## Example
/// ```rust
/// use chrono::{NaiveDate, NaiveTime};
/// use cotizador_core::calendar::pricing_tier;
/// use cotizador_core::PricingTier;
///
/// let saturday = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(pricing_tier(saturday, noon), PricingTier::Overtime);
/// ```
pub fn pricing_tier(date: NaiveDate, time: NaiveTime) -> PricingTier {
    let weekday = date.weekday();
    let hour = time.hour();

    if weekday == Weekday::Sun || is_holiday(date) {
        return PricingTier::Holiday;
    }

    match weekday {
        Weekday::Sat if hour >= SATURDAY_OVERTIME_HOUR => PricingTier::Overtime,
        Weekday::Sat => PricingTier::Normal,
        _ if hour >= WEEKDAY_OVERTIME_HOUR => PricingTier::Overtime,
        _ => PricingTier::Normal,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
