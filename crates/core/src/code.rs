//! Animal code generation.
//!
//! Every animal gets a human-readable identifier built from the species
//! code, the origin city code, the rescue date, and a per-day sequence
//! number. The sequence counting happens in the repository (it needs the
//! database); this module owns the format.

use crate::types::Date;

/// The date-scoped prefix shared by all same-day intakes of one species
/// from one city: `{species}{city}{YYMMDD}`.
///
/// The repository counts existing codes with this prefix to assign the
/// next sequence number.
pub fn code_prefix(species_code: &str, city_code: &str, rescue_date: Date) -> String {
    format!("{species_code}{city_code}{}", rescue_date.format("%y%m%d"))
}

/// Build an animal code: `{species}{city}{YYMMDD}{NN}`.
///
/// `sequence` is 1-based and rendered with two digits; a 100th same-day
/// intake from the same city spills into three digits rather than
/// colliding.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rifugio_core::code::animal_code;
///
/// let date = NaiveDate::from_ymd_opt(2020, 3, 7).unwrap();
/// assert_eq!(animal_code("C", "H501", date, 1), "CH50120030701");
/// ```
pub fn animal_code(species_code: &str, city_code: &str, rescue_date: Date, sequence: i64) -> String {
    format!(
        "{}{sequence:02}",
        code_prefix(species_code, city_code, rescue_date)
    )
}
