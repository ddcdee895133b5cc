//! Fresh receipt identifiers in the `RCP-YYYYMMDD-XXXXXXXX` format.
//!
//! The assembler prints whatever id a record carries; these helpers are for
//! callers that still need to issue one.

use chrono::NaiveDate;
use rand::Rng;

/// A new receipt number for `date`, using the thread-local RNG.
pub fn generate(date: NaiveDate) -> String {
    generate_with(date, &mut rand::rng())
}

/// A new receipt number for `date`, drawing the suffix from `rng`.
pub fn generate_with<R: Rng>(date: NaiveDate, rng: &mut R) -> String {
    format!("RCP-{}-{:08X}", date.format("%Y%m%d"), rng.random::<u32>())
}

/// Whether `id` has the shape produced by [`generate`].
pub fn is_well_formed(id: &str) -> bool {
    let mut parts = id.split('-');
    let (Some("RCP"), Some(date), Some(suffix), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    date.len() == 8
        && date.bytes().all(|b| b.is_ascii_digit())
        && NaiveDate::parse_from_str(date, "%Y%m%d").is_ok()
        && suffix.len() == 8
        && suffix.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}
