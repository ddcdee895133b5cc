//! Amount formatting for printed receipts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats `amount` with exactly two decimals and no digit grouping.
///
/// Halves round away from zero, as on paper receipts.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// The total as printed on the total line, e.g. `INR 1500.00`.
pub fn format_total(amount: Decimal, currency: &str) -> String {
    format!("{} {}", currency.trim(), format_amount(amount))
}
