//! Currency helpers. Amounts are whole cents everywhere in the crate.

use num_traits::cast::cast;

/// Format cents as US dollars with thousands separators, e.g. `$1,000.00`.
#[must_use]
pub fn fmt_currency(cents: u64) -> String {
    let whole = (cents / 100).to_string();
    let frac = cents % 100;
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}.{frac:02}")
}

/// Convert a dollar amount to cents, rounding to the nearest cent.
/// Returns `None` for negative, non-finite or out-of-range input.
#[must_use]
pub fn dollars_to_cents(dollars: f64) -> Option<u64> {
    if !dollars.is_finite() || dollars < 0.0 {
        return None;
    }
    cast::<f64, u64>((dollars * 100.0).round())
}
