use lazy_static::lazy_static;
use regex::Regex;

/// Smallest quantity a cart entry can hold.
pub const MIN_QUANTITY: u32 = 1;

lazy_static! {
    // Leading integer: optional whitespace, optional sign, then digits.
    // Anything after the digit run is ignored ("3abc" -> 3, "2.9" -> 2).
    static ref LEADING_INT: Regex = Regex::new(r"^\s*([+-]?)([0-9]+)").unwrap();
}

/// Parse the raw text of a quantity field.
///
/// Returns `None` when the text does not start with an integer.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let caps = LEADING_INT.captures(raw)?;
    let negative = &caps[1] == "-";
    let value = match caps[2].parse::<i64>() {
        Ok(v) => v,
        // digit run too long for i64
        Err(_) => i64::MAX,
    };
    Some(if negative { -value } else { value })
}

/// Turn a raw quantity edit into a valid quantity.
///
/// Unparseable input and values below 1 clamp to 1; values above the
/// quantity range saturate at `u32::MAX`.
pub fn clamp_quantity(raw: &str) -> u32 {
    match parse_leading_int(raw) {
        Some(v) if v < MIN_QUANTITY as i64 => MIN_QUANTITY,
        Some(v) => u32::try_from(v).unwrap_or(u32::MAX),
        None => MIN_QUANTITY,
    }
}

/// Prices must be finite and non-negative.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}
