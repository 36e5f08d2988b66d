//! Formatting helpers shared by the tool definitions.

/// Placeholder for values the upstream source did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Magnitudes outside `[1e-4, 1e16)` are printed in exponent form.
const EXPONENT_BELOW: f64 = 1e-4;
const EXPONENT_FROM: f64 = 1e16;

/// Render a float with at least one decimal place (`32.0`, `98.6`).
///
/// Very large and very small magnitudes use exponent notation with a signed,
/// two-digit exponent (`1.8e+20`, `1e-05`).
pub fn format_float(value: f64) -> String {
    let magnitude = value.abs();
    if !value.is_finite() {
        value.to_string()
    } else if magnitude >= EXPONENT_FROM || (magnitude != 0.0 && magnitude < EXPONENT_BELOW) {
        format_exponent(value)
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn format_exponent(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

/// Render an optional reading, falling back to [`NOT_AVAILABLE`].
pub fn format_optional(value: Option<f64>) -> String {
    value
        .map(format_float)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
