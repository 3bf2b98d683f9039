//! Canonical display rendering of typed values.
//!
//! Pure functions of (value, spec): grouped integer part, fraction padded to
//! the minimum and rounded to the maximum fraction digits, sign prefixed only
//! for true negative values. The plain variant skips grouping and backs the
//! separator-hidden focus state.

use crate::format::spec::FormatSpec;

use super::kind::NumericValue;

/// Canonical (grouped) display string for `value` under `spec`.
pub fn format_value(value: &NumericValue, spec: &FormatSpec) -> String {
    render(value, spec, true)
}

/// Display string without grouping separators, fraction limits still applied.
pub fn format_value_plain(value: &NumericValue, spec: &FormatSpec) -> String {
    render(value, spec, false)
}

fn render(value: &NumericValue, spec: &FormatSpec, grouped: bool) -> String {
    let (int_digits, frac_digits) = digits(value, spec.max_fraction_digits());
    let fraction = adjust_fraction(frac_digits, spec.min_fraction_digits() as usize);
    let mut out = String::with_capacity(int_digits.len() + fraction.len() + 8);
    if value.is_negative() {
        out.push(spec.negative_sign());
    }
    if grouped && spec.grouping_in_use() {
        push_grouped(&mut out, &int_digits, spec.grouping_separator(), spec.grouping_size());
    } else {
        out.push_str(&int_digits);
    }
    if !fraction.is_empty() {
        out.push(spec.decimal_separator());
        out.push_str(&fraction);
    }
    out
}

/// Absolute-value digit runs, fraction rounded to `max_fraction` digits.
fn digits(value: &NumericValue, max_fraction: u32) -> (String, String) {
    match value {
        NumericValue::Int32(v) => (v.unsigned_abs().to_string(), String::new()),
        NumericValue::Int64(v) => (v.unsigned_abs().to_string(), String::new()),
        NumericValue::Float64(v) => {
            if !v.is_finite() {
                return ("0".to_string(), String::new());
            }
            split_at_dot(format!("{:.*}", max_fraction as usize, v.abs()))
        }
        NumericValue::Decimal(v) => split_at_dot(v.abs().round_dp(max_fraction).to_string()),
    }
}

fn split_at_dot(text: String) -> (String, String) {
    match text.split_once('.') {
        Some((int_digits, frac_digits)) => (int_digits.to_string(), frac_digits.to_string()),
        None => (text, String::new()),
    }
}

/// Trims trailing zeros down to `min` digits, then pads up to `min`.
fn adjust_fraction(mut fraction: String, min: usize) -> String {
    while fraction.len() > min && fraction.ends_with('0') {
        fraction.pop();
    }
    while fraction.len() < min {
        fraction.push('0');
    }
    fraction
}

fn push_grouped(out: &mut String, digits: &str, separator: char, size: u32) {
    let size = size as usize;
    let bytes = digits.as_bytes();
    let first_group = if bytes.len().is_multiple_of(size) {
        size.min(bytes.len())
    } else {
        bytes.len() % size
    };
    out.push_str(&digits[..first_group]);
    let mut idx = first_group;
    while idx < bytes.len() {
        out.push(separator);
        out.push_str(&digits[idx..idx + size]);
        idx += size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::spec::NON_BREAKING_SPACE;
    use crate::numeric::kind::NumericValue;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn groups_integer_digits() {
        let spec = FormatSpec::new('.', ',');
        assert_eq!(format_value(&NumericValue::Int32(0), &spec), "0");
        assert_eq!(format_value(&NumericValue::Int32(12), &spec), "12");
        assert_eq!(format_value(&NumericValue::Int32(1234), &spec), "1,234");
        assert_eq!(format_value(&NumericValue::Int64(1_234_567), &spec), "1,234,567");
        assert_eq!(format_value(&NumericValue::Int64(-1_234_567), &spec), "-1,234,567");
    }

    #[test]
    fn plain_variant_skips_grouping() {
        let spec = FormatSpec::new('.', ',');
        assert_eq!(format_value_plain(&NumericValue::Int64(1_234_567), &spec), "1234567");
        assert_eq!(format_value_plain(&NumericValue::Int64(-1_234_567), &spec), "-1234567");
    }

    #[test]
    fn nbsp_locale_renders_with_nbsp() {
        let spec = FormatSpec::new(',', NON_BREAKING_SPACE);
        assert_eq!(
            format_value(&NumericValue::Int32(12_345_678), &spec),
            "12\u{a0}345\u{a0}678"
        );
    }

    #[test]
    fn fraction_is_trimmed_and_padded() {
        let mut spec = FormatSpec::new(',', NON_BREAKING_SPACE);
        spec.set_max_fraction_digits(5);
        let value = NumericValue::Decimal(Decimal::from_str("1234567890.12").unwrap());
        assert_eq!(format_value(&value, &spec), "1\u{a0}234\u{a0}567\u{a0}890,12");
        spec.set_min_fraction_digits(6);
        assert_eq!(format_value(&value, &spec), "1\u{a0}234\u{a0}567\u{a0}890,120000");
    }

    #[test]
    fn fraction_is_rounded_to_the_maximum() {
        let mut spec = FormatSpec::new('.', ',');
        spec.set_max_fraction_digits(1);
        let value = NumericValue::Decimal(Decimal::from_str("1234.56").unwrap());
        assert_eq!(format_value(&value, &spec), "1,234.6");
        let value = NumericValue::Float64(0.125);
        spec.set_max_fraction_digits(2);
        assert_eq!(format_value(&value, &spec), "0.12");
    }

    #[test]
    fn negative_zero_renders_unsigned() {
        let spec = FormatSpec::new('.', ',');
        assert_eq!(format_value(&NumericValue::Float64(-0.0), &spec), "0");
    }
}
