//! Pattern synthesis from a format specification.
//!
//! The synthesized expression accepts the prefix-closed language of valid
//! inputs: every string a user passes through while typing a valid number
//! must match, because the matcher runs after each keystroke, not only on
//! commit. Concretely that means a bare sign, an empty string, a trailing
//! separator and a partially typed digit group are all accepted.
//!
//! Declared alternate characters never appear here; they are remapped to
//! their canonical form before matching. The one in-grammar alternative is
//! the regular space wherever the grouping separator is a non-breaking
//! space, since keyboards produce regular spaces.

use crate::format::spec::{ConfigError, FormatSpec, NON_BREAKING_SPACE};

use super::escape;

/// Builds the anchored expression source for `spec`.
pub(super) fn source(spec: &FormatSpec) -> Result<String, ConfigError> {
    spec.validate()?;
    let mut out = String::with_capacity(64);
    out.push('^');
    if spec.negative_allowed() {
        escape::push_literal(&mut out, spec.negative_sign());
        out.push('?');
    }
    // everything after the sign is optional, so "" and a bare sign match
    out.push('(');
    out.push_str(&body(spec));
    if spec.scientific_notation_enabled() {
        out.push('|');
        out.push_str(&scientific(spec));
    }
    out.push_str(")?$");
    Ok(out)
}

/// Integer part plus the optional fraction group.
fn body(spec: &FormatSpec) -> String {
    let integer = integer_grammar(spec);
    let mut out = String::new();
    if spec.integer_part_required() {
        out.push_str(&integer);
    } else {
        out.push('(');
        out.push_str(&integer);
        out.push_str(")?");
    }
    if spec.max_fraction_digits() > 0 {
        out.push('(');
        escape::push_literal(&mut out, spec.decimal_separator());
        out.push_str(&digits_up_to(spec.max_fraction_digits()));
        out.push_str(")?");
    }
    out
}

/// Grammar for the integer part.
///
/// Grouped form: a first group of one to `g` digits, any number of full
/// groups each preceded by an optional separator (separator-less typing and
/// the separator-hidden focus state must both pass), and an optional
/// trailing partial group which requires its separator. Partial groups are
/// only ever trailing: "1 2 3" never matches, "1 2" does.
fn integer_grammar(spec: &FormatSpec) -> String {
    if !spec.use_grouping() {
        return match spec.max_integer_digits() {
            Some(m) => digit_run(m),
            None => "\\d+".to_string(),
        };
    }
    let g = spec.grouping_size();
    let sep = separator_selector(spec);
    match spec.max_integer_digits() {
        None => format!(
            "\\d{{1,{g}}}({sep}?\\d{{{g}}})*({sep}{partial})?",
            partial = digits_up_to(g - 1)
        ),
        Some(m) if m <= g => digit_run(m),
        Some(m) => bounded_grammar(m, g, &sep),
    }
}

/// Grammar for an integer part capped at `m` digits, `m > g`.
///
/// Group counts are bounded so that no decomposition exceeds `m` digits.
/// Two first-group sizes have to be admitted: the leftmost-group size of an
/// exactly-`m`-digit number, and the full group size for shorter numbers.
fn bounded_grammar(m: u32, g: u32, sep: &str) -> String {
    let mut leftmost = m % g;
    let mut middles = m / g - 1;
    if leftmost == 0 {
        leftmost = g;
        middles -= 1;
    }
    let trail = format!(
        "({sep}?\\d{{{g}}}|{sep}{partial})?",
        partial = digits_up_to(g - 1)
    );
    if middles == 0 {
        if leftmost == g {
            format!("\\d{{1,{g}}}{trail}")
        } else {
            format!("(\\d{{1,{leftmost}}}{trail}|\\d{{1,{g}}})")
        }
    } else if leftmost == g {
        format!("\\d{{1,{g}}}({sep}?\\d{{{g}}}){{0,{middles}}}{trail}")
    } else {
        let fewer = middles - 1;
        format!(
            "(\\d{{1,{leftmost}}}({sep}?\\d{{{g}}}){{0,{middles}}}{trail}\
             |\\d{{1,{g}}}({sep}?\\d{{{g}}}){{0,{fewer}}}{trail})"
        )
    }
}

/// Exponent-notation branch: bounded significand, marker, signed exponent.
/// The exponent digits may still be missing mid-typing; a decimal separator
/// directly before the marker may not.
fn scientific(spec: &FormatSpec) -> String {
    let mut out = String::new();
    match spec.max_significand_integer_digits() {
        Some(limit) => out.push_str(&format!("\\d{{1,{}}}", limit.max(1))),
        None => out.push_str("\\d+"),
    }
    let fraction = spec.max_significand_fraction_digits();
    if fraction > 0 {
        out.push('(');
        escape::push_literal(&mut out, spec.decimal_separator());
        out.push_str(&format!("\\d{{1,{fraction}}}"));
        out.push_str(")?");
    }
    out.push_str("[eE]");
    escape::push_literal(&mut out, spec.negative_sign());
    out.push('?');
    out.push_str(&digits_up_to(spec.max_exponent_digits()));
    out
}

fn separator_selector(spec: &FormatSpec) -> String {
    if spec.grouping_separator() == NON_BREAKING_SPACE {
        escape::selector(NON_BREAKING_SPACE, &[' '])
    } else {
        escape::selector(spec.grouping_separator(), &[])
    }
}

fn digit_run(max: u32) -> String {
    format!("\\d{{1,{max}}}")
}

fn digits_up_to(max: u32) -> String {
    format!("\\d{{0,{max}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_spec_shape() {
        let mut spec = FormatSpec::new('.', ',');
        spec.set_max_fraction_digits(2);
        let source = source(&spec).expect("valid spec");
        assert!(source.starts_with("^-?("));
        assert!(source.ends_with(")?$"));
        assert!(source.contains("\\d{1,3}"));
        assert!(source.contains("\\d{0,2}"));
    }

    #[test]
    fn dot_separators_are_escaped() {
        let mut spec = FormatSpec::new(',', '.');
        spec.set_max_fraction_digits(2);
        let source = source(&spec).expect("valid spec");
        assert!(source.contains("\\."));
    }

    #[test]
    fn nbsp_separator_admits_regular_space() {
        let spec = FormatSpec::new(',', NON_BREAKING_SPACE);
        let source = source(&spec).expect("valid spec");
        assert!(source.contains("[\u{a0} ]"));
    }

    #[test]
    fn sign_is_omitted_when_negatives_are_not_allowed() {
        let mut spec = FormatSpec::new('.', ',');
        spec.set_negative_allowed(false);
        let source = source(&spec).expect("valid spec");
        assert!(source.starts_with("^("));
    }

    #[test]
    fn invalid_specs_fail_synthesis() {
        let mut spec = FormatSpec::new(',', ',');
        assert_eq!(
            source(&spec),
            Err(ConfigError::SeparatorCollision(','))
        );
        spec = FormatSpec::default();
        spec.set_grouping_size(0);
        assert_eq!(source(&spec), Err(ConfigError::GroupingSizeZero));
    }

    #[test]
    fn scientific_branch_is_appended_when_enabled() {
        let mut spec = FormatSpec::new('.', ',');
        spec.set_max_exponent_digits(2);
        let source = source(&spec).expect("valid spec");
        assert!(source.contains("[eE]"));
        assert!(source.contains("\\d{0,2}"));
    }
}
