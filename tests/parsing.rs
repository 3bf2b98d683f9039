//! Parsing and round-trip coverage across the four numeric kinds.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;

use numgate::format::spec::{FormatSpec, NON_BREAKING_SPACE};
use numgate::numeric::kind::{NumericKind, NumericValue};
use numgate::numeric::parse::{parse, ParseError};
use numgate::numeric::render::format_value;
use numgate::pattern;

fn pl_spec(max_fraction: u32) -> FormatSpec {
    let mut spec = FormatSpec::new(',', NON_BREAKING_SPACE);
    spec.set_max_fraction_digits(max_fraction);
    spec
}

#[test]
fn space_and_nbsp_parse_identically() {
    let spec = pl_spec(0);
    assert_eq!(
        parse("12 345 678", &spec, NumericKind::Int32),
        parse("12\u{a0}345\u{a0}678", &spec, NumericKind::Int32)
    );
    assert_eq!(
        parse("12 345 678", &spec, NumericKind::Int32),
        Ok(NumericValue::Int32(12_345_678))
    );
}

#[test]
fn alternates_parse_to_the_same_value() {
    let mut spec = FormatSpec::new(',', '.');
    spec.set_grouping_alternatives(BTreeSet::from(['_']));
    for text in ["123_456", "12_34_56", "12345_6", "_123_456", "_123456_"] {
        assert_eq!(
            parse(text, &spec, NumericKind::Int32),
            Ok(NumericValue::Int32(123_456)),
            "{text:?}"
        );
    }

    let mut spec = FormatSpec::new(',', '.');
    spec.set_negative_sign_alternatives(BTreeSet::from(['^', '%']));
    for text in ["^123456", "%123456", "-123456"] {
        assert_eq!(
            parse(text, &spec, NumericKind::Int32),
            Ok(NumericValue::Int32(-123_456)),
            "{text:?}"
        );
    }

    let mut spec = FormatSpec::new(',', '.');
    spec.set_grouping_alternatives(BTreeSet::from(['_']));
    spec.set_decimal_separator_alternatives(BTreeSet::from(['|']));
    for text in ["123_456|78", "12_34_56|78", "123456,78"] {
        assert_eq!(
            parse(text, &spec, NumericKind::Decimal),
            Ok(NumericValue::Decimal(Decimal::from_str("123456.78").unwrap())),
            "{text:?}"
        );
    }
}

/// An otherwise-valid input with a canonical character swapped for a declared
/// alternative still passes the gate and parses to the identical value.
#[test]
fn alternate_equivalence_through_the_gate() {
    let mut spec = FormatSpec::new('.', ',');
    spec.set_max_fraction_digits(2);
    spec.set_grouping_alternatives(BTreeSet::from(['_']));
    spec.set_negative_sign_alternatives(BTreeSet::from(['^', '#']));
    let pattern = pattern::synthesize(&spec).expect("valid spec");

    let canonical = "-1,234.56";
    let swapped = "^1_234.56";
    assert!(pattern.matches(&spec.remap_alternates(swapped)));
    assert_eq!(
        parse(swapped, &spec, NumericKind::Decimal),
        parse(canonical, &spec, NumericKind::Decimal)
    );
}

#[test]
fn round_trips_for_values_producible_by_parse() {
    let mut us = FormatSpec::new('.', ',');
    us.set_max_fraction_digits(2);
    let pl = pl_spec(5);

    let cases: &[(&FormatSpec, NumericKind, &str)] = &[
        (&us, NumericKind::Int32, "1,234"),
        (&us, NumericKind::Int32, "-987"),
        (&us, NumericKind::Int64, "123,456,789,012"),
        (&us, NumericKind::Float64, "1,234.5"),
        (&us, NumericKind::Decimal, "0.07"),
        (&us, NumericKind::Decimal, "-1,234.56"),
        (&pl, NumericKind::Decimal, "1 234 567 890,12"),
        (&pl, NumericKind::Int64, "-123 456"),
    ];
    for (spec, kind, text) in cases {
        let value = parse(text, spec, *kind).expect("parse");
        let display = format_value(&value, spec);
        let reparsed = parse(&display, spec, *kind).expect("reparse");
        assert_eq!(value, reparsed, "{text:?} -> {display:?}");
    }
}

#[test]
fn empty_and_sign_only_text_is_the_zero_sentinel() {
    let spec = pl_spec(2);
    assert_eq!(parse("", &spec, NumericKind::Decimal), Ok(NumericKind::Decimal.zero()));
    assert_eq!(parse("-", &spec, NumericKind::Int64), Ok(NumericValue::Int64(0)));
    assert_eq!(parse(",", &spec, NumericKind::Float64), Ok(NumericValue::Float64(0.0)));
}

#[test]
fn malformed_and_overflow_are_distinct() {
    let spec = pl_spec(2);
    assert_eq!(parse("abc", &spec, NumericKind::Int32), Err(ParseError::Malformed));
    assert_eq!(
        parse("12x3", &spec, NumericKind::Decimal),
        Err(ParseError::Malformed)
    );
    assert_eq!(
        parse("4 294 967 296", &spec, NumericKind::Int32),
        Err(ParseError::Overflow)
    );
    assert_eq!(
        parse("92 233 720 368 547 758 080", &spec, NumericKind::Int64),
        Err(ParseError::Overflow)
    );
}

#[test]
fn float_overflow_is_detected() {
    let mut spec = FormatSpec::new('.', ',');
    spec.set_max_exponent_digits(3);
    assert_eq!(
        parse("1e309", &spec, NumericKind::Float64),
        Err(ParseError::Overflow)
    );
    assert_eq!(
        parse("1e308", &spec, NumericKind::Float64),
        Ok(NumericValue::Float64(1e308))
    );
}
