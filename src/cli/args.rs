use std::collections::BTreeSet;

use clap::Parser;

use crate::format::spec::FormatSpec;
use crate::numeric::kind::NumericKind;

use super::separator::parse_separator_arg;

/// Numeric kind of the replayed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    Int32,
    Int64,
    Float64,
    Decimal,
}

impl KindArg {
    pub fn to_kind(self) -> NumericKind {
        match self {
            KindArg::Int32 => NumericKind::Int32,
            KindArg::Int64 => NumericKind::Int64,
            KindArg::Float64 => NumericKind::Float64,
            KindArg::Decimal => NumericKind::Decimal,
        }
    }
}

/// CLI argument parsing & validation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "numgate",
    about = "Replay an editing session against a numeric input field and report every gate decision.",
    override_usage = "numgate [options] <STEP>...  (steps: focus, blur, type:<text>, set:<text>)"
)]
pub struct Args {
    /// Steps to replay in order: focus, blur, type:<text>, set:<text>.
    #[arg(value_name = "STEP", required = true)]
    pub steps: Vec<String>,

    /// Numeric kind of the field.
    #[arg(long, value_enum, default_value_t = KindArg::Decimal)]
    pub kind: KindArg,

    /// Decimal separator (single char, name, or U+XXXX).
    #[arg(long, value_name = "CHAR", default_value = "dot", value_parser = parse_separator)]
    pub decimal_sep: char,

    /// Grouping separator (single char, name, or U+XXXX).
    #[arg(long, value_name = "CHAR", default_value = "comma", value_parser = parse_separator)]
    pub grouping_sep: char,

    /// Digits per group (default: 3).
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub grouping_size: u32,

    /// Disable grouping separators entirely.
    #[arg(long)]
    pub no_grouping: bool,

    /// Minimum fraction digits shown (default: 0).
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub min_fraction: u32,

    /// Maximum fraction digits allowed (default: 3; ignored for integer kinds).
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub max_fraction: u32,

    /// Maximum integer digits allowed (default: unbounded).
    #[arg(long, value_name = "N")]
    pub max_integer: Option<u32>,

    /// Reject negative values.
    #[arg(long)]
    pub no_negative: bool,

    /// Allow inputs that start at the decimal separator.
    #[arg(long)]
    pub optional_integer: bool,

    /// Extra character accepted as the grouping separator (repeatable).
    #[arg(long, value_name = "CHAR", value_parser = parse_separator)]
    pub grouping_alt: Vec<char>,

    /// Extra character accepted as the decimal separator (repeatable).
    #[arg(long, value_name = "CHAR", value_parser = parse_separator)]
    pub decimal_alt: Vec<char>,

    /// Extra character accepted as the negative sign (repeatable).
    #[arg(long, value_name = "CHAR", value_parser = parse_separator)]
    pub negative_alt: Vec<char>,

    /// Character never accepted from the keyboard (repeatable).
    #[arg(long, value_name = "CHAR", value_parser = parse_separator)]
    pub disallow: Vec<char>,

    /// Maximum exponent digits; a positive value enables scientific notation.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub exponent_digits: u32,

    /// Hide grouping separators while the field is focused.
    #[arg(long)]
    pub hide_grouping_on_focus: bool,

    /// Select the whole text on focus.
    #[arg(long)]
    pub autoselect: bool,

    /// Emit JSON output (single object).
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn parse() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Builds the field configuration these flags describe.
    pub fn to_spec(&self) -> FormatSpec {
        let mut spec = FormatSpec::new(self.decimal_sep, self.grouping_sep);
        spec.set_use_grouping(!self.no_grouping);
        spec.set_grouping_size(self.grouping_size);
        spec.set_max_fraction_digits(self.max_fraction);
        spec.set_min_fraction_digits(self.min_fraction);
        spec.set_max_integer_digits(self.max_integer);
        spec.set_negative_allowed(!self.no_negative);
        spec.set_integer_part_required(!self.optional_integer);
        spec.set_grouping_alternatives(BTreeSet::from_iter(self.grouping_alt.iter().copied()));
        spec.set_decimal_separator_alternatives(BTreeSet::from_iter(
            self.decimal_alt.iter().copied(),
        ));
        spec.set_negative_sign_alternatives(BTreeSet::from_iter(
            self.negative_alt.iter().copied(),
        ));
        spec.set_disallowed_keys(BTreeSet::from_iter(self.disallow.iter().copied()));
        spec.set_max_exponent_digits(self.exponent_digits);
        spec
    }
}

fn parse_separator(raw: &str) -> Result<char, String> {
    parse_separator_arg(raw).map_err(|err| err.to_string())
}
