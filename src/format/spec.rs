//! Numeric format specification.
//!
//! A `FormatSpec` is a snapshot of one field configuration: separators, digit
//! limits, sign rules, alternate characters and the optional scientific
//! notation block. It holds no behavior beyond validation and clamping; the
//! matching pattern is derived from it by `pattern::synthesize` and must be
//! rebuilt after every mutation.

use std::collections::BTreeSet;
use std::fmt;

use super::alternates;

/// Some locales group with a non-breaking space, which cannot be typed on
/// most keyboards and is treated as interchangeable with a regular space.
pub const NON_BREAKING_SPACE: char = '\u{a0}';

/// Configuration errors. Fatal at configuration time, never silently fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Decimal and grouping separators are the same character while grouping
    /// is in use.
    SeparatorCollision(char),
    /// Grouping is in use but the grouping size is zero.
    GroupingSizeZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SeparatorCollision(ch) => {
                write!(f, "decimal and grouping separators are both {ch:?}")
            }
            ConfigError::GroupingSizeZero => f.write_str("grouping is enabled with size 0"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Scientific notation settings. Disabled while `max_exponent_digits` is 0.
///
/// The significand digit limits are stored as declared; the effective limits
/// exposed through `FormatSpec` are clamped to the field's own integer and
/// fraction limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scientific {
    pub(crate) max_exponent_digits: u32,
    pub(crate) max_significand_integer_digits: Option<u32>,
    pub(crate) max_significand_fraction_digits: Option<u32>,
}

/// One locale/configuration's numeric shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    decimal_separator: char,
    grouping_separator: char,
    use_grouping: bool,
    grouping_size: u32,
    min_fraction_digits: u32,
    max_fraction_digits: u32,
    max_integer_digits: Option<u32>,
    integer_part_required: bool,
    negative_sign: char,
    negative_allowed: bool,
    overlapping_alternatives: bool,
    grouping_alternatives: BTreeSet<char>,
    decimal_separator_alternatives: BTreeSet<char>,
    negative_sign_alternatives: BTreeSet<char>,
    disallowed_keys: BTreeSet<char>,
    scientific: Scientific,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::new('.', ',')
    }
}

impl FormatSpec {
    /// Creates a spec with the given separators and common defaults:
    /// grouping in groups of three, up to three fraction digits, `-` as the
    /// negative sign, negative values allowed.
    pub fn new(decimal_separator: char, grouping_separator: char) -> Self {
        let mut spec = Self {
            decimal_separator,
            grouping_separator,
            use_grouping: true,
            grouping_size: 3,
            min_fraction_digits: 0,
            max_fraction_digits: 3,
            max_integer_digits: None,
            integer_part_required: true,
            negative_sign: '-',
            negative_allowed: true,
            overlapping_alternatives: false,
            grouping_alternatives: BTreeSet::new(),
            decimal_separator_alternatives: BTreeSet::new(),
            negative_sign_alternatives: BTreeSet::new(),
            disallowed_keys: BTreeSet::new(),
            scientific: Scientific::default(),
        };
        spec.enforce_space_for_nbsp();
        spec
    }

    /// Checks the structural invariants that synthesis depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.use_grouping {
            if self.grouping_size == 0 {
                return Err(ConfigError::GroupingSizeZero);
            }
            if self.decimal_separator == self.grouping_separator {
                return Err(ConfigError::SeparatorCollision(self.decimal_separator));
            }
        }
        Ok(())
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn set_decimal_separator(&mut self, separator: char) {
        self.decimal_separator = separator;
        self.refilter_alternatives();
    }

    pub fn grouping_separator(&self) -> char {
        self.grouping_separator
    }

    pub fn set_grouping_separator(&mut self, separator: char) {
        self.grouping_separator = separator;
        self.refilter_alternatives();
    }

    pub fn use_grouping(&self) -> bool {
        self.use_grouping
    }

    pub fn set_use_grouping(&mut self, used: bool) {
        self.use_grouping = used;
    }

    pub fn grouping_size(&self) -> u32 {
        self.grouping_size
    }

    pub fn set_grouping_size(&mut self, size: u32) {
        self.grouping_size = size;
    }

    pub fn min_fraction_digits(&self) -> u32 {
        self.min_fraction_digits
    }

    /// Raising the minimum above the maximum raises the maximum with it.
    pub fn set_min_fraction_digits(&mut self, digits: u32) {
        self.min_fraction_digits = digits;
        if self.max_fraction_digits < digits {
            self.max_fraction_digits = digits;
        }
    }

    pub fn max_fraction_digits(&self) -> u32 {
        self.max_fraction_digits
    }

    /// Lowering the maximum below the minimum lowers the minimum with it.
    /// A maximum of 0 disables the fractional part entirely.
    pub fn set_max_fraction_digits(&mut self, digits: u32) {
        self.max_fraction_digits = digits;
        if self.min_fraction_digits > digits {
            self.min_fraction_digits = digits;
        }
    }

    pub fn max_integer_digits(&self) -> Option<u32> {
        self.max_integer_digits
    }

    pub fn set_max_integer_digits(&mut self, digits: Option<u32>) {
        self.max_integer_digits = digits;
    }

    pub fn integer_part_required(&self) -> bool {
        self.integer_part_required
    }

    pub fn set_integer_part_required(&mut self, required: bool) {
        self.integer_part_required = required;
    }

    pub fn negative_sign(&self) -> char {
        self.negative_sign
    }

    pub fn set_negative_sign(&mut self, sign: char) {
        self.negative_sign = sign;
        self.refilter_alternatives();
    }

    pub fn negative_allowed(&self) -> bool {
        self.negative_allowed
    }

    pub fn set_negative_allowed(&mut self, allowed: bool) {
        self.negative_allowed = allowed;
    }

    pub fn overlapping_alternatives(&self) -> bool {
        self.overlapping_alternatives
    }

    /// Turning overlaps off purges already-registered overlapping characters.
    pub fn set_overlapping_alternatives(&mut self, allowed: bool) {
        self.overlapping_alternatives = allowed;
        if !allowed {
            self.refilter_alternatives();
        }
    }

    pub fn grouping_alternatives(&self) -> &BTreeSet<char> {
        &self.grouping_alternatives
    }

    pub fn set_grouping_alternatives(&mut self, candidates: BTreeSet<char>) {
        self.grouping_alternatives = self.admissible(candidates, AlternateSlot::Grouping);
        self.enforce_space_for_nbsp();
    }

    pub fn decimal_separator_alternatives(&self) -> &BTreeSet<char> {
        &self.decimal_separator_alternatives
    }

    pub fn set_decimal_separator_alternatives(&mut self, candidates: BTreeSet<char>) {
        self.decimal_separator_alternatives = self.admissible(candidates, AlternateSlot::Decimal);
    }

    pub fn negative_sign_alternatives(&self) -> &BTreeSet<char> {
        &self.negative_sign_alternatives
    }

    pub fn set_negative_sign_alternatives(&mut self, candidates: BTreeSet<char>) {
        self.negative_sign_alternatives = self.admissible(candidates, AlternateSlot::Negative);
    }

    pub fn disallowed_keys(&self) -> &BTreeSet<char> {
        &self.disallowed_keys
    }

    pub fn set_disallowed_keys(&mut self, keys: BTreeSet<char>) {
        self.disallowed_keys = keys;
    }

    /// Whether the grammar gains the exponent suffix.
    pub fn scientific_notation_enabled(&self) -> bool {
        self.scientific.max_exponent_digits > 0
    }

    pub fn max_exponent_digits(&self) -> u32 {
        self.scientific.max_exponent_digits
    }

    /// Setting this to a positive value enables scientific notation; 0
    /// disables it again.
    pub fn set_max_exponent_digits(&mut self, digits: u32) {
        self.scientific.max_exponent_digits = digits;
    }

    /// Effective limit for significand integer digits: the declared value
    /// clamped to the field's own integer-digit limit.
    pub fn max_significand_integer_digits(&self) -> Option<u32> {
        clamp_declared(
            self.scientific.max_significand_integer_digits,
            self.max_integer_digits,
        )
    }

    pub fn set_max_significand_integer_digits(&mut self, digits: u32) {
        self.scientific.max_significand_integer_digits = Some(digits);
    }

    /// Effective limit for significand fraction digits: the declared value
    /// clamped to the field's own fraction-digit limit.
    pub fn max_significand_fraction_digits(&self) -> u32 {
        clamp_declared(
            self.scientific.max_significand_fraction_digits,
            Some(self.max_fraction_digits),
        )
        .unwrap_or(self.max_fraction_digits)
    }

    pub fn set_max_significand_fraction_digits(&mut self, digits: u32) {
        self.scientific.max_significand_fraction_digits = Some(digits);
    }

    /// Whether grouping separators actually appear for this spec.
    pub fn grouping_in_use(&self) -> bool {
        self.use_grouping && self.grouping_size > 0
    }

    /// Characters no alternate may shadow: digits, separators and the sign.
    fn reserved(&self, slot: AlternateSlot) -> Vec<char> {
        let mut reserved = vec![
            self.decimal_separator,
            self.grouping_separator,
            self.negative_sign,
        ];
        for (other, set) in [
            (AlternateSlot::Grouping, &self.grouping_alternatives),
            (AlternateSlot::Decimal, &self.decimal_separator_alternatives),
            (AlternateSlot::Negative, &self.negative_sign_alternatives),
        ] {
            if other != slot {
                reserved.extend(set.iter().copied());
            }
        }
        reserved
    }

    fn admissible(&self, candidates: BTreeSet<char>, slot: AlternateSlot) -> BTreeSet<char> {
        if self.overlapping_alternatives {
            return candidates;
        }
        let reserved = self.reserved(slot);
        candidates
            .into_iter()
            .filter(|ch| !ch.is_ascii_digit() && !reserved.contains(ch))
            .collect()
    }

    /// Drops overlapping alternates after a canonical character changed.
    fn refilter_alternatives(&mut self) {
        if !self.overlapping_alternatives {
            let grouping = std::mem::take(&mut self.grouping_alternatives);
            self.grouping_alternatives = self.admissible(grouping, AlternateSlot::Grouping);
            let decimal = std::mem::take(&mut self.decimal_separator_alternatives);
            self.decimal_separator_alternatives = self.admissible(decimal, AlternateSlot::Decimal);
            let negative = std::mem::take(&mut self.negative_sign_alternatives);
            self.negative_sign_alternatives = self.admissible(negative, AlternateSlot::Negative);
        }
        self.enforce_space_for_nbsp();
    }

    /// A non-breaking-space separator always accepts the regular space.
    fn enforce_space_for_nbsp(&mut self) {
        if self.grouping_separator == NON_BREAKING_SPACE {
            self.grouping_alternatives.insert(' ');
        }
    }

    /// Remaps declared alternates in `text` to their canonical characters.
    pub fn remap_alternates(&self, text: &str) -> String {
        alternates::remap(text, self)
    }
}

fn clamp_declared(declared: Option<u32>, limit: Option<u32>) -> Option<u32> {
    match (declared, limit) {
        (Some(d), Some(l)) => Some(d.min(l)),
        (Some(d), None) => Some(d),
        (None, limit) => limit,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlternateSlot {
    Grouping,
    Decimal,
    Negative,
}
