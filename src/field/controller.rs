//! Focus/keystroke/commit state machine for one numeric field.
//!
//! Owns the field's `FormatSpec`, the matching pattern derived from it and
//! the current typed value. Keystrokes are gated against the pattern, blur
//! commits the raw text through the parser, and every configuration change
//! runs the same pipeline: mutate a copy of the spec, validate, swap,
//! rebuild the pattern, reformat the displayed text.

use tracing::debug;

use crate::format::spec::{ConfigError, FormatSpec};
use crate::numeric::kind::{NumericKind, NumericValue};
use crate::numeric::parse::{self, ParseError};
use crate::numeric::render;
use crate::pattern::{self, MatchPattern};

#[derive(Debug, Clone)]
pub struct NumberField {
    kind: NumericKind,
    spec: FormatSpec,
    pattern: MatchPattern,
    value: NumericValue,
    raw: String,
    focused: bool,
    autoselect: bool,
    grouping_hidden_on_focus: bool,
    text_selected: bool,
}

impl NumberField {
    /// Creates a field of `kind` configured by `spec`, holding the kind's
    /// zero. Integer kinds never display fractions, whatever the spec says.
    pub fn new(kind: NumericKind, mut spec: FormatSpec) -> Result<Self, ConfigError> {
        if kind.integral() {
            spec.set_max_fraction_digits(0);
        }
        let pattern = pattern::synthesize(&spec)?;
        let value = kind.zero();
        let raw = render::format_value(&value, &spec);
        Ok(Self {
            kind,
            spec,
            pattern,
            value,
            raw,
            focused: false,
            autoselect: false,
            grouping_hidden_on_focus: false,
            text_selected: false,
        })
    }

    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    pub fn value(&self) -> &NumericValue {
        &self.value
    }

    /// The text as currently displayed; depends on focus state.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    pub fn pattern(&self) -> &MatchPattern {
        &self.pattern
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_text_selected(&self) -> bool {
        self.text_selected
    }

    pub fn autoselect(&self) -> bool {
        self.autoselect
    }

    pub fn set_autoselect(&mut self, autoselect: bool) {
        self.autoselect = autoselect;
    }

    pub fn grouping_hidden_on_focus(&self) -> bool {
        self.grouping_hidden_on_focus
    }

    pub fn set_grouping_hidden_on_focus(&mut self, hidden: bool) {
        self.grouping_hidden_on_focus = hidden;
        if !self.focused {
            return;
        }
        self.refresh_presentation();
    }

    /// Focus transition: optionally re-render without grouping separators
    /// and mark the text selected.
    pub fn on_focus(&mut self) {
        self.focused = true;
        if self.grouping_hidden_on_focus {
            let plain = render::format_value_plain(&self.value, &self.spec);
            debug!(from = %self.raw, to = %plain, "hiding grouping separators on focus");
            self.raw = plain;
        }
        if self.autoselect {
            self.text_selected = true;
        }
    }

    /// Gate for the text resulting from a keystroke. Alternates are remapped
    /// to canonical characters first; the remapped text becomes the raw text
    /// when accepted. Pass/fail only, no partial correction.
    pub fn on_keystroke(&mut self, text: &str) -> bool {
        if text.chars().any(|ch| self.spec.disallowed_keys().contains(&ch)) {
            return false;
        }
        let normalized = self.spec.remap_alternates(text);
        if !self.pattern.matches(&normalized) {
            return false;
        }
        self.raw = normalized;
        self.text_selected = false;
        true
    }

    /// Blur transition: commit the raw text. On a parse failure the field
    /// falls back to the last-known-valid value and the error is returned to
    /// the caller.
    pub fn on_blur(&mut self) -> Result<(), ParseError> {
        self.focused = false;
        match parse::parse(&self.raw, &self.spec, self.kind) {
            Ok(value) => {
                self.value = value;
                self.apply_negative_policy();
                self.refresh_presentation();
                Ok(())
            }
            Err(err) => {
                debug!(raw = %self.raw, %err, "commit failed, keeping last value");
                self.refresh_presentation();
                Err(err)
            }
        }
    }

    /// Injects a trusted value, bypassing the keystroke gate. The value is
    /// clamped to the current sign policy and re-rendered.
    pub fn set_value(&mut self, value: NumericValue) {
        self.value = value;
        self.apply_negative_policy();
        self.refresh_presentation();
    }

    /// Applies a configuration change: the mutation runs on a copy, which is
    /// validated and swapped in only on success, so a bad change leaves the
    /// field untouched. The pattern is rebuilt and the display refreshed
    /// synchronously.
    pub fn configure(
        &mut self,
        mutate: impl FnOnce(&mut FormatSpec),
    ) -> Result<(), ConfigError> {
        let mut next = self.spec.clone();
        mutate(&mut next);
        if self.kind.integral() {
            next.set_max_fraction_digits(0);
        }
        let pattern = pattern::synthesize(&next)?;
        debug!(pattern = pattern.as_str(), "pattern updated");
        self.spec = next;
        self.pattern = pattern;
        self.apply_negative_policy();
        self.refresh_presentation();
        Ok(())
    }

    fn apply_negative_policy(&mut self) {
        if !self.spec.negative_allowed() && self.value.is_negative() {
            debug!(value = ?self.value, "negative values not allowed, storing absolute value");
            self.value = self.value.to_absolute();
        }
    }

    fn refresh_presentation(&mut self) {
        self.raw = if self.focused && self.grouping_hidden_on_focus {
            render::format_value_plain(&self.value, &self.spec)
        } else {
            render::format_value(&self.value, &self.spec)
        };
    }
}
