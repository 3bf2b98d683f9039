//! Keystroke remapping of alternate characters.
//!
//! Declared alternates are a convenience for characters that are awkward to
//! type in some layouts. They are rewritten to their canonical counterparts
//! before the matching pattern ever sees the text, so the grammar itself only
//! deals in canonical separators and the canonical sign.

use super::spec::FormatSpec;

/// Rewrites every declared alternate in `text` to its canonical character.
///
/// Precedence follows the sign-first rule: a character registered as a
/// negative-sign alternative wins over the separator sets. With the default
/// overlap policy the sets are disjoint and the precedence never triggers.
pub fn remap(text: &str, spec: &FormatSpec) -> String {
    text.chars()
        .map(|ch| {
            if spec.negative_sign_alternatives().contains(&ch) {
                spec.negative_sign()
            } else if spec.grouping_alternatives().contains(&ch) {
                spec.grouping_separator()
            } else if spec.decimal_separator_alternatives().contains(&ch) {
                spec.decimal_separator()
            } else {
                ch
            }
        })
        .collect()
}
