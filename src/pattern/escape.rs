// Regex metacharacter handling for synthesized patterns.

/// Characters that must be escaped when used as a literal in a pattern.
pub const METACHARACTERS: &[char] = &[
    '\\', '.', '[', ']', '{', '}', '(', ')', '<', '>', '*', '+', '-', '=', '!', '?', '^', '$', '|',
];

/// Append `ch` to `out`, escaped if it is a metacharacter.
pub fn push_literal(out: &mut String, ch: char) {
    if METACHARACTERS.contains(&ch) {
        out.push('\\');
    }
    out.push(ch);
}

/// Append a selector matching `main` or any of `alternatives`.
///
/// Produces a bare literal when there is nothing to select between, otherwise
/// a character class. Escaping punctuation is valid inside a class too, so the
/// same metacharacter table covers both positions.
pub fn push_selector(out: &mut String, main: char, alternatives: &[char]) {
    let extras: Vec<char> = alternatives.iter().copied().filter(|c| *c != main).collect();
    if extras.is_empty() {
        push_literal(out, main);
        return;
    }
    out.push('[');
    push_literal(out, main);
    for ch in extras {
        push_literal(out, ch);
    }
    out.push(']');
}

/// Convenience wrapper returning the selector as a new string.
pub fn selector(main: char, alternatives: &[char]) -> String {
    let mut out = String::new();
    push_selector(&mut out, main, alternatives);
    out
}
