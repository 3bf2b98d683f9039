pub mod escape;
mod synth;

use regex::Regex;

use crate::format::spec::{ConfigError, FormatSpec};

/// Compiled matcher for the prefix-closed language of valid typed input.
///
/// Deterministically derived from a `FormatSpec`; stale the moment the spec
/// mutates, so callers rebuild it on every configuration change. Each field
/// owns its own pattern, rebuilding is cheap.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    source: String,
    regex: Regex,
}

impl MatchPattern {
    /// Whether `text` is a valid complete or in-progress input.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The expression source, mostly useful in logs and assertions.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Derives the matching pattern for `spec`.
///
/// Fails fast on structurally invalid specs (colliding separators, zero
/// grouping size) rather than producing a pattern that matches nothing or
/// everything.
pub fn synthesize(spec: &FormatSpec) -> Result<MatchPattern, ConfigError> {
    let source = synth::source(spec)?;
    let regex = Regex::new(&source).expect("synthesized pattern is valid regex");
    Ok(MatchPattern { source, regex })
}
