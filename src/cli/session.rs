//! Scripted editing-session replay against one field configuration.

use serde::Serialize;
use serde_json::Value;

use crate::field::controller::NumberField;
use crate::numeric::kind::{NumericKind, NumericValue};
use crate::numeric::parse;
use crate::numeric::render;

use super::args::Args;

/// One editing event from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Focus,
    Blur,
    Type(String),
    Set(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepParseError(String);

impl std::fmt::Display for StepParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid step {:?}; expected focus, blur, type:<text> or set:<text>",
            self.0
        )
    }
}

impl std::error::Error for StepParseError {}

pub fn parse_step(raw: &str) -> Result<Step, StepParseError> {
    match raw {
        "focus" => Ok(Step::Focus),
        "blur" => Ok(Step::Blur),
        _ => {
            if let Some(text) = raw.strip_prefix("type:") {
                Ok(Step::Type(text.to_string()))
            } else if let Some(text) = raw.strip_prefix("set:") {
                Ok(Step::Set(text.to_string()))
            } else {
                Err(StepParseError(raw.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Focused,
    Accepted,
    Rejected,
    Committed,
    CommitFailed,
    ValueSet,
    SetFailed,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Focused => "focused",
            Outcome::Accepted => "accepted",
            Outcome::Rejected => "rejected",
            Outcome::Committed => "committed",
            Outcome::CommitFailed => "commit failed",
            Outcome::ValueSet => "value set",
            Outcome::SetFailed => "set failed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub outcome: Outcome,
    pub raw_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub version: &'static str,
    pub kind: &'static str,
    pub pattern: String,
    pub steps: Vec<StepReport>,
    pub value: Value,
    pub display: String,
    pub error_count: u32,
}

/// Replays the steps described by `args` and reports every decision.
pub fn replay(args: &Args) -> Result<SessionReport, Box<dyn std::error::Error>> {
    let steps = args
        .steps
        .iter()
        .map(|raw| parse_step(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let mut field = NumberField::new(args.kind.to_kind(), args.to_spec())?;
    field.set_autoselect(args.autoselect);
    field.set_grouping_hidden_on_focus(args.hide_grouping_on_focus);

    let mut reports = Vec::with_capacity(steps.len());
    let mut error_count = 0u32;
    for (raw, step) in args.steps.iter().zip(steps) {
        let (outcome, error) = match step {
            Step::Focus => {
                field.on_focus();
                (Outcome::Focused, None)
            }
            Step::Blur => match field.on_blur() {
                Ok(()) => (Outcome::Committed, None),
                Err(err) => {
                    error_count += 1;
                    (Outcome::CommitFailed, Some(err.to_string()))
                }
            },
            Step::Type(text) => {
                if field.on_keystroke(&text) {
                    (Outcome::Accepted, None)
                } else {
                    (Outcome::Rejected, None)
                }
            }
            Step::Set(text) => match parse::parse(&text, field.spec(), field.kind()) {
                Ok(value) => {
                    field.set_value(value);
                    (Outcome::ValueSet, None)
                }
                Err(err) => {
                    error_count += 1;
                    (Outcome::SetFailed, Some(err.to_string()))
                }
            },
        };
        reports.push(StepReport {
            step: raw.clone(),
            outcome,
            raw_text: field.raw_text().to_string(),
            error,
        });
    }

    Ok(SessionReport {
        version: "numgate.v0",
        kind: kind_label(field.kind()),
        pattern: field.pattern().as_str().to_string(),
        steps: reports,
        value: value_json(field.value()),
        display: render::format_value(field.value(), field.spec()),
        error_count,
    })
}

pub fn render_json(report: &SessionReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

pub fn render_human(report: &SessionReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("kind: {}\n", report.kind));
    out.push_str(&format!("pattern: {}\n", report.pattern));
    for step in &report.steps {
        out.push_str(&format!(
            "  {:<24} -> {:<13} [{}]",
            step.step,
            step.outcome.as_str(),
            step.raw_text
        ));
        if let Some(error) = &step.error {
            out.push_str(&format!(" ({error})"));
        }
        out.push('\n');
    }
    out.push_str(&format!("value: {}\n", report.value));
    out.push_str(&format!("display: {}\n", report.display));
    out
}

const fn kind_label(kind: NumericKind) -> &'static str {
    match kind {
        NumericKind::Int32 => "int32",
        NumericKind::Int64 => "int64",
        NumericKind::Float64 => "float64",
        NumericKind::Decimal => "decimal",
    }
}

fn value_json(value: &NumericValue) -> Value {
    match value {
        NumericValue::Int32(v) => serde_json::json!(v),
        NumericValue::Int64(v) => serde_json::json!(v),
        NumericValue::Float64(v) => serde_json::json!(v),
        NumericValue::Decimal(v) => Value::String(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    #[test]
    fn parses_steps() {
        assert_eq!(parse_step("focus"), Ok(Step::Focus));
        assert_eq!(parse_step("blur"), Ok(Step::Blur));
        assert_eq!(parse_step("type:1,2"), Ok(Step::Type("1,2".to_string())));
        assert_eq!(parse_step("set:42"), Ok(Step::Set("42".to_string())));
        assert!(parse_step("hover").is_err());
    }

    #[test]
    fn replays_a_typing_session() {
        let args = Args::try_parse_from([
            "numgate",
            "--kind",
            "int32",
            "focus",
            "type:1",
            "type:12",
            "type:1,234",
            "blur",
        ])
        .expect("args");
        let report = replay(&args).expect("session");
        assert_eq!(report.kind, "int32");
        assert_eq!(report.error_count, 0);
        assert_eq!(report.display, "1,234");
        assert_eq!(report.value, serde_json::json!(1234));
        let outcomes: Vec<Outcome> = report.steps.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                Outcome::Focused,
                Outcome::Accepted,
                Outcome::Accepted,
                Outcome::Accepted,
                Outcome::Committed
            ]
        );
    }

    #[test]
    fn reports_rejections_without_failing() {
        let args = Args::try_parse_from([
            "numgate", "--kind", "int32", "focus", "type:a", "blur",
        ])
        .expect("args");
        let report = replay(&args).expect("session");
        assert_eq!(report.steps[1].outcome, Outcome::Rejected);
        assert_eq!(report.error_count, 0);
        assert_eq!(report.display, "0");
    }

    #[test]
    fn json_shape_is_stable() {
        let args = Args::try_parse_from(["numgate", "set:1,234.5", "--max-fraction", "2"])
            .expect("args");
        let report = replay(&args).expect("session");
        let value = serde_json::to_value(&report).expect("json");
        assert_eq!(value["version"], "numgate.v0");
        assert_eq!(value["kind"], "decimal");
        assert_eq!(value["value"], "1234.5");
        assert_eq!(value["display"], "1,234.5");
        assert!(value["steps"].is_array());
    }
}
