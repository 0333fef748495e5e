//! Parsing and normalization of critic responses.
//!
//! The critic is a trust boundary: ambiguity, missing data, or malformed
//! output must bias toward denial. Every failure mode in here degrades to an
//! `Unsafe` verdict rather than surfacing as a pipeline error.

use std::sync::LazyLock;

use jsonschema::Draft;
use serde_json::Value;
use tracing::warn;

use crate::core::state::{Decision, Verdict};

const VERDICT_SCHEMA: &str = include_str!("../../schemas/critic_verdict.schema.json");

/// Reason attached when the critic response cannot be parsed or validated.
pub const MALFORMED_REASON: &str = "malformed critic response";

static FENCE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("fence regex should be valid")
});

/// Parse a critic response into a verdict. Never fails.
///
/// Accepts a bare JSON object or one wrapped in a markdown code fence (chat
/// oracles routinely add fences despite instructions). The object must
/// conform to the embedded two-field schema; the decision string then
/// normalizes case-insensitively, with anything unrecognized treated as
/// unsafe.
pub fn parse_verdict(raw: &str) -> Verdict {
    let body = extract_body(raw);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            warn!(err = %err, "critic response is not valid json");
            return Verdict::unsafe_with(MALFORMED_REASON);
        }
    };

    if let Err(errors) = validate_schema(&value) {
        warn!(errors = %errors.join("; "), "critic response failed schema validation");
        return Verdict::unsafe_with(MALFORMED_REASON);
    }

    // Schema guarantees both fields exist as strings.
    let decision_raw = value["decision"].as_str().unwrap_or_default();
    let reason = value["reason"].as_str().unwrap_or_default().to_string();

    let decision = if decision_raw.eq_ignore_ascii_case("safe") {
        Decision::Safe
    } else if decision_raw.eq_ignore_ascii_case("unsafe") {
        Decision::Unsafe
    } else {
        warn!(decision = decision_raw, "unrecognized critic decision, treating as unsafe");
        Decision::Unsafe
    };

    Verdict { decision, reason }
}

/// Prefer the contents of a code fence when one is present.
fn extract_body(raw: &str) -> &str {
    if let Some(caps) = FENCE_RE.captures(raw)
        && let Some(inner) = caps.get(1)
    {
        return inner.as_str();
    }
    raw.trim()
}

fn validate_schema(instance: &Value) -> Result<(), Vec<String>> {
    let schema: Value =
        serde_json::from_str(VERDICT_SCHEMA).expect("embedded verdict schema should be valid json");
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .expect("embedded verdict schema should compile");
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if messages.is_empty() {
        Ok(())
    } else {
        Err(messages)
    }
}
