use crate::domain::model::{FieldValue, ParsedFields, SimplificationResult};
use crate::utils::error::{Result, SimplifyError};
use once_cell::sync::Lazy;
use regex::Regex;

// Runs of leading list markers at line starts ("- ", "* ", "• ", also
// stacked markers like "- - "). Asterisks are removed before this runs,
// which is what keeps stripping idempotent.
static BULLET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:[-*•][ \t]+)+").unwrap());

/// Locate the outermost `{`..`}` span in the raw model output and parse
/// it as JSON. Models wrap the requested object in explanatory prose
/// often enough that taking the outermost brace pair is the recovery
/// heuristic of record.
pub fn extract_structured(raw: &str) -> Result<ParsedFields> {
    let span = outer_brace_span(raw).ok_or_else(|| SimplifyError::ParseError {
        message: "no JSON object found in model response".to_string(),
    })?;

    serde_json::from_str(span).map_err(|e| SimplifyError::ParseError {
        message: format!("model response contained invalid JSON: {}", e),
    })
}

fn outer_brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end > start {
        Some(&raw[start..=end])
    } else {
        None
    }
}

/// Total coercion into a list: absent stays empty, a scalar becomes a
/// single element, a sequence passes through.
pub fn coerce_list(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::Absent => Vec::new(),
        FieldValue::Scalar(s) => vec![s.clone()],
        FieldValue::Many(items) => items.clone(),
    }
}

/// Total coercion into prose, used for the summary field.
pub fn coerce_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Absent => String::new(),
        FieldValue::Scalar(s) => s.clone(),
        FieldValue::Many(items) => items.join("\n"),
    }
}

/// Remove emphasis markers and leading list markers the model sneaks
/// into string fields despite the instructions. Idempotent: emphasis
/// asterisks go first, so the bullet pass never uncovers new markers.
pub fn strip_markup(s: &str) -> String {
    let without_emphasis = s.replace('*', "");
    BULLET_PREFIX.replace_all(&without_emphasis, "").into_owned()
}

/// Coerce every parsed field and scrub list/emphasis syntax.
pub fn normalize(parsed: ParsedFields) -> SimplificationResult {
    let strip_list = |value: &FieldValue| -> Vec<String> {
        coerce_list(value).iter().map(|s| strip_markup(s)).collect()
    };

    SimplificationResult {
        summary: strip_markup(&coerce_text(&parsed.summary)),
        pros: strip_list(&parsed.pros),
        cons: strip_list(&parsed.cons),
        eligibility: strip_list(&parsed.eligibility),
        action_steps: strip_list(&parsed.action_steps),
    }
}

/// The two-mode response contract. Structured mode is primary: any
/// well-formed brace span must parse, and a broken span is an error
/// rather than a best-effort result. Prose with no object at all
/// degrades to a freeform summary instead of failing.
pub fn normalize_response(raw: &str) -> Result<SimplificationResult> {
    if outer_brace_span(raw).is_none() {
        return Ok(SimplificationResult::freeform(raw));
    }

    let parsed = extract_structured(raw)?;
    Ok(normalize(parsed))
}
