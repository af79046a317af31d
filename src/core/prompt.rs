use crate::domain::model::Prompt;

/// The model must answer with the five canonical keys and nothing else;
/// the normalizer still copes when it doesn't.
pub const SYSTEM_INSTRUCTION: &str = "Return ONLY valid JSON with keys: summary (string), \
pros (string[]), cons (string[]), eligibility (string[]), actionSteps (string[]).";

const USER_TEMPLATE: &str = "Summarize the following government policy or press release \
in simple language. Provide concrete bullet points for pros, cons, eligibility, and \
action steps.";

/// Build the fixed instruction pair with the user's text interpolated
/// verbatim. No chunking or truncation happens here; input size is
/// bounded by request validation instead.
pub fn build_prompt(text: &str) -> Prompt {
    Prompt {
        system: SYSTEM_INSTRUCTION.to_string(),
        user: format!("{}\n\n{}", USER_TEMPLATE, text),
    }
}
