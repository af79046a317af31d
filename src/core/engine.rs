use crate::core::normalizer;
use crate::core::prompt;
use crate::core::{CompletionService, SimplificationResult};
use crate::utils::error::Result;
use crate::utils::validation;
use std::sync::Arc;

/// One request/response cycle: validate, ask the model, normalize.
/// Stateless; a single upstream call per invocation and no retries.
pub struct SimplifierEngine {
    service: Arc<dyn CompletionService>,
    max_input_chars: usize,
}

impl SimplifierEngine {
    pub fn new(service: Arc<dyn CompletionService>, max_input_chars: usize) -> Self {
        Self {
            service,
            max_input_chars,
        }
    }

    pub async fn simplify(&self, text: &str) -> Result<SimplificationResult> {
        validation::validate_input_text(text, self.max_input_chars)?;

        let prompt = prompt::build_prompt(text);
        tracing::debug!(
            "Requesting completion for {} input characters",
            text.chars().count()
        );

        let raw = self.service.complete(&prompt).await?;
        tracing::debug!("Received {} bytes from upstream", raw.len());

        let result = normalizer::normalize_response(&raw)?;
        tracing::debug!(
            "Normalized response: {} pros, {} cons, {} eligibility, {} action steps",
            result.pros.len(),
            result.cons.len(),
            result.eligibility.len(),
            result.action_steps.len()
        );

        Ok(result)
    }
}
