//! Generation adapter: prompt + language in, plain source text out.

use crate::{language::Language, llm::TextGenerator, prompt::generation_instruction, utils::strip_code_fences};

/// Shown in the editor when the service call fails.
pub const GENERATION_FAILED: &str = "// Error generating code. Please try again.";

/// Ask the model for code. Never fails: service errors become [`GENERATION_FAILED`].
pub async fn generate_code(generator: &dyn TextGenerator, prompt: &str, language: Language) -> String {
    let instruction = generation_instruction(prompt, language);
    tracing::debug!(language = language.id(), "requesting code generation");

    match generator.generate_text(&instruction).await {
        Ok(text) => strip_code_fences(&text),
        Err(e) => {
            tracing::warn!(error = %e, language = language.id(), "code generation failed");
            GENERATION_FAILED.to_string()
        }
    }
}
