//! Instruction text sent to the model for each adapter.

use crate::language::Language;

pub fn generation_instruction(prompt: &str, language: Language) -> String {
    format!(
        "Generate {lang} code for the following request. Only provide the code without any explanation or markdown: {prompt}",
        lang = language.id(),
    )
}

pub fn execution_instruction(code: &str, language: Language, input: Option<&str>) -> String {
    let input_line = input
        .map(|i| format!("Use this as input if needed: {i}"))
        .unwrap_or_default();
    format!(
        "Execute the following {lang} code and return ONLY the output or error message. If there is no output, return \"No output\". Do not include any explanations or markdown:\n\n{code}\n\n{input_line}",
        lang = language.id(),
    )
}
