//! Generate handler: prints code for a prompt without explanations.

use anyhow::{bail, Result};

use crate::{
    generation::{generate_code, GENERATION_FAILED},
    language::Language,
    llm::TextGenerator,
    printer::{MarkdownPrinter, TextPrinter},
};

pub async fn run(generator: &dyn TextGenerator, prompt: &str, language: Language, markdown: bool) -> Result<()> {
    if prompt.trim().is_empty() {
        bail!("Provide a prompt describing the code to generate");
    }

    let code = generate_code(generator, prompt, language).await;
    if code == GENERATION_FAILED {
        bail!("{}", GENERATION_FAILED);
    }

    if markdown {
        MarkdownPrinter::default().print_code(&code, language);
    } else {
        TextPrinter { color: None }.print(&code);
    }
    Ok(())
}
