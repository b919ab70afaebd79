//! Edit handler: the interactive editor panel.

use std::sync::Arc;

use anyhow::Result;

use crate::{
    language::Language,
    llm::TextGenerator,
    tui::{run_editor, App, DisplayOptions},
};

pub async fn run(
    generator: Arc<dyn TextGenerator>,
    language: Language,
    model: &str,
    options: DisplayOptions,
) -> Result<()> {
    let app = App::new(language, model.to_string(), options);
    run_editor(generator, app).await
}
