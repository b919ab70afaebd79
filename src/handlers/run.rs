//! Run handler: simulated execution from a file or piped stdin.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;

use crate::{
    execution::{execute_code, ExecutionOutcome},
    language::Language,
    llm::TextGenerator,
    printer::TextPrinter,
};

pub async fn run(
    generator: &dyn TextGenerator,
    file: Option<&Path>,
    language: Language,
    input: Option<&str>,
) -> Result<()> {
    let stdin_is_tty = io::stdin().is_terminal();
    let code = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None if !stdin_is_tty => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        None => bail!("Provide a FILE or pipe the code on stdin"),
    };

    let mut outcome = execute_code(generator, &code, language, input).await;

    // Same flow as the panel: ask once, then resubmit with the answer.
    if outcome.is_input_required() {
        if !stdin_is_tty || file.is_none() {
            bail!("The program reads input; pass it with --input");
        }
        let answer = ask_for_input()?;
        outcome = execute_code(generator, &code, language, Some(&answer)).await;
    }

    print_outcome(&outcome);
    Ok(())
}

fn ask_for_input() -> Result<String> {
    print!("Program expects input: ");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_outcome(outcome: &ExecutionOutcome) {
    let text = outcome.as_str();
    let color = if text.starts_with("Error executing code:") {
        Some("red")
    } else if outcome.is_input_required() {
        Some("yellow")
    } else {
        None
    };
    TextPrinter { color }.print(text);
}
