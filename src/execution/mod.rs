//! Execution adapter: asks the model to simulate running code.
//!
//! Whether the program needs stdin is decided twice. Before the call, a
//! per-language substring check on the source; after it, a look at the
//! reply for an "input ..." prompt. Both are approximate on purpose.

use std::fmt;

use crate::{language::Language, llm::TextGenerator, prompt::execution_instruction, utils::strip_code_fences};

/// Initial editor content; running it is treated like running nothing.
pub const DEFAULT_CODE: &str = "// Start typing your code here...";
pub const EMPTY_CODE_MESSAGE: &str = "Please enter some code before running.";
pub const NO_OUTPUT: &str = "No output";
pub const INPUT_REQUIRED: &str = "INPUT_REQUIRED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Text to show: program output, guidance, or an error description.
    Output(String),
    /// The program reads stdin and no input was supplied.
    InputRequired,
}

impl ExecutionOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            ExecutionOutcome::Output(text) => text,
            ExecutionOutcome::InputRequired => INPUT_REQUIRED,
        }
    }

    pub fn is_input_required(&self) -> bool {
        matches!(self, ExecutionOutcome::InputRequired)
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substrings that usually mean "reads standard input".
pub fn input_patterns(language: Language) -> &'static [&'static str] {
    match language {
        Language::Cpp => &["cin", "std::cin", "scanf"],
        Language::Python => &["input(", "raw_input("],
        Language::JavaScript => &["prompt(", "readline", "process.stdin"],
        Language::Java => &["Scanner", "System.console()", "BufferedReader"],
        _ => &[],
    }
}

pub fn looks_like_it_reads_input(code: &str, language: Language) -> bool {
    input_patterns(language).iter().any(|p| code.contains(p))
}

fn reply_asks_for_input(output: &str) -> bool {
    output.to_lowercase().contains("input") && output.contains("...")
}

/// Simulate `code`. Never fails: service errors become an `Error executing code:` message.
///
/// An empty `input` counts as no input.
pub async fn execute_code(
    generator: &dyn TextGenerator,
    code: &str,
    language: Language,
    input: Option<&str>,
) -> ExecutionOutcome {
    let trimmed = code.trim();
    if trimmed.is_empty() || trimmed == DEFAULT_CODE {
        return ExecutionOutcome::Output(EMPTY_CODE_MESSAGE.to_string());
    }

    let input = input.filter(|i| !i.is_empty());
    if input.is_none() && looks_like_it_reads_input(code, language) {
        tracing::debug!(language = language.id(), "code reads stdin, asking for input");
        return ExecutionOutcome::InputRequired;
    }

    let instruction = execution_instruction(code, language, input);
    tracing::debug!(language = language.id(), with_input = input.is_some(), "requesting execution");

    match generator.generate_text(&instruction).await {
        Ok(text) => {
            let output = strip_code_fences(&text);
            if reply_asks_for_input(&output) {
                tracing::debug!("reply looks like an input prompt");
                return ExecutionOutcome::InputRequired;
            }
            if output.is_empty() {
                return ExecutionOutcome::Output(NO_OUTPUT.to_string());
            }
            ExecutionOutcome::Output(output)
        }
        Err(e) => {
            tracing::warn!(error = %e, language = language.id(), "code execution failed");
            ExecutionOutcome::Output(format!("Error executing code: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_are_plain_substrings() {
        assert!(looks_like_it_reads_input("name = input()", Language::Python));
        assert!(looks_like_it_reads_input("int n; std::cin >> n;", Language::Cpp));
        // `cin` also matches inside unrelated identifiers
        assert!(looks_like_it_reads_input("int vaccine = 1;", Language::Cpp));
        assert!(!looks_like_it_reads_input("gets", Language::Ruby));
        assert!(!looks_like_it_reads_input("print(1)", Language::Python));
    }

    #[test]
    fn reply_heuristic_needs_both_word_and_ellipsis() {
        assert!(reply_asks_for_input("Waiting for INPUT..."));
        assert!(!reply_asks_for_input("Invalid input"));
        assert!(!reply_asks_for_input("Loading..."));
    }

    #[test]
    fn sentinel_renders_literally() {
        assert_eq!(ExecutionOutcome::InputRequired.to_string(), "INPUT_REQUIRED");
        assert_eq!(ExecutionOutcome::Output("7".into()).as_str(), "7");
    }
}
