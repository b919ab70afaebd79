use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::language::Language;

#[derive(Parser, Debug, Clone)]
#[command(name = "aicode", about = "AI code editor: generate code and simulate running it", version)]
pub struct Cli {
    /// Model to use (defaults to DEFAULT_MODEL).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Randomness of generated output.
    #[arg(long, global = true, value_parser = clap::value_parser!(f32))]
    pub temperature: Option<f32>,

    /// Limits highest probable tokens (words).
    #[arg(long = "top-p", global = true, value_parser = clap::value_parser!(f32))]
    pub top_p: Option<f32>,

    /// Language id, e.g. python, java, cpp (defaults to DEFAULT_LANGUAGE).
    #[arg(short = 'l', long, global = true)]
    pub language: Option<Language>,

    /// Log adapter and client activity at debug level.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Open the interactive editor panel (default).
    Edit,
    /// Generate code for a prompt and print it.
    Generate {
        /// What the code should do.
        #[arg(value_name = "PROMPT", required = true, num_args = 1..)]
        prompt: Vec<String>,
        /// Render as a fenced markdown block.
        #[arg(long)]
        md: bool,
    },
    /// Simulate running code read from FILE or piped stdin.
    Run {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Text to feed the program as standard input.
        #[arg(long)]
        input: Option<String>,
    },
    /// List supported languages.
    Languages,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_is_parsed_from_id() {
        let cli = Cli::try_parse_from(["aicode", "-l", "python", "generate", "print", "hello"]).unwrap();
        assert_eq!(cli.language, Some(Language::Python));
        match cli.command {
            Some(Command::Generate { prompt, md }) => {
                assert_eq!(prompt.join(" "), "print hello");
                assert!(!md);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["aicode", "--language", "cobol"]).is_err());
    }

    #[test]
    fn no_subcommand_means_editor() {
        let cli = Cli::try_parse_from(["aicode"]).unwrap();
        assert!(cli.command.is_none());
    }
}
