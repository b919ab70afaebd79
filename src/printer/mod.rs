//! Printers for one-shot commands: plain/colored text and markdown (termimad).

use owo_colors::OwoColorize;
use termimad::MadSkin;

use crate::language::Language;

pub struct TextPrinter {
    pub color: Option<&'static str>,
}

impl TextPrinter {
    pub fn print(&self, text: &str) {
        if let Some(c) = self.color {
            match c {
                "green" => println!("{}", text.green()),
                "cyan" => println!("{}", text.cyan()),
                "red" => println!("{}", text.red()),
                "yellow" => println!("{}", text.yellow()),
                _ => println!("{}", text),
            }
        } else {
            println!("{}", text);
        }
    }
}

#[derive(Default)]
pub struct MarkdownPrinter {
    pub skin: MadSkin,
}

impl MarkdownPrinter {
    pub fn print(&self, text: &str) {
        self.skin.print_text(text);
        println!();
    }

    /// Render source code as a fenced block tagged with the language id.
    pub fn print_code(&self, code: &str, language: Language) {
        self.print(&fenced(code, language));
    }
}

pub fn fenced(code: &str, language: Language) -> String {
    format!("```{}\n{}\n```", language.id(), code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_block_uses_language_id() {
        assert_eq!(fenced("puts 1", Language::Ruby), "```ruby\nputs 1\n```");
    }
}
