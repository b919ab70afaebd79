//! Text helpers shared by the adapters.

/// Remove markdown code-fence lines (```` ``` ```` or ```` ```lang ````) and trim.
/// A closing fence glued to the end of the last line is dropped as well.
pub fn strip_code_fences(text: &str) -> String {
    let kept: Vec<&str> = text.lines().filter(|line| !is_fence_line(line)).collect();
    let joined = kept.join("\n");
    let trimmed = joined.trim();
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim_end().to_string()
}

fn is_fence_line(line: &str) -> bool {
    match line.trim().strip_prefix("```") {
        Some(tag) => tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '_' | '.')),
        None => false,
    }
}

/// True when `text` contains a markdown fence line.
pub fn has_code_fence(text: &str) -> bool {
    text.lines().any(is_fence_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tagged_fence() {
        let raw = "```python\nprint(\"hello world\")\n```\n";
        assert_eq!(strip_code_fences(raw), "print(\"hello world\")");
    }

    #[test]
    fn strips_tags_with_symbols_and_padding() {
        assert_eq!(strip_code_fences("  ```c++\nint x;\n  ```  "), "int x;");
        assert_eq!(strip_code_fences("```c#\nvar x = 1;\n```"), "var x = 1;");
        assert_eq!(strip_code_fences("```objective-c\n@end\n```"), "@end");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  42\n"), "42");
        assert_eq!(strip_code_fences("let s = \"```\";"), "let s = \"```\";");
    }

    #[test]
    fn fence_only_response_becomes_empty() {
        assert_eq!(strip_code_fences("```\n```"), "");
        assert!(!has_code_fence(&strip_code_fences("```js\n```\n```")));
    }

    #[test]
    fn closing_fence_glued_to_last_line() {
        let out = strip_code_fences("```python\nprint(\"hello world\")```");
        assert_eq!(out, "print(\"hello world\")");
        assert!(!out.contains("```"));
        assert_eq!(strip_code_fences("x = 1\ny = 2```  \n"), "x = 1\ny = 2");
    }

    #[test]
    fn indentation_inside_block_survives() {
        let raw = "```python\ndef f():\n    return 1\n```";
        assert_eq!(strip_code_fences(raw), "def f():\n    return 1");
    }
}
