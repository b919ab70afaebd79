mod common;

use aicode::{
    generation::{generate_code, GENERATION_FAILED},
    language::Language,
    utils::has_code_fence,
};
use anyhow::Result;
use common::StubGenerator;

#[tokio::test]
async fn fenced_reply_comes_back_as_plain_code() -> Result<()> {
    let stub = StubGenerator::replying(&["```python\nprint(\"hello world\")\n```"]);

    let code = generate_code(&stub, "print hello world", Language::Python).await;

    assert_eq!(code, "print(\"hello world\")");
    assert_eq!(stub.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn no_language_leaves_fences_behind() -> Result<()> {
    for lang in Language::ALL {
        let reply = format!("\n```{}\nbody\n```\n", lang.id());
        let stub = StubGenerator::replying(&[reply.as_str()]);
        let code = generate_code(&stub, "anything", lang).await;
        assert!(!has_code_fence(&code), "fence left for {}", lang.id());
        assert_eq!(code, "body");
    }
    Ok(())
}

#[tokio::test]
async fn closing_fence_on_the_code_line_is_removed() -> Result<()> {
    let stub = StubGenerator::replying(&["```python\nprint(\"hello world\")```"]);

    let code = generate_code(&stub, "print hello world", Language::Python).await;

    assert_eq!(code, "print(\"hello world\")");
    assert!(!code.contains("```"));
    Ok(())
}

#[tokio::test]
async fn instruction_names_language_and_prompt() -> Result<()> {
    let stub = StubGenerator::replying(&["fn main() {}"]);

    generate_code(&stub, "an empty program", Language::Rust).await;

    let instruction = stub.last_instruction().unwrap_or_default();
    assert!(instruction.starts_with("Generate rust code"));
    assert!(instruction.contains("without any explanation or markdown"));
    assert!(instruction.ends_with("an empty program"));
    Ok(())
}

#[tokio::test]
async fn service_failure_becomes_placeholder_comment() -> Result<()> {
    let stub = StubGenerator::failing();

    let code = generate_code(&stub, "sort a list", Language::Go).await;

    assert_eq!(code, GENERATION_FAILED);
    assert!(code.starts_with("// Error generating code"));
    assert_eq!(stub.calls(), 1);
    Ok(())
}
