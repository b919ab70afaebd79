//! End-to-end panel flows against a stubbed model.

mod common;

use aicode::{
    execution::{execute_code, ExecutionOutcome, INPUT_REQUIRED},
    generation::generate_code,
    language::Language,
    panel::{PanelState, Session, WAITING_FOR_INPUT},
};
use anyhow::Result;
use common::StubGenerator;

const SUM_PROGRAM: &str = r#"import java.util.Scanner;

public class Main {
    public static void main(String[] args) {
        Scanner sc = new Scanner(System.in);
        int a = sc.nextInt();
        int b = sc.nextInt();
        System.out.println(a + b);
    }
}"#;

#[tokio::test]
async fn hello_world_generate_then_run() -> Result<()> {
    let stub = StubGenerator::replying(&["```python\nprint(\"hello world\")\n```", "hello world\n"]);
    let mut session = Session::new(Language::Python);

    session.set_prompt("print hello world");
    let req = session.begin_generate().expect("generate allowed when idle");
    let code = generate_code(&stub, &req.prompt, req.language).await;
    session.finish_generate(code);

    assert_eq!(session.code(), "print(\"hello world\")");
    assert_eq!(session.code().lines().count(), 1);

    let req = session.begin_run().expect("run allowed when idle");
    let outcome = execute_code(&stub, &req.code, req.language, req.input.as_deref()).await;
    session.finish_execution(outcome);

    assert_eq!(session.state(), PanelState::Idle);
    assert_ne!(session.output(), INPUT_REQUIRED);
    assert_eq!(session.output(), "hello world");
    assert_eq!(stub.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn java_scanner_asks_for_input_then_runs_once() -> Result<()> {
    let stub = StubGenerator::replying(&["7"]);
    let mut session = Session::new(Language::Java);
    session.set_code(SUM_PROGRAM);

    let req = session.begin_run().expect("run allowed when idle");
    let outcome = execute_code(&stub, &req.code, req.language, req.input.as_deref()).await;
    assert_eq!(outcome, ExecutionOutcome::InputRequired);
    session.finish_execution(outcome);

    assert_eq!(session.state(), PanelState::AwaitingInput);
    assert_eq!(session.output(), WAITING_FOR_INPUT);
    assert_eq!(stub.calls(), 0);

    session.set_pending_input("3 4");
    let req = session.submit_input().expect("submit allowed while awaiting input");
    let outcome = execute_code(&stub, &req.code, req.language, req.input.as_deref()).await;
    session.finish_execution(outcome);

    assert_eq!(stub.calls(), 1);
    assert_eq!(session.state(), PanelState::Idle);
    assert_eq!(session.output(), "7");
    Ok(())
}

#[tokio::test]
async fn failed_generation_still_settles_to_idle() -> Result<()> {
    let stub = StubGenerator::failing();
    let mut session = Session::new(Language::Kotlin);

    session.set_prompt("read a file");
    let req = session.begin_generate().expect("generate allowed when idle");
    session.finish_generate(generate_code(&stub, &req.prompt, req.language).await);

    assert_eq!(session.state(), PanelState::Idle);
    assert!(session.code().starts_with("// Error generating code"));
    Ok(())
}
