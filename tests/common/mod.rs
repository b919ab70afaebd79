//! Call-counting stand-in for the hosted model.

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use aicode::llm::{LlmError, TextGenerator};
use async_trait::async_trait;
use reqwest::StatusCode;

pub enum Reply {
    Text(String),
    Fail,
}

pub struct StubGenerator {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    instructions: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Reply::Text(t.to_string())).collect())
    }

    pub fn failing() -> Self {
        Self::new(vec![Reply::Fail])
    }

    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            instructions: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_instruction(&self) -> Option<String> {
        self.instructions.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate_text(&self, instruction: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.instructions.lock().unwrap().push(instruction.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail) => Err(LlmError::Service {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "model overloaded".into(),
            }),
            None => Err(LlmError::EmptyResponse),
        }
    }
}
