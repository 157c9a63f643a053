//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mockito::{Mock, Server, ServerGuard};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use vocab_info::cache::{CacheDocument, CacheKey, CacheStore, StoreError};
use vocab_info::{Error, ErrorContext, Generator};

/// Model text for a well-formed record, wrapped the way chat models often
/// answer.
pub fn sample_output(vocab: &str, language: &str) -> String {
    let body = json!({
        "vocab": vocab,
        "language": language,
        "examples": [
            {"level": "easy", "sentence": "Children are resilient.", "translation": "Trẻ em rất kiên cường."},
            {"level": "medium", "sentence": "The economy proved resilient.", "translation": "Nền kinh tế tỏ ra vững vàng."},
            {"level": "hard", "sentence": "Resilient materials recover their shape after deformation.", "translation": "Vật liệu đàn hồi phục hồi hình dạng sau khi biến dạng."}
        ],
        "synonyms": [
            {"word": "tough", "meaning": "cứng cỏi"},
            {"word": "adaptable", "meaning": "dễ thích nghi"}
        ],
        "origin": {
            "etymology": "Từ tiếng Latinh resilire, nghĩa là bật lại.",
            "historical_context": "Xuất hiện trong tiếng Anh vào thế kỷ 17."
        }
    });
    format!(
        "Here is the information you asked for:\n```json\n{}\n```",
        serde_json::to_string_pretty(&body).unwrap()
    )
}

/// Generator returning a fixed answer and counting calls.
pub struct ScriptedGenerator {
    output: String,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(output: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            output: output.into(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn with_delay(output: impl Into<String>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            output: output.into(),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, _vocab: &str, _language: &str) -> vocab_info::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.output.clone())
    }
}

/// Generator that always fails like an unreachable model service.
#[derive(Default)]
pub struct FailingGenerator {
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _vocab: &str, _language: &str) -> vocab_info::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::generation_with_context(
            "connection refused",
            ErrorContext::new().with_source("generation"),
        ))
    }
}

/// Store whose every call fails, as when the database host is down.
pub struct UnreachableStore;

#[async_trait]
impl CacheStore for UnreachableStore {
    async fn find(&self, _key: &CacheKey) -> Result<Option<CacheDocument>, StoreError> {
        Err(StoreError::Connection("server selection timed out".into()))
    }

    async fn upsert(&self, _document: CacheDocument) -> Result<(), StoreError> {
        Err(StoreError::Connection("server selection timed out".into()))
    }

    fn name(&self) -> &'static str {
        "unreachable"
    }
}

/// A mockito server standing in for the chat-completions service.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Mock a successful completion whose assistant message is `content`.
    pub async fn mock_completion(&mut self, path: &str, content: &str) -> Mock {
        let body = json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
            ]
        });
        self.server
            .mock("POST", path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    pub async fn mock_error(&mut self, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}
