//! Shared fixtures for the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use promptdeck::Session;
use promptdeck_core::{KeyValueStore, MemoryStore};
use promptdeck_llm::{ContentPart, GenerationOutput, LlmProvider, LlmResult};

pub const WINDOW: Duration = Duration::from_millis(5000);

/// Provider double that records every call
pub struct RecordingProvider {
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<Vec<ContentPart>>>,
    reply: LlmResult<GenerationOutput>,
}

impl RecordingProvider {
    pub fn replying(reply: LlmResult<GenerationOutput>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            reply,
        })
    }

    pub fn text(text: &str) -> Arc<Self> {
        Self::replying(Ok(GenerationOutput::Text(text.to_string())))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn model(&self) -> &str {
        "test-model"
    }

    fn supports_multimodal(&self) -> bool {
        true
    }

    async fn generate_content(
        &self,
        _api_key: &str,
        parts: Vec<ContentPart>,
    ) -> LlmResult<GenerationOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(parts);
        self.reply.clone()
    }
}

/// A loaded session over a fresh in-memory store
pub async fn memory_session() -> (Arc<MemoryStore>, Arc<RecordingProvider>, Session) {
    let store = Arc::new(MemoryStore::new());
    let provider = RecordingProvider::text("generated");
    let session = session_over(store.clone(), provider.clone()).await;
    (store, provider, session)
}

/// A loaded session over the given store and provider
pub async fn session_over(
    store: Arc<dyn KeyValueStore>,
    provider: Arc<RecordingProvider>,
) -> Session {
    let session = Session::new(store, provider, WINDOW);
    session.load().await.unwrap();
    session
}
