//! Assistant Integration Tests

use std::sync::Arc;

use promptdeck::AppError;
use promptdeck_core::MemoryStore;
use promptdeck_llm::{ContentPart, GenerationOutput, LlmError};

use crate::support::{memory_session, session_over, RecordingProvider};

#[tokio::test]
async fn test_missing_key_never_reaches_provider() {
    let (_, provider, session) = memory_session().await;

    assert!(matches!(
        session.generate("hello").await,
        Err(AppError::MissingApiKey)
    ));
    assert!(matches!(
        session.improve("hello").await,
        Err(AppError::MissingApiKey)
    ));
    assert!(matches!(
        session
            .generate_from_image("describe", "aGVsbG8=", "image/png")
            .await,
        Err(AppError::MissingApiKey)
    ));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_generate_with_key() {
    let provider = RecordingProvider::text("  An answer.\n");
    let session = session_over(Arc::new(MemoryStore::new()), provider.clone()).await;
    session.settings().set_api_key("test-key").await.unwrap();

    assert_eq!(session.generate("question").await.unwrap(), "An answer.");
    assert_eq!(provider.call_count(), 1);
    assert_eq!(
        provider.requests.lock().unwrap()[0],
        vec![ContentPart::text("question")]
    );
}

#[tokio::test]
async fn test_blocked_output_is_a_placeholder_not_an_error() {
    let provider = RecordingProvider::replying(Ok(GenerationOutput::Blocked {
        reason: "SAFETY".to_string(),
    }));
    let session = session_over(Arc::new(MemoryStore::new()), provider).await;
    session.settings().set_api_key("test-key").await.unwrap();

    assert_eq!(
        session.generate("question").await.unwrap(),
        "Response was blocked due to safety."
    );
}

#[tokio::test]
async fn test_failed_request_leaves_prompts_untouched() {
    let provider = RecordingProvider::replying(Err(LlmError::AuthenticationFailed {
        message: "bad key".to_string(),
    }));
    let store = Arc::new(MemoryStore::new());
    let session = session_over(store.clone(), provider).await;
    session.settings().set_api_key("test-key").await.unwrap();
    let writes = store.write_count();

    assert!(matches!(
        session.engineer("draft").await,
        Err(AppError::RequestFailed(_))
    ));
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn test_cleared_key_is_missing_again() {
    let (_, provider, session) = memory_session().await;
    session.settings().set_api_key("test-key").await.unwrap();
    session.generate("one").await.unwrap();

    session.settings().set_api_key("   ").await.unwrap();
    assert!(matches!(
        session.generate("two").await,
        Err(AppError::MissingApiKey)
    ));
    assert_eq!(provider.call_count(), 1);
}
