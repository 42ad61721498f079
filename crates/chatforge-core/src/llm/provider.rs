//! CompletionService trait definition.
//!
//! The abstraction over the hosted completion/embedding API. Uses native
//! async fn in traits (RPITIT, Rust 2024 edition). The OpenAI-compatible
//! implementation lives in chatforge-infra.

use chatforge_types::llm::{CompletionError, CompletionRequest, ModelInfo};

/// One-shot text completion, embedding, and model-listing operations.
///
/// The service is a black box with possible failure: no retries, no
/// provider fallback here -- wrap with [`super::Retrying`] for that.
pub trait CompletionService: Send + Sync {
    /// Send a completion request and return the generated text.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;

    /// Embed a text into a vector.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, CompletionError>> + Send;

    /// List the chat-capable models the provider advertises.
    fn list_models(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ModelInfo>, CompletionError>> + Send;
}

impl<T: CompletionService> CompletionService for std::sync::Arc<T> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        (**self).complete(request).await
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, CompletionError> {
        (**self).embed(text).await
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, CompletionError> {
        (**self).list_models().await
    }
}
