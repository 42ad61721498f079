//! OpenAI-compatible completion service.
//!
//! Implements the `CompletionService` port from chatforge-core using
//! [`async_openai`] for type-safe request/response handling. Works
//! against OpenAI itself or any compatible gateway via a configurable
//! base URL.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use async_openai::types::embeddings::{CreateEmbeddingRequest, EmbeddingInput};
use secrecy::{ExposeSecret, SecretString};

use chatforge_core::llm::CompletionService;
use chatforge_types::llm::{CompletionError, CompletionRequest, MessageRole, ModelInfo};

use crate::config::ProviderConfig;

/// Embedding model used for the embeddings utility endpoint.
const EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// OpenAI-compatible provider.
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompletionService {
    client: Client<OpenAIConfig>,
    default_model: String,
}

impl OpenAiCompletionService {
    /// Build from provider configuration. A missing API key still
    /// constructs a client; requests will then fail with an
    /// authentication error rather than at startup.
    pub fn new(config: &ProviderConfig) -> Self {
        let api_key = config
            .api_key
            .as_ref()
            .map(SecretString::expose_secret)
            .unwrap_or("")
            .to_string();

        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url.clone());
        }

        Self {
            client: Client::with_config(openai_config),
            default_model: config.default_model.clone(),
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                msg.content.clone(),
                            )),
                            refusal: None,
                            name: None,
                            audio: None,
                            tool_calls: None,
                            function_call: None,
                        },
                    )
                }
            })
            .collect();

        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl CompletionService for OpenAiCompletionService {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, CompletionError> {
        let request = CreateEmbeddingRequest {
            model: EMBEDDING_MODEL.to_string(),
            input: EmbeddingInput::String(text.to_string()),
            ..Default::default()
        };

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        response
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or(CompletionError::EmptyResponse)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, CompletionError> {
        let response = self
            .client
            .models()
            .list()
            .await
            .map_err(map_openai_error)?;

        // Only surface chat-capable families, mirroring what the builder
        // UI offers in the model picker.
        Ok(response
            .data
            .into_iter()
            .filter(|model| {
                model.id.contains("gpt")
                    || model.id.contains("davinci")
                    || model.id.contains("claude")
            })
            .map(|model| ModelInfo {
                id: model.id,
                owned_by: model.owned_by,
            })
            .collect())
    }
}

fn map_openai_error(err: async_openai::error::OpenAIError) -> CompletionError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                CompletionError::AuthenticationFailed
            } else {
                CompletionError::Provider {
                    message: err.to_string(),
                }
            }
        }
        _ => CompletionError::Provider {
            message: err.to_string(),
        },
    }
}
