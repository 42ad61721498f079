//! Prompt assembly for one conversation turn.
//!
//! The prompt sequence is always: system instruction first, the full
//! prior history in original order, the new user message last. The
//! system instruction concatenates the chatbot's name, description, and
//! persona; with no chatbot (the persona-generation utility) it falls
//! back to a generic assistant directive.

use chatforge_types::chatbot::Chatbot;
use chatforge_types::conversation::ChatMessage;
use chatforge_types::llm::{CompletionRequest, PromptMessage};

/// Fallback directive when no chatbot configuration is supplied.
const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant.";

/// Build the system instruction for a chatbot, or the generic default.
pub fn system_instruction(chatbot: Option<&Chatbot>) -> String {
    let Some(chatbot) = chatbot else {
        return DEFAULT_SYSTEM_INSTRUCTION.to_string();
    };

    let mut instruction = format!("You are a chatbot named {}.", chatbot.name);

    if let Some(description) = chatbot.description.as_deref()
        && !description.is_empty()
    {
        instruction.push(' ');
        instruction.push_str(description);
    }

    let persona = chatbot.ai_settings.persona.trim();
    if !persona.is_empty() {
        instruction.push(' ');
        instruction.push_str(persona);
    }

    instruction
}

/// Assemble the ordered prompt sequence for a turn.
pub fn assemble_prompt(
    chatbot: Option<&Chatbot>,
    history: &[ChatMessage],
    message: &str,
) -> Vec<PromptMessage> {
    let mut prompt = Vec::with_capacity(history.len() + 2);
    prompt.push(PromptMessage::system(system_instruction(chatbot)));

    for entry in history {
        prompt.push(PromptMessage {
            role: entry.role,
            content: entry.content.clone(),
        });
    }

    prompt.push(PromptMessage::user(message));
    prompt
}

/// Build the full completion request for a turn, pulling model,
/// temperature, and token budget from the chatbot's AI settings (or
/// their defaults when no chatbot is involved).
pub fn build_request(
    chatbot: Option<&Chatbot>,
    history: &[ChatMessage],
    message: &str,
) -> CompletionRequest {
    let defaults = chatforge_types::chatbot::AiSettings::default();
    let ai = chatbot.map(|c| &c.ai_settings).unwrap_or(&defaults);

    CompletionRequest {
        model: ai.model.clone(),
        messages: assemble_prompt(chatbot, history, message),
        temperature: Some(ai.temperature.clamp(0.0, 1.0)),
        max_tokens: ai.max_response_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatforge_types::chatbot::{AiSettings, Appearance, ChatbotId, ChatbotStatus};
    use chatforge_types::llm::MessageRole;
    use chatforge_types::user::UserId;
    use chrono::Utc;

    fn chatbot(persona: &str) -> Chatbot {
        Chatbot {
            id: ChatbotId(1),
            user_id: UserId(1),
            name: "Aria".to_string(),
            description: Some("A support assistant for Acme.".to_string()),
            status: ChatbotStatus::Active,
            color: "primary".to_string(),
            appearance: Appearance::default(),
            settings: serde_json::json!({}),
            ai_settings: AiSettings {
                persona: persona.to_string(),
                ..Default::default()
            },
            flows: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_with_empty_history() {
        let bot = chatbot("You are helpful");
        let prompt = assemble_prompt(Some(&bot), &[], "Hi");

        assert_eq!(prompt.len(), 2);
        assert_eq!(prompt[0].role, MessageRole::System);
        assert!(prompt[0].content.contains("You are helpful"));
        assert_eq!(prompt[1].role, MessageRole::User);
        assert_eq!(prompt[1].content, "Hi");
    }

    #[test]
    fn test_history_keeps_original_order() {
        let bot = chatbot("");
        let now = Utc::now();
        let history = vec![
            ChatMessage::user("first", now),
            ChatMessage::assistant("second", now),
            ChatMessage::user("third", now),
        ];
        let prompt = assemble_prompt(Some(&bot), &history, "fourth");

        let contents: Vec<&str> = prompt.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents[1..], ["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_missing_chatbot_uses_default_instruction() {
        let prompt = assemble_prompt(None, &[], "Generate a persona");
        assert_eq!(prompt[0].content, DEFAULT_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_instruction_concatenates_name_description_persona() {
        let bot = chatbot("Always answer in haiku.");
        let instruction = system_instruction(Some(&bot));
        assert_eq!(
            instruction,
            "You are a chatbot named Aria. A support assistant for Acme. Always answer in haiku."
        );
    }

    #[test]
    fn test_request_carries_ai_settings() {
        let mut bot = chatbot("");
        bot.ai_settings.temperature = 0.2;
        bot.ai_settings.max_response_length = 256;
        bot.ai_settings.model = "gpt-4o-mini".to_string();

        let request = build_request(Some(&bot), &[], "Hi");
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, 256);
    }

    #[test]
    fn test_temperature_clamped_to_unit_interval() {
        let mut bot = chatbot("");
        bot.ai_settings.temperature = 1.8;
        let request = build_request(Some(&bot), &[], "Hi");
        assert_eq!(request.temperature, Some(1.0));
    }
}
