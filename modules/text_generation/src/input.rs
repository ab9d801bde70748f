use autotask_sdk::prelude::*;
use std::convert::TryFrom;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful and creative assistant.";
pub const MAX_TOKENS_LIMIT: i64 = 4000;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatInput {
    pub prompt: String,
    pub system_prompt: String,
    pub max_tokens: Option<i64>,
    pub temperature: Option<f64>,
    pub model: Option<String>,
}

impl TryFrom<Option<Value>> for ChatInput {
    type Error = String;

    fn try_from(input_value: Option<Value>) -> Result<Self, Self::Error> {
        let input_value = input_value.ok_or("Missing input for text generation module")?;

        if !input_value.is_object() {
            return Err("Text generation input must be an object".to_string());
        }

        let prompt = match input_value.get("prompt") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => return Err("Missing required 'prompt' field".to_string()),
        };

        if prompt.is_empty() {
            return Err("'prompt' cannot be empty".to_string());
        }

        let system_prompt = match input_value.get("system_prompt") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => DEFAULT_SYSTEM_PROMPT.to_string(),
        };

        let max_tokens = match input_value.get("max_tokens") {
            Some(v) => {
                let tokens = v
                    .to_i64()
                    .ok_or_else(|| "'max_tokens' must be an integer".to_string())?;

                if !(1..=MAX_TOKENS_LIMIT).contains(&tokens) {
                    return Err(format!(
                        "'max_tokens' must be between 1 and {}, got {}",
                        MAX_TOKENS_LIMIT, tokens
                    ));
                }

                Some(tokens)
            }
            None => None,
        };

        let temperature = match input_value.get("temperature") {
            Some(v) => {
                let temperature = v
                    .to_f64()
                    .ok_or_else(|| "'temperature' must be a number".to_string())?;

                if !(0.0..=2.0).contains(&temperature) {
                    return Err(format!(
                        "'temperature' must be between 0.0 and 2.0, got {}",
                        temperature
                    ));
                }

                Some(temperature)
            }
            None => None,
        };

        let model = input_value.get("model").map(|v| match v {
            Value::String(s) => s.as_string(),
            other => other.to_string(),
        });

        Ok(ChatInput {
            prompt,
            system_prompt,
            max_tokens,
            temperature,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_input_full() {
        let value = json!({
            "prompt": "Write a haiku",
            "system_prompt": "You are a poet.",
            "max_tokens": 200,
            "temperature": 0.9,
            "model": "gpt-4o"
        });

        let input = ChatInput::try_from(Some(value)).unwrap();
        assert_eq!(input.prompt, "Write a haiku");
        assert_eq!(input.system_prompt, "You are a poet.");
        assert_eq!(input.max_tokens, Some(200));
        assert_eq!(input.temperature, Some(0.9));
        assert_eq!(input.model, Some("gpt-4o".to_string()));
    }

    #[test]
    fn test_chat_input_defaults() {
        let value = json!({ "prompt": "Write a haiku" });

        let input = ChatInput::try_from(Some(value)).unwrap();
        assert_eq!(input.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(input.max_tokens, None);
        assert_eq!(input.temperature, None);
        assert_eq!(input.model, None);
    }

    #[test]
    fn test_chat_input_missing_prompt() {
        let value = json!({ "temperature": 0.5 });

        let result = ChatInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Missing required 'prompt'"));
    }

    #[test]
    fn test_chat_input_empty_prompt() {
        let value = json!({ "prompt": "" });

        let result = ChatInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("cannot be empty"));
    }

    #[test]
    fn test_chat_input_max_tokens_out_of_range() {
        let value = json!({ "prompt": "hi", "max_tokens": 4001 });

        let result = ChatInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("'max_tokens'"));
    }

    #[test]
    fn test_chat_input_max_tokens_zero() {
        let value = json!({ "prompt": "hi", "max_tokens": 0 });

        assert!(ChatInput::try_from(Some(value)).is_err());
    }

    #[test]
    fn test_chat_input_temperature_out_of_range() {
        let value = json!({ "prompt": "hi", "temperature": 2.5 });

        let result = ChatInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("'temperature'"));
    }

    #[test]
    fn test_chat_input_missing_input() {
        let result = ChatInput::try_from(None);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Missing input"));
    }

    #[test]
    fn test_chat_input_not_an_object() {
        let value = json!("just a string");

        let result = ChatInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("must be an object"));
    }
}
