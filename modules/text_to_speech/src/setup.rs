use autotask_sdk::prelude::*;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::convert::TryFrom;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "tts-1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Setup {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: u64,
}

impl TryFrom<Value> for Setup {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if value.is_null() {
            let api_key = match std::env::var("OPENAI_API_KEY") {
                Ok(key) => key,
                Err(_) => {
                    return Err(
                        "OpenAI API key not provided in config or OPENAI_API_KEY env variable"
                            .to_string(),
                    )
                }
            };

            if api_key.is_empty() {
                return Err("OpenAI API key cannot be empty".to_string());
            }

            return Ok(Setup {
                api_key,
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                timeout: DEFAULT_TIMEOUT_SECS,
            });
        }

        let api_key = match value.get("api_key") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => match std::env::var("OPENAI_API_KEY") {
                Ok(key) => key,
                Err(_) => {
                    return Err(
                        "OpenAI API key not provided in config or OPENAI_API_KEY env variable"
                            .to_string(),
                    )
                }
            },
        };

        if api_key.is_empty() {
            return Err("OpenAI API key cannot be empty".to_string());
        }

        let base_url = match value.get("base_url") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => DEFAULT_BASE_URL.to_string(),
        }
        .trim_end_matches('/')
        .to_string();

        let model = match value.get("model") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => DEFAULT_MODEL.to_string(),
        };

        let timeout = value
            .get("timeout")
            .and_then(Value::to_u64)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Setup {
            api_key,
            base_url,
            model,
            timeout,
        })
    }
}

impl Setup {
    pub fn build_client(&self) -> Result<reqwest::Client, String> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| format!("Invalid API key header: {}", e))?;
        headers.insert(AUTHORIZATION, bearer);

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(self.timeout))
            .build()
            .map_err(|e| format!("Error creating HTTP client: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_defaults_to_tts1() {
        let setup = Setup::try_from(json!({ "api_key": "sk-test" })).unwrap();
        assert_eq!(setup.model, "tts-1");
    }

    #[test]
    fn test_setup_hd_model_override() {
        let setup = Setup::try_from(json!({ "api_key": "sk-test", "model": "tts-1-hd" })).unwrap();
        assert_eq!(setup.model, "tts-1-hd");
    }

    #[test]
    fn test_setup_default_timeout() {
        let setup = Setup::try_from(json!({ "api_key": "sk-test" })).unwrap();
        assert_eq!(setup.timeout, 120);
    }

    #[test]
    fn test_setup_empty_env_key_rejected() {
        std::env::set_var("OPENAI_API_KEY", "");

        let result = Setup::try_from(Value::Null);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("cannot be empty"));

        std::env::remove_var("OPENAI_API_KEY");
    }
}
