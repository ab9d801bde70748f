use crate::input::ChatInput;
use crate::setup::Setup;
use autotask_sdk::prelude::*;
use reqwest::Client;
use std::collections::HashMap;

#[derive(Debug)]
pub enum Error {
    RequestError(reqwest::Error),
    ApiError(u16, String),
    InvalidResponse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RequestError(e) => write!(f, "Request error: {}", e),
            Error::ApiError(status, body) => write!(f, "HTTP {}: {}", status, body),
            Error::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

pub fn endpoint(setup: &Setup) -> String {
    format!("{}/chat/completions", setup.base_url)
}

pub fn build_body(input: &ChatInput, setup: &Setup) -> serde_json::Value {
    let model = input.model.clone().unwrap_or_else(|| setup.model.clone());

    let mut body = serde_json::json!({
        "model": model,
        "messages": [
            { "role": "system", "content": input.system_prompt },
            { "role": "user", "content": input.prompt },
        ],
    });

    if let Some(max_tokens) = input.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }
    if let Some(temperature) = input.temperature {
        body["temperature"] = serde_json::json!(temperature);
    }

    body
}

pub fn parse_response(body: &serde_json::Value) -> Result<String, Error> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidResponse("missing 'choices[0].message.content'".to_string()))
}

pub async fn send(client: &Client, setup: &Setup, input: &ChatInput) -> Result<Value, Error> {
    let response = client
        .post(endpoint(setup))
        .json(&build_body(input, setup))
        .send()
        .await
        .map_err(Error::RequestError)?;

    let status = response.status();
    let text = response.text().await.map_err(Error::RequestError)?;

    if !status.is_success() {
        return Err(Error::ApiError(status.as_u16(), text));
    }

    let body: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(e.to_string()))?;
    let content = parse_response(&body)?;

    Ok(HashMap::from([("generated_text", content.to_value())]).to_value())
}
