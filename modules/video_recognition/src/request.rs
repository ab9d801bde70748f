use crate::input::{is_remote, VideoRecognitionInput};
use crate::setup::Setup;
use autotask_sdk::prelude::*;
use base64::Engine;
use reqwest::Client;
use std::collections::HashMap;

#[derive(Debug)]
pub enum Error {
    RequestError(reqwest::Error),
    ApiError(u16, String),
    InvalidResponse(String),
    IoError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RequestError(e) => write!(f, "Request error: {}", e),
            Error::ApiError(status, body) => write!(f, "HTTP {}: {}", status, body),
            Error::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
            Error::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

pub fn endpoint(setup: &Setup) -> String {
    format!("{}/chat/completions", setup.base_url)
}

fn to_frame_url(frame: &str) -> Result<String, Error> {
    if is_remote(frame) {
        return Ok(frame.to_string());
    }

    let mime = mime_guess::from_path(frame).first_or_octet_stream();
    let bytes = std::fs::read(frame)
        .map_err(|e| Error::IoError(format!("cannot read frame '{}': {}", frame, e)))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);

    Ok(format!("data:{};base64,{}", mime.essence_str(), encoded))
}

/// The frame sequence rides in a `video` content part ahead of the text
/// part, the shape multi-frame vision models accept.
pub fn build_body(
    input: &VideoRecognitionInput,
    setup: &Setup,
    frame_urls: &[String],
) -> serde_json::Value {
    let model = input.model.clone().unwrap_or_else(|| setup.model.clone());

    serde_json::json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "video", "video": frame_urls },
                { "type": "text", "text": input.prompt },
            ],
        }],
    })
}

pub fn parse_response(body: &serde_json::Value) -> Result<String, Error> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidResponse("missing 'choices[0].message.content'".to_string()))
}

pub async fn send(
    client: &Client,
    setup: &Setup,
    input: &VideoRecognitionInput,
) -> Result<Value, Error> {
    let mut frame_urls = Vec::with_capacity(input.frames.len());
    for frame in &input.frames {
        frame_urls.push(to_frame_url(frame)?);
    }

    let response = client
        .post(endpoint(setup))
        .json(&build_body(input, setup, &frame_urls))
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
    let description = parse_response(&body)?;

    Ok(HashMap::from([("description", description.to_value())]).to_value())
}
