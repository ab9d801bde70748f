use crate::input::ImageGenerationInput;
use crate::setup::Setup;
use autotask_sdk::prelude::*;
use base64::Engine;
use reqwest::Client;
use std::collections::HashMap;
use std::path::Path;

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

/// What the vendor hands back for a generated image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    Url(String),
    B64(String),
}

pub fn endpoint(setup: &Setup) -> String {
    format!("{}/images/generations", setup.base_url)
}

pub fn build_body(input: &ImageGenerationInput, setup: &Setup) -> serde_json::Value {
    let model = input.model.clone().unwrap_or_else(|| setup.model.clone());

    serde_json::json!({
        "model": model,
        "prompt": input.prompt,
        "size": input.size.as_str(),
        "quality": input.quality.as_str(),
        "style": input.style.as_str(),
        "n": 1,
    })
}

pub fn parse_response(body: &serde_json::Value) -> Result<ImagePayload, Error> {
    let first = body["data"]
        .get(0)
        .ok_or_else(|| Error::InvalidResponse("missing 'data[0]'".to_string()))?;

    if let Some(url) = first["url"].as_str() {
        return Ok(ImagePayload::Url(url.to_string()));
    }
    if let Some(b64) = first["b64_json"].as_str() {
        return Ok(ImagePayload::B64(b64.to_string()));
    }

    Err(Error::InvalidResponse(
        "'data[0]' carries neither 'url' nor 'b64_json'".to_string(),
    ))
}

/// Writes the image bytes verbatim, creating parent directories as needed.
pub fn save_bytes(output_file: &str, bytes: &[u8]) -> Result<(), Error> {
    if let Some(parent) = Path::new(output_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Error::IoError(e.to_string()))?;
        }
    }

    std::fs::write(output_file, bytes).map_err(|e| Error::IoError(e.to_string()))
}

pub fn decode_b64(b64: &str) -> Result<Vec<u8>, Error> {
    base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| Error::InvalidResponse(format!("invalid base64 image data: {}", e)))
}

async fn download(client: &Client, url: &str) -> Result<Vec<u8>, Error> {
    let response = client.get(url).send().await.map_err(Error::RequestError)?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::ApiError(
            status.as_u16(),
            format!("image download failed for {}", url),
        ));
    }

    let bytes = response.bytes().await.map_err(Error::RequestError)?;
    Ok(bytes.to_vec())
}

pub async fn send(
    client: &Client,
    setup: &Setup,
    input: &ImageGenerationInput,
) -> Result<Value, Error> {
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

    let bytes = match parse_response(&body)? {
        ImagePayload::Url(url) => download(client, &url).await?,
        ImagePayload::B64(b64) => decode_b64(&b64)?,
    };

    save_bytes(&input.output_file, &bytes)?;

    Ok(HashMap::from([("image_path", input.output_file.to_value())]).to_value())
}
