use crate::input::{is_remote, ImageRecognitionInput};
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

/// Remote URLs pass through; local files become base64 data URLs with the
/// mime type guessed from the extension.
pub fn to_image_url(image: &str) -> Result<String, Error> {
    if is_remote(image) {
        return Ok(image.to_string());
    }

    let mime = mime_guess::from_path(image).first_or_octet_stream();
    let bytes = std::fs::read(image)
        .map_err(|e| Error::IoError(format!("cannot read image '{}': {}", image, e)))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);

    Ok(format!("data:{};base64,{}", mime.essence_str(), encoded))
}

pub fn build_body(
    input: &ImageRecognitionInput,
    setup: &Setup,
    image_url: &str,
) -> serde_json::Value {
    let model = input.model.clone().unwrap_or_else(|| setup.model.clone());

    serde_json::json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": input.prompt },
                { "type": "image_url", "image_url": { "url": image_url } },
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
    input: &ImageRecognitionInput,
) -> Result<Value, Error> {
    let image_url = to_image_url(&input.image)?;

    let response = client
        .post(endpoint(setup))
        .json(&build_body(input, setup, &image_url))
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_to_image_url_passes_remote_through() {
        let url = "https://example.com/cat.jpg";
        assert_eq!(to_image_url(url).unwrap(), url);
    }

    #[test]
    fn test_to_image_url_encodes_local_file() {
        let path = std::env::temp_dir().join("image_recognition_test.png");
        std::fs::write(&path, b"fake image bytes").unwrap();

        let data_url = to_image_url(path.to_str().unwrap()).unwrap();
        assert!(data_url.starts_with("data:image/png;base64,"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_to_image_url_missing_file() {
        let result = to_image_url("does/not/exist.png");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot read"));
    }

    #[test]
    fn test_build_body_content_parts() {
        let setup = Setup::try_from(json!({ "api_key": "sk-test" })).unwrap();
        let input = ImageRecognitionInput::try_from(Some(json!({
            "image": "https://example.com/cat.jpg",
            "prompt": "Describe the cat"
        })))
        .unwrap();

        let body = build_body(&input, &setup, "https://example.com/cat.jpg");
        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], "Describe the cat");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(
            content[1]["image_url"]["url"],
            "https://example.com/cat.jpg"
        );
    }

    #[test]
    fn test_parse_response_extracts_description() {
        let body = serde_json::json!({
            "choices": [
                { "message": { "content": "A cat on a sofa" } }
            ]
        });

        assert_eq!(parse_response(&body).unwrap(), "A cat on a sofa");
    }
}
