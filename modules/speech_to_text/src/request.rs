use crate::input::TranscriptionInput;
use crate::setup::Setup;
use autotask_sdk::prelude::*;
use reqwest::multipart::{Form, Part};
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

pub fn endpoint(setup: &Setup) -> String {
    format!("{}/audio/transcriptions", setup.base_url)
}

fn file_part(path: &str) -> Result<Part, Error> {
    let data = std::fs::read(path)
        .map_err(|e| Error::IoError(format!("cannot read audio file '{}': {}", path, e)))?;

    let filename = Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string();

    Ok(Part::bytes(data).file_name(filename))
}

pub fn build_form(input: &TranscriptionInput, setup: &Setup) -> Result<Form, Error> {
    let model = input.model.clone().unwrap_or_else(|| setup.model.clone());

    let mut form = Form::new()
        .part("file", file_part(&input.audio_file)?)
        .text("model", model);

    if let Some(language) = &input.language {
        form = form.text("language", language.clone());
    }
    if let Some(prompt) = &input.prompt {
        form = form.text("prompt", prompt.clone());
    }

    Ok(form)
}

pub fn parse_response(body: &serde_json::Value) -> Result<String, Error> {
    body["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidResponse("missing 'text' field".to_string()))
}

pub async fn send(
    client: &Client,
    setup: &Setup,
    input: &TranscriptionInput,
) -> Result<Value, Error> {
    let form = build_form(input, setup)?;

    let response = client
        .post(endpoint(setup))
        .multipart(form)
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
    let transcription = parse_response(&body)?;

    Ok(HashMap::from([("transcription", transcription.to_value())]).to_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_endpoint() {
        let setup = Setup::try_from(json!({ "api_key": "sk-test" })).unwrap();
        assert_eq!(
            endpoint(&setup),
            "https://api.openai.com/v1/audio/transcriptions"
        );
    }

    #[test]
    fn test_build_form_reads_audio_file() {
        let path = std::env::temp_dir().join("speech_to_text_test.mp3");
        std::fs::write(&path, b"fake mp3 bytes").unwrap();

        let setup = Setup::try_from(json!({ "api_key": "sk-test" })).unwrap();
        let input = TranscriptionInput::try_from(Some(json!({
            "audio_file": (path.to_str().unwrap()),
            "language": "en"
        })))
        .unwrap();

        assert!(build_form(&input, &setup).is_ok());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_build_form_missing_file() {
        let setup = Setup::try_from(json!({ "api_key": "sk-test" })).unwrap();
        let input = TranscriptionInput::try_from(Some(json!({
            "audio_file": "does/not/exist.mp3"
        })))
        .unwrap();

        let result = build_form(&input, &setup);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot read"));
    }

    #[test]
    fn test_parse_response_extracts_text() {
        let body = serde_json::json!({ "text": "hello world" });
        assert_eq!(parse_response(&body).unwrap(), "hello world");
    }

    #[test]
    fn test_parse_response_missing_text() {
        let body = serde_json::json!({ "language": "en" });
        assert!(parse_response(&body).is_err());
    }
}
