use crate::input::SpeechInput;
use crate::setup::Setup;
use autotask_sdk::prelude::*;
use reqwest::Client;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug)]
pub enum Error {
    RequestError(reqwest::Error),
    ApiError(u16, String),
    IoError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RequestError(e) => write!(f, "Request error: {}", e),
            Error::ApiError(status, body) => write!(f, "HTTP {}: {}", status, body),
            Error::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

pub fn endpoint(setup: &Setup) -> String {
    format!("{}/audio/speech", setup.base_url)
}

pub fn build_body(input: &SpeechInput, setup: &Setup) -> serde_json::Value {
    let model = input.model.clone().unwrap_or_else(|| setup.model.clone());

    let mut body = serde_json::json!({
        "model": model,
        "input": input.text,
        "voice": input.voice.as_str(),
        "response_format": input.response_format.as_str(),
    });

    if let Some(speed) = input.speed {
        body["speed"] = serde_json::json!(speed);
    }

    body
}

/// Writes the audio bytes verbatim, creating parent directories as needed.
pub fn save_bytes(output_file: &str, bytes: &[u8]) -> Result<(), Error> {
    if let Some(parent) = Path::new(output_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Error::IoError(e.to_string()))?;
        }
    }

    std::fs::write(output_file, bytes).map_err(|e| Error::IoError(e.to_string()))
}

pub async fn send(client: &Client, setup: &Setup, input: &SpeechInput) -> Result<Value, Error> {
    let response = client
        .post(endpoint(setup))
        .json(&build_body(input, setup))
        .send()
        .await
        .map_err(Error::RequestError)?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.map_err(Error::RequestError)?;
        return Err(Error::ApiError(status.as_u16(), text));
    }

    let bytes = response.bytes().await.map_err(Error::RequestError)?;
    save_bytes(&input.output_file, &bytes)?;

    Ok(HashMap::from([("audio_path", input.output_file.to_value())]).to_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_endpoint() {
        let setup = Setup::try_from(json!({ "api_key": "sk-test" })).unwrap();
        assert_eq!(endpoint(&setup), "https://api.openai.com/v1/audio/speech");
    }

    #[test]
    fn test_build_body_fields() {
        let setup = Setup::try_from(json!({ "api_key": "sk-test" })).unwrap();
        let input = SpeechInput::try_from(Some(json!({
            "text": "Hello there",
            "voice": "onyx",
            "speed": 0.5,
            "output_file": "hello.mp3"
        })))
        .unwrap();

        let body = build_body(&input, &setup);
        assert_eq!(body["model"], "tts-1");
        assert_eq!(body["input"], "Hello there");
        assert_eq!(body["voice"], "onyx");
        assert_eq!(body["response_format"], "mp3");
        assert_eq!(body["speed"], 0.5);
    }

    #[test]
    fn test_build_body_omits_unset_speed() {
        let setup = Setup::try_from(json!({ "api_key": "sk-test" })).unwrap();
        let input = SpeechInput::try_from(Some(json!({
            "text": "Hello",
            "output_file": "hello.mp3"
        })))
        .unwrap();

        let body = build_body(&input, &setup);
        assert!(body.get("speed").is_none());
    }

    #[test]
    fn test_save_bytes_creates_parent_dirs() {
        let path = std::env::temp_dir()
            .join("text_to_speech_test")
            .join("nested")
            .join("out.mp3");
        let path_str = path.to_str().unwrap();

        save_bytes(path_str, b"fake audio").unwrap();
        assert_eq!(std::fs::read(path_str).unwrap(), b"fake audio");

        std::fs::remove_file(path_str).unwrap();
    }
}
