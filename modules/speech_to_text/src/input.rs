use autotask_sdk::prelude::*;
use std::convert::TryFrom;
use std::path::Path;

/// Formats the transcription endpoint accepts.
pub const SUPPORTED_AUDIO_EXTENSIONS: [&str; 7] =
    ["mp3", "mp4", "mpeg", "mpga", "m4a", "wav", "webm"];

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionInput {
    pub audio_file: String,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
}

fn check_audio_extension(audio_file: &str) -> Result<(), String> {
    let extension = Path::new(audio_file)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| format!("Audio file '{}' has no extension", audio_file))?;

    if !SUPPORTED_AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "Unsupported audio extension '{}'. Supported: {}",
            extension,
            SUPPORTED_AUDIO_EXTENSIONS.join(", ")
        ));
    }

    Ok(())
}

impl TryFrom<Option<Value>> for TranscriptionInput {
    type Error = String;

    fn try_from(input_value: Option<Value>) -> Result<Self, Self::Error> {
        let input_value = input_value.ok_or("Missing input for speech to text module")?;

        if !input_value.is_object() {
            return Err("Speech to text input must be an object".to_string());
        }

        let audio_file = match input_value.get("audio_file") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => return Err("Missing required 'audio_file' field".to_string()),
        };

        if audio_file.is_empty() {
            return Err("'audio_file' cannot be empty".to_string());
        }

        check_audio_extension(&audio_file)?;

        // Empty strings mean "not set", matching how the host renders
        // optional text fields.
        let language = match input_value.get("language") {
            Some(Value::String(s)) => {
                let language = s.as_string();
                if language.is_empty() {
                    None
                } else {
                    Some(language)
                }
            }
            Some(v) => Some(v.to_string()),
            None => None,
        };

        let prompt = match input_value.get("prompt") {
            Some(Value::String(s)) => {
                let prompt = s.as_string();
                if prompt.is_empty() {
                    None
                } else {
                    Some(prompt)
                }
            }
            Some(v) => Some(v.to_string()),
            None => None,
        };

        let model = input_value.get("model").map(|v| match v {
            Value::String(s) => s.as_string(),
            other => other.to_string(),
        });

        Ok(TranscriptionInput {
            audio_file,
            language,
            prompt,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_accepts_supported_extensions() {
        for extension in SUPPORTED_AUDIO_EXTENSIONS {
            let value = json!({ "audio_file": (format!("voice.{}", extension)) });
            assert!(
                TranscriptionInput::try_from(Some(value)).is_ok(),
                "extension '{}' should be accepted",
                extension
            );
        }
    }

    #[test]
    fn test_input_rejects_unsupported_extension() {
        let value = json!({ "audio_file": "voice.ogg" });

        let result = TranscriptionInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("Unsupported audio extension 'ogg'"));
    }

    #[test]
    fn test_input_rejects_no_extension() {
        let value = json!({ "audio_file": "voice" });

        let result = TranscriptionInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("has no extension"));
    }

    #[test]
    fn test_input_extension_case_insensitive() {
        let value = json!({ "audio_file": "voice.MP3" });

        assert!(TranscriptionInput::try_from(Some(value)).is_ok());
    }

    #[test]
    fn test_input_empty_optionals_become_none() {
        let value = json!({
            "audio_file": "voice.wav",
            "language": "",
            "prompt": ""
        });

        let input = TranscriptionInput::try_from(Some(value)).unwrap();
        assert_eq!(input.language, None);
        assert_eq!(input.prompt, None);
    }

    #[test]
    fn test_input_optionals_kept() {
        let value = json!({
            "audio_file": "voice.wav",
            "language": "pt",
            "prompt": "Podcast intro"
        });

        let input = TranscriptionInput::try_from(Some(value)).unwrap();
        assert_eq!(input.language, Some("pt".to_string()));
        assert_eq!(input.prompt, Some("Podcast intro".to_string()));
    }

    #[test]
    fn test_input_missing_audio_file() {
        let value = json!({ "language": "en" });

        assert!(TranscriptionInput::try_from(Some(value)).is_err());
    }
}
