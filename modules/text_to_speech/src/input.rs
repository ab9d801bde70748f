use autotask_sdk::prelude::*;
use std::convert::TryFrom;

/// The synthesis endpoint caps input at 4096 characters.
pub const MAX_TEXT_CHARS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Voice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }

    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "alloy" => Ok(Voice::Alloy),
            "echo" => Ok(Voice::Echo),
            "fable" => Ok(Voice::Fable),
            "onyx" => Ok(Voice::Onyx),
            "nova" => Ok(Voice::Nova),
            "shimmer" => Ok(Voice::Shimmer),
            _ => Err(format!(
                "Invalid voice '{}'. Must be one of: alloy, echo, fable, onyx, nova, shimmer",
                value
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseFormat {
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    Pcm,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Mp3 => "mp3",
            ResponseFormat::Opus => "opus",
            ResponseFormat::Aac => "aac",
            ResponseFormat::Flac => "flac",
            ResponseFormat::Wav => "wav",
            ResponseFormat::Pcm => "pcm",
        }
    }

    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "mp3" => Ok(ResponseFormat::Mp3),
            "opus" => Ok(ResponseFormat::Opus),
            "aac" => Ok(ResponseFormat::Aac),
            "flac" => Ok(ResponseFormat::Flac),
            "wav" => Ok(ResponseFormat::Wav),
            "pcm" => Ok(ResponseFormat::Pcm),
            _ => Err(format!(
                "Invalid response_format '{}'. Must be one of: mp3, opus, aac, flac, wav, pcm",
                value
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechInput {
    pub text: String,
    pub voice: Voice,
    pub response_format: ResponseFormat,
    pub speed: Option<f64>,
    pub output_file: String,
    pub model: Option<String>,
}

impl TryFrom<Option<Value>> for SpeechInput {
    type Error = String;

    fn try_from(input_value: Option<Value>) -> Result<Self, Self::Error> {
        let input_value = input_value.ok_or("Missing input for text to speech module")?;

        if !input_value.is_object() {
            return Err("Text to speech input must be an object".to_string());
        }

        let text = match input_value.get("text") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => return Err("Missing required 'text' field".to_string()),
        };

        if text.is_empty() {
            return Err("'text' cannot be empty".to_string());
        }

        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(format!(
                "'text' exceeds the {} character limit",
                MAX_TEXT_CHARS
            ));
        }

        let voice = match input_value.get("voice") {
            Some(Value::String(s)) => Voice::parse(&s.as_string())?,
            Some(v) => Voice::parse(&v.to_string())?,
            None => Voice::Alloy,
        };

        let response_format = match input_value.get("response_format") {
            Some(Value::String(s)) => ResponseFormat::parse(&s.as_string())?,
            Some(v) => ResponseFormat::parse(&v.to_string())?,
            None => ResponseFormat::Mp3,
        };

        let speed = match input_value.get("speed") {
            Some(v) => {
                let speed = v
                    .to_f64()
                    .ok_or_else(|| "'speed' must be a number".to_string())?;

                if !(0.25..=4.0).contains(&speed) {
                    return Err(format!(
                        "'speed' must be between 0.25 and 4.0, got {}",
                        speed
                    ));
                }

                Some(speed)
            }
            None => None,
        };

        let output_file = match input_value.get("output_file") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => return Err("Missing required 'output_file' field".to_string()),
        };

        if output_file.is_empty() {
            return Err("'output_file' cannot be empty".to_string());
        }

        let model = input_value.get("model").map(|v| match v {
            Value::String(s) => s.as_string(),
            other => other.to_string(),
        });

        Ok(SpeechInput {
            text,
            voice,
            response_format,
            speed,
            output_file,
            model,
        })
    }
}
