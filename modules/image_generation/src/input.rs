use autotask_sdk::prelude::*;
use std::convert::TryFrom;

/// Sizes supported by the images/generations endpoint for DALL-E 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageSize {
    Square1024,
    Landscape1792,
    Portrait1792,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square1024 => "1024x1024",
            ImageSize::Landscape1792 => "1792x1024",
            ImageSize::Portrait1792 => "1024x1792",
        }
    }

    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "1024x1024" => Ok(ImageSize::Square1024),
            "1792x1024" => Ok(ImageSize::Landscape1792),
            "1024x1792" => Ok(ImageSize::Portrait1792),
            _ => Err(format!(
                "Invalid size '{}'. Must be one of: 1024x1024, 1792x1024, 1024x1792",
                value
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageQuality {
    Standard,
    Hd,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::Hd => "hd",
        }
    }

    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "standard" => Ok(ImageQuality::Standard),
            "hd" => Ok(ImageQuality::Hd),
            _ => Err(format!(
                "Invalid quality '{}'. Must be 'standard' or 'hd'",
                value
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageStyle {
    Vivid,
    Natural,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Vivid => "vivid",
            ImageStyle::Natural => "natural",
        }
    }

    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "vivid" => Ok(ImageStyle::Vivid),
            "natural" => Ok(ImageStyle::Natural),
            _ => Err(format!(
                "Invalid style '{}'. Must be 'vivid' or 'natural'",
                value
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageGenerationInput {
    pub prompt: String,
    pub size: ImageSize,
    pub quality: ImageQuality,
    pub style: ImageStyle,
    pub output_file: String,
    pub model: Option<String>,
}

impl TryFrom<Option<Value>> for ImageGenerationInput {
    type Error = String;

    fn try_from(input_value: Option<Value>) -> Result<Self, Self::Error> {
        let input_value = input_value.ok_or("Missing input for image generation module")?;

        if !input_value.is_object() {
            return Err("Image generation input must be an object".to_string());
        }

        let prompt = match input_value.get("prompt") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => return Err("Missing required 'prompt' field".to_string()),
        };

        if prompt.is_empty() {
            return Err("'prompt' cannot be empty".to_string());
        }

        let size = match input_value.get("size") {
            Some(Value::String(s)) => ImageSize::parse(&s.as_string())?,
            Some(v) => ImageSize::parse(&v.to_string())?,
            None => ImageSize::Square1024,
        };

        let quality = match input_value.get("quality") {
            Some(Value::String(s)) => ImageQuality::parse(&s.as_string())?,
            Some(v) => ImageQuality::parse(&v.to_string())?,
            None => ImageQuality::Standard,
        };

        let style = match input_value.get("style") {
            Some(Value::String(s)) => ImageStyle::parse(&s.as_string())?,
            Some(v) => ImageStyle::parse(&v.to_string())?,
            None => ImageStyle::Vivid,
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

        Ok(ImageGenerationInput {
            prompt,
            size,
            quality,
            style,
            output_file,
            model,
        })
    }
}
