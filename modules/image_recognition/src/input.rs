use autotask_sdk::prelude::*;
use std::convert::TryFrom;
use std::path::Path;

pub const DEFAULT_PROMPT: &str = "What is in this image?";

/// Formats the vision endpoint accepts for image parts.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub fn is_remote(image: &str) -> bool {
    image.starts_with("http://") || image.starts_with("https://")
}

/// Rejects local paths whose extension the vision endpoint does not accept.
/// Remote URLs pass through untouched.
pub fn check_image_extension(image: &str) -> Result<(), String> {
    if is_remote(image) {
        return Ok(());
    }

    let extension = Path::new(image)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| format!("Image file '{}' has no extension", image))?;

    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "Unsupported image extension '{}'. Supported: {}",
            extension,
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        ));
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecognitionInput {
    pub image: String,
    pub prompt: String,
    pub model: Option<String>,
}

impl TryFrom<Option<Value>> for ImageRecognitionInput {
    type Error = String;

    fn try_from(input_value: Option<Value>) -> Result<Self, Self::Error> {
        let input_value = input_value.ok_or("Missing input for image recognition module")?;

        if !input_value.is_object() {
            return Err("Image recognition input must be an object".to_string());
        }

        let image = match input_value.get("image") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => return Err("Missing required 'image' field".to_string()),
        };

        if image.is_empty() {
            return Err("'image' cannot be empty".to_string());
        }

        check_image_extension(&image)?;

        let prompt = match input_value.get("prompt") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => DEFAULT_PROMPT.to_string(),
        };

        let model = input_value.get("model").map(|v| match v {
            Value::String(s) => s.as_string(),
            other => other.to_string(),
        });

        Ok(ImageRecognitionInput {
            image,
            prompt,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_local_path() {
        let value = json!({ "image": "photos/cat.jpg", "prompt": "Describe the cat" });

        let input = ImageRecognitionInput::try_from(Some(value)).unwrap();
        assert_eq!(input.image, "photos/cat.jpg");
        assert_eq!(input.prompt, "Describe the cat");
    }

    #[test]
    fn test_input_default_prompt() {
        let value = json!({ "image": "photos/cat.png" });

        let input = ImageRecognitionInput::try_from(Some(value)).unwrap();
        assert_eq!(input.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn test_input_remote_url_skips_extension_check() {
        let value = json!({ "image": "https://example.com/photo" });

        assert!(ImageRecognitionInput::try_from(Some(value)).is_ok());
    }

    #[test]
    fn test_input_unsupported_extension() {
        let value = json!({ "image": "document.pdf" });

        let result = ImageRecognitionInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("Unsupported image extension 'pdf'"));
    }

    #[test]
    fn test_input_extension_case_insensitive() {
        let value = json!({ "image": "photos/cat.JPG" });

        assert!(ImageRecognitionInput::try_from(Some(value)).is_ok());
    }

    #[test]
    fn test_input_no_extension() {
        let value = json!({ "image": "photos/cat" });

        let result = ImageRecognitionInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("has no extension"));
    }

    #[test]
    fn test_input_missing_image() {
        let value = json!({ "prompt": "Describe" });

        assert!(ImageRecognitionInput::try_from(Some(value)).is_err());
    }
}
