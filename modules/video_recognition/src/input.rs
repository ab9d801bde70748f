use autotask_sdk::prelude::*;
use std::convert::TryFrom;
use std::path::Path;

pub const DEFAULT_PROMPT: &str = "Describe what happens in this video sequence";
pub const MAX_FRAMES: usize = 8;

pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub fn is_remote(frame: &str) -> bool {
    frame.starts_with("http://") || frame.starts_with("https://")
}

fn check_frame_extension(frame: &str) -> Result<(), String> {
    if is_remote(frame) {
        return Ok(());
    }

    let extension = Path::new(frame)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| format!("Frame '{}' has no extension", frame))?;

    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "Unsupported frame extension '{}'. Supported: {}",
            extension,
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        ));
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoRecognitionInput {
    pub frames: Vec<String>,
    pub prompt: String,
    pub model: Option<String>,
}

impl TryFrom<Option<Value>> for VideoRecognitionInput {
    type Error = String;

    fn try_from(input_value: Option<Value>) -> Result<Self, Self::Error> {
        let input_value = input_value.ok_or("Missing input for video recognition module")?;

        if !input_value.is_object() {
            return Err("Video recognition input must be an object".to_string());
        }

        let frames_value = input_value
            .get("frames")
            .ok_or_else(|| "Missing required 'frames' field".to_string())?;

        if !frames_value.is_array() {
            return Err("'frames' must be an array of image paths or URLs".to_string());
        }

        let frames_array = frames_value
            .as_array()
            .ok_or_else(|| "invalid 'frames' array".to_string())?;

        let mut frames = Vec::new();
        for frame_value in frames_array.values.iter() {
            let frame = match frame_value {
                Value::String(s) => s.as_string(),
                other => other.to_string(),
            };

            if frame.is_empty() {
                return Err("'frames' cannot contain empty entries".to_string());
            }

            check_frame_extension(&frame)?;
            frames.push(frame);
        }

        if frames.is_empty() {
            return Err("At least one frame must be provided".to_string());
        }

        if frames.len() > MAX_FRAMES {
            return Err(format!(
                "At most {} frames are supported, got {}",
                MAX_FRAMES,
                frames.len()
            ));
        }

        let prompt = match input_value.get("prompt") {
            Some(Value::String(s)) => s.as_string(),
            Some(v) => v.to_string(),
            None => DEFAULT_PROMPT.to_string(),
        };

        let model = input_value.get("model").map(|v| match v {
            Value::String(s) => s.as_string(),
            other => other.to_string(),
        });

        Ok(VideoRecognitionInput {
            frames,
            prompt,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_frames_and_default_prompt() {
        let value = json!({ "frames": ["a.png", "b.jpg"] });

        let input = VideoRecognitionInput::try_from(Some(value)).unwrap();
        assert_eq!(input.frames, vec!["a.png".to_string(), "b.jpg".to_string()]);
        assert_eq!(input.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn test_input_empty_frames() {
        let value = json!({ "frames": (Vec::<String>::new()) });

        let result = VideoRecognitionInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("At least one frame"));
    }

    #[test]
    fn test_input_too_many_frames() {
        let value = json!({
            "frames": [
                "1.png", "2.png", "3.png", "4.png", "5.png",
                "6.png", "7.png", "8.png", "9.png"
            ]
        });

        let result = VideoRecognitionInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("At most 8 frames"));
    }

    #[test]
    fn test_input_eight_frames_accepted() {
        let value = json!({
            "frames": [
                "1.png", "2.png", "3.png", "4.png",
                "5.png", "6.png", "7.png", "8.png"
            ]
        });

        assert!(VideoRecognitionInput::try_from(Some(value)).is_ok());
    }

    #[test]
    fn test_input_unsupported_frame_extension() {
        let value = json!({ "frames": ["clip.avi"] });

        let result = VideoRecognitionInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unsupported frame extension"));
    }

    #[test]
    fn test_input_remote_frames_accepted() {
        let value = json!({ "frames": ["https://example.com/frame1"] });

        assert!(VideoRecognitionInput::try_from(Some(value)).is_ok());
    }

    #[test]
    fn test_input_frames_not_an_array() {
        let value = json!({ "frames": "a.png" });

        let result = VideoRecognitionInput::try_from(Some(value));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("must be an array"));
    }

    #[test]
    fn test_input_missing_frames() {
        let value = json!({ "prompt": "What happens?" });

        assert!(VideoRecognitionInput::try_from(Some(value)).is_err());
    }
}
