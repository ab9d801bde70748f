mod input;
mod request;
mod setup;

use crate::input::TranscriptionInput;
use crate::setup::Setup;
use autotask_sdk::prelude::*;
use std::convert::TryFrom;

create_step!(speech_to_text(setup));

macro_rules! success_response {
    ($data:expr) => {
        Value::from(json!({ "success": true, "data": $data }))
    };
}

macro_rules! error_response {
    ($message:expr) => {
        Value::from(json!({ "success": false, "error": $message }))
    };
}

/// Whisper node: uploads an audio file and relays the transcription.
pub async fn speech_to_text(
    setup: ModuleSetup,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rx = module_channel!(setup);

    let setup = Setup::try_from(setup.with)?;
    let client = setup.build_client()?;

    log::debug!(
        "Speech to text module initialized with model: {}",
        setup.model
    );

    for package in rx {
        let input = match TranscriptionInput::try_from(package.input()) {
            Ok(input) => input,
            Err(e) => {
                log::error!("Invalid input: {}", e);
                sender_safe!(
                    package.sender,
                    error_response!(format!("Invalid input: {}", e)).into()
                );
                continue;
            }
        };

        match request::send(&client, &setup, &input).await {
            Ok(data) => {
                log::debug!("Transcription succeeded");
                sender_safe!(package.sender, success_response!(data).into());
            }
            Err(e) => {
                let msg = format!("Speech to text conversion failed: {}", e);
                log::error!("{}", msg);
                sender_safe!(package.sender, error_response!(msg).into());
            }
        }
    }

    Ok(())
}
