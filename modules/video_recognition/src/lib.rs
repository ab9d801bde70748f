mod input;
mod request;
mod setup;

use crate::input::VideoRecognitionInput;
use crate::setup::Setup;
use autotask_sdk::prelude::*;
use std::convert::TryFrom;

create_step!(video_recognition(setup));

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

/// Multi-frame vision node: describes a sequence of up to eight frames.
pub async fn video_recognition(
    setup: ModuleSetup,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rx = module_channel!(setup);

    let setup = Setup::try_from(setup.with)?;
    let client = setup.build_client()?;

    log::debug!(
        "Video recognition module initialized with model: {}",
        setup.model
    );

    for package in rx {
        let input = match VideoRecognitionInput::try_from(package.input()) {
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

        log::debug!("Analyzing {} frames", input.frames.len());

        match request::send(&client, &setup, &input).await {
            Ok(data) => {
                sender_safe!(package.sender, success_response!(data).into());
            }
            Err(e) => {
                let msg = format!("Video recognition failed: {}", e);
                log::error!("{}", msg);
                sender_safe!(package.sender, error_response!(msg).into());
            }
        }
    }

    Ok(())
}
