mod input;
mod request;
mod setup;

use crate::input::ImageRecognitionInput;
use crate::setup::Setup;
use autotask_sdk::prelude::*;
use std::convert::TryFrom;

create_step!(image_recognition(setup));

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

/// Vision node: asks the chat endpoint about a single image.
pub async fn image_recognition(
    setup: ModuleSetup,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rx = module_channel!(setup);

    let setup = Setup::try_from(setup.with)?;
    let client = setup.build_client()?;

    log::debug!(
        "Image recognition module initialized with model: {}",
        setup.model
    );

    for package in rx {
        let input = match ImageRecognitionInput::try_from(package.input()) {
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
                log::debug!("Image analysis succeeded");
                sender_safe!(package.sender, success_response!(data).into());
            }
            Err(e) => {
                let msg = format!("Image recognition failed: {}", e);
                log::error!("{}", msg);
                sender_safe!(package.sender, error_response!(msg).into());
            }
        }
    }

    Ok(())
}
