mod input;
mod request;
mod setup;

use crate::input::ChatInput;
use crate::setup::Setup;
use autotask_sdk::prelude::*;
use std::convert::TryFrom;

create_step!(text_generation(setup));

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

/// Chat-completion node: sends a system + user message pair and relays
/// the generated text.
pub async fn text_generation(
    setup: ModuleSetup,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rx = module_channel!(setup);

    let setup = Setup::try_from(setup.with)?;
    let client = setup.build_client()?;

    log::debug!(
        "Text generation module initialized with model: {}",
        setup.model
    );

    for package in rx {
        let input = match ChatInput::try_from(package.input()) {
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
                log::debug!("Chat completion succeeded");
                sender_safe!(package.sender, success_response!(data).into());
            }
            Err(e) => {
                let msg = format!("Text generation failed: {}", e);
                log::error!("{}", msg);
                sender_safe!(package.sender, error_response!(msg).into());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_invalid_input_yields_error_envelope() {
        let (setup_tx, setup_rx) = oneshot::channel();
        let setup = ModuleSetup {
            id: 0,
            setup_sender: setup_tx,
            with: json!({ "api_key": "sk-test" }),
        };

        let task = tokio::spawn(async move {
            text_generation(setup).await.unwrap();
        });

        let tx = setup_rx.await.unwrap().unwrap();

        let (result_tx, result_rx) = oneshot::channel();
        let package = ModulePackage {
            input: Some(json!({ "temperature": 0.7 })),
            sender: result_tx,
        };
        tx.send(package).unwrap();
        drop(tx);

        let response = result_rx.await.unwrap();
        let success = response
            .data
            .get("success")
            .and_then(|v| v.as_bool().cloned())
            .unwrap();
        assert!(!success);

        let error = match response.data.get("error") {
            Some(Value::String(s)) => s.as_string(),
            other => panic!("expected error message, got {:?}", other),
        };
        assert!(error.contains("Invalid input"));

        task.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_missing_api_key_fails_startup() {
        std::env::remove_var("OPENAI_API_KEY");

        let (setup_tx, _setup_rx) = oneshot::channel();
        let setup = ModuleSetup {
            id: 0,
            setup_sender: setup_tx,
            with: Value::Null,
        };

        let result = text_generation(setup).await;
        assert!(result.is_err());
    }
}
