#[macro_export]
macro_rules! sender_safe {
    ($sender:expr, $data:expr) => {
        if let Err(err) = $sender.send($data) {
            $crate::log::debug!("Error sending data: {:?}", err);
        }
    };
}

#[macro_export]
macro_rules! module_channel {
    ($setup:expr) => {{
        let (tx, rx) = $crate::channel::unbounded::<$crate::structs::ModulePackage>();
        $crate::sender_safe!($setup.setup_sender, Some(tx));
        rx
    }};
}

#[macro_export]
macro_rules! create_step {
    ($handler:ident($setup:ident)) => {
        #[no_mangle]
        pub extern "C" fn plugin($setup: $crate::structs::ModuleSetup) {
            $crate::use_log!();

            if let Ok(rt) = $crate::tokio::runtime::Runtime::new() {
                if let Err(e) = rt.block_on($handler($setup)) {
                    $crate::log::error!("Error in module: {:?}", e);
                }
            } else {
                $crate::log::error!("Error creating runtime");
            }
        }
    };
}

#[macro_export]
macro_rules! use_log {
    () => {
        let _ = $crate::env_logger::Builder::from_env(
            $crate::env_logger::Env::default().default_filter_or("info"),
        )
        .try_init();
    };
}
