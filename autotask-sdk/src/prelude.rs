#![allow(ambiguous_glob_reexports)]

pub use crate::structs::*;
pub use crate::{create_step, module_channel, sender_safe, use_log};
pub use crossbeam::channel;
pub use env_logger;
pub use log;
pub use tokio;
pub use valu3::json;
pub use valu3::prelude::*;
