pub mod macros;
pub mod prelude;
pub mod structs;

pub use crossbeam;
pub use crossbeam::channel;
pub use env_logger;
pub use log;
pub use tokio;
pub use valu3;
