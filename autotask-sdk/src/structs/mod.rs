pub mod modules;
pub use modules::*;

use crossbeam::channel;
use tokio::sync::oneshot;
use valu3::value::Value;

pub type ModuleId = usize;
pub type ModuleSetupSender = oneshot::Sender<Option<channel::Sender<ModulePackage>>>;

/// Handed to a module once at startup by the host. The module answers
/// through `setup_sender` with the channel it wants invocations on.
#[derive(Debug)]
pub struct ModuleSetup {
    pub id: ModuleId,
    pub setup_sender: ModuleSetupSender,
    pub with: Value,
}
