pub mod brew;
pub mod direct;
pub mod fetch;
pub mod npm;

use crate::error::BootstrapError;

/// A way of getting the Node.js runtime onto the machine
pub trait RuntimeInstaller {
    /// Name shown to the operator
    fn name(&self) -> &str;

    /// Install the runtime, blocking until done
    fn install_runtime(&self) -> Result<(), BootstrapError>;
}
