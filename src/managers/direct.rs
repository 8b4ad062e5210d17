use crate::config::NodeConfig;
use crate::console::Console;
use crate::error::{BootstrapError, StepError};
use crate::managers::fetch::Fetcher;
use crate::managers::RuntimeInstaller;
use crate::system::HostInfo;
use crate::utils::{CommandRunner, CommandSpec};
use std::path::Path;
use tempfile::NamedTempFile;

/// Installs Node.js from the official macOS `.pkg`
pub struct DirectInstaller<'a> {
    node: &'a NodeConfig,
    host: &'a HostInfo,
    runner: &'a dyn CommandRunner,
    fetcher: &'a dyn Fetcher,
    console: &'a Console,
}

impl<'a> DirectInstaller<'a> {
    pub fn new(
        node: &'a NodeConfig,
        host: &'a HostInfo,
        runner: &'a dyn CommandRunner,
        fetcher: &'a dyn Fetcher,
        console: &'a Console,
    ) -> Self {
        Self {
            node,
            host,
            runner,
            fetcher,
            console,
        }
    }

    pub fn package_url(&self) -> String {
        self.node.package_url(self.host.node_arch())
    }

    /// Download the package into a temporary file that is removed on drop
    pub fn download(&self) -> Result<NamedTempFile, StepError> {
        let url = self.package_url();

        self.console.step("\n📦 Downloading Node.js...");
        self.console.notice(&format!("Downloading: {}", url));

        let mut builder = tempfile::Builder::new();
        builder.prefix("node-").suffix(".pkg");
        let mut artifact = match &self.node.download_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        self.fetcher.fetch(&url, artifact.as_file_mut())?;

        Ok(artifact)
    }

    /// Hand the package to Installer.app, escalating to `sudo installer`
    /// once if that does not work out.
    pub fn install_package(&self, pkg: &Path) -> Result<(), StepError> {
        self.console.step("\n🔧 Installing Node.js...");
        self.console.notice("An administrator password may be required.");

        let pkg = pkg.to_string_lossy().into_owned();
        let open = CommandSpec::new("open", &["-W", pkg.as_str()]);

        match self.runner.run(&open) {
            Ok(()) => Ok(()),
            Err(StepError::Interrupted) => Err(StepError::Interrupted),
            Err(e @ (StepError::NonZeroExit { .. }
            | StepError::PermissionDenied { .. }
            | StepError::NotFound { .. })) => {
                log::warn!("open -W failed ({}), retrying with sudo installer", e);
                let installer =
                    CommandSpec::new("sudo", &["installer", "-pkg", pkg.as_str(), "-target", "/"]);
                self.runner.run(&installer)
            }
            Err(e) => Err(e),
        }
    }
}

impl RuntimeInstaller for DirectInstaller<'_> {
    fn name(&self) -> &str {
        "nodejs.org package"
    }

    fn install_runtime(&self) -> Result<(), BootstrapError> {
        let artifact = self
            .download()
            .map_err(|e| BootstrapError::lift(e, BootstrapError::DirectInstall))?;

        self.install_package(artifact.path())
            .map_err(|e| BootstrapError::lift(e, BootstrapError::DirectInstall))?;

        if let Err(e) = artifact.close() {
            log::warn!("Could not remove downloaded package: {}", e);
        }

        self.console.success("✅ Node.js installed!");
        Ok(())
    }
}
