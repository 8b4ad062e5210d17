use crate::config::ToolConfig;
use crate::console::Console;
use crate::error::{BootstrapError, StepError};
use crate::utils::{CommandRunner, CommandSpec};
use std::path::Path;

/// Installs the downstream CLI through npm
pub struct NpmManager<'a> {
    tool: &'a ToolConfig,
    runner: &'a dyn CommandRunner,
    console: &'a Console,
    cwd: &'a Path,
}

impl<'a> NpmManager<'a> {
    pub fn new(
        tool: &'a ToolConfig,
        runner: &'a dyn CommandRunner,
        console: &'a Console,
        cwd: &'a Path,
    ) -> Self {
        Self {
            tool,
            runner,
            console,
            cwd,
        }
    }

    pub fn install_global_package(&self, name: &str) -> Result<(), StepError> {
        log::debug!("→ Installing {} (npm -g)...", name);
        self.runner.run(&CommandSpec::new("npm", &["install", "-g", name]))
    }

    /// `npm install` + `npm link` from a checkout in the working directory
    pub fn install_local(&self) -> Result<(), StepError> {
        self.console.notice("Installing local version...");
        self.runner
            .run(&CommandSpec::new("npm", &["install"]).in_dir(self.cwd))?;
        self.runner
            .run(&CommandSpec::new("npm", &["link"]).in_dir(self.cwd))
    }

    pub fn install_tool(&self) -> Result<(), BootstrapError> {
        let package = &self.tool.package;
        self.console.step(&format!("\n📦 Installing {}...", package));

        let global_err = match self.install_global_package(package) {
            Ok(()) => return Ok(()),
            Err(StepError::Interrupted) => return Err(BootstrapError::Cancelled),
            // A local install needs npm just the same
            Err(e @ StepError::NotFound { .. }) => {
                return Err(BootstrapError::DownstreamInstall {
                    package: package.clone(),
                    source: e,
                })
            }
            Err(e) => e,
        };

        log::warn!("npm install -g {} failed: {}", package, global_err);

        if !self.cwd.join(&self.tool.manifest).is_file() {
            return Err(BootstrapError::NoLocalManifest {
                package: package.clone(),
                manifest: self.tool.manifest.clone(),
            });
        }

        self.install_local().map_err(|e| {
            BootstrapError::lift(e, |source| BootstrapError::DownstreamInstall {
                package: package.clone(),
                source,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fake::{self, FakeRunner};
    use std::fs;

    #[test]
    fn test_global_install() {
        let tool = ToolConfig::default();
        let runner = FakeRunner::with_tools(&["npm"]);
        let console = Console::captured();
        let dir = tempfile::tempdir().unwrap();

        NpmManager::new(&tool, &runner, &console, dir.path())
            .install_tool()
            .unwrap();

        assert_eq!(runner.rendered_calls(), vec!["npm install -g dev-setup-cli"]);
    }

    #[test]
    fn test_global_failure_without_manifest() {
        let tool = ToolConfig::default();
        let runner =
            FakeRunner::with_tools(&["npm"]).fail("npm install -g dev-setup-cli", fake::non_zero);
        let console = Console::captured();
        let dir = tempfile::tempdir().unwrap();

        let err = NpmManager::new(&tool, &runner, &console, dir.path())
            .install_tool()
            .unwrap_err();

        assert!(matches!(err, BootstrapError::NoLocalManifest { .. }));
        assert_eq!(runner.rendered_calls().len(), 1);
    }

    #[test]
    fn test_global_failure_falls_back_to_local_link() {
        let tool = ToolConfig::default();
        let runner =
            FakeRunner::with_tools(&["npm"]).fail("npm install -g dev-setup-cli", fake::non_zero);
        let console = Console::captured();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        NpmManager::new(&tool, &runner, &console, dir.path())
            .install_tool()
            .unwrap();

        assert_eq!(
            runner.rendered_calls(),
            vec!["npm install -g dev-setup-cli", "npm install", "npm link"]
        );
        let calls = runner.calls.borrow();
        assert_eq!(calls[1].dir.as_deref(), Some(dir.path()));
        assert_eq!(calls[2].dir.as_deref(), Some(dir.path()));
        assert!(console.contains("Installing local version"));
    }

    #[test]
    fn test_missing_npm_skips_fallback() {
        let tool = ToolConfig::default();
        let runner = FakeRunner::default().fail("npm install -g dev-setup-cli", fake::not_found);
        let console = Console::captured();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let err = NpmManager::new(&tool, &runner, &console, dir.path())
            .install_tool()
            .unwrap_err();

        assert!(matches!(
            err,
            BootstrapError::DownstreamInstall {
                source: StepError::NotFound { .. },
                ..
            }
        ));
        assert_eq!(runner.rendered_calls().len(), 1);
    }

    #[test]
    fn test_local_install_failure_stops_before_link() {
        let tool = ToolConfig::default();
        let runner = FakeRunner::with_tools(&["npm"])
            .fail("npm install -g dev-setup-cli", fake::non_zero)
            .fail("npm install", fake::non_zero);
        let console = Console::captured();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let err = NpmManager::new(&tool, &runner, &console, dir.path())
            .install_tool()
            .unwrap_err();

        assert!(matches!(err, BootstrapError::DownstreamInstall { .. }));
        assert!(!runner.ran("npm link"));
    }

    #[test]
    fn test_interrupt_is_cancel() {
        let tool = ToolConfig::default();
        let runner = FakeRunner::with_tools(&["npm"])
            .fail("npm install -g dev-setup-cli", fake::interrupted);
        let console = Console::captured();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let err = NpmManager::new(&tool, &runner, &console, dir.path())
            .install_tool()
            .unwrap_err();

        assert!(matches!(err, BootstrapError::Cancelled));
    }
}
