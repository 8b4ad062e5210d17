use crate::config::HomebrewConfig;
use crate::console::Console;
use crate::error::{BootstrapError, StepError};
use crate::managers::RuntimeInstaller;
use crate::prompt::Prompter;
use crate::utils::{CommandRunner, CommandSpec};

pub struct BrewManager<'a> {
    config: &'a HomebrewConfig,
    runner: &'a dyn CommandRunner,
    prompter: &'a dyn Prompter,
    console: &'a Console,
}

impl<'a> BrewManager<'a> {
    pub fn new(
        config: &'a HomebrewConfig,
        runner: &'a dyn CommandRunner,
        prompter: &'a dyn Prompter,
        console: &'a Console,
    ) -> Self {
        Self {
            config,
            runner,
            prompter,
            console,
        }
    }

    /// Create brew command with HOMEBREW_NO_AUTO_UPDATE=1
    fn brew_command(&self, args: &[&str]) -> CommandSpec {
        CommandSpec::new("brew", args).env("HOMEBREW_NO_AUTO_UPDATE", "1")
    }

    pub fn is_installed(&self) -> bool {
        self.runner.command_exists("brew")
    }

    /// Ask before running the remote Homebrew installer, then insist that
    /// `brew` actually resolves afterwards.
    pub fn install_self(&self) -> Result<(), BootstrapError> {
        self.console.notice("Homebrew is not installed.");

        let consent = self
            .prompter
            .confirm("Install Homebrew?")
            .map_err(|e| BootstrapError::lift(e, BootstrapError::Prompt))?;

        if !consent {
            return Err(BootstrapError::HomebrewDeclined);
        }

        self.console.step("Installing Homebrew...");
        self.runner
            .run(&CommandSpec::shell(&self.config.bootstrap_command()))
            .map_err(|e| BootstrapError::lift(e, BootstrapError::PackageManagerInstall))?;

        // Fresh installs are not on PATH until the shell profile is reloaded
        for prefix in &self.config.prefixes {
            if prefix.join("brew").is_file() {
                self.runner.prepend_path(prefix);
            }
        }

        if !self.is_installed() {
            return Err(BootstrapError::HomebrewUnavailable);
        }

        self.console.success("✓ Homebrew installed");
        Ok(())
    }

    /// Install a formula
    pub fn install_formula(&self, name: &str) -> Result<(), StepError> {
        log::debug!("→ Installing {} (formula)...", name);
        self.runner.run(&self.brew_command(&["install", name]))
    }
}

impl RuntimeInstaller for BrewManager<'_> {
    fn name(&self) -> &str {
        "Homebrew"
    }

    fn install_runtime(&self) -> Result<(), BootstrapError> {
        self.console.step("\n🍺 Installing with Homebrew...");

        if !self.is_installed() {
            self.install_self()?;
        }

        self.console.step("Installing Node.js...");
        self.install_formula(&self.config.formula)
            .map_err(|e| BootstrapError::lift(e, BootstrapError::PackageManagerInstall))?;

        self.console.success("✅ Node.js installed!");
        Ok(())
    }
}
