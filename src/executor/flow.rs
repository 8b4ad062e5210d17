use crate::config::Config;
use crate::console::Console;
use crate::error::BootstrapError;
use crate::executor::strategy::{choose_strategy, print_menu, Strategy};
use crate::managers::{
    brew::BrewManager, direct::DirectInstaller, fetch::Fetcher, npm::NpmManager,
    RuntimeInstaller,
};
use crate::prompt::Prompter;
use crate::system::{self, HostInfo};
use crate::utils::{CommandRunner, CommandSpec};
use std::path::Path;

/// Where the run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    CheckRuntime,
    Choosing,
    Acquire(Strategy),
    CheckPackageTool,
    InstallDownstream,
}

/// How a run ended without failing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Installed,
    ManualGuidance,
    Cancelled,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        0
    }
}

/// Collaborators of a single run
pub struct Bootstrap<'a> {
    pub config: &'a Config,
    pub host: &'a HostInfo,
    pub runner: &'a dyn CommandRunner,
    pub fetcher: &'a dyn Fetcher,
    pub prompter: &'a dyn Prompter,
    pub console: &'a Console,
    pub cwd: &'a Path,
}

impl Bootstrap<'_> {
    /// Drive the run to completion. Cancellation is an outcome, not an error.
    pub fn run(&self) -> Result<Outcome, BootstrapError> {
        self.console.step("🚀 Muggleout installer");
        self.console
            .notice("Development environment setup for non-developers\n");

        match self.drive() {
            Err(BootstrapError::Cancelled) => {
                self.console.notice("\n\nInstallation cancelled.");
                Ok(Outcome::Cancelled)
            }
            Err(e) => {
                report_failure(self.console, self.config, &e);
                Err(e)
            }
            ok => ok,
        }
    }

    fn drive(&self) -> Result<Outcome, BootstrapError> {
        let mut stage = Stage::Start;

        loop {
            if self.runner.interrupted() {
                return Err(BootstrapError::Cancelled);
            }

            log::debug!("Stage: {:?}", stage);

            stage = match stage {
                Stage::Start => {
                    system::detect_platform(self.host, self.runner, self.console)?;
                    Stage::CheckRuntime
                }

                Stage::CheckRuntime => {
                    if system::has_executable(self.runner, "node") {
                        self.report_existing_node();
                        Stage::CheckPackageTool
                    } else {
                        self.console.notice("⚠️  Node.js is not installed.");
                        Stage::Choosing
                    }
                }

                Stage::Choosing => {
                    print_menu(self.console);
                    let strategy = choose_strategy(self.prompter, self.console)
                        .map_err(|e| BootstrapError::lift(e, BootstrapError::Prompt))?;
                    Stage::Acquire(strategy)
                }

                Stage::Acquire(strategy) => {
                    let installer: Box<dyn RuntimeInstaller + '_> = match strategy {
                        Strategy::DirectDownload => Box::new(self.direct_installer()),
                        Strategy::PackageManager => Box::new(self.brew_manager()),
                        Strategy::Manual => {
                            print_manual_guidance(self.console);
                            return Ok(Outcome::ManualGuidance);
                        }
                    };
                    log::debug!("Installing Node.js via {}", installer.name());
                    installer.install_runtime()?;
                    Stage::CheckPackageTool
                }

                Stage::CheckPackageTool => {
                    if !system::has_executable(self.runner, "npm") {
                        return Err(BootstrapError::MissingTool {
                            tool: "npm".to_string(),
                        });
                    }
                    Stage::InstallDownstream
                }

                Stage::InstallDownstream => {
                    NpmManager::new(&self.config.tool, self.runner, self.console, self.cwd)
                        .install_tool()?;
                    print_usage(self.console, &self.config.tool.command);
                    return Ok(Outcome::Installed);
                }
            };
        }
    }

    fn direct_installer(&self) -> DirectInstaller<'_> {
        DirectInstaller::new(
            &self.config.node,
            self.host,
            self.runner,
            self.fetcher,
            self.console,
        )
    }

    fn brew_manager(&self) -> BrewManager<'_> {
        BrewManager::new(
            &self.config.homebrew,
            self.runner,
            self.prompter,
            self.console,
        )
    }

    fn report_existing_node(&self) {
        match self
            .runner
            .capture(&CommandSpec::new("node", &["--version"]))
        {
            Ok(version) => self
                .console
                .success(&format!("✅ Node.js {} is already installed!", version)),
            Err(e) => {
                log::debug!("node --version failed: {}", e);
                self.console.success("✅ Node.js is already installed!");
            }
        }
    }
}

fn print_manual_guidance(console: &Console) {
    console.step("\nManual installation:");
    console.plain("1. Visit https://nodejs.org");
    console.plain("2. Download the LTS version");
    console.plain("3. Run the downloaded package");
    console.plain("4. Run this installer again once it finishes");
}

fn print_usage(console: &Console, command: &str) {
    console.success("\n✅ Everything is installed! 🎉");
    console.step("\nUsage:");
    console.plain(&format!("  {:<22} # interactive mode", command));
    console.plain(&format!("  {:<22} # make the terminal pretty", format!("{} terminal", command)));
    console.plain(&format!("  {:<22} # check status", format!("{} status", command)));
    console.notice(&format!(
        "\nRestart your terminal and try running {}!",
        command
    ));
}

/// Print the failure plus what the operator can do about it
pub fn report_failure(console: &Console, config: &Config, err: &BootstrapError) {
    match err {
        BootstrapError::UnsupportedPlatform { .. } => {
            console.failure("❌ This tool only works on macOS.");
        }
        BootstrapError::MissingTool { tool } => {
            console.failure(&format!("❌ {} was not found. Reinstall Node.js.", tool));
        }
        BootstrapError::DirectInstall(_) => {
            console.failure(&format!("❌ Installation failed: {}", err));
            console.notice("Download it directly from https://nodejs.org");
        }
        BootstrapError::HomebrewDeclined
        | BootstrapError::HomebrewUnavailable
        | BootstrapError::PackageManagerInstall(_) => {
            console.failure(&format!("❌ Homebrew installation failed: {}", err));
        }
        BootstrapError::DownstreamInstall { .. } | BootstrapError::NoLocalManifest { .. } => {
            console.failure(&format!(
                "❌ {} installation failed: {}",
                config.tool.package, err
            ));
        }
        BootstrapError::Prompt(_) | BootstrapError::Cancelled => {
            console.failure(&format!("❌ {}", err));
        }
    }
}
