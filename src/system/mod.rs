use crate::console::Console;
use crate::error::BootstrapError;
use crate::utils::{CommandRunner, CommandSpec};

/// Operating system and CPU architecture of the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub os: String,
    pub arch: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processor {
    AppleSilicon,
    Intel,
    Other,
}

impl HostInfo {
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    pub fn is_macos(&self) -> bool {
        self.os == "macos" || self.os == "darwin"
    }

    pub fn processor(&self) -> Processor {
        match self.arch.as_str() {
            "arm64" | "aarch64" => Processor::AppleSilicon,
            "x86_64" | "x64" => Processor::Intel,
            _ => Processor::Other,
        }
    }

    /// Architecture suffix used by nodejs.org macOS packages
    pub fn node_arch(&self) -> &'static str {
        match self.processor() {
            Processor::AppleSilicon => "arm64",
            _ => "x64",
        }
    }
}

/// Fail unless the host is macOS, then report what was found
pub fn detect_platform(
    host: &HostInfo,
    runner: &dyn CommandRunner,
    console: &Console,
) -> Result<(), BootstrapError> {
    if !host.is_macos() {
        return Err(BootstrapError::UnsupportedPlatform {
            os: host.os.clone(),
        });
    }

    console.success("✅ macOS detected");

    match runner.capture(&CommandSpec::new("sw_vers", &["-productVersion"])) {
        Ok(version) if !version.is_empty() => {
            console.detail(&format!("📱 macOS {}", version));
        }
        Ok(_) => console.notice("⚠️  Could not determine the macOS version."),
        Err(e) => {
            log::debug!("sw_vers failed: {}", e);
            console.notice("⚠️  Could not determine the macOS version.");
        }
    }

    match host.processor() {
        Processor::AppleSilicon => console.detail("🚀 Apple Silicon processor"),
        Processor::Intel => console.detail("💻 Intel processor"),
        Processor::Other => log::debug!("Unrecognised architecture: {}", host.arch),
    }

    Ok(())
}

/// True iff `name` resolves on the search path
pub fn has_executable(runner: &dyn CommandRunner, name: &str) -> bool {
    let found = runner.command_exists(name);
    log::debug!("{} on PATH: {}", name, found);
    found
}
