use thiserror::Error;

/// Result of a single external invocation (subprocess, download, prompt)
#[derive(Debug, Error)]
pub enum StepError {
    #[error("{program} not found")]
    NotFound { program: String },

    #[error("permission denied running {program}")]
    PermissionDenied { program: String },

    #[error("download of {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("{program} exited with {}", describe_code(*code))]
    NonZeroExit { program: String, code: Option<i32> },

    #[error("interrupted")]
    Interrupted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl StepError {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, StepError::Interrupted)
    }

    /// Map a spawn failure for `program` onto the taxonomy
    pub fn from_spawn(program: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StepError::NotFound {
                program: program.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => StepError::PermissionDenied {
                program: program.to_string(),
            },
            _ => StepError::Io(err),
        }
    }
}

/// Run-level failure of the bootstrap flow
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("unsupported operating system: {os} (macOS only)")]
    UnsupportedPlatform { os: String },

    #[error("{tool} is not available")]
    MissingTool { tool: String },

    #[error("Node.js package install failed: {0}")]
    DirectInstall(#[source] StepError),

    #[error("Homebrew installation was declined")]
    HomebrewDeclined,

    #[error("Homebrew is still not available after running its installer")]
    HomebrewUnavailable,

    #[error("Homebrew install failed: {0}")]
    PackageManagerInstall(#[source] StepError),

    #[error("{package} install failed: {source}")]
    DownstreamInstall {
        package: String,
        #[source]
        source: StepError,
    },

    #[error("{package} global install failed and no {manifest} was found for a local install")]
    NoLocalManifest { package: String, manifest: String },

    #[error("prompt failed: {0}")]
    Prompt(#[source] StepError),

    #[error("installation cancelled")]
    Cancelled,
}

impl BootstrapError {
    /// Wrap a step failure, keeping interrupts distinguishable
    pub fn lift(err: StepError, wrap: impl FnOnce(StepError) -> BootstrapError) -> Self {
        if err.is_interrupted() {
            BootstrapError::Cancelled
        } else {
            wrap(err)
        }
    }
}
