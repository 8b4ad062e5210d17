use crate::error::StepError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A program plus fixed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            env: Vec::new(),
            dir: None,
        }
    }

    /// Run through `sh -c`
    pub fn shell(script: &str) -> Self {
        Self::new("sh", &["-c", script])
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.dir = Some(dir.to_path_buf());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Everything the bootstrap flow needs from the host's process table
pub trait CommandRunner {
    /// Check if a command exists in PATH
    fn command_exists(&self, name: &str) -> bool;

    /// Run with inherited stdio, blocking until exit
    fn run(&self, cmd: &CommandSpec) -> Result<(), StepError>;

    /// Run and capture trimmed stdout
    fn capture(&self, cmd: &CommandSpec) -> Result<String, StepError>;

    /// Prepend a directory to PATH for subsequent lookups and spawns
    fn prepend_path(&self, dir: &Path);

    /// Set once the operator has sent an interrupt
    fn interrupted(&self) -> bool;
}

/// SIGINT latch shared between the signal handler, the runner and prompts
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Register for SIGINT so an interrupt during a blocking child, download
    /// or stdin read does not kill this process before cleanup runs.
    pub fn install() -> std::io::Result<Self> {
        let interrupt = Self::default();
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&interrupt.flag))?;
        Ok(interrupt)
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// Runs real processes
pub struct SystemRunner {
    interrupt: Interrupt,
}

impl SystemRunner {
    pub fn new(interrupt: Interrupt) -> Self {
        Self { interrupt }
    }

    fn command(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &spec.dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn check_interrupt(&self) -> Result<(), StepError> {
        if self.interrupt.is_set() {
            return Err(StepError::Interrupted);
        }
        Ok(())
    }
}

impl CommandRunner for SystemRunner {
    fn command_exists(&self, name: &str) -> bool {
        which::which(name).is_ok()
    }

    fn run(&self, spec: &CommandSpec) -> Result<(), StepError> {
        self.check_interrupt()?;
        log::debug!("Executing: {}", spec);

        let status = self
            .command(spec)
            .status()
            .map_err(|e| StepError::from_spawn(&spec.program, e))?;

        self.check_interrupt()?;

        if !status.success() {
            return Err(StepError::NonZeroExit {
                program: spec.program.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }

    fn capture(&self, spec: &CommandSpec) -> Result<String, StepError> {
        self.check_interrupt()?;
        log::debug!("Capturing: {}", spec);

        let output = self
            .command(spec)
            .output()
            .map_err(|e| StepError::from_spawn(&spec.program, e))?;

        self.check_interrupt()?;

        if !output.status.success() {
            return Err(StepError::NonZeroExit {
                program: spec.program.clone(),
                code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn prepend_path(&self, dir: &Path) {
        let current = std::env::var_os("PATH").unwrap_or_default();
        let mut paths = vec![dir.to_path_buf()];
        paths.extend(std::env::split_paths(&current).filter(|p| p != dir));

        match std::env::join_paths(paths) {
            Ok(joined) => {
                log::debug!("Prepending {} to PATH", dir.display());
                std::env::set_var("PATH", joined);
            }
            Err(e) => log::warn!("Could not add {} to PATH: {}", dir.display(), e),
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt.is_set()
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;

    /// Scripted stand-in for the process table.
    ///
    /// Commands succeed unless a failure was registered for their rendered
    /// form (`"npm install -g dev-setup-cli"`); executables resolve only when
    /// listed, or once a `run` of a registered "provides" command succeeds.
    #[derive(Default)]
    pub struct FakeRunner {
        pub present: RefCell<HashSet<String>>,
        pub failures: HashMap<String, fn(&CommandSpec) -> StepError>,
        pub provides: HashMap<String, Vec<String>>,
        pub captures: HashMap<String, String>,
        pub calls: RefCell<Vec<CommandSpec>>,
        pub path_prefixes: RefCell<Vec<PathBuf>>,
    }

    impl FakeRunner {
        pub fn with_tools(tools: &[&str]) -> Self {
            let runner = Self::default();
            runner
                .present
                .borrow_mut()
                .extend(tools.iter().map(|t| t.to_string()));
            runner
        }

        pub fn fail(mut self, cmd: &str, err: fn(&CommandSpec) -> StepError) -> Self {
            self.failures.insert(cmd.to_string(), err);
            self
        }

        pub fn providing(mut self, cmd: &str, tools: &[&str]) -> Self {
            self.provides
                .insert(cmd.to_string(), tools.iter().map(|t| t.to_string()).collect());
            self
        }

        pub fn capturing(mut self, cmd: &str, stdout: &str) -> Self {
            self.captures.insert(cmd.to_string(), stdout.to_string());
            self
        }

        pub fn rendered_calls(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.to_string()).collect()
        }

        pub fn ran(&self, prefix: &str) -> bool {
            self.rendered_calls().iter().any(|c| c.starts_with(prefix))
        }
    }

    pub fn non_zero(spec: &CommandSpec) -> StepError {
        StepError::NonZeroExit {
            program: spec.program.clone(),
            code: Some(1),
        }
    }

    pub fn not_found(spec: &CommandSpec) -> StepError {
        StepError::NotFound {
            program: spec.program.clone(),
        }
    }

    pub fn interrupted(_: &CommandSpec) -> StepError {
        StepError::Interrupted
    }

    impl CommandRunner for FakeRunner {
        fn command_exists(&self, name: &str) -> bool {
            self.present.borrow().contains(name)
        }

        fn run(&self, spec: &CommandSpec) -> Result<(), StepError> {
            self.calls.borrow_mut().push(spec.clone());
            let rendered = spec.to_string();

            if let Some(err) = self.failures.get(&rendered) {
                return Err(err(spec));
            }
            if let Some(tools) = self.provides.get(&rendered) {
                self.present.borrow_mut().extend(tools.iter().cloned());
            }
            Ok(())
        }

        fn capture(&self, spec: &CommandSpec) -> Result<String, StepError> {
            self.calls.borrow_mut().push(spec.clone());
            self.captures
                .get(&spec.to_string())
                .cloned()
                .ok_or_else(|| not_found(spec))
        }

        fn prepend_path(&self, dir: &Path) {
            self.path_prefixes.borrow_mut().push(dir.to_path_buf());
        }

        fn interrupted(&self) -> bool {
            false
        }
    }
}
