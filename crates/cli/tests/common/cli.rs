//! CLI command execution helpers with automatic timing
//!
//! Wraps the `libra` binary built for this test run. Every command runs with
//! an isolated config directory so a developer's own configuration never
//! leaks into the tests.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct LibraCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    stdin_data: Option<String>,
}

impl LibraCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        let working_dir = working_dir.as_ref().to_path_buf();
        let config_home = working_dir.join(".config");

        let mut env = HashMap::new();
        env.insert("XDG_CONFIG_HOME".to_string(), config_home.display().to_string());
        env.insert("HOME".to_string(), working_dir.display().to_string());

        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_libra")),
            working_dir,
            args: Vec::new(),
            env,
            stdin_data: None,
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    #[allow(dead_code)]
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Provide stdin data
    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.stdin_data = Some(data.to_string());
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let mut command = Command::new(&self.binary_path);
        command
            .args(&self.args)
            .current_dir(&self.working_dir)
            .env_remove("LIBRA_CONFIG")
            .env_remove("RUST_LOG")
            .envs(&self.env)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = if let Some(stdin_str) = &self.stdin_data {
            command.stdin(Stdio::piped());
            let mut child = command.spawn().context("Failed to spawn command")?;

            // Write stdin, then close it so the command sees EOF
            if let Some(mut stdin) = child.stdin.take() {
                use std::io::Write;
                stdin.write_all(stdin_str.as_bytes())?;
            }

            child.wait_with_output().context("Failed to wait for command")?
        } else {
            command.stdin(Stdio::null());
            command.output().context("Failed to execute command")?
        };

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    #[allow(dead_code)]
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Number of search result blocks printed
    pub fn result_blocks(&self) -> usize {
        self.stdout.matches("Results for").count()
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// libra!(dir, "search", "fizikë").assert_success()?;
/// libra!(dir, "interactive").stdin("m\nma\n").assert_success()?;
/// ```
#[macro_export]
macro_rules! libra {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::LibraCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
