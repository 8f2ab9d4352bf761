//! Capability layer over external tools
//!
//! The schema compiler and the pbization generator are black boxes invoked
//! as subprocesses. The pipeline only ever needs `run(invocation) ->
//! exit_code`, so that seam is a trait and the stages can be exercised in
//! tests with fake runners instead of the real binaries.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Result;

/// A fully assembled command line for an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory for the subprocess, if it matters to the tool.
    pub cwd: Option<PathBuf>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The full argument vector including the program itself.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl fmt::Display for ToolInvocation {
    /// Shell-quoted command line; tokenizing it by shell rules yields the
    /// exact argv handed to the subprocess.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.argv().iter().map(|a| shell_quote(a)).collect();
        write!(f, "{}", joined.join(" "))
    }
}

/// Runs external tools; implemented by real subprocesses in production and
/// by fakes in tests.
pub trait ToolRunner {
    /// Run the tool synchronously and return its exit code.
    fn run(&self, invocation: &ToolInvocation) -> Result<i32>;

    /// Run the tool and capture its stdout (used for interpreter probes).
    fn run_capture(&self, invocation: &ToolInvocation) -> Result<(i32, String)>;

    /// Look the tool up on the execution environment's search path.
    fn which(&self, prog: &str) -> Option<PathBuf> {
        find_in_path(prog)
    }
}

/// [`ToolRunner`] backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<i32> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }
        tracing::debug!(command = %invocation, "running external tool");
        let status = command.status()?;
        // Terminated by signal on Unix reports no code; treat as failure.
        Ok(status.code().unwrap_or(-1))
    }

    fn run_capture(&self, invocation: &ToolInvocation) -> Result<(i32, String)> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }
        tracing::debug!(command = %invocation, "probing external tool");
        let output = command.output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        Ok((output.status.code().unwrap_or(-1), stdout))
    }
}

/// Look up `prog` on the `PATH`, returning the first executable hit.
pub fn find_in_path(prog: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        let cand = dir.join(prog);
        if cand.is_file() && is_executable(&cand) {
            return Some(cand);
        }
    }
    None
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        if let Ok(meta) = std::fs::metadata(path) {
            return meta.permissions().mode() & 0o111 != 0;
        }
        false
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

/// Quote a single argument for safe shell re-execution (POSIX rules: wrap in
/// single quotes, escape embedded single quotes as `'"'"'`).
pub fn shell_quote(arg: &str) -> String {
    if !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:@%+,".contains(c))
    {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r#"'"'"'"#))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain_arg_unchanged() {
        assert_eq!(shell_quote("--proto_path"), "--proto_path");
        assert_eq!(shell_quote("/a/b/types.proto"), "/a/b/types.proto");
    }

    #[test]
    fn test_quote_empty_and_spaced() {
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("a b"), "'a b'");
    }

    #[test]
    fn test_quote_embedded_single_quote() {
        assert_eq!(shell_quote("it's"), r#"'it'"'"'s'"#);
    }

    #[test]
    fn test_display_joins_quoted_argv() {
        let inv = ToolInvocation::new("protoc")
            .arg("--proto_path")
            .arg("/tmp/with space");
        assert_eq!(inv.to_string(), "protoc --proto_path '/tmp/with space'");
    }

    #[test]
    fn test_find_in_path_misses_nonsense() {
        assert!(find_in_path("definitely-not-a-real-tool-0b1c2").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_in_path_respects_exec_bit() {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("fake-tool");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o644)).unwrap();

        let old_path = std::env::var_os("PATH").unwrap_or_default();
        let mut dirs: Vec<_> = std::env::split_paths(&old_path).collect();
        dirs.insert(0, dir.path().to_path_buf());
        std::env::set_var("PATH", std::env::join_paths(dirs).unwrap());

        assert!(find_in_path("fake-tool").is_none());

        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(find_in_path("fake-tool"), Some(tool));

        std::env::set_var("PATH", old_path);
    }
}
