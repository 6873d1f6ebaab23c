use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a command with inherited stdio and report its exit code.
pub fn run_status(dir: &Path, cmd: &str, args: &[String]) -> Result<i32> {
    let status = Command::new(cmd)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .stdin(Stdio::inherit())
        .status()
        .with_context(|| format!("run {cmd}"))?;
    Ok(status.code().unwrap_or(1))
}
