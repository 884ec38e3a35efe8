//! Forwards the final argument list to the real toolchain.

use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::{CliError, Result};

/// Runs `args[0]` with the remaining arguments. Standard input, output and
/// error are inherited, so the child's streams reach the caller untouched.
/// Blocks until the child exits and returns its exit code verbatim; the
/// wrapper imposes no timeout of its own.
pub fn forward(args: &[String]) -> Result<i32> {
    let (binary, rest) = args
        .split_first()
        .ok_or_else(|| CliError::Command("empty toolchain command".to_string()))?;
    debug!(%binary, argc = rest.len(), "forwarding to toolchain");

    let status = Command::new(binary)
        .args(rest)
        .status()
        .map_err(|source| CliError::Spawn {
            binary: PathBuf::from(binary),
            source,
        })?;
    Ok(exit_code(status))
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    // No code means the child died to a signal.
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let args = vec!["/nonexistent/toolchain-binary".to_string()];
        assert!(matches!(forward(&args), Err(CliError::Spawn { .. })));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(forward(&[]), Err(CliError::Command(_))));
    }

    #[cfg(unix)]
    #[test]
    fn child_exit_code_is_propagated() {
        let args = vec!["/bin/sh".to_string(), "-c".to_string(), "exit 7".to_string()];
        assert_eq!(forward(&args).unwrap(), 7);
    }
}
