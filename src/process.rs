use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Run `command` (program followed by its arguments) in `cwd` and return its
/// trimmed stdout.
///
/// On a non-zero exit the call fails with [`Error::CommandFailed`] carrying the
/// captured stderr; `main` echoes it once any spinner is cleared. There is no
/// timeout.
pub fn run(command: &[String], cwd: &Path) -> Result<String> {
    let joined = command.join(" ");
    let (program, args) = command
        .split_first()
        .ok_or_else(|| Error::InvalidSetting {
            key: "command".to_string(),
            reason: "empty argument vector".to_string(),
        })?;

    if !cwd.is_dir() {
        return Err(Error::ProjectDirectoryMissing(cwd.to_path_buf()));
    }

    debug!(command = %joined, cwd = %cwd.display(), "running");

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|source| Error::Spawn {
            command: joined.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: joined,
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
