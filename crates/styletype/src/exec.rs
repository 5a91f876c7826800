//! External command plumbing.
//!
//! Compilers, formatters and lint fixers are invoked as external processes
//! fed input on stdin and read back from stdout. No timeout is applied: a
//! hung tool blocks only the run that invoked it.

use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Pipe `input` through `argv`, returning the command's stdout.
///
/// `cwd` sets the working directory when given. Fails when the command
/// cannot be spawned, exits non-zero (the error text carries stderr) or
/// produces non-UTF-8 output. Errors are plain strings; callers wrap them
/// into the error variant matching their stage.
pub(crate) async fn pipe_through(
    argv: &[String],
    input: &str,
    cwd: Option<&Path>,
) -> std::result::Result<String, String> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| "empty command".to_string())?;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let mut child = command
        .spawn()
        .map_err(|e| format!("failed to spawn '{program}': {e}"))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| format!("no stdin handle for '{program}'"))?;
    let payload = input.as_bytes().to_vec();
    let feed = async move {
        stdin.write_all(&payload).await?;
        stdin.shutdown().await?;
        Ok::<_, std::io::Error>(())
    };

    // Feed stdin while collecting output so neither pipe fills up waiting
    // for the other side.
    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    let output = output.map_err(|e| format!("failed to run '{program}': {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "'{program}' exited with {}: {}",
            output.status,
            stderr.trim()
        ));
    }

    // A tool that exits cleanly without draining its stdin still failed the
    // invocation; surface the broken pipe.
    fed.map_err(|e| format!("failed to write to '{program}': {e}"))?;

    String::from_utf8(output.stdout)
        .map_err(|e| format!("'{program}' produced invalid UTF-8: {e}"))
}
