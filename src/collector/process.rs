//! External analyzer execution with an optional bounded wait.

use crate::config::ToolConfig;
use crate::utils::error::CollectionError;
use log::{debug, warn};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// Keep error messages readable when an analyzer dumps a lot on stderr
const MAX_STDERR_IN_ERROR: usize = 2000;

/// Captured result of one analyzer run
#[derive(Debug)]
pub struct AnalyzerOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

/// Run the analyzer described by `config` and capture its output
///
/// stdout and stderr are spooled to anonymous temp files rather than pipes,
/// so the child never blocks on a full pipe while we wait on it. When
/// `timeout` is set and expires, the child is killed and reaped before
/// `CollectionError::TimedOut` is returned. On unix the analyzer runs in its
/// own process group, and the whole group is killed.
///
/// # Errors
/// * `CollectionError::Spawn` - the program could not be started
/// * `CollectionError::TimedOut` - the bounded wait expired
/// * `CollectionError::Failed` - exit code not in `accepted_exit_codes`
/// * `CollectionError::InvalidUtf8` - stdout is not UTF-8
pub fn run_analyzer(
    config: &ToolConfig,
    timeout: Option<Duration>,
) -> Result<AnalyzerOutput, CollectionError> {
    let command_line = config.command.join(" ");
    let (program, args) = config
        .command
        .split_first()
        .ok_or_else(|| CollectionError::Spawn {
            command: command_line.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
        })?;

    let mut stdout_file = tempfile::tempfile()?;
    let mut stderr_file = tempfile::tempfile()?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file.try_clone()?))
        .stderr(Stdio::from(stderr_file.try_clone()?));

    if let Some(dir) = &config.cwd {
        cmd.current_dir(dir);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    debug!("Running analyzer: {}", command_line);
    let start = Instant::now();

    let mut child = cmd.spawn().map_err(|source| CollectionError::Spawn {
        command: command_line.clone(),
        source,
    })?;

    let waited = match timeout {
        Some(limit) => child.wait_timeout(limit).map(|status| status.ok_or(limit)),
        None => child.wait().map(Ok),
    };
    let status = match waited {
        Ok(Ok(status)) => status,
        Ok(Err(limit)) => {
            warn!("Analyzer exceeded {}s, killing it", limit.as_secs());
            terminate(&mut child);
            return Err(CollectionError::TimedOut {
                command: command_line,
                timeout: limit,
            });
        }
        Err(err) => {
            terminate(&mut child);
            return Err(err.into());
        }
    };
    let elapsed = start.elapsed();

    let stdout = String::from_utf8(read_spooled(&mut stdout_file)?)
        .map_err(|_| CollectionError::InvalidUtf8)?;
    let stderr = String::from_utf8_lossy(&read_spooled(&mut stderr_file)?).into_owned();

    debug!(
        "Analyzer finished with {} in {:.2}s ({} bytes of output)",
        status,
        elapsed.as_secs_f64(),
        stdout.len()
    );

    let accepted = status
        .code()
        .is_some_and(|code| config.accepted_exit_codes.contains(&code));
    if !accepted {
        return Err(CollectionError::Failed {
            command: command_line,
            status: status.to_string(),
            stderr: truncate(stderr.trim(), MAX_STDERR_IN_ERROR),
        });
    }

    Ok(AnalyzerOutput {
        stdout,
        stderr,
        status,
    })
}

/// Kill the analyzer (and on unix its process group) and reap it
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Err(e) = killpg(Pid::from_raw(child.id() as i32), Signal::SIGKILL) {
            debug!("Failed to kill process group {}: {}", child.id(), e);
        }
    }
    if let Err(e) = child.kill() {
        debug!("Failed to kill analyzer {}: {}", child.id(), e);
    }
    if let Err(e) = child.wait() {
        warn!("Failed to reap analyzer {}: {}", child.id(), e);
    }
}

fn read_spooled(file: &mut File) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
