use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use fitsweep_core::{ErrorInfo, SweepError, SweepParameter};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs the simulation once for a sweep point and returns its standard output.
pub trait SimulationInvoker {
    fn invoke(&self, parameter: SweepParameter) -> Result<String, SweepError>;
}

/// Invokes an external program as `<executable> [args..] <parameter>`,
/// one blocking process per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInvoker {
    executable: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessInvoker {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Arguments passed ahead of the parameter, e.g. a script run through an interpreter.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Bounds each invocation. On expiry the child is killed and the point fails.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn failure(
        &self,
        parameter: SweepParameter,
        code: &str,
        message: impl Into<String>,
    ) -> ErrorInfo {
        ErrorInfo::new(code, message)
            .with_context("dram_fit", parameter.to_arg())
            .with_context("executable", self.executable.display().to_string())
    }

    fn spawn_error(&self, parameter: SweepParameter, err: io::Error) -> SweepError {
        let info = if err.kind() == io::ErrorKind::NotFound {
            self.failure(parameter, "invoke-not-found", "executable not found")
                .with_hint("check the executable path or build the simulator first")
        } else {
            self.failure(parameter, "invoke-spawn", "failed to start executable")
                .with_hint(err.to_string())
        };
        SweepError::Invocation(info)
    }
}

impl SimulationInvoker for ProcessInvoker {
    fn invoke(&self, parameter: SweepParameter) -> Result<String, SweepError> {
        let started = Instant::now();
        let child = Command::new(&self.executable)
            .args(&self.args)
            .arg(parameter.to_arg())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| self.spawn_error(parameter, err))?;

        let waited = match self.timeout {
            Some(limit) => wait_with_timeout(child, limit),
            None => child.wait_with_output().map(Some),
        };
        let output = waited
            .map_err(|err| {
                SweepError::Invocation(
                    self.failure(parameter, "invoke-wait", "failed to collect program output")
                        .with_hint(err.to_string()),
                )
            })?
            .ok_or_else(|| {
                let limit = self.timeout.unwrap_or_default();
                SweepError::Invocation(
                    self.failure(parameter, "invoke-timeout", "program did not exit in time")
                        .with_context("timeout_secs", limit.as_secs().to_string())
                        .with_hint("the process was killed; raise timeout_secs if this is expected"),
                )
            })?;

        let stderr_tail = last_line(&output.stderr);
        if !output.status.success() {
            let mut info = self
                .failure(parameter, "invoke-exit-status", "program exited unsuccessfully")
                .with_context("status", describe_status(output.status));
            if let Some(line) = stderr_tail {
                info = info.with_hint(line);
            }
            return Err(SweepError::Invocation(info));
        }
        if let Some(line) = stderr_tail {
            debug!(dram_fit = %parameter, stderr = %line, "program wrote to stderr");
        }

        let text = String::from_utf8(output.stdout).map_err(|err| {
            SweepError::Invocation(
                self.failure(parameter, "invoke-decode", "program output is not valid UTF-8")
                    .with_hint(err.to_string()),
            )
        })?;
        debug!(
            dram_fit = %parameter,
            bytes = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "captured program output"
        );
        Ok(text)
    }
}

/// Polls the child until it exits or `limit` elapses. `Ok(None)` means the
/// child was killed on timeout.
fn wait_with_timeout(mut child: Child, limit: Duration) -> io::Result<Option<Output>> {
    // Drain both pipes concurrently; the child blocks once a pipe buffer fills.
    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);
    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if started.elapsed() >= limit => {
                terminate(&mut child);
                return Ok(None);
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(err) => {
                terminate(&mut child);
                return Err(err);
            }
        }
    };
    Ok(Some(Output {
        status,
        stdout: join_reader(stdout)?,
        stderr: join_reader(stderr)?,
    }))
}

/// Kills the child and reaps it so no zombie outlives the invocation.
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        pipe.read_to_end(&mut buffer)?;
        Ok(buffer)
    })
}

fn join_reader(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<Vec<u8>> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output reader panicked"))?,
        None => Ok(Vec::new()),
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

fn last_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_string())
}
