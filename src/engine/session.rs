use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use log::{debug, warn};

use crate::engine::protocol::{EngineEvent, EngineRequest};
use crate::error::ShellError;

/// Anything that can deliver requests to the engine host.
///
/// The shell is written against this trait so tests can substitute a
/// recording implementation for the real subprocess session.
pub trait EngineLink {
    fn send(&mut self, request: &EngineRequest) -> Result<(), ShellError>;
}

/// A persistent engine-host session.
///
/// Launches the long-lived host process that owns the window, the webview
/// widgets, and the chrome. Requests are sent as NDJSON over stdin, events
/// read from stdout.
pub struct EngineSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
}

impl EngineSession {
    /// Spawn the engine host and wait for its ready handshake.
    pub fn launch(command: &str) -> Result<Self, ShellError> {
        let mut child = Command::new(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| ShellError::HostSpawn {
                command: command.to_string(),
                source: e,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ShellError::SessionIo("Failed to capture engine host stdin".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ShellError::SessionIo("Failed to capture engine host stdout".into()))?;

        let mut reader = BufReader::new(stdout);

        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| ShellError::SessionIo(format!("Failed to read ready signal: {}", e)))?;

        let event: EngineEvent =
            serde_json::from_str(line.trim()).map_err(|e| ShellError::JsonParse {
                context: "engine host ready signal".into(),
                source: e,
            })?;

        if event != EngineEvent::Ready {
            return Err(ShellError::Protocol {
                command: "launch".into(),
                error: "Did not receive ready signal from engine host".into(),
            });
        }

        debug!("Engine host '{}' is ready", command);
        Ok(EngineSession {
            child,
            stdin,
            reader,
        })
    }

    /// Read the next event from the host. Returns `None` once the host
    /// closes its end of the pipe.
    pub fn next_event(&mut self) -> Result<Option<EngineEvent>, ShellError> {
        loop {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| ShellError::SessionIo(format!("Failed to read engine event: {}", e)))?;

            if read == 0 {
                return Ok(None);
            }
            if line.trim().is_empty() {
                continue;
            }

            let event: EngineEvent =
                serde_json::from_str(line.trim()).map_err(|e| ShellError::JsonParse {
                    context: "engine event".into(),
                    source: e,
                })?;
            return Ok(Some(event));
        }
    }
}

impl EngineLink for EngineSession {
    fn send(&mut self, request: &EngineRequest) -> Result<(), ShellError> {
        let json = serde_json::to_string(request).map_err(|e| ShellError::JsonSerialize {
            context: "engine request".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .map_err(|e| ShellError::SessionIo(format!("Failed to write engine request: {}", e)))?;
        self.stdin
            .flush()
            .map_err(|e| ShellError::SessionIo(format!("Failed to flush engine request: {}", e)))
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        // Best-effort shutdown; the host may already be gone.
        if self.send(&EngineRequest::Shutdown).is_err() {
            warn!("Engine host did not accept shutdown request");
        }
        let _ = self.child.wait();
    }
}
