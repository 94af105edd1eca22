use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ShellError {
    /// Engine host process failed to spawn
    HostSpawn { command: String, source: io::Error },

    /// Reading from or writing to the engine host failed
    SessionIo(String),

    /// JSON parsing failed (engine event or persisted state)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (request to the engine host)
    JsonSerialize { context: String, source: serde_json::Error },

    /// Engine host violated the wire protocol
    Protocol { command: String, error: String },

    /// Persisted state could not be read or written
    Storage { path: PathBuf, source: io::Error },
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::HostSpawn { command, source } => {
                write!(f, "Failed to spawn engine host '{}': {}", command, source)
            }
            ShellError::SessionIo(msg) => {
                write!(f, "Engine host I/O error: {}", msg)
            }
            ShellError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            ShellError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            ShellError::Protocol { command, error } => {
                write!(f, "Engine protocol error during '{}': {}", command, error)
            }
            ShellError::Storage { path, source } => {
                write!(f, "Storage error at {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::HostSpawn { source, .. } => Some(source),
            ShellError::JsonParse { source, .. } => Some(source),
            ShellError::JsonSerialize { source, .. } => Some(source),
            ShellError::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}
