use log::warn;

use crate::engine::protocol::{EngineRequest, ScriptPurpose, ScriptToken};
use crate::engine::session::{EngineLink, EngineSession};

/// The hosted page's script-execution capability.
///
/// Requests are fire-and-forget: the result arrives later as a
/// `ScriptResult` event carrying the same token, and a script failure
/// inside the page resolves to a null value rather than an error.
pub trait DocumentAgent {
    fn run_script(&mut self, token: ScriptToken, script: String);
}

/// Transient, non-blocking status message channel.
pub trait FeedbackSink {
    fn show_status(&mut self, message: &str, duration_ms: u64);
}

impl DocumentAgent for EngineSession {
    fn run_script(&mut self, token: ScriptToken, script: String) {
        if let Err(e) = self.send(&EngineRequest::RunScript { token, script }) {
            warn!("Dropping script request for {:?}: {}", token.view, e);
        }
    }
}

impl FeedbackSink for EngineSession {
    fn show_status(&mut self, message: &str, duration_ms: u64) {
        let request = EngineRequest::ShowStatus {
            message: message.to_string(),
            duration_ms,
        };
        if let Err(e) = self.send(&request) {
            warn!("Dropping status message '{}': {}", message, e);
        }
    }
}

/// Recording collaborator for tests: captures scripts and status messages
/// instead of talking to a real engine host.
#[derive(Debug, Default)]
pub struct MockAgent {
    pub scripts: Vec<(ScriptToken, String)>,
    pub statuses: Vec<(String, u64)>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts sent for a given purpose, in order.
    pub fn scripts_with(&self, purpose: ScriptPurpose) -> Vec<&str> {
        self.scripts
            .iter()
            .filter(|(token, _)| token.purpose == purpose)
            .map(|(_, script)| script.as_str())
            .collect()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(|(message, _)| message.as_str())
    }
}

impl DocumentAgent for MockAgent {
    fn run_script(&mut self, token: ScriptToken, script: String) {
        self.scripts.push((token, script));
    }
}

impl FeedbackSink for MockAgent {
    fn show_status(&mut self, message: &str, duration_ms: u64) {
        self.statuses.push((message.to_string(), duration_ms));
    }
}
