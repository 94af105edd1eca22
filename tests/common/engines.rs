use kite::engine::agent::{DocumentAgent, FeedbackSink};
use kite::engine::protocol::{EngineRequest, ScriptPurpose, ScriptToken};
use kite::engine::session::EngineLink;
use kite::error::ShellError;

/// Engine stand-in that records every request instead of talking to a
/// host process.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub requests: Vec<EngineRequest>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripts_with(&self, purpose: ScriptPurpose) -> Vec<&str> {
        self.requests
            .iter()
            .filter_map(|r| match r {
                EngineRequest::RunScript { token, script } if token.purpose == purpose => {
                    Some(script.as_str())
                }
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<&str> {
        self.requests
            .iter()
            .filter_map(|r| match r {
                EngineRequest::ShowStatus { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count_matching(&self, f: impl Fn(&EngineRequest) -> bool) -> usize {
        self.requests.iter().filter(|r| f(r)).count()
    }
}

impl EngineLink for RecordingEngine {
    fn send(&mut self, request: &EngineRequest) -> Result<(), ShellError> {
        self.requests.push(request.clone());
        Ok(())
    }
}

impl DocumentAgent for RecordingEngine {
    fn run_script(&mut self, token: ScriptToken, script: String) {
        self.requests.push(EngineRequest::RunScript { token, script });
    }
}

impl FeedbackSink for RecordingEngine {
    fn show_status(&mut self, message: &str, duration_ms: u64) {
        self.requests.push(EngineRequest::ShowStatus {
            message: message.to_string(),
            duration_ms,
        });
    }
}
