use log::debug;
use serde_json::Value;

use crate::engine::agent::{DocumentAgent, FeedbackSink};
use crate::engine::protocol::{KeyPress, ScriptPurpose, ScriptToken, ViewId};
use crate::hints::discovery::{discovery_script, parse_candidates};
use crate::hints::overlay::{activate_script, clear_script, filter_script, show_script};
use crate::hints::session::HintSession;

pub const MSG_NO_TARGETS: &str = "No clickable targets";
pub const MSG_CANCELLED: &str = "Hint mode cancelled";
pub const MSG_NO_MATCH: &str = "No matching hint";
pub const MSG_ACTIVATE_FAILED: &str = "Unable to follow hint";

pub const STATUS_DURATION_MS: u64 = 2000;

/// What a keystroke resolved to against the current session.
#[derive(Debug, Clone, PartialEq)]
enum KeyDecision {
    /// Tear the session down and say so.
    Cancel,
    /// Activate the target at this index.
    Activate(usize),
    /// Buffer changed; re-filter the overlay with the new prefix.
    Refilter(String),
    /// Nothing matched the appended character; buffer was reset.
    ResetNoMatch,
    /// Consumed without any state change.
    Ignore,
}

/// Decide what a keystroke does to an active session. Mutates the buffer
/// but performs no I/O, so the state-machine rules are testable on their
/// own.
fn decide_key(session: &mut HintSession, key: &KeyPress) -> KeyDecision {
    match key.key.as_str() {
        "escape" => KeyDecision::Cancel,
        "enter" | "return" => {
            let matches = session.matching_indices(&session.buffer);
            match matches.as_slice() {
                [index] => KeyDecision::Activate(*index),
                _ => KeyDecision::Ignore,
            }
        }
        "backspace" => {
            if session.buffer.is_empty() {
                KeyDecision::Cancel
            } else {
                session.buffer.pop();
                KeyDecision::Refilter(session.buffer.clone())
            }
        }
        _ => {
            let Some(c) = typed_char(key) else {
                return KeyDecision::Ignore;
            };
            if !c.is_alphabetic() {
                return KeyDecision::Ignore;
            }
            for lower in c.to_lowercase() {
                session.buffer.push(lower);
            }

            if session.matching_indices(&session.buffer).is_empty() {
                // Mistyped: drop the whole buffer, not just the appended
                // character.
                session.buffer.clear();
                return KeyDecision::ResetNoMatch;
            }
            if let Some(index) = session.exact_index(&session.buffer) {
                // Exact match wins immediately, even when longer labels
                // share this prefix.
                return KeyDecision::Activate(index);
            }
            KeyDecision::Refilter(session.buffer.clone())
        }
    }
}

/// The single printable character a key produced, if any.
fn typed_char(key: &KeyPress) -> Option<char> {
    if key.modifiers.has_command() {
        return None;
    }
    let text = key.text.as_deref()?;
    let mut chars = text.chars();
    let c = chars.next()?;
    if chars.next().is_some() || c.is_control() {
        return None;
    }
    Some(c)
}

/// Per-window hint-mode coordinator.
///
/// Owns at most one session at a time. Discovery and overlay work are
/// dispatched to the document agent asynchronously; results are matched
/// back by token identity and anything stale is dropped silently.
#[derive(Debug, Default)]
pub struct HintCoordinator {
    pending_scan: Option<ViewId>,
    session: Option<HintSession>,
}

impl HintCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn buffer(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.buffer.as_str())
    }

    /// Enter hint mode for `view`. A no-op while a scan is pending or a
    /// session is active, so repeated triggers issue exactly one scan.
    pub fn trigger<E>(&mut self, view: ViewId, engine: &mut E)
    where
        E: DocumentAgent + FeedbackSink,
    {
        if self.pending_scan.is_some() || self.session.is_some() {
            return;
        }
        self.pending_scan = Some(view);
        let token = ScriptToken {
            view,
            purpose: ScriptPurpose::HintDiscovery,
        };
        engine.run_script(token, discovery_script());
    }

    /// Route a script result back into the coordinator. Results whose
    /// token no longer matches the live session (or pending scan) are
    /// discarded: an expected race, not a fault.
    pub fn handle_script_result<E>(&mut self, token: ScriptToken, value: &Value, engine: &mut E)
    where
        E: DocumentAgent + FeedbackSink,
    {
        match token.purpose {
            ScriptPurpose::HintDiscovery => {
                if self.pending_scan != Some(token.view) {
                    debug!("Discarding stale discovery result for {:?}", token.view);
                    return;
                }
                self.pending_scan = None;

                let candidates = parse_candidates(value);
                if candidates.is_empty() {
                    engine.show_status(MSG_NO_TARGETS, STATUS_DURATION_MS);
                    return;
                }

                let session = HintSession::new(token.view, candidates);
                let overlay_token = ScriptToken {
                    view: token.view,
                    purpose: ScriptPurpose::HintOverlay,
                };
                engine.run_script(overlay_token, show_script(&session.label_pairs()));
                self.session = Some(session);
            }
            ScriptPurpose::HintActivate => {
                if matches!(value, Value::Null | Value::Bool(false)) {
                    engine.show_status(MSG_ACTIVATE_FAILED, STATUS_DURATION_MS);
                }
            }
            ScriptPurpose::HintOverlay | ScriptPurpose::PageControl => {}
        }
    }

    /// Feed one keystroke through the session. Returns true when the key
    /// was consumed; every key on the hinted view is consumed while the
    /// session is active, whatever it does.
    pub fn handle_key<E>(&mut self, view: ViewId, key: &KeyPress, engine: &mut E) -> bool
    where
        E: DocumentAgent + FeedbackSink,
    {
        let decision = match self.session.as_mut() {
            None => return false,
            Some(session) if session.view != view => return false,
            Some(session) => decide_key(session, key),
        };

        match decision {
            KeyDecision::Cancel => self.cancel(engine),
            KeyDecision::Activate(index) => self.activate(index, engine),
            KeyDecision::Refilter(prefix) => {
                self.send_overlay(engine, filter_script(&prefix));
            }
            KeyDecision::ResetNoMatch => {
                engine.show_status(MSG_NO_MATCH, STATUS_DURATION_MS);
                self.send_overlay(engine, filter_script(""));
            }
            KeyDecision::Ignore => {}
        }
        true
    }

    /// A navigation or URL change on `view` forcibly ends any session or
    /// pending scan tied to it; late results for the old page are then
    /// rejected by the token checks.
    pub fn handle_url_changed<E>(&mut self, view: ViewId, engine: &mut E)
    where
        E: DocumentAgent + FeedbackSink,
    {
        if self.pending_scan == Some(view) {
            self.pending_scan = None;
        }
        if self.session.as_ref().map(|s| s.view) == Some(view) {
            self.session = None;
            let token = ScriptToken {
                view,
                purpose: ScriptPurpose::HintOverlay,
            };
            engine.run_script(token, clear_script());
        }
    }

    /// Drop any session or pending scan tied to a view that is being
    /// closed. No scripts are sent: the document is already gone.
    pub fn handle_view_closed(&mut self, view: ViewId) {
        if self.pending_scan == Some(view) {
            self.pending_scan = None;
        }
        if self.session.as_ref().map(|s| s.view) == Some(view) {
            self.session = None;
        }
    }

    fn cancel<E>(&mut self, engine: &mut E)
    where
        E: DocumentAgent + FeedbackSink,
    {
        if let Some(session) = self.session.take() {
            let token = ScriptToken {
                view: session.view,
                purpose: ScriptPurpose::HintOverlay,
            };
            engine.run_script(token, clear_script());
        }
        engine.show_status(MSG_CANCELLED, STATUS_DURATION_MS);
    }

    fn activate<E>(&mut self, index: usize, engine: &mut E)
    where
        E: DocumentAgent + FeedbackSink,
    {
        let Some(session) = self.session.take() else {
            return;
        };
        let Some(target) = session.targets().get(index) else {
            engine.show_status(MSG_ACTIVATE_FAILED, STATUS_DURATION_MS);
            return;
        };
        debug!(
            "Activating hint '{}' -> {} ({})",
            target.label, target.element_id, target.accessible_text
        );
        engine.run_script(
            ScriptToken {
                view: session.view,
                purpose: ScriptPurpose::HintActivate,
            },
            activate_script(&target.element_id),
        );
        engine.run_script(
            ScriptToken {
                view: session.view,
                purpose: ScriptPurpose::HintOverlay,
            },
            clear_script(),
        );
    }

    fn send_overlay<E>(&mut self, engine: &mut E, script: String)
    where
        E: DocumentAgent + FeedbackSink,
    {
        if let Some(session) = self.session.as_ref() {
            let token = ScriptToken {
                view: session.view,
                purpose: ScriptPurpose::HintOverlay,
            };
            engine.run_script(token, script);
        }
    }
}
