use serde::Deserialize;

use crate::engine::protocol::ViewId;
use crate::hints::alphabet::generate_labels;

/// One actionable element reported by the discovery scan.
///
/// `element_id` is the session-scoped attribute value the scan stamped
/// onto the element; it is opaque here and never survives a navigation or
/// a later session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(rename = "id")]
    pub element_id: String,
    #[serde(rename = "text", default)]
    pub accessible_text: String,
}

/// A candidate bound to its assigned label.
#[derive(Debug, Clone, PartialEq)]
pub struct HintTarget {
    pub label: String,
    pub element_id: String,
    pub accessible_text: String,
}

/// Live hint-mode state for one window: the view being hinted, the typed
/// prefix, and the label bindings, in candidate order.
#[derive(Debug)]
pub struct HintSession {
    pub view: ViewId,
    pub buffer: String,
    targets: Vec<HintTarget>,
}

impl HintSession {
    /// Bind labels to candidates 1:1, in candidate order.
    pub fn new(view: ViewId, candidates: Vec<Candidate>) -> Self {
        let labels = generate_labels(candidates.len());
        let targets = labels
            .into_iter()
            .zip(candidates)
            .map(|(label, candidate)| HintTarget {
                label,
                element_id: candidate.element_id,
                accessible_text: candidate.accessible_text,
            })
            .collect();
        Self {
            view,
            buffer: String::new(),
            targets,
        }
    }

    pub fn targets(&self) -> &[HintTarget] {
        &self.targets
    }

    /// Indices of targets whose label starts with `prefix`.
    pub fn matching_indices(&self, prefix: &str) -> Vec<usize> {
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.label.starts_with(prefix))
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of the target whose label equals `buffer` exactly, if any.
    pub fn exact_index(&self, buffer: &str) -> Option<usize> {
        self.targets.iter().position(|t| t.label == buffer)
    }

    /// (element_id, label) pairs for overlay projection.
    pub fn label_pairs(&self) -> Vec<(&str, &str)> {
        self.targets
            .iter()
            .map(|t| (t.element_id.as_str(), t.label.as_str()))
            .collect()
    }
}
