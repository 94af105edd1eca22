/// Hint alphabet, home-row first so the most common labels sit under the
/// resting fingers, then the top row, then the bottom row. Label
/// assignment depends on this order, so it is fixed.
pub const HINT_ALPHABET: [char; 26] = [
    'a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', // home row
    'q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', // top row
    'z', 'x', 'c', 'v', 'b', 'n', 'm', // bottom row
];

/// Generate `count` distinct labels over [`HINT_ALPHABET`].
///
/// The first 26 labels are single characters in alphabet order; past 26,
/// two-character labels are formed from all ordered pairs (outer loop on
/// the first character). Single-character labels are therefore prefixes
/// of two-character ones; the coordinator's exact-match rule resolves
/// that overlap. Deterministic: the same count always yields the same
/// sequence. Supports up to 26 + 26*26 labels, far beyond the discovery
/// cap.
pub fn generate_labels(count: usize) -> Vec<String> {
    let mut labels = Vec::with_capacity(count);

    for c in HINT_ALPHABET {
        if labels.len() == count {
            return labels;
        }
        labels.push(c.to_string());
    }

    'pairs: for first in HINT_ALPHABET {
        for second in HINT_ALPHABET {
            if labels.len() == count {
                break 'pairs;
            }
            labels.push(format!("{}{}", first, second));
        }
    }

    labels
}
