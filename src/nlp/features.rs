//! Feature vectors fed to the statistical intent classifier.

use ndarray::Array1;
use tracing::debug;

use crate::nlp::vocab::TriggerKind;

/// Number of trigger-count dimensions appended after the text features.
pub const TRIGGER_DIMS: usize = TriggerKind::ALL.len();

/// Literal phrase occurrences per trigger set, in `TriggerKind::ALL` order.
pub fn trigger_counts(question: &str) -> [f32; TRIGGER_DIMS] {
    let mut counts = [0.0f32; TRIGGER_DIMS];
    for (slot, kind) in counts.iter_mut().zip(TriggerKind::ALL) {
        *slot = kind.count(question) as f32;
    }
    counts
}

/// Min-max scale into [0, 1]. Identical counts are returned unchanged.
pub fn min_max_normalise(counts: [f32; TRIGGER_DIMS]) -> [f32; TRIGGER_DIMS] {
    let min = counts.iter().copied().fold(f32::INFINITY, f32::min);
    let max = counts.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max == min {
        return counts;
    }
    counts.map(|c| (c - min) / (max - min))
}

/// Text features followed by the normalised trigger counts.
pub fn assemble(text_features: &Array1<f32>, question: &str) -> Array1<f32> {
    let triggers = min_max_normalise(trigger_counts(question));
    let features: Array1<f32> = text_features
        .iter()
        .copied()
        .chain(triggers.iter().copied())
        .collect();
    debug!(dim = features.len(), ?triggers, "assembled intent features");
    features
}
