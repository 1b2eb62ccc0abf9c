use super::config::{ScoringConfig, SelectionPolicy};
use super::DetectionCandidate;

/// Drop candidates below `min_confidence`, then apply the selection policy.
///
/// `Best` keeps the first candidate with the strictly highest confidence.
pub fn select_candidates(
    candidates: Vec<DetectionCandidate>,
    config: &ScoringConfig,
) -> Vec<DetectionCandidate> {
    let survivors = candidates
        .into_iter()
        .filter(|c| c.confidence >= config.min_confidence)
        .collect();
    apply_selection(survivors, config.selection)
}

/// Apply only the selection policy, without the confidence filter.
pub fn apply_selection(
    candidates: Vec<DetectionCandidate>,
    policy: SelectionPolicy,
) -> Vec<DetectionCandidate> {
    match policy {
        SelectionPolicy::All => candidates,
        SelectionPolicy::Best => {
            let mut best: Option<DetectionCandidate> = None;
            for candidate in candidates {
                if best
                    .as_ref()
                    .map_or(true, |b| candidate.confidence > b.confidence)
                {
                    best = Some(candidate);
                }
            }
            best.into_iter().collect()
        }
    }
}
