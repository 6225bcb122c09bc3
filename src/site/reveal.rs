use std::collections::BTreeSet;

pub const REVEAL_SELECTOR: &str = ".fade-in, .slide-in-left, .slide-in-right";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEALED_CLASS: &str = "visible";

// Browsers report crossing ratios like 0.6999 for a 0.7 threshold.
const RATIO_TOLERANCE: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visibility {
    pub target: usize,
    pub intersecting: bool,
    pub ratio: f64,
}

/// One-shot visibility triggers over a fixed set of targets.
///
/// Targets are plain indices into whatever list the host observed. A target
/// leaves the pending set the first time it crosses the threshold and is never
/// reported again.
#[derive(Clone, Debug)]
pub struct RevealCoordinator {
    threshold: f64,
    pending: BTreeSet<usize>,
}

impl RevealCoordinator {
    pub fn new(target_count: usize, threshold: f64) -> Self {
        Self {
            threshold,
            pending: (0..target_count).collect(),
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, target: usize) -> bool {
        self.pending.contains(&target)
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns the targets triggered by this batch, in batch order.
    pub fn on_batch(&mut self, entries: &[Visibility]) -> Vec<usize> {
        let threshold = self.threshold - RATIO_TOLERANCE;
        entries
            .iter()
            .filter(|entry| entry.intersecting && entry.ratio >= threshold)
            .filter_map(|entry| self.pending.remove(&entry.target).then_some(entry.target))
            .collect()
    }
}
