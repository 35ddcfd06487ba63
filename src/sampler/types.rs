use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCount {
    pub name: String,
    pub count: u64,
}

/// Sampled outcomes of one cascade tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierHistogram {
    pub stage: String,
    /// Draws performed at this tier.
    pub entered: u64,
    /// Draws that landed on the continue outcome.
    pub advanced: u64,
    /// Continue outcomes that did not add up to a whole next-tier draw.
    pub leftover: f64,
    /// Terminal outcomes in table order (the continue outcome is not listed).
    pub counts: Vec<OutcomeCount>,
}

impl TierHistogram {
    pub fn count(&self, name: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn terminal_total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Outcomes with at least one hit, most frequent first.
    pub fn sorted_by_count(&self) -> Vec<&OutcomeCount> {
        let mut hits: Vec<&OutcomeCount> = self.counts.iter().filter(|c| c.count > 0).collect();
        hits.sort_by(|a, b| b.count.cmp(&a.count));
        hits
    }
}
