use serde::{Deserialize, Serialize};

/// Ordinal label for a match score. Variants are declared worst to best so the
/// derived `Ord` follows score order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchCategory {
    #[serde(rename = "Poor Match")]
    PoorMatch,
    #[serde(rename = "Potential Match")]
    PotentialMatch,
    #[serde(rename = "Good Match")]
    GoodMatch,
    #[serde(rename = "Strong Match")]
    StrongMatch,
}

impl MatchCategory {
    /// Lower bounds are inclusive. NaN falls through to `PoorMatch`.
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            MatchCategory::StrongMatch
        } else if score >= 70.0 {
            MatchCategory::GoodMatch
        } else if score >= 50.0 {
            MatchCategory::PotentialMatch
        } else {
            MatchCategory::PoorMatch
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchCategory::StrongMatch => "Strong Match",
            MatchCategory::GoodMatch => "Good Match",
            MatchCategory::PotentialMatch => "Potential Match",
            MatchCategory::PoorMatch => "Poor Match",
        }
    }
}

impl std::fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
