//! Maturity banding for innovation scores.

use serde::{Deserialize, Serialize};

/// Maturity level derived from a record's numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaturityLevel {
    Draft,
    Developing,
    Adequate,
    Mature,
    VeryMature,
}

impl MaturityLevel {
    /// Band a score. Scores below 1 (including NaN) are drafts.
    pub fn from_score(score: f64) -> Self {
        if score >= 100.0 {
            Self::VeryMature
        } else if score >= 80.0 {
            Self::Mature
        } else if score >= 60.0 {
            Self::Adequate
        } else if score >= 1.0 {
            Self::Developing
        } else {
            Self::Draft
        }
    }

    /// Display label as shown on the dashboard.
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryMature => "Sangat Matang",
            Self::Mature => "Matang",
            Self::Adequate => "Cukup Matang",
            Self::Developing => "Kurang Matang",
            Self::Draft => "Draft",
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(MaturityLevel::from_score(120.0), MaturityLevel::VeryMature);
        assert_eq!(MaturityLevel::from_score(100.0), MaturityLevel::VeryMature);
        assert_eq!(MaturityLevel::from_score(99.9), MaturityLevel::Mature);
        assert_eq!(MaturityLevel::from_score(80.0), MaturityLevel::Mature);
        assert_eq!(MaturityLevel::from_score(60.0), MaturityLevel::Adequate);
        assert_eq!(MaturityLevel::from_score(1.0), MaturityLevel::Developing);
        assert_eq!(MaturityLevel::from_score(0.0), MaturityLevel::Draft);
        assert_eq!(MaturityLevel::from_score(f64::NAN), MaturityLevel::Draft);
    }

    #[test]
    fn test_labels() {
        assert_eq!(MaturityLevel::Mature.to_string(), "Matang");
        assert_eq!(MaturityLevel::Draft.label(), "Draft");
    }
}
