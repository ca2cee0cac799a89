//! Advice tiers derived from the best role's normalized score.

use serde::{Deserialize, Serialize};

use crate::analysis::scoring::BestMatch;

const LOW_MATCH_BELOW: u32 = 40;
const GOOD_MATCH_BELOW: u32 = 60;

const LOW_MATCH_SUGGESTIONS: &[&str] = &[
    "Add more keywords relevant to the job description",
    "Highlight projects and experiences related to the role",
    "Quantify your achievements with specific metrics",
    "Consider acquiring additional skills mentioned in the job description",
];

const GOOD_MATCH_SUGGESTIONS: &[&str] = &[
    "Emphasize your most relevant experiences for this role",
    "Add more industry-specific terminology",
    "Tailor your resume objective/summary to this specific position",
];

const EXCELLENT_MATCH_NEXT_STEPS: &[&str] = &[
    "Prepare for interviews by researching the company",
    "Practice explaining how your experience relates to the role's requirements",
    "Consider preparing a portfolio of relevant work samples",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Low,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchFeedback {
    pub tier: MatchTier,
    pub headline: String,
    pub suggestions: Vec<String>,
}

pub fn tier_for(normalized_score: u32) -> MatchTier {
    if normalized_score < LOW_MATCH_BELOW {
        MatchTier::Low
    } else if normalized_score < GOOD_MATCH_BELOW {
        MatchTier::Good
    } else {
        MatchTier::Excellent
    }
}

pub fn build_feedback(best: &BestMatch) -> MatchFeedback {
    let tier = tier_for(best.normalized_score);
    let (headline, suggestions) = match tier {
        MatchTier::Low => (
            format!(
                "Your resume has a relatively low match with {} ({}%).",
                best.role, best.normalized_score
            ),
            LOW_MATCH_SUGGESTIONS,
        ),
        MatchTier::Good => (
            format!(
                "Your resume is a good match for {} ({}%), but could be improved.",
                best.role, best.normalized_score
            ),
            GOOD_MATCH_SUGGESTIONS,
        ),
        MatchTier::Excellent => (
            format!(
                "Excellent match! Your resume is well-aligned with {} ({}%).",
                best.role, best.normalized_score
            ),
            EXCELLENT_MATCH_NEXT_STEPS,
        ),
    };

    MatchFeedback {
        tier,
        headline,
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best(score: u32) -> BestMatch {
        BestMatch {
            role: "Data Scientist".to_string(),
            normalized_score: score,
            raw_score: 42,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier_for(0), MatchTier::Low);
        assert_eq!(tier_for(39), MatchTier::Low);
        assert_eq!(tier_for(40), MatchTier::Good);
        assert_eq!(tier_for(59), MatchTier::Good);
        assert_eq!(tier_for(60), MatchTier::Excellent);
        assert_eq!(tier_for(100), MatchTier::Excellent);
    }

    #[test]
    fn test_low_feedback_lists_four_suggestions() {
        let feedback = build_feedback(&best(25));
        assert_eq!(feedback.tier, MatchTier::Low);
        assert_eq!(feedback.suggestions.len(), 4);
        assert!(feedback.headline.contains("Data Scientist"));
        assert!(feedback.headline.contains("25%"));
    }

    #[test]
    fn test_excellent_feedback() {
        let feedback = build_feedback(&best(100));
        assert_eq!(feedback.tier, MatchTier::Excellent);
        assert!(feedback.headline.starts_with("Excellent match"));
        assert_eq!(feedback.suggestions.len(), 3);
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        let json = serde_json::to_string(&MatchTier::Excellent).unwrap();
        assert_eq!(json, r#""excellent""#);
    }
}
