//! Entitlement-aware presentation of insights
//!
//! The analyzer always returns full insights. Gating premium content is a
//! display concern and happens here.

use cyclewise_types::{InsightType, PatternInsight};
use serde::Serialize;

/// Characters of a locked description shown as a teaser
pub const TEASER_CHARS: usize = 80;

/// An insight as shown to a particular user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedInsight {
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    /// Hidden for locked insights
    pub confidence_score: Option<f64>,
    pub is_premium: bool,
    /// Premium insight shown to a user without an active subscription
    pub locked: bool,
}

/// Gate an insight on the viewer's entitlement
///
/// Free insights pass through unchanged. Premium insights for non-entitled
/// viewers keep their title, lose their confidence, and have the description
/// cut to a teaser followed by `...`.
pub fn present_insight(insight: &PatternInsight, entitled: bool) -> PresentedInsight {
    let locked = insight.is_premium && !entitled;

    let (description, confidence_score) = if locked {
        (teaser(&insight.description), None)
    } else {
        (insight.description.clone(), Some(insight.confidence_score))
    };

    PresentedInsight {
        insight_type: insight.insight_type,
        title: insight.title.clone(),
        description,
        confidence_score,
        is_premium: insight.is_premium,
        locked,
    }
}

fn teaser(description: &str) -> String {
    let cut: String = description.chars().take(TEASER_CHARS).collect();
    format!("{}...", cut)
}

/// Split ranked insights into (free, premium), keeping rank order
pub fn partition_insights(insights: &[PatternInsight]) -> (Vec<&PatternInsight>, Vec<&PatternInsight>) {
    insights.iter().partition(|insight| !insight.is_premium)
}

/// Headline counts shown above the insight list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsightSummary {
    pub days_logged: usize,
    pub patterns_found: usize,
    pub free_insights: usize,
}

impl InsightSummary {
    pub fn new(days_logged: usize, insights: &[PatternInsight]) -> Self {
        Self {
            days_logged,
            patterns_found: insights.len(),
            free_insights: insights.iter().filter(|i| !i.is_premium).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn premium(description: &str) -> PatternInsight {
        PatternInsight::new(InsightType::Correlation, "Sleep affects next-day energy", description, 0.62, true)
    }

    #[test]
    fn test_free_insight_passes_through() {
        let insight = PatternInsight::new(InsightType::Trend, "Energy dips on Monday", "Short.", 0.8, false);
        let shown = present_insight(&insight, false);

        assert!(!shown.locked);
        assert_eq!(shown.description, "Short.");
        assert_eq!(shown.confidence_score, Some(0.8));
    }

    #[test]
    fn test_premium_locked_for_free_user() {
        let long = "x".repeat(120);
        let shown = present_insight(&premium(&long), false);

        assert!(shown.locked);
        assert_eq!(shown.confidence_score, None);
        assert_eq!(shown.description.len(), TEASER_CHARS + 3);
        assert!(shown.description.ends_with("..."));
    }

    #[test]
    fn test_premium_unlocked_for_subscriber() {
        let shown = present_insight(&premium("Full text."), true);
        assert!(!shown.locked);
        assert_eq!(shown.description, "Full text.");
        assert_eq!(shown.confidence_score, Some(0.62));
    }

    #[test]
    fn test_teaser_respects_char_boundaries() {
        let text = "é".repeat(100);
        let shown = present_insight(&premium(&text), false);
        assert_eq!(shown.description.chars().count(), TEASER_CHARS + 3);
    }

    #[test]
    fn test_summary_and_partition() {
        let insights = vec![
            premium("a"),
            PatternInsight::new(InsightType::Trend, "t", "b", 0.5, false),
            premium("c"),
        ];

        let summary = InsightSummary::new(21, &insights);
        assert_eq!(summary.days_logged, 21);
        assert_eq!(summary.patterns_found, 3);
        assert_eq!(summary.free_insights, 1);

        let (free, locked) = partition_insights(&insights);
        assert_eq!(free.len(), 1);
        assert_eq!(locked.len(), 2);
        assert_eq!(locked[0].description, "a");
    }
}
