mod rules;

use serde::{Deserialize, Serialize};

use super::domain::{Points, Receipt};

/// Scoring rules applied to every receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerName,
    RoundTotal,
    ItemPairs,
    DescriptionLength,
    OddDay,
    AfternoonWindow,
}

impl ScoringRule {
    pub fn label(&self) -> &'static str {
        match self {
            ScoringRule::RetailerName => "retailer name",
            ScoringRule::RoundTotal => "round total",
            ScoringRule::ItemPairs => "item pairs",
            ScoringRule::DescriptionLength => "description length",
            ScoringRule::OddDay => "odd purchase day",
            ScoringRule::AfternoonWindow => "afternoon purchase",
        }
    }
}

/// Points contributed by a single rule, with a note explaining the award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsComponent {
    pub rule: ScoringRule,
    pub points: Points,
    pub notes: String,
}

/// Per-rule audit trail of a receipt's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub total: Points,
    pub components: Vec<PointsComponent>,
}

impl PointsBreakdown {
    pub fn points_for(&self, rule: ScoringRule) -> Points {
        self.components
            .iter()
            .filter(|component| component.rule == rule)
            .map(|component| component.points)
            .fold(0, Points::saturating_add)
    }
}

/// Raised when a receipt's points do not fit in [`Points`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("receipt points exceed the supported range")]
pub struct PointsOverflow;

/// Stateless engine applying the fixed scoring rules to a validated receipt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsEngine;

impl PointsEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, receipt: &Receipt) -> Result<Points, PointsOverflow> {
        self.breakdown(receipt).map(|breakdown| breakdown.total)
    }

    pub fn breakdown(&self, receipt: &Receipt) -> Result<PointsBreakdown, PointsOverflow> {
        let components = rules::score_receipt(receipt).ok_or(PointsOverflow)?;
        let total = components
            .iter()
            .try_fold(0 as Points, |total, component| {
                total.checked_add(component.points)
            })
            .ok_or(PointsOverflow)?;
        Ok(PointsBreakdown { total, components })
    }
}
