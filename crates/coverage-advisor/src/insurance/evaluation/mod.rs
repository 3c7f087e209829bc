mod config;
mod ledger;
mod policy;
mod rules;
mod tier;
mod umbrella;

pub use config::AssessmentConfig;
pub use ledger::{Score, ScoreEvent, ScoreLedger, ScoreShape};
pub use policy::{assess, LineItem, PolicyAssessment, ProductPolicy, ProductResult, ScoringContext};
pub use rules::{AutoPolicy, DisabilityPolicy, HomePolicy, LifePolicy};
pub use tier::{classify, classify_gated, Coverage, Tier};
pub use umbrella::derive_umbrella;

use super::domain::{ProductKind, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

impl ProductKind {
    pub fn policy(self) -> &'static dyn ProductPolicy {
        rules::policy_for(self)
    }
}

/// Stateless evaluator running every product policy over a profile.
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    config: AssessmentConfig,
}

impl AssessmentEngine {
    pub fn new(config: AssessmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    pub fn assess(&self, profile: &UserProfile) -> InsuranceRecommendation {
        let assessments = self.audit(profile);
        InsuranceRecommendation::from_assessments(&assessments)
    }

    /// Runs each product in order and keeps its ledger.
    pub fn audit(&self, profile: &UserProfile) -> Vec<PolicyAssessment> {
        let context = ScoringContext {
            current_year: self.config.effective_year(),
        };

        ProductKind::ordered()
            .into_iter()
            .map(|kind| {
                let assessment = assess(kind.policy(), profile, &context);
                debug!(
                    product = kind.label(),
                    eligible = assessment.eligible,
                    score = ?assessment.ledger.score(),
                    adjustments = assessment.ledger.events().len(),
                    "product scored"
                );
                assessment
            })
            .collect()
    }
}

/// Aggregate answer returned for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRecommendation {
    pub auto: Vec<LineItem>,
    pub disability: Coverage,
    pub home: Vec<LineItem>,
    pub life: Coverage,
    pub umbrella: Coverage,
}

impl InsuranceRecommendation {
    /// Assembles the named fields, then derives the umbrella from them alone.
    pub fn from_assessments(assessments: &[PolicyAssessment]) -> Self {
        let mut recommendation = Self {
            auto: Vec::new(),
            disability: Coverage::Ineligible,
            home: Vec::new(),
            life: Coverage::Ineligible,
            umbrella: Coverage::Ineligible,
        };

        for assessment in assessments {
            match (assessment.product, &assessment.result) {
                (ProductKind::Auto, ProductResult::Items(items)) => {
                    recommendation.auto = items.clone()
                }
                (ProductKind::Disability, ProductResult::Single(coverage)) => {
                    recommendation.disability = *coverage
                }
                (ProductKind::Home, ProductResult::Items(items)) => {
                    recommendation.home = items.clone()
                }
                (ProductKind::Life, ProductResult::Single(coverage)) => {
                    recommendation.life = *coverage
                }
                (product, result) => {
                    unreachable!("{product:?} produced a result of the wrong shape: {result:?}")
                }
            }
        }

        recommendation.umbrella =
            derive_umbrella(assessments.iter().map(|assessment| &assessment.result));
        recommendation
    }
}

/// One-shot helper for callers that do not keep an engine around.
pub fn compute_insurance(profile: &UserProfile, current_year: i32) -> InsuranceRecommendation {
    AssessmentEngine::new(AssessmentConfig::pinned(current_year)).assess(profile)
}
