use serde::{Deserialize, Serialize};

use super::super::domain::{ProductKind, UserProfile};
use super::ledger::{Score, ScoreLedger, ScoreShape};
use super::tier::{classify, classify_gated, Coverage, Tier};

pub(crate) const INITIAL: &str = "initial";
pub(crate) const AGE_UNDER_30: &str = "age__lt__30";
pub(crate) const AGE_UP_TO_40: &str = "age__lte__40";
pub(crate) const INCOME_OVER_200K: &str = "income__gt__200k";

const HIGH_INCOME_THRESHOLD: f64 = 200_000.0;

/// Inputs shared by every policy run that do not come from the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringContext {
    pub current_year: i32,
}

/// Product-specific half of a scoring run.
///
/// Implementations never touch the baseline: seeding and the generic age/income
/// adjustments are applied by [`assess`] so every product treats them identically.
pub trait ProductPolicy {
    fn kind(&self) -> ProductKind;

    fn is_eligible(&self, profile: &UserProfile) -> bool;

    /// Keys of the scored items for per-item products, `None` for single-valued ones.
    fn item_keys(&self, _profile: &UserProfile) -> Option<Vec<i64>> {
        None
    }

    fn apply_specific_risk(
        &self,
        profile: &UserProfile,
        context: &ScoringContext,
        ledger: &mut ScoreLedger,
    );
}

/// Tier for one scored house or vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub key: i64,
    #[serde(rename = "value")]
    pub tier: Tier,
}

/// Outcome of a product: a gated tier, or one tier per item (empty when ineligible).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProductResult {
    Single(Coverage),
    Items(Vec<LineItem>),
}

/// Finished run of a single policy, keeping the ledger for audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyAssessment {
    pub product: ProductKind,
    pub eligible: bool,
    pub result: ProductResult,
    pub ledger: ScoreLedger,
}

pub(crate) fn apply_generic_risks(profile: &UserProfile, ledger: &mut ScoreLedger) {
    if profile.age < 30.0 {
        ledger.remove(2.0, AGE_UNDER_30);
    } else if profile.age <= 40.0 {
        ledger.remove(1.0, AGE_UP_TO_40);
    }

    if profile.income > HIGH_INCOME_THRESHOLD {
        ledger.remove(1.0, INCOME_OVER_200K);
    }
}

/// Runs one policy against a profile with a fresh ledger.
pub fn assess(
    policy: &dyn ProductPolicy,
    profile: &UserProfile,
    context: &ScoringContext,
) -> PolicyAssessment {
    let item_keys = policy.item_keys(profile);
    let shape = match &item_keys {
        Some(keys) => ScoreShape::Items(keys.len()),
        None => ScoreShape::Scalar,
    };

    let mut ledger = ScoreLedger::new(shape);
    ledger.add(profile.risk_questions.base_score(), INITIAL);

    let eligible = policy.is_eligible(profile);
    if eligible {
        apply_generic_risks(profile, &mut ledger);
        policy.apply_specific_risk(profile, context, &mut ledger);
    }

    let result = match (ledger.score(), item_keys) {
        (Score::Scalar(score), _) => ProductResult::Single(classify_gated(eligible, *score)),
        (Score::Items(_), _) if !eligible => ProductResult::Items(Vec::new()),
        (Score::Items(scores), Some(keys)) => ProductResult::Items(
            keys.into_iter()
                .zip(scores.iter())
                .map(|(key, score)| LineItem {
                    key,
                    tier: classify(*score),
                })
                .collect(),
        ),
        (Score::Items(_), None) => unreachable!("item ledger created without item keys"),
    };

    PolicyAssessment {
        product: policy.kind(),
        eligible,
        result,
        ledger,
    }
}
