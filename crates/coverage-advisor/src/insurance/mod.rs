//! Insurance eligibility scoring.
//!
//! Each product policy seeds a score ledger from the risk questionnaire, applies the shared
//! age/income adjustments plus its own rules, and maps the result onto a tier. The umbrella
//! recommendation is derived afterwards from the four product results.

pub mod domain;
pub mod evaluation;
pub mod router;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    House, MaritalStatus, OwnershipStatus, ProductKind, RiskAnswers, UserProfile, Vehicle,
    EARLIEST_VEHICLE_YEAR, RISK_QUESTION_COUNT,
};
pub use evaluation::{
    classify, classify_gated, compute_insurance, derive_umbrella, AssessmentConfig,
    AssessmentEngine, Coverage, InsuranceRecommendation, LineItem, PolicyAssessment,
    ProductResult, Score, ScoreEvent, ScoreLedger, Tier,
};
pub use router::insurance_router;
pub use validation::{FieldViolation, LocSegment, ProfileGuard, ProfileValidationError};
