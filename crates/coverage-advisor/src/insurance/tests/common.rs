use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::insurance::domain::{
    House, MaritalStatus, OwnershipStatus, RiskAnswers, UserProfile, Vehicle,
};
use crate::insurance::evaluation::{
    assess, AssessmentConfig, AssessmentEngine, PolicyAssessment, ProductPolicy, ScoringContext,
};
use crate::insurance::validation::ProfileGuard;

pub(super) const CURRENT_YEAR: i32 = 2024;

pub(super) fn house(key: i64, ownership_status: OwnershipStatus) -> House {
    House {
        key,
        ownership_status,
    }
}

pub(super) fn vehicle(key: i64, year: i32) -> Vehicle {
    Vehicle {
        key,
        year: f64::from(year),
    }
}

/// Married 35 year old with two dependents, one owned and one mortgaged house, and a new car.
pub(super) fn profile() -> UserProfile {
    UserProfile {
        age: 35.0,
        dependents: 2.0,
        houses: vec![
            house(1, OwnershipStatus::Owned),
            house(2, OwnershipStatus::Mortgaged),
        ],
        income: 100_000.0,
        marital_status: MaritalStatus::Married,
        risk_questions: RiskAnswers([false, true, false]),
        vehicles: vec![vehicle(1, CURRENT_YEAR)],
    }
}

pub(super) fn payload() -> Value {
    json!({
        "age": 35,
        "dependents": 2,
        "houses": [
            {"key": 1, "ownership_status": "owned"},
            {"key": 2, "ownership_status": "mortgaged"},
        ],
        "income": 0,
        "marital_status": "married",
        "risk_questions": [0, 1, 0],
        "vehicles": [{"key": 1, "year": CURRENT_YEAR}],
    })
}

pub(super) fn expected_recommendation() -> Value {
    json!({
        "auto": [{"key": 1, "value": "regular"}],
        "disability": "ineligible",
        "home": [
            {"key": 1, "value": "economic"},
            {"key": 2, "value": "regular"},
        ],
        "life": "regular",
        "umbrella": "regular",
    })
}

pub(super) fn context() -> ScoringContext {
    ScoringContext {
        current_year: CURRENT_YEAR,
    }
}

pub(super) fn engine() -> AssessmentEngine {
    AssessmentEngine::new(AssessmentConfig::pinned(CURRENT_YEAR))
}

pub(super) fn shared_engine() -> Arc<AssessmentEngine> {
    Arc::new(engine())
}

pub(super) fn guard() -> ProfileGuard {
    ProfileGuard
}

pub(super) fn run(policy: &dyn ProductPolicy, profile: &UserProfile) -> PolicyAssessment {
    assess(policy, profile, &context())
}

/// Delta of the only event carrying `label`; fails when it is missing or repeated.
pub(super) fn single_delta(assessment: &PolicyAssessment, label: &str) -> f64 {
    let events: Vec<_> = assessment.ledger.events_for(label).collect();
    match events.as_slice() {
        [event] => event.delta,
        other => panic!("expected exactly one '{label}' event, found {other:?}"),
    }
}

pub(super) fn labels(assessment: &PolicyAssessment) -> Vec<&str> {
    assessment
        .ledger
        .events()
        .iter()
        .map(|event| event.label.as_str())
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
