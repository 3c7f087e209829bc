//! Integration tests for the insurance check workflow.
//!
//! Scenarios go through the public guard, engine, and HTTP router so validation, scoring, and
//! response shapes are exercised together without reaching into private modules.

mod common {
    use std::sync::Arc;

    use axum::response::Response;
    use serde_json::{json, Value};

    use coverage_advisor::insurance::{AssessmentConfig, AssessmentEngine};

    pub(super) const CURRENT_YEAR: i32 = 2025;

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

    pub(super) fn engine() -> Arc<AssessmentEngine> {
        Arc::new(AssessmentEngine::new(AssessmentConfig::pinned(CURRENT_YEAR)))
    }

    pub(super) async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

mod scenarios {
    use super::common::*;
    use coverage_advisor::insurance::{
        Coverage, InsuranceRecommendation, LineItem, ProductKind, ProductResult, ProfileGuard,
        Tier,
    };
    use serde_json::json;

    fn assess(payload: serde_json::Value) -> InsuranceRecommendation {
        let profile = ProfileGuard
            .profile_from_payload(&payload)
            .expect("payload is valid");
        engine().assess(&profile)
    }

    #[test]
    fn reference_profile_gets_full_recommendation() {
        let recommendation = assess(payload());

        assert_eq!(
            serde_json::to_value(&recommendation).expect("serializes"),
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
        );
    }

    #[test]
    fn removing_vehicles_empties_auto() {
        let mut payload = payload();
        payload["vehicles"] = json!([]);

        assert!(assess(payload).auto.is_empty());
    }

    #[test]
    fn age_over_sixty_gates_disability_and_life() {
        let mut payload = payload();
        payload["age"] = json!(61);

        let recommendation = assess(payload);

        assert_eq!(recommendation.disability, Coverage::Ineligible);
        assert_eq!(recommendation.life, Coverage::Ineligible);
    }

    #[test]
    fn zero_income_gates_disability_regardless_of_profile() {
        for age in [18, 45] {
            for status in ["single", "married"] {
                let mut payload = payload();
                payload["age"] = json!(age);
                payload["marital_status"] = json!(status);
                payload["dependents"] = json!(0);

                assert_eq!(assess(payload).disability, Coverage::Ineligible);
            }
        }
    }

    #[test]
    fn single_owned_house_trail_is_initial_plus_bonus() {
        let mut payload = payload();
        payload["age"] = json!(50);
        payload["houses"] = json!([{"key": 1, "ownership_status": "owned"}]);
        let profile = ProfileGuard
            .profile_from_payload(&payload)
            .expect("payload is valid");

        let audit = engine().audit(&profile);
        let home = audit
            .iter()
            .find(|assessment| assessment.product == ProductKind::Home)
            .expect("home assessed");

        let trail: Vec<_> = home
            .ledger
            .events()
            .iter()
            .map(|event| (event.label.as_str(), event.delta))
            .collect();
        assert_eq!(trail, vec![("add:initial", 1.0), ("add:houses__eq__1", 1.0)]);
        assert_eq!(
            home.result,
            ProductResult::Items(vec![LineItem {
                key: 1,
                tier: Tier::Regular,
            }])
        );
    }

    #[test]
    fn economic_life_alone_grants_umbrella() {
        let recommendation = assess(json!({
            "age": 29,
            "dependents": 0,
            "houses": [],
            "income": 0,
            "marital_status": "single",
            "risk_questions": [0, 0, 0],
            "vehicles": [],
        }));

        assert_eq!(
            serde_json::to_value(&recommendation).expect("serializes"),
            json!({
                "auto": [],
                "disability": "ineligible",
                "home": [],
                "life": "economic",
                "umbrella": "regular",
            })
        );
    }

    #[test]
    fn no_economic_tier_leaves_umbrella_ineligible() {
        let recommendation = assess(json!({
            "age": 50,
            "dependents": 0,
            "houses": [{"key": 1, "ownership_status": "owned"}],
            "income": 0,
            "marital_status": "single",
            "risk_questions": [1, 1, 1],
            "vehicles": [{"key": 1, "year": 2000}],
        }));

        assert_eq!(
            serde_json::to_value(&recommendation).expect("serializes"),
            json!({
                "auto": [{"key": 1, "value": "responsible"}],
                "disability": "ineligible",
                "home": [{"key": 1, "value": "responsible"}],
                "life": "responsible",
                "umbrella": "ineligible",
            })
        );
    }
}

mod routing {
    use super::common::*;
    use axum::http::{header, Request, StatusCode};
    use coverage_advisor::insurance::insurance_router;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn post_valid_payload_returns_recommendation() {
        let response = insurance_router(engine())
            .oneshot(
                Request::post("/insurance/check")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&payload()).expect("json body"),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["home"][0], json!({"key": 1, "value": "economic"}));
    }

    #[tokio::test]
    async fn post_invalid_payload_returns_error_detail() {
        let mut payload = payload();
        payload.as_object_mut().expect("object").remove("age");

        let response = insurance_router(engine())
            .oneshot(
                Request::post("/insurance/check")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&payload).expect("json body"),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            read_json_body(response).await,
            json!({
                "detail": [{
                    "loc": ["body", "user", "age"],
                    "msg": "field required",
                    "type": "value_error.missing",
                }]
            })
        );
    }
}
