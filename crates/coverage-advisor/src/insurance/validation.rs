use std::fmt;

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::domain::{
    House, MaritalStatus, OwnershipStatus, RiskAnswers, UserProfile, Vehicle,
    EARLIEST_VEHICLE_YEAR, RISK_QUESTION_COUNT,
};

/// One step in the path to an offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocSegment::Field(name) => f.write_str(name),
            LocSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A rejected field, reported with its full path from the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldViolation {
    /// Dotted path without the `body.user` prefix, e.g. `houses.0.key`.
    pub fn field_path(&self) -> String {
        self.loc
            .iter()
            .skip(PAYLOAD_ROOT.len())
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Every violation found in a payload; nothing reaches the engine while this is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} validation error(s) for user profile: {}", .violations.len(), summarize(.violations))]
pub struct ProfileValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ProfileValidationError {
    /// Rejection for bodies that are not JSON at all.
    pub fn malformed_body(reason: impl fmt::Display) -> Self {
        Self {
            violations: vec![FieldViolation {
                loc: vec![body()],
                msg: reason.to_string(),
                kind: "value_error.jsondecode".to_string(),
            }],
        }
    }

    /// Response payload in the `{"detail": [...]}` layout clients already parse.
    pub fn detail(&self) -> Value {
        json!({ "detail": self.violations })
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{} ({})", violation.field_path(), violation.msg))
        .collect::<Vec<_>>()
        .join("; ")
}

const PAYLOAD_ROOT: [&str; 2] = ["body", "user"];

fn body() -> LocSegment {
    LocSegment::Field(PAYLOAD_ROOT[0].to_string())
}

fn payload_root() -> Vec<LocSegment> {
    PAYLOAD_ROOT
        .iter()
        .map(|segment| LocSegment::Field(segment.to_string()))
        .collect()
}

/// Schema gate turning raw JSON into a [`UserProfile`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileGuard;

impl ProfileGuard {
    pub fn profile_from_payload(
        &self,
        payload: &Value,
    ) -> Result<UserProfile, ProfileValidationError> {
        let mut checks = Checks::default();
        let root = payload_root();

        let Some(object) = payload.as_object() else {
            checks.reject(&root, "value is not a valid dict", "type_error.dict");
            return Err(checks.into_error());
        };

        let age = checks
            .field(object, &root, "age")
            .and_then(|(value, loc)| checks.number_at_least(value, &loc, 0.0));
        let dependents = checks
            .field(object, &root, "dependents")
            .and_then(|(value, loc)| checks.number_at_least(value, &loc, 0.0));
        let houses = checks
            .field(object, &root, "houses")
            .and_then(|(value, loc)| checks.list(value, &loc, Checks::house));
        let income = checks
            .field(object, &root, "income")
            .and_then(|(value, loc)| checks.number_at_least(value, &loc, 0.0));
        let marital_status = checks
            .field(object, &root, "marital_status")
            .and_then(|(value, loc)| {
                checks.member(value, &loc, &MaritalStatus::ordered(), MaritalStatus::label)
            });
        let risk_questions = checks
            .field(object, &root, "risk_questions")
            .and_then(|(value, loc)| checks.risk_answers(value, &loc));
        let vehicles = checks
            .field(object, &root, "vehicles")
            .and_then(|(value, loc)| checks.list(value, &loc, Checks::vehicle));

        match (
            age,
            dependents,
            houses,
            income,
            marital_status,
            risk_questions,
            vehicles,
        ) {
            (
                Some(age),
                Some(dependents),
                Some(houses),
                Some(income),
                Some(marital_status),
                Some(risk_questions),
                Some(vehicles),
            ) if checks.is_clean() => Ok(UserProfile {
                age,
                dependents,
                houses,
                income,
                marital_status,
                risk_questions,
                vehicles,
            }),
            _ => Err(checks.into_error()),
        }
    }
}

#[derive(Default)]
struct Checks {
    violations: Vec<FieldViolation>,
}

impl Checks {
    fn reject(&mut self, loc: &[LocSegment], msg: impl Into<String>, kind: &str) {
        self.violations.push(FieldViolation {
            loc: loc.to_vec(),
            msg: msg.into(),
            kind: kind.to_string(),
        });
    }

    fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn into_error(self) -> ProfileValidationError {
        ProfileValidationError {
            violations: self.violations,
        }
    }

    fn field<'a>(
        &mut self,
        object: &'a Map<String, Value>,
        parent: &[LocSegment],
        name: &str,
    ) -> Option<(&'a Value, Vec<LocSegment>)> {
        let mut loc = parent.to_vec();
        loc.push(LocSegment::Field(name.to_string()));

        match object.get(name) {
            None => {
                self.reject(&loc, "field required", "value_error.missing");
                None
            }
            Some(Value::Null) => {
                self.reject(&loc, "none is not an allowed value", "type_error.none.not_allowed");
                None
            }
            Some(value) => Some((value, loc)),
        }
    }

    fn number_at_least(&mut self, value: &Value, loc: &[LocSegment], minimum: f64) -> Option<f64> {
        let coerced = match value {
            Value::String(raw) => raw.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            other => other.as_f64(),
        };
        let Some(number) = coerced else {
            self.reject(loc, "value is not a valid float", "type_error.float");
            return None;
        };

        if number < minimum {
            self.reject(
                loc,
                format!("ensure this value is greater than or equal to {minimum}"),
                "value_error.number.not_ge",
            );
            return None;
        }

        Some(number)
    }

    fn integer(&mut self, value: &Value, loc: &[LocSegment]) -> Option<i64> {
        let parsed = match value {
            Value::String(raw) => raw.trim().parse::<i64>().ok(),
            other => other.as_i64().or_else(|| {
                other
                    .as_f64()
                    .filter(|number| number.abs() < i64::MAX as f64)
                    .map(|number| number.trunc() as i64)
            }),
        };

        if parsed.is_none() {
            self.reject(loc, "value is not a valid integer", "type_error.integer");
        }
        parsed
    }

    fn member<T: Copy>(
        &mut self,
        value: &Value,
        loc: &[LocSegment],
        members: &[T],
        label: fn(T) -> &'static str,
    ) -> Option<T> {
        let found = value
            .as_str()
            .and_then(|raw| members.iter().copied().find(|member| label(*member) == raw));

        if found.is_none() {
            let permitted = members
                .iter()
                .map(|member| format!("'{}'", label(*member)))
                .collect::<Vec<_>>()
                .join(", ");
            self.reject(
                loc,
                format!("value is not a valid enumeration member; permitted: {permitted}"),
                "type_error.enum",
            );
        }
        found
    }

    fn list<T>(
        &mut self,
        value: &Value,
        loc: &[LocSegment],
        item: fn(&mut Self, &Value, &[LocSegment]) -> Option<T>,
    ) -> Option<Vec<T>> {
        let Some(entries) = value.as_array() else {
            self.reject(loc, "value is not a valid list", "type_error.list");
            return None;
        };

        let mut parsed = Vec::with_capacity(entries.len());
        let mut complete = true;
        for (index, entry) in entries.iter().enumerate() {
            let mut item_loc = loc.to_vec();
            item_loc.push(LocSegment::Index(index));
            match item(self, entry, &item_loc) {
                Some(value) => parsed.push(value),
                None => complete = false,
            }
        }

        complete.then_some(parsed)
    }

    fn house(&mut self, value: &Value, loc: &[LocSegment]) -> Option<House> {
        let Some(object) = value.as_object() else {
            self.reject(loc, "value is not a valid dict", "type_error.dict");
            return None;
        };

        let key = self
            .field(object, loc, "key")
            .and_then(|(value, loc)| self.integer(value, &loc));
        let ownership_status = self
            .field(object, loc, "ownership_status")
            .and_then(|(value, loc)| {
                self.member(value, &loc, &OwnershipStatus::ordered(), OwnershipStatus::label)
            });

        Some(House {
            key: key?,
            ownership_status: ownership_status?,
        })
    }

    fn vehicle(&mut self, value: &Value, loc: &[LocSegment]) -> Option<Vehicle> {
        let Some(object) = value.as_object() else {
            self.reject(loc, "value is not a valid dict", "type_error.dict");
            return None;
        };

        let key = self
            .field(object, loc, "key")
            .and_then(|(value, loc)| self.integer(value, &loc));
        let year = self
            .field(object, loc, "year")
            .and_then(|(value, loc)| self.number_at_least(value, &loc, EARLIEST_VEHICLE_YEAR));

        Some(Vehicle {
            key: key?,
            year: year?,
        })
    }

    fn risk_answers(&mut self, value: &Value, loc: &[LocSegment]) -> Option<RiskAnswers> {
        let Some(entries) = value.as_array() else {
            self.reject(loc, "value is not a valid tuple", "type_error.tuple");
            return None;
        };

        if entries.len() != RISK_QUESTION_COUNT {
            self.reject(
                loc,
                format!(
                    "wrong tuple length {}, expected {}",
                    entries.len(),
                    RISK_QUESTION_COUNT
                ),
                "value_error.tuple.length",
            );
            return None;
        }

        let mut answers = [false; RISK_QUESTION_COUNT];
        let mut complete = true;
        for (index, entry) in entries.iter().enumerate() {
            let answer = match entry {
                Value::Bool(flag) => Some(*flag),
                Value::Number(number) => match number.as_f64() {
                    Some(raw) if raw == 1.0 => Some(true),
                    Some(raw) if raw == 0.0 => Some(false),
                    _ => None,
                },
                _ => None,
            };

            match answer {
                Some(answer) => answers[index] = answer,
                None => {
                    let mut item_loc = loc.to_vec();
                    item_loc.push(LocSegment::Index(index));
                    self.reject(
                        &item_loc,
                        "value is not a valid enumeration member; permitted: 1, 0",
                        "type_error.enum",
                    );
                    complete = false;
                }
            }
        }

        complete.then_some(RiskAnswers(answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_path_skips_body_prefix() {
        let violation = FieldViolation {
            loc: vec![
                body(),
                LocSegment::Field("user".to_string()),
                LocSegment::Field("houses".to_string()),
                LocSegment::Index(0),
                LocSegment::Field("key".to_string()),
            ],
            msg: "field required".to_string(),
            kind: "value_error.missing".to_string(),
        };

        assert_eq!(violation.field_path(), "houses.0.key");
    }

    #[test]
    fn non_object_payloads_are_rejected_at_the_body() {
        let error = ProfileGuard
            .profile_from_payload(&json!([1, 2, 3]))
            .expect_err("arrays are not profiles");

        assert_eq!(error.violations.len(), 1);
        assert_eq!(error.violations[0].loc, payload_root());
        assert_eq!(error.violations[0].field_path(), "");
        assert_eq!(error.violations[0].kind, "type_error.dict");
    }
}
