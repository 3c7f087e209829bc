use serde::{Deserialize, Serialize};

/// Model year of the first production automobile; older vehicles are rejected at intake.
pub const EARLIEST_VEHICLE_YEAR: f64 = 1885.0;

/// Number of yes/no risk questions every profile answers.
pub const RISK_QUESTION_COUNT: usize = 3;

/// Validated demographic and asset snapshot scored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: f64,
    pub dependents: f64,
    pub houses: Vec<House>,
    pub income: f64,
    pub marital_status: MaritalStatus,
    pub risk_questions: RiskAnswers,
    pub vehicles: Vec<Vehicle>,
}

/// Ordered answers to the risk questionnaire; each `true` contributes one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnswers(pub [bool; RISK_QUESTION_COUNT]);

impl RiskAnswers {
    pub fn base_score(&self) -> f64 {
        self.0.iter().filter(|answer| **answer).count() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    pub key: i64,
    pub ownership_status: OwnershipStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub key: i64,
    pub year: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipStatus {
    Owned,
    Mortgaged,
}

impl OwnershipStatus {
    pub const fn ordered() -> [Self; 2] {
        [Self::Owned, Self::Mortgaged]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Owned => "owned",
            Self::Mortgaged => "mortgaged",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
}

impl MaritalStatus {
    pub const fn ordered() -> [Self; 2] {
        [Self::Single, Self::Married]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
        }
    }
}

/// Insurance lines scored independently for every profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Auto,
    Disability,
    Home,
    Life,
}

impl ProductKind {
    /// Evaluation order; the umbrella scan walks results in this order too.
    pub const fn ordered() -> [Self; 4] {
        [Self::Auto, Self::Disability, Self::Home, Self::Life]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Disability => "disability",
            Self::Home => "home",
            Self::Life => "life",
        }
    }
}
