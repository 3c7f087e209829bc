use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Scores at or below this bound map to [`Tier::Economic`].
pub const ECONOMIC_CEILING: f64 = 0.0;
/// Scores at or below this bound (and above the economic one) map to [`Tier::Regular`].
pub const REGULAR_CEILING: f64 = 2.0;

/// Recommendation level, ordered from lowest to highest risk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Economic,
    Regular,
    Responsible,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Economic => "economic",
            Tier::Regular => "regular",
            Tier::Responsible => "responsible",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gated outcome for a single-valued product: a tier, or the ineligible quality gate.
/// `Ineligible` sits outside the tier ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coverage {
    Eligible(Tier),
    Ineligible,
}

impl Coverage {
    pub const fn label(self) -> &'static str {
        match self {
            Coverage::Eligible(tier) => tier.label(),
            Coverage::Ineligible => "ineligible",
        }
    }

    pub const fn tier(self) -> Option<Tier> {
        match self {
            Coverage::Eligible(tier) => Some(tier),
            Coverage::Ineligible => None,
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "economic" => Some(Coverage::Eligible(Tier::Economic)),
            "regular" => Some(Coverage::Eligible(Tier::Regular)),
            "responsible" => Some(Coverage::Eligible(Tier::Responsible)),
            "ineligible" => Some(Coverage::Ineligible),
            _ => None,
        }
    }
}

impl From<Tier> for Coverage {
    fn from(tier: Tier) -> Self {
        Coverage::Eligible(tier)
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Coverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Coverage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Coverage::from_label(&raw).ok_or_else(|| {
            serde::de::Error::unknown_variant(
                &raw,
                &["economic", "regular", "responsible", "ineligible"],
            )
        })
    }
}

pub fn classify(score: f64) -> Tier {
    if score <= ECONOMIC_CEILING {
        Tier::Economic
    } else if score <= REGULAR_CEILING {
        Tier::Regular
    } else {
        Tier::Responsible
    }
}

pub fn classify_gated(is_eligible: bool, score: f64) -> Coverage {
    if is_eligible {
        Coverage::Eligible(classify(score))
    } else {
        Coverage::Ineligible
    }
}
