use super::super::domain::{MaritalStatus, OwnershipStatus, ProductKind, UserProfile};
use super::ledger::ScoreLedger;
use super::policy::{ProductPolicy, ScoringContext};

pub(crate) const NEW_VEHICLE: &str = "vehicle_year__lge__5";
pub(crate) const SINGLE_VEHICLE: &str = "vehicles__eq__1";
pub(crate) const MORTGAGED: &str = "ownership_status__eg__mortgaged";
pub(crate) const SINGLE_HOUSE: &str = "houses__eq__1";
pub(crate) const HAS_DEPENDENTS: &str = "dependents__gt__0";
pub(crate) const MARRIED: &str = "marital_status__eg__married";

/// Vehicles at most this many years old count as new.
const NEW_VEHICLE_MAX_AGE: f64 = 5.0;
/// Disability and life cover stop at this age.
const MAX_INSURABLE_AGE: f64 = 60.0;

pub(crate) fn policy_for(kind: ProductKind) -> &'static dyn ProductPolicy {
    match kind {
        ProductKind::Auto => &AutoPolicy,
        ProductKind::Disability => &DisabilityPolicy,
        ProductKind::Home => &HomePolicy,
        ProductKind::Life => &LifePolicy,
    }
}

/// Per-vehicle cover; newer vehicles and single-vehicle households carry more risk.
pub struct AutoPolicy;

impl ProductPolicy for AutoPolicy {
    fn kind(&self) -> ProductKind {
        ProductKind::Auto
    }

    fn is_eligible(&self, profile: &UserProfile) -> bool {
        !profile.vehicles.is_empty()
    }

    fn item_keys(&self, profile: &UserProfile) -> Option<Vec<i64>> {
        Some(profile.vehicles.iter().map(|vehicle| vehicle.key).collect())
    }

    fn apply_specific_risk(
        &self,
        profile: &UserProfile,
        context: &ScoringContext,
        ledger: &mut ScoreLedger,
    ) {
        let current_year = f64::from(context.current_year);
        for (index, vehicle) in profile.vehicles.iter().enumerate() {
            if current_year - vehicle.year <= NEW_VEHICLE_MAX_AGE {
                ledger.add_to_item(1.0, &format!("{NEW_VEHICLE}:{}", vehicle.key), index);
            }
        }

        if profile.vehicles.len() == 1 {
            ledger.add(1.0, SINGLE_VEHICLE);
        }
    }
}

pub struct DisabilityPolicy;

impl ProductPolicy for DisabilityPolicy {
    fn kind(&self) -> ProductKind {
        ProductKind::Disability
    }

    fn is_eligible(&self, profile: &UserProfile) -> bool {
        profile.income > 0.0 && profile.age < MAX_INSURABLE_AGE
    }

    fn apply_specific_risk(
        &self,
        profile: &UserProfile,
        _context: &ScoringContext,
        ledger: &mut ScoreLedger,
    ) {
        // A single mortgage is enough; further mortgaged houses add nothing.
        if profile
            .houses
            .iter()
            .any(|house| house.ownership_status == OwnershipStatus::Mortgaged)
        {
            ledger.add(1.0, MORTGAGED);
        }

        if profile.dependents > 0.0 {
            ledger.add(1.0, HAS_DEPENDENTS);
        }

        if profile.marital_status == MaritalStatus::Married {
            ledger.remove(1.0, MARRIED);
        }
    }
}

/// Per-house cover; each mortgaged house is penalized on its own score.
pub struct HomePolicy;

impl ProductPolicy for HomePolicy {
    fn kind(&self) -> ProductKind {
        ProductKind::Home
    }

    fn is_eligible(&self, profile: &UserProfile) -> bool {
        !profile.houses.is_empty()
    }

    fn item_keys(&self, profile: &UserProfile) -> Option<Vec<i64>> {
        Some(profile.houses.iter().map(|house| house.key).collect())
    }

    fn apply_specific_risk(
        &self,
        profile: &UserProfile,
        _context: &ScoringContext,
        ledger: &mut ScoreLedger,
    ) {
        for (index, house) in profile.houses.iter().enumerate() {
            if house.ownership_status == OwnershipStatus::Mortgaged {
                ledger.add_to_item(1.0, &format!("{MORTGAGED}:{}", house.key), index);
            }
        }

        if profile.houses.len() == 1 {
            ledger.add(1.0, SINGLE_HOUSE);
        }
    }
}

pub struct LifePolicy;

impl ProductPolicy for LifePolicy {
    fn kind(&self) -> ProductKind {
        ProductKind::Life
    }

    fn is_eligible(&self, profile: &UserProfile) -> bool {
        profile.age < MAX_INSURABLE_AGE
    }

    fn apply_specific_risk(
        &self,
        profile: &UserProfile,
        _context: &ScoringContext,
        ledger: &mut ScoreLedger,
    ) {
        if profile.dependents > 0.0 {
            ledger.add(1.0, HAS_DEPENDENTS);
        }

        if profile.marital_status == MaritalStatus::Married {
            ledger.add(1.0, MARRIED);
        }
    }
}
