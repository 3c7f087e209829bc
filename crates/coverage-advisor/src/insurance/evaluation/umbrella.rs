use super::policy::ProductResult;
use super::tier::{Coverage, Tier};

/// Grants a regular umbrella as soon as any product, or any item within one,
/// landed on the economic tier. Ineligible products and empty item lists count for nothing.
pub fn derive_umbrella<'a, I>(results: I) -> Coverage
where
    I: IntoIterator<Item = &'a ProductResult>,
{
    for result in results {
        let economic = match result {
            ProductResult::Single(coverage) => *coverage == Coverage::Eligible(Tier::Economic),
            ProductResult::Items(items) => items.iter().any(|item| item.tier == Tier::Economic),
        };

        if economic {
            return Coverage::Eligible(Tier::Regular);
        }
    }

    Coverage::Ineligible
}
