//! Topping Contributions
//!
//! The projection of one size's checked toppings into priced entries. An
//! unchecked topping produces no entry at all, never a zero entry; offer
//! eligibility counts entries, so the distinction matters.

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;

use crate::{catalog::Catalog, selection::SelectionState, sizes::Size, toppings::ToppingKey};

/// A checked topping's price entry for one size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToppingContribution<'a> {
    /// The contributing topping.
    pub topping: ToppingKey,

    /// Its price for the size in question.
    pub price: Money<'a, Currency>,
}

/// Contribution list storage; menus rarely exceed a handful of toppings.
pub type ContributionList<'a> = SmallVec<[ToppingContribution<'a>; 8]>;

/// Build the contribution list for one size: checked toppings only, in
/// catalog order.
pub fn contributions<'a>(
    catalog: &'a Catalog<'a>,
    selection: &SelectionState,
    size: Size,
) -> ContributionList<'a> {
    catalog
        .toppings()
        .filter(|(key, _)| selection.is_checked(*key, size))
        .filter_map(|(key, _)| {
            catalog
                .topping_price(key, size)
                .map(|price| ToppingContribution {
                    topping: key,
                    price,
                })
        })
        .collect()
}

/// Sum the contribution prices, seeded at zero so an empty list yields zero
/// rather than an error.
///
/// # Errors
///
/// Returns a [`MoneyError`] if money arithmetic fails (currency mismatch).
pub fn contributions_total<'a>(
    contributions: &[ToppingContribution<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    contributions
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, contribution| {
            acc.add(contribution.price)
        })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_selection_contributes_nothing() -> TestResult {
        let catalog = Catalog::standard()?;
        let selection = SelectionState::new(&catalog);

        let list = contributions(&catalog, &selection, Size::Medium);

        assert!(list.is_empty());
        assert_eq!(
            contributions_total(&list, catalog.currency())?,
            Money::from_minor(0, USD),
        );

        Ok(())
    }

    #[test]
    fn entries_follow_catalog_order_not_selection_order() -> TestResult {
        let catalog = Catalog::standard()?;
        let mut selection = SelectionState::new(&catalog);

        let pepperoni = catalog
            .topping_by_name("Pepperoni")
            .ok_or("missing Pepperoni")?;
        let tomatoes = catalog
            .topping_by_name("Tomatoes")
            .ok_or("missing Tomatoes")?;

        // Checked in reverse menu order.
        selection.set_topping(pepperoni, Size::Large, true)?;
        selection.set_topping(tomatoes, Size::Large, true)?;

        let list = contributions(&catalog, &selection, Size::Large);
        let keys: Vec<_> = list.iter().map(|entry| entry.topping).collect();

        assert_eq!(keys, [tomatoes, pepperoni]);

        Ok(())
    }

    #[test]
    fn only_the_addressed_size_contributes() -> TestResult {
        let catalog = Catalog::standard()?;
        let mut selection = SelectionState::new(&catalog);

        let onions = catalog.topping_by_name("Onions").ok_or("missing Onions")?;

        selection.set_topping(onions, Size::Small, true)?;

        assert_eq!(contributions(&catalog, &selection, Size::Small).len(), 1);
        assert!(contributions(&catalog, &selection, Size::Medium).is_empty());

        Ok(())
    }

    #[test]
    fn totals_sum_checked_prices() -> TestResult {
        let catalog = Catalog::standard()?;
        let mut selection = SelectionState::new(&catalog);

        for name in ["Tomatoes", "Onions"] {
            let key = catalog.topping_by_name(name).ok_or("missing topping")?;
            selection.set_topping(key, Size::ExtraLarge, true)?;
        }

        let list = contributions(&catalog, &selection, Size::ExtraLarge);

        assert_eq!(list.len(), 2);
        assert_eq!(
            contributions_total(&list, catalog.currency())?,
            Money::from_minor(150, USD),
        );

        Ok(())
    }
}
