//! Catalog
//!
//! Immutable menu data: toppings in display order, per-size base prices and
//! offer chains, and the cross-joined `(topping, size)` price table. A catalog
//! is only built through the menu fixture layer (see [`crate::menu`]), which
//! validates names, prices and currencies up front.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::{
    offers::Offer,
    sizes::{Size, SizeTable},
    toppings::{Topping, ToppingKey},
};

/// Read-only menu catalog.
#[derive(Debug)]
pub struct Catalog<'a> {
    toppings: SlotMap<ToppingKey, Topping<'a>>,

    /// Declaration order: display order and the fixed order used when building
    /// contribution lists.
    display_order: Vec<ToppingKey>,

    keys_by_name: FxHashMap<String, ToppingKey>,

    /// Explicit two-key price lookup, cross-joined at construction.
    prices: FxHashMap<(ToppingKey, Size), Money<'a, Currency>>,

    base_prices: SizeTable<Money<'a, Currency>>,

    offers: SizeTable<SmallVec<[Offer<'a>; 2]>>,

    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    pub(crate) fn new(
        toppings: SlotMap<ToppingKey, Topping<'a>>,
        display_order: Vec<ToppingKey>,
        base_prices: SizeTable<Money<'a, Currency>>,
        offers: SizeTable<SmallVec<[Offer<'a>; 2]>>,
        currency: &'static Currency,
    ) -> Self {
        let mut keys_by_name = FxHashMap::default();
        let mut prices = FxHashMap::default();

        for (&key, topping) in display_order.iter().filter_map(|key| {
            toppings.get(*key).map(|topping| (key, topping))
        }) {
            keys_by_name.insert(topping.name.clone(), key);

            for size in Size::ALL {
                prices.insert((key, size), topping.price);
            }
        }

        Self {
            toppings,
            display_order,
            keys_by_name,
            prices,
            base_prices,
            offers,
            currency,
        }
    }

    /// Iterate over the toppings in display order.
    pub fn toppings(&self) -> impl Iterator<Item = (ToppingKey, &Topping<'a>)> {
        self.display_order
            .iter()
            .filter_map(|key| self.toppings.get(*key).map(|topping| (*key, topping)))
    }

    /// Look up a topping by key.
    pub fn topping(&self, key: ToppingKey) -> Option<&Topping<'a>> {
        self.toppings.get(key)
    }

    /// Look up a topping key by its menu name.
    pub fn topping_by_name(&self, name: &str) -> Option<ToppingKey> {
        self.keys_by_name.get(name).copied()
    }

    /// Price of a topping for a given size.
    pub fn topping_price(&self, key: ToppingKey, size: Size) -> Option<Money<'a, Currency>> {
        self.prices.get(&(key, size)).copied()
    }

    /// Whether a topping is in the catalog.
    pub fn contains(&self, key: ToppingKey) -> bool {
        self.toppings.contains_key(key)
    }

    /// Base price of a size, before toppings.
    pub fn base_price(&self, size: Size) -> Money<'a, Currency> {
        *self.base_prices.get(size)
    }

    /// The offer chain for a size, in evaluation order (first match wins).
    pub fn offers(&self, size: Size) -> &[Offer<'a>] {
        self.offers.get(size)
    }

    /// The single currency every price in the catalog uses.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of toppings on the menu.
    pub fn len(&self) -> usize {
        self.display_order.len()
    }

    /// Whether the menu has no toppings.
    pub fn is_empty(&self) -> bool {
        self.display_order.is_empty()
    }
}
