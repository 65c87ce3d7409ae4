//! Selection State
//!
//! The only mutable state in the engine: which toppings are checked for which
//! size, and how many pizzas of each size are ordered. Every mutation
//! validates first; a rejected mutation leaves the state exactly as it was.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    sizes::{Size, SizeTable},
    toppings::ToppingKey,
};

/// Rejected selection mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The topping key is not in the catalog this selection was built for.
    #[error("unknown topping: {0:?}")]
    UnknownTopping(ToppingKey),

    /// Item counts must be non-negative and fit the supported range.
    #[error("invalid item count: {0}")]
    InvalidCount(i64),
}

/// Current order selections: one checked flag per `(topping, size)` pair and
/// one item count per size.
///
/// The flag map covers the full toppings × sizes cross-product of the catalog
/// it was built from; flags default to unchecked and counts to zero.
#[derive(Debug, Clone)]
pub struct SelectionState {
    flags: FxHashMap<(ToppingKey, Size), bool>,
    counts: SizeTable<u32>,
}

impl SelectionState {
    /// Create an empty selection covering every topping of `catalog`.
    pub fn new(catalog: &Catalog<'_>) -> Self {
        let mut flags = FxHashMap::default();

        for (key, _) in catalog.toppings() {
            for size in Size::ALL {
                flags.insert((key, size), false);
            }
        }

        Self {
            flags,
            counts: SizeTable::splat(0),
        }
    }

    /// Set a topping flag to an explicit value.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownTopping`] if the key is not covered by
    /// this selection; nothing changes in that case.
    pub fn set_topping(
        &mut self,
        topping: ToppingKey,
        size: Size,
        checked: bool,
    ) -> Result<(), SelectionError> {
        let flag = self
            .flags
            .get_mut(&(topping, size))
            .ok_or(SelectionError::UnknownTopping(topping))?;

        *flag = checked;

        Ok(())
    }

    /// Flip a topping flag, returning the new value.
    ///
    /// Toggling twice restores the original state.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownTopping`] if the key is not covered by
    /// this selection; nothing changes in that case.
    pub fn toggle_topping(
        &mut self,
        topping: ToppingKey,
        size: Size,
    ) -> Result<bool, SelectionError> {
        let flag = self
            .flags
            .get_mut(&(topping, size))
            .ok_or(SelectionError::UnknownTopping(topping))?;

        *flag = !*flag;

        Ok(*flag)
    }

    /// Whether a topping is checked for a size.
    pub fn is_checked(&self, topping: ToppingKey, size: Size) -> bool {
        self.flags.get(&(topping, size)).copied().unwrap_or(false)
    }

    /// Set the item count for a size.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidCount`] for negative or over-range
    /// counts; the previous count is retained in that case.
    pub fn set_item_count(&mut self, size: Size, count: i64) -> Result<(), SelectionError> {
        let count = u32::try_from(count).map_err(|_err| SelectionError::InvalidCount(count))?;

        self.counts.set(size, count);

        Ok(())
    }

    /// Current item count for a size.
    pub fn item_count(&self, size: Size) -> u32 {
        *self.counts.get(size)
    }
}
