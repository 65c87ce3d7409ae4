//! Order Engine
//!
//! The single dispatch point for input events. Each accepted event mutates
//! the selection, then synchronously reprices exactly the affected size
//! (contribution list rebuilt, offers re-evaluated, total recached) before
//! control returns to the caller. The four sizes are independent pipelines;
//! an event for one size never touches another size's derived state.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    offers::QuoteError,
    selection::{SelectionError, SelectionState},
    sizes::{Size, SizeTable},
    toppings::ToppingKey,
    totals::{PriceUpdate, price_size},
};

/// Errors surfaced by event dispatch.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// The mutation was rejected; nothing changed.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Repricing failed.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// An input event from the ordering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEvent {
    /// Set a topping flag to an explicit value.
    SetTopping {
        /// Topping to address.
        topping: ToppingKey,

        /// Size to address.
        size: Size,

        /// New flag value.
        checked: bool,
    },

    /// Flip a topping flag.
    ToggleTopping {
        /// Topping to address.
        topping: ToppingKey,

        /// Size to address.
        size: Size,
    },

    /// Set the item count for a size. Negative counts are rejected, never
    /// clamped.
    SetItemCount {
        /// Size to address.
        size: Size,

        /// Requested count.
        count: i64,
    },
}

impl OrderEvent {
    /// The size this event addresses.
    #[must_use]
    pub fn size(&self) -> Size {
        match self {
            OrderEvent::SetTopping { size, .. }
            | OrderEvent::ToggleTopping { size, .. }
            | OrderEvent::SetItemCount { size, .. } => *size,
        }
    }
}

/// Receives the derived update after each accepted event.
pub trait PriceObserver {
    /// Called once per accepted event, after the affected size has been
    /// fully repriced.
    fn price_changed(&mut self, update: &PriceUpdate<'_>);
}

/// Observer that ignores all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PriceObserver for NoopObserver {
    fn price_changed(&mut self, _update: &PriceUpdate<'_>) {}
}

/// One ordering session's pricing engine.
///
/// Owns the selection state; derived totals are recomputed on every accepted
/// event and cached per size, starting at an explicit zero before any input
/// arrives.
#[derive(Debug)]
pub struct OrderEngine<'a> {
    catalog: &'a Catalog<'a>,
    selection: SelectionState,
    totals: SizeTable<Money<'a, Currency>>,
}

impl<'a> OrderEngine<'a> {
    /// Create an engine with an empty selection against `catalog`.
    pub fn new(catalog: &'a Catalog<'a>) -> Self {
        Self {
            catalog,
            selection: SelectionState::new(catalog),
            totals: SizeTable::splat(Money::from_minor(0, catalog.currency())),
        }
    }

    /// Dispatch one event: validate, mutate, reprice the affected size.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the mutation is rejected (the selection
    /// and cached totals are left untouched) or if repricing fails.
    pub fn apply(&mut self, event: OrderEvent) -> Result<PriceUpdate<'a>, OrderError> {
        match event {
            OrderEvent::SetTopping {
                topping,
                size,
                checked,
            } => self.selection.set_topping(topping, size, checked)?,
            OrderEvent::ToggleTopping { topping, size } => {
                self.selection.toggle_topping(topping, size)?;
            }
            OrderEvent::SetItemCount { size, count } => {
                self.selection.set_item_count(size, count)?;
            }
        }

        let update = price_size(self.catalog, &self.selection, event.size())?;

        self.totals.set(update.size, update.total);

        Ok(update)
    }

    /// Dispatch one event and push the resulting update to `observer`.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the mutation is rejected or repricing
    /// fails; the observer is not called in that case.
    pub fn apply_with_observer(
        &mut self,
        event: OrderEvent,
        observer: &mut impl PriceObserver,
    ) -> Result<PriceUpdate<'a>, OrderError> {
        let update = self.apply(event)?;

        observer.price_changed(&update);

        Ok(update)
    }

    /// The cached total for one size.
    pub fn total(&self, size: Size) -> Money<'a, Currency> {
        *self.totals.get(size)
    }

    /// All four cached totals.
    pub fn totals(&self) -> &SizeTable<Money<'a, Currency>> {
        &self.totals
    }

    /// Sum of the four size totals.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the addition fails.
    pub fn grand_total(&self) -> Result<Money<'a, Currency>, MoneyError> {
        Size::ALL.iter().try_fold(
            Money::from_minor(0, self.catalog.currency()),
            |acc, size| acc.add(self.total(*size)),
        )
    }

    /// The catalog this engine prices against.
    #[must_use]
    pub fn catalog(&self) -> &'a Catalog<'a> {
        self.catalog
    }

    /// The current selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
}
