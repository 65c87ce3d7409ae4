//! Toppings

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::tags::TagSet;

new_key_type! {
    /// Topping Key
    pub struct ToppingKey;
}

/// A topping on the menu.
#[derive(Debug, Clone)]
pub struct Topping<'a> {
    /// Topping name, unique within a catalog.
    pub name: String,

    /// Surcharge per pizza, in the catalog currency.
    pub price: Money<'a, Currency>,

    /// Tags used for offer eligibility.
    pub tags: TagSet,
}

impl<'a> Topping<'a> {
    /// Create a topping with no tags.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self::with_tags(name, price, TagSet::empty())
    }

    /// Create a topping with the given tags.
    pub fn with_tags(name: impl Into<String>, price: Money<'a, Currency>, tags: TagSet) -> Self {
        Self {
            name: name.into(),
            price,
            tags,
        }
    }
}
