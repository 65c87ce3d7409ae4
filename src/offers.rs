//! Offers
//!
//! Per-size promotional rules and their evaluation. Each size carries an
//! ordered chain of named offers; evaluation walks the chain and the first
//! rule whose condition holds supersedes the naive price. Outcomes are
//! tagged: a discounted price that happens to equal the naive price is still
//! a discount, and tests and diagnostics can tell the two apart.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    contributions::{ToppingContribution, contributions_total},
};

/// Errors from price computation.
#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Minor-unit arithmetic overflowed.
    #[error("price arithmetic overflowed")]
    PriceOverflow,
}

/// A pricing rule, matched against the current selection.
#[derive(Debug, Clone)]
pub enum OfferRule<'a> {
    /// Flat unit price when exactly `topping_count` toppings are checked,
    /// whichever toppings they are.
    FlatRate {
        /// Exact checked-topping count that activates the rule.
        topping_count: usize,

        /// Replacement unit price.
        unit_price: Money<'a, Currency>,
    },

    /// Pair pricing when exactly `topping_count` toppings are checked and at
    /// least one pair of items is ordered. Pairs are priced at `pair_price`;
    /// an odd leftover item pays the naive unit price.
    PairBundle {
        /// Exact checked-topping count that activates the rule.
        topping_count: usize,

        /// Price per pair of items.
        pair_price: Money<'a, Currency>,
    },

    /// Percentage pricing when the checked toppings score exactly
    /// `target_points`, where toppings carrying `double_tag` score 2 and all
    /// others score 1.
    PointsCombo {
        /// Exact score that activates the rule.
        target_points: usize,

        /// Tag marking double-scoring toppings.
        double_tag: String,

        /// Final-price multiplier (fractional, below 1).
        multiplier: Percentage,
    },
}

/// A named offer in a size's chain.
#[derive(Debug, Clone)]
pub struct Offer<'a> {
    name: String,
    rule: OfferRule<'a>,
}

impl<'a> Offer<'a> {
    /// Create a named offer.
    pub fn new(name: impl Into<String>, rule: OfferRule<'a>) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    /// Display name of the offer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pricing rule.
    pub fn rule(&self) -> &OfferRule<'a> {
        &self.rule
    }
}

/// A priced outcome, tagged by whether an offer superseded the naive price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OfferResult<'a> {
    /// No offer applied; base price plus topping surcharges.
    Naive(Money<'a, Currency>),

    /// An offer's price, even when it coincides with the naive amount.
    Discounted(Money<'a, Currency>),
}

impl<'a> OfferResult<'a> {
    /// The priced amount, whichever way it was reached.
    #[must_use]
    pub fn amount(&self) -> Money<'a, Currency> {
        match self {
            OfferResult::Naive(amount) | OfferResult::Discounted(amount) => *amount,
        }
    }

    /// Whether an offer superseded the naive price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        matches!(self, OfferResult::Discounted(_))
    }
}

/// The granularity of a priced outcome: whether the aggregator still has to
/// multiply by the item count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineQuote<'a> {
    /// A unit price; the line total is this times the item count.
    PerItem(OfferResult<'a>),

    /// A full line price; the item count is already folded in (pair
    /// bundles).
    WholeLine(OfferResult<'a>),
}

impl<'a> LineQuote<'a> {
    /// The tagged outcome inside the quote.
    #[must_use]
    pub fn result(&self) -> OfferResult<'a> {
        match self {
            LineQuote::PerItem(result) | LineQuote::WholeLine(result) => *result,
        }
    }

    /// Whether an offer superseded the naive price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.result().is_discounted()
    }
}

/// Everything a rule may inspect: the size's base price, the current
/// contribution list, the live item count, and the catalog (for tag lookups).
#[derive(Debug)]
pub struct OfferContext<'a, 'c> {
    /// Base price of the size under evaluation.
    pub base_price: Money<'a, Currency>,

    /// Contribution list for the size, in catalog order.
    pub contributions: &'c [ToppingContribution<'a>],

    /// Live item count for the size.
    pub item_count: u32,

    /// Catalog the selections refer to.
    pub catalog: &'c Catalog<'a>,
}

/// Result of evaluating an offer chain.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation<'a> {
    /// The winning quote.
    pub quote: LineQuote<'a>,

    /// Name of the offer that fired, if any.
    pub offer: Option<&'a str>,
}

/// The naive unit price: base price plus the sum of checked topping prices.
///
/// The sum is seeded at zero, so an empty contribution list yields the base
/// price.
///
/// # Errors
///
/// Returns a [`QuoteError::Money`] if money arithmetic fails.
pub fn naive_unit_price<'a>(ctx: &OfferContext<'a, '_>) -> Result<Money<'a, Currency>, QuoteError> {
    let toppings = contributions_total(ctx.contributions, ctx.base_price.currency())?;

    Ok(ctx.base_price.add(toppings)?)
}

/// Walk an offer chain; the first matching rule wins, otherwise the naive
/// unit price stands.
///
/// # Errors
///
/// Returns a [`QuoteError`] if money arithmetic fails or overflows.
pub fn evaluate<'a>(
    offers: &'a [Offer<'a>],
    ctx: &OfferContext<'a, '_>,
) -> Result<Evaluation<'a>, QuoteError> {
    let naive_unit = naive_unit_price(ctx)?;

    for offer in offers {
        if let Some(quote) = offer.rule().apply(naive_unit, ctx)? {
            return Ok(Evaluation {
                quote,
                offer: Some(offer.name()),
            });
        }
    }

    Ok(Evaluation {
        quote: LineQuote::PerItem(OfferResult::Naive(naive_unit)),
        offer: None,
    })
}

impl<'a> OfferRule<'a> {
    /// Apply the rule if its condition holds.
    fn apply(
        &self,
        naive_unit: Money<'a, Currency>,
        ctx: &OfferContext<'a, '_>,
    ) -> Result<Option<LineQuote<'a>>, QuoteError> {
        match self {
            OfferRule::FlatRate {
                topping_count,
                unit_price,
            } => {
                if ctx.contributions.len() == *topping_count {
                    return Ok(Some(LineQuote::PerItem(OfferResult::Discounted(
                        *unit_price,
                    ))));
                }

                Ok(None)
            }
            OfferRule::PairBundle {
                topping_count,
                pair_price,
            } => {
                let pairs = ctx.item_count / 2;

                if ctx.contributions.len() != *topping_count || pairs == 0 {
                    return Ok(None);
                }

                let mut total = scale_by_count(*pair_price, pairs)?;

                if ctx.item_count % 2 == 1 {
                    total = total.add(naive_unit)?;
                }

                Ok(Some(LineQuote::WholeLine(OfferResult::Discounted(total))))
            }
            OfferRule::PointsCombo {
                target_points,
                double_tag,
                multiplier,
            } => {
                let total_count = ctx.contributions.len();

                let double_count = ctx
                    .contributions
                    .iter()
                    .filter(|entry| {
                        ctx.catalog
                            .topping(entry.topping)
                            .is_some_and(|topping| topping.tags.contains(double_tag))
                    })
                    .count();

                // Tagged toppings score twice, so the score is the entry
                // count plus one extra point per tagged entry.
                let points = total_count + double_count;

                if total_count > 0 && points == *target_points {
                    let discounted = apply_multiplier(*multiplier, naive_unit)?;

                    return Ok(Some(LineQuote::PerItem(OfferResult::Discounted(
                        discounted,
                    ))));
                }

                Ok(None)
            }
        }
    }
}

/// Multiply a price by an item count in minor units.
///
/// # Errors
///
/// Returns a [`QuoteError::PriceOverflow`] if the product does not fit.
pub fn scale_by_count<'a>(
    price: Money<'a, Currency>,
    count: u32,
) -> Result<Money<'a, Currency>, QuoteError> {
    let minor = price
        .to_minor_units()
        .checked_mul(i64::from(count))
        .ok_or(QuoteError::PriceOverflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Scale a price by a fractional multiplier, rounding midpoints away from
/// zero in minor units.
fn apply_multiplier<'a>(
    multiplier: Percentage,
    price: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, QuoteError> {
    let Some(minor) = Decimal::from_i64(price.to_minor_units()) else {
        unreachable!("every i64 converts to Decimal")
    };

    let scaled =
        (multiplier * minor).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let minor = scaled.to_i64().ok_or(QuoteError::PriceOverflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}
