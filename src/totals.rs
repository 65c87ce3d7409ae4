//! Totals
//!
//! The aggregation end of the pipeline: fold the live item count into a
//! quote, and compose deriver → evaluator → aggregator into a single pure
//! recompute for one size.

use rusty_money::{Money, iso::Currency};

use crate::{
    catalog::Catalog,
    contributions::{ContributionList, contributions},
    offers::{self, LineQuote, OfferContext, QuoteError, scale_by_count},
    selection::SelectionState,
    sizes::Size,
};

/// One size's freshly derived pricing, produced on every accepted mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate<'a> {
    /// The size this update is for.
    pub size: Size,

    /// Live item count at derivation time.
    pub item_count: u32,

    /// Contribution list, in catalog order.
    pub contributions: ContributionList<'a>,

    /// The winning quote, tagged naive or discounted.
    pub quote: LineQuote<'a>,

    /// Name of the offer that fired, if any.
    pub offer: Option<&'a str>,

    /// What the line would cost with no offer applied.
    pub naive_total: Money<'a, Currency>,

    /// The payable line total.
    pub total: Money<'a, Currency>,
}

impl<'a> PriceUpdate<'a> {
    /// Amount saved by the offer on this line.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError::Money`] if the subtraction fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, QuoteError> {
        Ok(self.naive_total.sub(self.total)?)
    }
}

/// Fold the item count into a quote: unit quotes are multiplied, whole-line
/// quotes pass through unchanged.
///
/// # Errors
///
/// Returns a [`QuoteError::PriceOverflow`] if the multiplication overflows.
pub fn line_total<'a>(
    quote: &LineQuote<'a>,
    item_count: u32,
) -> Result<Money<'a, Currency>, QuoteError> {
    match quote {
        LineQuote::PerItem(result) => scale_by_count(result.amount(), item_count),
        LineQuote::WholeLine(result) => Ok(result.amount()),
    }
}

/// Recompute one size's pricing from scratch: contribution list, offer
/// evaluation, and aggregation, in one synchronous pass.
///
/// # Errors
///
/// Returns a [`QuoteError`] if money arithmetic fails or overflows.
pub fn price_size<'a>(
    catalog: &'a Catalog<'a>,
    selection: &SelectionState,
    size: Size,
) -> Result<PriceUpdate<'a>, QuoteError> {
    let contributions = contributions(catalog, selection, size);
    let item_count = selection.item_count(size);

    let ctx = OfferContext {
        base_price: catalog.base_price(size),
        contributions: &contributions,
        item_count,
        catalog,
    };

    let naive_unit = offers::naive_unit_price(&ctx)?;
    let evaluation = offers::evaluate(catalog.offers(size), &ctx)?;

    let total = line_total(&evaluation.quote, item_count)?;
    let naive_total = scale_by_count(naive_unit, item_count)?;

    Ok(PriceUpdate {
        size,
        item_count,
        contributions,
        quote: evaluation.quote,
        offer: evaluation.offer,
        naive_total,
        total,
    })
}
