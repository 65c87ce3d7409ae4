//! Crust prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::Catalog,
    contributions::{ContributionList, ToppingContribution},
    engine::{NoopObserver, OrderEngine, OrderError, OrderEvent, PriceObserver},
    menu::{MenuError, MenuFixture},
    offers::{Evaluation, LineQuote, Offer, OfferContext, OfferResult, OfferRule, QuoteError},
    selection::{SelectionError, SelectionState},
    sizes::{Size, SizeTable, UnknownSizeError},
    tags::TagSet,
    ticket::{OrderTicket, TicketError, TicketLine},
    toppings::{Topping, ToppingKey},
    totals::{PriceUpdate, line_total, price_size},
};
