//! Menu Fixtures
//!
//! YAML-backed catalog definitions. A menu file lists toppings in display
//! order and, per size, a base price and an optional offer chain. Everything
//! is validated here so the rest of the crate can treat a [`Catalog`] as
//! trusted data: prices parse, currencies agree, topping names are unique.

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashSet;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    offers::{Offer, OfferRule},
    sizes::SizeTable,
    tags::TagSet,
    toppings::{Topping, ToppingKey},
};

/// The menu shipped with the crate: eight toppings, four sizes, the running
/// promos.
const STANDARD_MENU: &str = include_str!("../fixtures/menu.yml");

/// Menu parsing and validation errors.
#[derive(Debug, Error)]
pub enum MenuError {
    /// IO error reading a menu file.
    #[error("failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse menu YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Price string not in the `"AMOUNT CURRENCY"` format.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Unknown currency code in a price string.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Two prices in the same menu use different currencies.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency established by the first parsed price.
        expected: &'static str,

        /// Conflicting currency.
        found: &'static str,
    },

    /// The same topping name appears twice.
    #[error("duplicate topping: {0}")]
    DuplicateTopping(String),

    /// Offer multiplier outside the open interval (0, 1).
    #[error("invalid offer multiplier: {0}")]
    InvalidMultiplier(String),

    /// The menu defines no toppings.
    #[error("menu defines no toppings")]
    NoToppings,
}

/// Top-level menu file.
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Toppings in display order.
    pub toppings: Vec<ToppingFixture>,

    /// Per-size base prices and offer chains; all four sizes are required.
    pub sizes: SizesFixture,
}

/// A topping as written in a menu file.
#[derive(Debug, Deserialize)]
pub struct ToppingFixture {
    /// Topping name, unique within the menu.
    pub name: String,

    /// Price string (e.g. `"1.20 USD"`).
    pub price: String,

    /// Tags used for offer eligibility.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The four per-size entries of a menu file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizesFixture {
    /// Small size entry.
    pub small: SizeFixture,

    /// Medium size entry.
    pub medium: SizeFixture,

    /// Large size entry.
    pub large: SizeFixture,

    /// Extra-large size entry.
    pub extra_large: SizeFixture,
}

/// One size's base price and offer chain.
#[derive(Debug, Deserialize)]
pub struct SizeFixture {
    /// Base price string (e.g. `"7.00 USD"`).
    pub base_price: String,

    /// Offer chain in evaluation order; may be empty.
    #[serde(default)]
    pub offers: Vec<OfferFixture>,
}

/// An offer as written in a menu file.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfferFixture {
    /// Flat unit price when an exact number of toppings is checked.
    FlatRate {
        /// Display name of the offer.
        name: String,

        /// Exact checked-topping count that activates the offer.
        toppings: usize,

        /// Flat unit price string.
        unit_price: String,
    },

    /// Pair pricing when an exact number of toppings is checked and at least
    /// two items are ordered.
    PairBundle {
        /// Display name of the offer.
        name: String,

        /// Exact checked-topping count that activates the offer.
        toppings: usize,

        /// Price string per pair of items.
        pair_price: String,
    },

    /// Percentage price when the checked toppings score an exact number of
    /// points (tagged toppings score double).
    PointsCombo {
        /// Display name of the offer.
        name: String,

        /// Exact score that activates the offer.
        target_points: usize,

        /// Tag marking toppings that score double.
        double_tag: String,

        /// Final-price multiplier string (e.g. `"50%"` or `"0.5"`).
        multiplier: String,
    },
}

impl OfferFixture {
    /// Convert to an [`Offer`], folding its prices into the menu currency
    /// check.
    ///
    /// # Errors
    ///
    /// Returns an error if a price or multiplier fails to parse, or if a
    /// price disagrees with the currency seen so far.
    fn try_into_offer<'a>(
        self,
        currency: &mut Option<&'static Currency>,
    ) -> Result<Offer<'a>, MenuError> {
        match self {
            OfferFixture::FlatRate {
                name,
                toppings,
                unit_price,
            } => {
                let (minor, found) = parse_price(&unit_price)?;
                expect_currency(currency, found)?;

                Ok(Offer::new(
                    name,
                    OfferRule::FlatRate {
                        topping_count: toppings,
                        unit_price: Money::from_minor(minor, found),
                    },
                ))
            }
            OfferFixture::PairBundle {
                name,
                toppings,
                pair_price,
            } => {
                let (minor, found) = parse_price(&pair_price)?;
                expect_currency(currency, found)?;

                Ok(Offer::new(
                    name,
                    OfferRule::PairBundle {
                        topping_count: toppings,
                        pair_price: Money::from_minor(minor, found),
                    },
                ))
            }
            OfferFixture::PointsCombo {
                name,
                target_points,
                double_tag,
                multiplier,
            } => Ok(Offer::new(
                name,
                OfferRule::PointsCombo {
                    target_points,
                    double_tag,
                    multiplier: parse_multiplier(&multiplier)?,
                },
            )),
        }
    }
}

impl MenuFixture {
    /// Parse a menu from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError::Yaml`] if the text is not a valid menu document.
    pub fn from_yaml(yaml: &str) -> Result<Self, MenuError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a menu file.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Validate the fixture into a [`Catalog`].
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] on invalid prices or multipliers, mixed
    /// currencies, duplicate topping names, or an empty topping list.
    pub fn into_catalog<'a>(self) -> Result<Catalog<'a>, MenuError> {
        if self.toppings.is_empty() {
            return Err(MenuError::NoToppings);
        }

        let mut currency: Option<&'static Currency> = None;
        let mut toppings: SlotMap<ToppingKey, Topping<'a>> = SlotMap::with_key();
        let mut display_order: Vec<ToppingKey> = Vec::with_capacity(self.toppings.len());
        let mut seen_names: FxHashSet<String> = FxHashSet::default();

        for fixture in self.toppings {
            let (minor, found) = parse_price(&fixture.price)?;
            expect_currency(&mut currency, found)?;

            if !seen_names.insert(fixture.name.clone()) {
                return Err(MenuError::DuplicateTopping(fixture.name));
            }

            let topping = Topping::with_tags(
                fixture.name,
                Money::from_minor(minor, found),
                TagSet::from(fixture.tags),
            );

            display_order.push(toppings.insert(topping));
        }

        let small = build_size(self.sizes.small, &mut currency)?;
        let medium = build_size(self.sizes.medium, &mut currency)?;
        let large = build_size(self.sizes.large, &mut currency)?;
        let extra_large = build_size(self.sizes.extra_large, &mut currency)?;

        let currency = currency.ok_or(MenuError::NoToppings)?;

        Ok(Catalog::new(
            toppings,
            display_order,
            SizeTable::new(small.0, medium.0, large.0, extra_large.0),
            SizeTable::new(small.1, medium.1, large.1, extra_large.1),
            currency,
        ))
    }
}

impl<'a> Catalog<'a> {
    /// The catalog for the menu shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] if the embedded menu fails validation.
    pub fn standard() -> Result<Self, MenuError> {
        MenuFixture::from_yaml(STANDARD_MENU)?.into_catalog()
    }
}

type SizeEntry<'a> = (Money<'a, Currency>, SmallVec<[Offer<'a>; 2]>);

/// Validate one size's base price and offer chain.
fn build_size<'a>(
    fixture: SizeFixture,
    currency: &mut Option<&'static Currency>,
) -> Result<SizeEntry<'a>, MenuError> {
    let (minor, found) = parse_price(&fixture.base_price)?;
    expect_currency(currency, found)?;

    let mut offers: SmallVec<[Offer<'a>; 2]> = SmallVec::new();

    for offer in fixture.offers {
        offers.push(offer.try_into_offer(currency)?);
    }

    Ok((Money::from_minor(minor, found), offers))
}

/// Record the first currency seen and reject any later disagreement.
fn expect_currency(
    current: &mut Option<&'static Currency>,
    found: &'static Currency,
) -> Result<(), MenuError> {
    match current {
        Some(expected) if *expected != found => Err(MenuError::CurrencyMismatch {
            expected: expected.iso_alpha_code,
            found: found.iso_alpha_code,
        }),
        Some(_) => Ok(()),
        None => {
            *current = Some(found);
            Ok(())
        }
    }
}

/// Parse a price string (e.g. `"2.99 USD"`) into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the `"AMOUNT CURRENCY"` format,
/// if the amount is not a decimal number, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), MenuError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let (&amount_str, &currency_code) = match parts.as_slice() {
        [amount, currency] => (amount, currency),
        _ => {
            return Err(MenuError::InvalidPrice(format!(
                "expected 'AMOUNT CURRENCY', got: {s}"
            )));
        }
    };

    let amount = amount_str
        .parse::<Decimal>()
        .map_err(|_err| MenuError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| MenuError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(MenuError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse a final-price multiplier (`"50%"` or `"0.5"`), requiring a value
/// strictly between 0 and 1.
///
/// # Errors
///
/// Returns a [`MenuError::InvalidMultiplier`] if the string does not parse or
/// the value is outside the open interval (0, 1).
pub fn parse_multiplier(s: &str) -> Result<Percentage, MenuError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| MenuError::InvalidMultiplier(s.to_string()))?
            / 100.0
    } else {
        trimmed
            .parse::<f64>()
            .map_err(|_err| MenuError::InvalidMultiplier(s.to_string()))?
    };

    if value > 0.0 && value < 1.0 {
        Ok(Percentage::from(value))
    } else {
        Err(MenuError::InvalidMultiplier(s.to_string()))
    }
}
