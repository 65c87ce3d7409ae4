//! Integration tests driving the engine end to end: naive sums, the medium
//! flat-rate and pair-bundle promos, the large signature combo, and the
//! input validation rules.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use crust::prelude::*;

fn topping(catalog: &Catalog<'_>, name: &str) -> Result<ToppingKey, String> {
    catalog
        .topping_by_name(name)
        .ok_or_else(|| format!("missing topping: {name}"))
}

fn check_toppings(
    engine: &mut OrderEngine<'_>,
    names: &[&str],
    size: Size,
) -> TestResult {
    for name in names {
        let key = topping(engine.catalog(), name)?;

        engine.apply(OrderEvent::SetTopping {
            topping: key,
            size,
            checked: true,
        })?;
    }

    Ok(())
}

#[test]
fn every_size_totals_zero_before_any_input() -> TestResult {
    let catalog = Catalog::standard()?;
    let engine = OrderEngine::new(&catalog);

    for size in Size::ALL {
        assert_eq!(engine.total(size), Money::from_minor(0, USD));
    }

    Ok(())
}

#[test]
fn every_size_totals_zero_with_toppings_but_no_items() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    for size in Size::ALL {
        check_toppings(&mut engine, &["Tomatoes", "Sausage"], size)?;

        let update = engine.apply(OrderEvent::SetItemCount { size, count: 0 })?;

        assert_eq!(update.total, Money::from_minor(0, USD));
    }

    Ok(())
}

#[test]
fn small_price_is_base_plus_toppings_times_count() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    check_toppings(&mut engine, &["Pepperoni"], Size::Small)?;

    let update = engine.apply(OrderEvent::SetItemCount {
        size: Size::Small,
        count: 2,
    })?;

    // (500 + 200) * 2; the small size has no offer wired.
    assert_eq!(update.total, Money::from_minor(1400, USD));
    assert_eq!(update.offer, None);
    assert!(!update.quote.is_discounted());

    Ok(())
}

#[test]
fn extra_large_tomatoes_and_onions_add_to_the_base_price() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    check_toppings(&mut engine, &["Tomatoes", "Onions"], Size::ExtraLarge)?;

    let update = engine.apply(OrderEvent::SetItemCount {
        size: Size::ExtraLarge,
        count: 1,
    })?;

    // 900 + 100 + 50
    assert_eq!(update.total, Money::from_minor(1050, USD));

    Ok(())
}

#[test]
fn large_signature_pair_is_half_price() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    check_toppings(&mut engine, &["Barbecue chicken", "Pepperoni"], Size::Large)?;

    let update = engine.apply(OrderEvent::SetItemCount {
        size: Size::Large,
        count: 3,
    })?;

    // (800 + 300 + 200) / 2 per item.
    assert_eq!(update.total, Money::from_minor(1950, USD));
    assert_eq!(update.offer, Some("Signature Combo"));
    assert!(update.quote.is_discounted());

    Ok(())
}

#[test]
fn large_four_plain_toppings_win_the_combo() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    check_toppings(
        &mut engine,
        &["Tomatoes", "Onions", "Mushrooms", "Pineapple"],
        Size::Large,
    )?;

    let update = engine.apply(OrderEvent::SetItemCount {
        size: Size::Large,
        count: 1,
    })?;

    // (800 + 345) / 2 = 572.5, rounded away from zero.
    assert_eq!(update.total, Money::from_minor(573, USD));
    assert!(update.quote.is_discounted());

    Ok(())
}

#[test]
fn large_three_plain_toppings_pay_the_naive_price() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    check_toppings(&mut engine, &["Tomatoes", "Onions", "Mushrooms"], Size::Large)?;

    let update = engine.apply(OrderEvent::SetItemCount {
        size: Size::Large,
        count: 1,
    })?;

    // 800 + 270, no discount: three plain toppings only score three points.
    assert_eq!(update.total, Money::from_minor(1070, USD));
    assert_eq!(update.offer, None);
    assert!(!update.quote.is_discounted());

    Ok(())
}

#[test]
fn medium_flat_rate_ignores_which_two_toppings() -> TestResult {
    let catalog = Catalog::standard()?;

    for pair in [["Tomatoes", "Onions"], ["Barbecue chicken", "Pepperoni"]] {
        let mut engine = OrderEngine::new(&catalog);

        check_toppings(&mut engine, &pair, Size::Medium)?;

        let update = engine.apply(OrderEvent::SetItemCount {
            size: Size::Medium,
            count: 3,
        })?;

        // 500 * 3 regardless of the toppings picked.
        assert_eq!(update.total, Money::from_minor(1500, USD));
        assert_eq!(update.offer, Some("Two-Topping Special"));
    }

    Ok(())
}

#[test]
fn medium_pair_bundle_prices_two_pairs_and_a_leftover() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    check_toppings(
        &mut engine,
        &["Tomatoes", "Onions", "Bell pepper", "Mushrooms"],
        Size::Medium,
    )?;

    let update = engine.apply(OrderEvent::SetItemCount {
        size: Size::Medium,
        count: 5,
    })?;

    // Two pairs at 900 plus one leftover at the naive 1070.
    assert_eq!(update.total, Money::from_minor(2870, USD));
    assert_eq!(update.offer, Some("Four-Topping Family Deal"));

    Ok(())
}

#[test]
fn medium_pair_bundle_needs_two_items() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    check_toppings(
        &mut engine,
        &["Tomatoes", "Onions", "Bell pepper", "Mushrooms"],
        Size::Medium,
    )?;

    let update = engine.apply(OrderEvent::SetItemCount {
        size: Size::Medium,
        count: 1,
    })?;

    // A single item pays the naive 700 + 370.
    assert_eq!(update.total, Money::from_minor(1070, USD));
    assert_eq!(update.offer, None);

    Ok(())
}

#[test]
fn medium_even_item_count_has_no_leftover_charge() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    check_toppings(
        &mut engine,
        &["Tomatoes", "Onions", "Bell pepper", "Mushrooms"],
        Size::Medium,
    )?;

    let update = engine.apply(OrderEvent::SetItemCount {
        size: Size::Medium,
        count: 4,
    })?;

    assert_eq!(update.total, Money::from_minor(1800, USD));

    Ok(())
}

#[test]
fn toggling_a_topping_twice_restores_the_subtotal() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    engine.apply(OrderEvent::SetItemCount {
        size: Size::Medium,
        count: 2,
    })?;

    let before = engine.total(Size::Medium);
    let mushrooms = topping(&catalog, "Mushrooms")?;

    let changed = engine.apply(OrderEvent::ToggleTopping {
        topping: mushrooms,
        size: Size::Medium,
    })?;

    assert_ne!(changed.total, before);

    let restored = engine.apply(OrderEvent::ToggleTopping {
        topping: mushrooms,
        size: Size::Medium,
    })?;

    assert_eq!(restored.total, before);

    Ok(())
}

#[test]
fn negative_item_count_is_rejected_without_side_effects() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    engine.apply(OrderEvent::SetItemCount {
        size: Size::Small,
        count: 4,
    })?;

    let before = engine.total(Size::Small);

    let result = engine.apply(OrderEvent::SetItemCount {
        size: Size::Small,
        count: -1,
    });

    assert!(matches!(
        result,
        Err(OrderError::Selection(SelectionError::InvalidCount(-1))),
    ));
    assert_eq!(engine.selection().item_count(Size::Small), 4);
    assert_eq!(engine.total(Size::Small), before);

    Ok(())
}

#[test]
fn sizes_price_independently() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    // Two toppings on medium fire its flat rate; the same two toppings on
    // large do not reach four points, so large stays naive.
    for size in [Size::Medium, Size::Large] {
        check_toppings(&mut engine, &["Tomatoes", "Onions"], size)?;
        engine.apply(OrderEvent::SetItemCount { size, count: 1 })?;
    }

    assert_eq!(engine.total(Size::Medium), Money::from_minor(500, USD));
    assert_eq!(engine.total(Size::Large), Money::from_minor(950, USD));

    Ok(())
}

#[test]
fn a_full_order_sums_line_totals() -> TestResult {
    let catalog = Catalog::standard()?;
    let mut engine = OrderEngine::new(&catalog);

    check_toppings(&mut engine, &["Barbecue chicken", "Pepperoni"], Size::Large)?;
    engine.apply(OrderEvent::SetItemCount {
        size: Size::Large,
        count: 2,
    })?;

    check_toppings(&mut engine, &["Tomatoes", "Onions"], Size::ExtraLarge)?;
    engine.apply(OrderEvent::SetItemCount {
        size: Size::ExtraLarge,
        count: 1,
    })?;

    // 650 * 2 + 1050
    assert_eq!(engine.grand_total()?, Money::from_minor(2350, USD));

    Ok(())
}
