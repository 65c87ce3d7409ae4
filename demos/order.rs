//! Order Demo
//!
//! Replays a scripted family order against the standard menu and prints the
//! itemized ticket.
//!
//! Use `-m` to price against a menu file instead of the bundled one
//! Use `--medium` / `--large` to change the scripted item counts

use std::{io, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};

use crust::{
    catalog::Catalog,
    engine::{OrderEngine, OrderEvent},
    menu::MenuFixture,
    sizes::Size,
    ticket::OrderTicket,
    toppings::ToppingKey,
    utils::DemoOrderArgs,
};

/// Order Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoOrderArgs::parse();

    let catalog = match args.menu.as_deref() {
        Some(path) => MenuFixture::from_path(path)?.into_catalog()?,
        None => Catalog::standard()?,
    };

    let mut engine = OrderEngine::new(&catalog);

    let start = Instant::now();

    // Five medium four-topping pizzas: lands the pair bundle, with the odd
    // one out at the naive price.
    for name in ["Tomatoes", "Onions", "Bell pepper", "Mushrooms"] {
        engine.apply(OrderEvent::SetTopping {
            topping: topping(&catalog, name)?,
            size: Size::Medium,
            checked: true,
        })?;
    }

    engine.apply(OrderEvent::SetItemCount {
        size: Size::Medium,
        count: args.medium,
    })?;

    // Two large signature pizzas: half price through the combo.
    for name in ["Barbecue chicken", "Pepperoni"] {
        engine.apply(OrderEvent::SetTopping {
            topping: topping(&catalog, name)?,
            size: Size::Large,
            checked: true,
        })?;
    }

    engine.apply(OrderEvent::SetItemCount {
        size: Size::Large,
        count: args.large,
    })?;

    // One extra-large with no offer in play.
    for name in ["Tomatoes", "Onions"] {
        engine.apply(OrderEvent::SetTopping {
            topping: topping(&catalog, name)?,
            size: Size::ExtraLarge,
            checked: true,
        })?;
    }

    let update = engine.apply(OrderEvent::SetItemCount {
        size: Size::ExtraLarge,
        count: 1,
    })?;

    println!(
        "{} line repriced to {} ({} items)",
        update.size.label(),
        update.total,
        update.item_count,
    );

    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let handle = stdout.lock();

    OrderTicket::build(&engine)?.write_to(handle)?;

    println!("Priced in {}", elapsed.human(Truncate::Nano));

    Ok(())
}

fn topping(catalog: &Catalog<'_>, name: &str) -> Result<ToppingKey> {
    catalog
        .topping_by_name(name)
        .with_context(|| format!("menu has no topping named {name}"))
}
