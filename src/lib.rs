//! Crust
//!
//! Crust is a pricing and promotion engine for a made-to-order pizza menu:
//! four sizes, an open topping list, and per-size combo offers, repriced
//! synchronously on every selection change.

pub mod catalog;
pub mod contributions;
pub mod engine;
pub mod menu;
pub mod offers;
pub mod prelude;
pub mod selection;
pub mod sizes;
pub mod tags;
pub mod ticket;
pub mod toppings;
pub mod totals;
pub mod utils;
