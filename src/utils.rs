//! Utils

use clap::Parser;

/// Arguments for the order demo
#[derive(Debug, Parser)]
pub struct DemoOrderArgs {
    /// Path to a menu file (defaults to the bundled standard menu)
    #[clap(short, long)]
    pub menu: Option<String>,

    /// Number of medium pizzas in the scripted order
    #[clap(long, default_value_t = 5)]
    pub medium: i64,

    /// Number of large pizzas in the scripted order
    #[clap(long, default_value_t = 2)]
    pub large: i64,
}
