//! Order Ticket
//!
//! Renders the current order as a terminal table: one row per ordered size
//! with its toppings, list price, offer price and savings, plus a
//! subtotal/total/savings summary block.

use std::{fmt::Write as _, io};

use decimal_percentage::Percentage;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    engine::OrderEngine,
    offers::QuoteError,
    sizes::Size,
    totals::price_size,
};

/// Errors that can occur when building or rendering a ticket.
#[derive(Debug, Error)]
pub enum TicketError {
    /// Repricing a size failed.
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    Io,
}

/// One ordered size on the ticket.
#[derive(Debug, Clone)]
pub struct TicketLine<'a> {
    /// The size.
    pub size: Size,

    /// Number of pizzas ordered.
    pub item_count: u32,

    /// Checked topping names, in menu order.
    pub toppings: Vec<&'a str>,

    /// Line total with no offer applied.
    pub naive_total: Money<'a, Currency>,

    /// Payable line total.
    pub total: Money<'a, Currency>,

    /// Name of the offer that fired, if any.
    pub offer: Option<&'a str>,
}

impl<'a> TicketLine<'a> {
    /// Amount the offer saved on this line.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.naive_total.sub(self.total)
    }
}

/// Snapshot of the whole order, ready to render.
#[derive(Debug, Clone)]
pub struct OrderTicket<'a> {
    lines: SmallVec<[TicketLine<'a>; 4]>,
    subtotal: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> OrderTicket<'a> {
    /// Snapshot the engine's current order.
    ///
    /// Sizes with a zero item count contribute to the summary (as zero) but
    /// get no row.
    ///
    /// # Errors
    ///
    /// Returns a [`TicketError`] if repricing or money arithmetic fails.
    pub fn build(engine: &OrderEngine<'a>) -> Result<Self, TicketError> {
        let catalog = engine.catalog();
        let currency = catalog.currency();

        let mut lines: SmallVec<[TicketLine<'a>; 4]> = smallvec![];
        let mut subtotal = Money::from_minor(0, currency);
        let mut total = Money::from_minor(0, currency);

        for size in Size::ALL {
            let update = price_size(catalog, engine.selection(), size)?;

            subtotal = subtotal.add(update.naive_total)?;
            total = total.add(update.total)?;

            if update.item_count == 0 {
                continue;
            }

            let toppings = update
                .contributions
                .iter()
                .filter_map(|entry| {
                    catalog
                        .topping(entry.topping)
                        .map(|topping| topping.name.as_str())
                })
                .collect();

            lines.push(TicketLine {
                size,
                item_count: update.item_count,
                toppings,
                naive_total: update.naive_total,
                total: update.total,
                offer: update.offer,
            });
        }

        Ok(Self {
            lines,
            subtotal,
            total,
        })
    }

    /// Rows of the ticket, in size order.
    #[must_use]
    pub fn lines(&self) -> &[TicketLine<'a>] {
        &self.lines
    }

    /// Order total with no offers applied.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Payable order total.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Amount saved across the order.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Savings as a fraction of the pre-offer subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let savings = self.savings()?;

        // Ratio in decimal space to avoid integer truncation.
        let savings_minor = savings.to_minor_units();
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);

        Ok(Percentage::from(savings_dec / subtotal_dec))
    }

    /// Render the ticket table and summary.
    ///
    /// # Errors
    ///
    /// Returns a [`TicketError`] if the ticket cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), TicketError> {
        let mut builder = Builder::default();

        builder.push_record([
            "Size",
            "Qty",
            "Toppings",
            "List Price",
            "Offer Price",
            "Savings",
            "Offer",
        ]);

        let mut line_rows: SmallVec<[usize; 4]> = smallvec![];
        let mut color_ops: SmallVec<[(usize, usize, Color); 8]> = smallvec![];

        for (idx, line) in self.lines.iter().enumerate() {
            let row = idx + 1;

            line_rows.push(row);

            let (offer_price, savings_cell) = match line.offer {
                Some(_) => (
                    format!("{}", line.total),
                    format!(
                        "({}%) -{}",
                        percent_points(line_savings_percent(line)?),
                        line.savings()?,
                    ),
                ),
                None => (String::new(), String::new()),
            };

            builder.push_record([
                line.size.label().to_string(),
                format!("{}", line.item_count),
                line.toppings.join("\n"),
                format!("{}", line.naive_total),
                offer_price.clone(),
                savings_cell,
                line.offer.unwrap_or_default().to_string(),
            ]);

            color_ops.push((row, 2, color_dark_grey()));

            if !offer_price.is_empty() {
                color_ops.push((row, 4, Color::FG_GREEN));
            }
        }

        write_ticket_table(&mut out, builder, &line_rows, color_ops)?;
        write_ticket_summary(&mut out, self)?;

        Ok(())
    }
}

/// Savings fraction for a single line.
fn line_savings_percent(line: &TicketLine<'_>) -> Result<Percentage, MoneyError> {
    let savings_minor = line.savings()?.to_minor_units();
    let naive_minor = line.naive_total.to_minor_units();

    if naive_minor == 0 {
        return Ok(Percentage::from(0.0));
    }

    let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
    let naive_dec = Decimal::from_i64(naive_minor).unwrap_or(Decimal::ZERO);

    Ok(Percentage::from(savings_dec / naive_dec))
}

fn write_ticket_table(
    out: &mut impl io::Write,
    builder: Builder,
    line_rows: &[usize],
    color_ops: SmallVec<[(usize, usize, Color); 8]>,
) -> Result<(), TicketError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    for &row in line_rows {
        if row > 1 {
            theme.insert_horizontal_line(row, separator);
        }
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| TicketError::Io)
}

fn write_ticket_summary(
    out: &mut impl io::Write,
    ticket: &OrderTicket<'_>,
) -> Result<(), TicketError> {
    let savings = ticket.savings()?;
    let savings_percent_points = percent_points(ticket.savings_percent()?);

    let subtotal_label = " Subtotal:";
    let total_label = " \x1b[1mTotal:\x1b[0m";
    let savings_label = " Savings:";

    let subtotal_val = format!("{}  ", ticket.subtotal());
    let total_val = format!("{}  ", ticket.total());
    let savings_val = format!("({savings_percent_points:.2}%) {savings}  ");

    let label_width = visible_width(subtotal_label)
        .max(visible_width(total_label))
        .max(visible_width(savings_label));

    let value_width = subtotal_val
        .len()
        .max(total_val.len())
        .max(savings_val.len());

    write_summary_line(out, subtotal_label, &subtotal_val, label_width, value_width)?;

    write_summary_line(
        out,
        total_label,
        &format!("\x1b[1m{total_val}\x1b[0m"),
        label_width,
        value_width,
    )?;

    write_summary_line(out, savings_label, &savings_val, label_width, value_width)?;

    writeln!(out).map_err(|_err| TicketError::Io)
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print
    // percent points.
    ((percentage * Decimal::ONE) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO)).round_dp(2)
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
///
/// Box-drawing characters occupy the Unicode range U+2500..U+257F; runs of
/// them are wrapped in a single grey escape sequence, leaving cell content
/// untouched.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a fixed-width value
/// column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), TicketError> {
    let label_vis = visible_width(label);
    let value_vis = visible_width(value);

    let label_pad = label_col_width.saturating_sub(label_vis);
    let value_pad = value_col_width.saturating_sub(value_vis);

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| TicketError::Io)
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}
