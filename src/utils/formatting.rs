use console::style;
use tabled::{settings::{Alignment, Style}, Table, Tabled};

use crate::models::cart::OrderSummary;
use crate::views::{CartBody, CartRender, RecommendationRender};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Renders amounts with a currency symbol prefix.
///
/// Whole amounts print without decimals (`₹1000`), fractional amounts
/// with two (`₹49.50`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into() }
    }

    pub fn format(&self, amount: f64) -> String {
        if amount.fract() == 0.0 && amount.abs() < 1e15 {
            format!("{}{}", self.symbol, amount as i64)
        } else {
            format!("{}{:.2}", self.symbol, amount)
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL)
    }
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Quantity")]
    quantity: u32,
    #[tabled(rename = "Total")]
    total: String,
}

pub fn format_cart_table(render: &CartRender, currency: &CurrencyFormat) -> String {
    let records = match &render.body {
        CartBody::Empty { placeholder } => return style(placeholder).dim().to_string(),
        CartBody::Entries(records) => records,
    };

    let rows: Vec<CartTableRow> = records
        .iter()
        .map(|record| CartTableRow {
            product: record.name.clone(),
            price: currency.format(record.price),
            quantity: record.quantity.value,
            total: currency.format(record.line_total),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    format!(
        "{}\n{}: {}",
        table,
        style("Total").bold(),
        style(&render.total_text).green()
    )
}

pub fn format_recommendations(render: &RecommendationRender) -> String {
    match render {
        RecommendationRender::Placeholder { placeholder, .. } => {
            style(placeholder).dim().to_string()
        }
        RecommendationRender::Records { records, .. } if records.is_empty() => String::new(),
        RecommendationRender::Records { records, .. } => records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                format!("{:>3}. {}", style(index + 1).cyan(), record.label)
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn format_order_summary(order: &OrderSummary, currency: &CurrencyFormat) -> String {
    format!(
        "{}\n{}: {}\n{}: {}",
        style("Order placed successfully!").green().bold(),
        style("Total Items").bold(),
        order.item_count,
        style("Total Price").bold(),
        currency.format(order.total)
    )
}

pub fn format_leaderboard(top: &[(String, u64)]) -> String {
    if top.is_empty() {
        return style("No trending products found.").dim().to_string();
    }

    top.iter()
        .enumerate()
        .map(|(rank, (label, count))| {
            format!(
                "{:>3}. {} ({})",
                rank + 1,
                style(label).green(),
                style(format!("sold {} times", count)).dim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
