//! Brackets command - print the progressive rate schedule

use crate::cmd::tax::band_label;
use crate::money::{format_rate, format_sgd};
use crate::tax::{calculate_tax, Bracket, BRACKETS, YEAR_OF_ASSESSMENT};
use clap::Args;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BracketsCommand {}

#[derive(Debug, Tabled)]
struct BracketRow {
    #[tabled(rename = "Chargeable Income")]
    band: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Cumulative Tax")]
    cumulative_tax: String,
}

impl BracketsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rows = bracket_rows(&BRACKETS)?;
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();

        println!();
        println!("RESIDENT TAX RATES (YA {})", YEAR_OF_ASSESSMENT);
        println!("{}", table);
        Ok(())
    }
}

fn bracket_rows(brackets: &[Bracket]) -> anyhow::Result<Vec<BracketRow>> {
    let mut lower = rust_decimal::Decimal::ZERO;
    let mut rows = Vec::with_capacity(brackets.len());
    for bracket in brackets {
        let cumulative_tax = match bracket.upper_limit {
            Some(limit) => format_sgd(calculate_tax(limit)?),
            None => "-".to_string(),
        };
        rows.push(BracketRow {
            band: band_label(lower, bracket.upper_limit),
            rate: format_rate(bracket.rate),
            cumulative_tax,
        });
        if let Some(limit) = bracket.upper_limit {
            lower = limit;
        }
    }
    Ok(rows)
}
