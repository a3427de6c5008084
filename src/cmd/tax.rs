//! Tax command - income tax payable on an annual income

use crate::cmd::prompt::parse_amount_arg;
use crate::money::{format_plain, format_rate, format_sgd};
use crate::tax::{tax_breakdown, BracketSlice, TaxBreakdown, YEAR_OF_ASSESSMENT};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct TaxCommand {
    /// Annual chargeable income in SGD
    #[arg(value_parser = parse_amount_arg)]
    income: Decimal,

    /// Show how the income is split across tax brackets
    #[arg(short, long)]
    breakdown: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TaxData {
    year_of_assessment: i32,
    income: String,
    tax_payable: String,
    effective_rate_pct: String,
    marginal_rate_pct: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    slices: Vec<SliceData>,
}

#[derive(Debug, Serialize)]
struct SliceData {
    lower: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_limit: Option<String>,
    rate_pct: String,
    amount: String,
    tax: String,
}

#[derive(Debug, Tabled)]
pub struct SliceRow {
    #[tabled(rename = "Band")]
    pub band: String,
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "Taxable")]
    pub amount: String,
    #[tabled(rename = "Tax")]
    pub tax: String,
}

impl From<&BracketSlice> for SliceRow {
    fn from(slice: &BracketSlice) -> Self {
        SliceRow {
            band: band_label(slice.lower, slice.upper_limit),
            rate: format_rate(slice.rate),
            amount: format_sgd(slice.amount),
            tax: format_sgd(slice.tax),
        }
    }
}

impl TaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let breakdown = tax_breakdown(self.income)?;
        log::info!("Tax payable on {}: {}", breakdown.income, breakdown.total_tax());

        if self.json {
            self.print_json(&breakdown)
        } else {
            self.print_text(&breakdown);
            Ok(())
        }
    }

    fn print_text(&self, breakdown: &TaxBreakdown) {
        println!();
        println!("INCOME TAX (YA {})", YEAR_OF_ASSESSMENT);
        println!("  Income: {}", format_sgd(breakdown.income));
        println!("  Tax Payable: {}", format_sgd(breakdown.total_tax()));
        println!(
            "  Effective Rate: {:.2}% | Marginal Rate: {}",
            breakdown.effective_rate() * Decimal::ONE_HUNDRED,
            format_rate(breakdown.marginal_rate())
        );

        if self.breakdown {
            let rows: Vec<SliceRow> = breakdown.slices.iter().map(SliceRow::from).collect();
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
                .to_string();
            println!();
            println!("{}", table);
        }
        println!();
    }

    fn print_json(&self, breakdown: &TaxBreakdown) -> anyhow::Result<()> {
        let slices = if self.breakdown {
            breakdown
                .slices
                .iter()
                .map(|s| SliceData {
                    lower: format_plain(s.lower),
                    upper_limit: s.upper_limit.map(format_plain),
                    rate_pct: (s.rate * Decimal::ONE_HUNDRED).normalize().to_string(),
                    amount: format_plain(s.amount),
                    tax: format_plain(s.tax),
                })
                .collect()
        } else {
            Vec::new()
        };

        let data = TaxData {
            year_of_assessment: YEAR_OF_ASSESSMENT,
            income: format_plain(breakdown.income),
            tax_payable: format_plain(breakdown.total_tax()),
            effective_rate_pct: format!("{:.2}", breakdown.effective_rate() * Decimal::ONE_HUNDRED),
            marginal_rate_pct: (breakdown.marginal_rate() * Decimal::ONE_HUNDRED)
                .normalize()
                .to_string(),
            slices,
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

/// Describe a band as `$20,000.00 - $30,000.00`, or `above $1,000,000.00` for the top band
pub fn band_label(lower: Decimal, upper_limit: Option<Decimal>) -> String {
    match upper_limit {
        Some(upper) => format!("{} - {}", format_sgd(lower), format_sgd(upper)),
        None => format!("above {}", format_sgd(lower)),
    }
}
