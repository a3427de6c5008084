//! Calc command - net income and savings after tax, stocks and expenses

use crate::cmd::prompt::{parse_amount_arg, Prompter};
use crate::money::{format_plain, format_sgd};
use crate::tax::{net_income, NetIncomeReport};
use anyhow::Context;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

const SALARY_PROMPT: &str = "Enter your monthly salary (SGD): ";
const RENT_PROMPT: &str = "Enter your monthly house rent (SGD): ";
const UTILITIES_PROMPT: &str = "Enter your monthly utilities (SGD): ";
const STOCKS_PROMPT: &str = "Do you want to invest 15% of salary in stocks? (yes/no): ";

#[derive(Args, Debug, Default)]
pub struct CalcCommand {
    /// Monthly salary in SGD, prompted for when omitted
    #[arg(short, long, value_parser = parse_amount_arg)]
    salary: Option<Decimal>,

    /// Monthly house rent in SGD, prompted for when omitted
    #[arg(short, long, value_parser = parse_amount_arg)]
    rent: Option<Decimal>,

    /// Monthly utilities in SGD, prompted for when omitted
    #[arg(short, long, value_parser = parse_amount_arg)]
    utilities: Option<Decimal>,

    /// Invest 15% of salary in stocks, prompted for when omitted
    #[arg(short, long, value_enum, ignore_case = true)]
    invest_stocks: Option<Choice>,

    /// Output as JSON instead of formatted text
    #[arg(long, conflicts_with_all = ["csv", "table"])]
    json: bool,

    /// Output as CSV label,value rows
    #[arg(long, conflicts_with = "table")]
    csv: bool,

    /// Output as a formatted table
    #[arg(long)]
    table: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Choice {
    #[value(alias = "y")]
    Yes,
    #[value(alias = "n")]
    No,
}

impl From<Choice> for bool {
    fn from(choice: Choice) -> Self {
        choice == Choice::Yes
    }
}

/// Figures the calculation runs on, after prompting for anything missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CalcInput {
    monthly_salary: Decimal,
    rent: Decimal,
    utilities: Decimal,
    invest_in_stocks: bool,
}

/// Net income report for JSON output
#[derive(Debug, Serialize, JsonSchema)]
pub struct NetIncomeData {
    /// Monthly salary multiplied by twelve
    pub annual_salary: String,
    /// Progressive income tax on the annual salary
    pub tax_payable: String,
    /// 15% of annual salary when investing in stocks, otherwise zero
    pub stock_deduction: String,
    /// Annual salary less tax and stock deduction
    pub net_annual_income: String,
    /// Net annual income less yearly rent and utilities
    pub final_yearly_savings: String,
    pub net_monthly_income: String,
    pub final_monthly_savings: String,
}

impl From<&NetIncomeReport> for NetIncomeData {
    fn from(report: &NetIncomeReport) -> Self {
        NetIncomeData {
            annual_salary: format_plain(report.annual_salary),
            tax_payable: format_plain(report.tax_payable),
            stock_deduction: format_plain(report.stock_deduction),
            net_annual_income: format_plain(report.net_annual_income),
            final_yearly_savings: format_plain(report.final_yearly_savings),
            net_monthly_income: format_plain(report.net_monthly_income),
            final_monthly_savings: format_plain(report.final_monthly_savings),
        }
    }
}

#[derive(Debug, Tabled)]
struct ResultRow {
    #[tabled(rename = "Item")]
    label: &'static str,
    #[tabled(rename = "Amount (SGD)")]
    value: String,
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let prompts: Box<dyn Write> = if self.machine_readable() {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        let input = self.resolve_input(Prompter::new(stdin.lock(), prompts))?;
        log::debug!("Calculating with {:?}", input);

        let report = net_income(
            input.monthly_salary,
            input.rent,
            input.utilities,
            input.invest_in_stocks,
        )?;

        if self.json {
            self.print_json(&report)
        } else if self.csv {
            self.write_csv(&report)
        } else if self.table {
            self.print_table(&report);
            Ok(())
        } else {
            self.print_text(&report);
            Ok(())
        }
    }

    /// JSON and CSV output keep stdout free of prompt text
    fn machine_readable(&self) -> bool {
        self.json || self.csv
    }

    /// Take figures from the command line, prompting for the rest
    fn resolve_input<R: BufRead, W: Write>(
        &self,
        mut prompter: Prompter<R, W>,
    ) -> anyhow::Result<CalcInput> {
        let monthly_salary = match self.salary {
            Some(salary) => salary,
            None => prompter.amount("monthly salary", SALARY_PROMPT)?,
        };
        let rent = match self.rent {
            Some(rent) => rent,
            None => prompter.amount("rent", RENT_PROMPT)?,
        };
        let utilities = match self.utilities {
            Some(utilities) => utilities,
            None => prompter.amount("utilities", UTILITIES_PROMPT)?,
        };
        let invest_in_stocks = match self.invest_stocks {
            Some(choice) => choice.into(),
            None => prompter
                .confirm("stock investment", STOCKS_PROMPT)
                .context("Failed to read stock investment choice")?,
        };

        Ok(CalcInput {
            monthly_salary,
            rent,
            utilities,
            invest_in_stocks,
        })
    }

    fn print_text(&self, report: &NetIncomeReport) {
        println!();
        println!("--- Results ---");
        for line in result_lines(report) {
            println!("{}", line);
        }
    }

    fn print_table(&self, report: &NetIncomeReport) {
        let table = Table::new(result_rows(report))
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn print_json(&self, report: &NetIncomeReport) -> anyhow::Result<()> {
        let data = NetIncomeData::from(report);
        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }

    fn write_csv(&self, report: &NetIncomeReport) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        wtr.write_record(["label", "value"])?;
        for (label, value) in report.entries() {
            wtr.write_record([label, format_plain(value).as_str()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn result_lines(report: &NetIncomeReport) -> Vec<String> {
    report
        .entries()
        .iter()
        .map(|(label, value)| format!("{}: {}", label, format_sgd(*value)))
        .collect()
}

fn result_rows(report: &NetIncomeReport) -> Vec<ResultRow> {
    report
        .entries()
        .into_iter()
        .map(|(label, value)| ResultRow {
            label,
            value: format_sgd(value),
        })
        .collect()
}
