use clap::{Parser, Subcommand};

use crate::cmd::{
    brackets::BracketsCommand, calc::CalcCommand, schema::SchemaCommand, tax::TaxCommand,
};

mod cmd;
mod money;
mod tax;

#[derive(Parser, Debug)]
#[command(name = "sgtax", version, author)]
#[command(about = "Singapore Income Tax and Savings Calculator")]
struct Opts {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate net income and savings (default)
    Calc(CalcCommand),
    /// Calculate income tax payable on an annual income
    Tax(TaxCommand),
    /// Show the progressive tax brackets
    Brackets(BracketsCommand),
    /// Print the JSON Schema of calc --json output
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    match opts.command {
        Some(Command::Calc(calc)) => calc.exec(),
        Some(Command::Tax(tax)) => tax.exec(),
        Some(Command::Brackets(brackets)) => brackets.exec(),
        Some(Command::Schema(schema)) => schema.exec(),
        None => CalcCommand::default().exec(),
    }
}
