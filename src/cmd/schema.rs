//! Schema command - print the JSON Schema of `calc --json` output

use crate::cmd::calc::NetIncomeData;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = schema_for!(NetIncomeData);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
