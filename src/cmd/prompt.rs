//! Interactive console input for the calc command

use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid {field} '{input}': expected a number")]
    InvalidAmount { field: &'static str, input: String },
    #[error("invalid choice '{input}': expected yes or no")]
    InvalidChoice { input: String },
    #[error("input ended before {field} was entered")]
    UnexpectedEof { field: &'static str },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads answers to prompts, one per line
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Prompt for a monetary amount in SGD
    pub fn amount(&mut self, field: &'static str, prompt: &str) -> Result<Decimal, InputError> {
        let line = self.ask(field, prompt)?;
        parse_amount(&line).ok_or(InputError::InvalidAmount { field, input: line })
    }

    /// Prompt for a yes/no answer
    pub fn confirm(&mut self, field: &'static str, prompt: &str) -> Result<bool, InputError> {
        let line = self.ask(field, prompt)?;
        parse_choice(&line).ok_or(InputError::InvalidChoice { input: line })
    }

    fn ask(&mut self, field: &'static str, prompt: &str) -> Result<String, InputError> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::UnexpectedEof { field });
        }
        Ok(line.trim().to_string())
    }
}

/// Parse a plain decimal amount. Commas are accepted as thousands separators;
/// exponents, underscores and currency symbols are not.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let input = input.trim();
    let unsigned = input.strip_prefix('-').unwrap_or(input);
    if unsigned.is_empty()
        || !unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }
    input.replace(',', "").parse::<Decimal>().ok()
}

/// `parse_amount` for clap flags
pub fn parse_amount_arg(input: &str) -> Result<Decimal, String> {
    parse_amount(input).ok_or_else(|| format!("'{}' is not an amount", input))
}

pub fn parse_choice(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
