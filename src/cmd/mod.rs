pub mod brackets;
pub mod calc;
pub mod prompt;
pub mod schema;
pub mod tax;
