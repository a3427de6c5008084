use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Round to cents, halves away from zero
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount as `$1,234.56`. Negative amounts render as `$-1,234.56`.
pub fn format_sgd(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("${}{}.{}", sign, group_thousands(whole), cents)
}

/// Plain two decimal place rendering for machine readable output
pub fn format_plain(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}

/// Render a fractional rate as a percentage, e.g. `0.035` as `3.5%`
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    whole
        .chars()
        .enumerate()
        .fold(String::with_capacity(len + len / 3), |mut out, (i, c)| {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
            out
        })
}
