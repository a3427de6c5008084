use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Year of Assessment the bracket table applies to
pub const YEAR_OF_ASSESSMENT: i32 = 2024;

/// One progressive tier: income up to `upper_limit` is taxed at `rate`.
/// The top tier has no upper limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

impl Bracket {
    const fn bounded(upper_limit: Decimal, rate: Decimal) -> Self {
        Bracket {
            upper_limit: Some(upper_limit),
            rate,
        }
    }

    const fn unbounded(rate: Decimal) -> Self {
        Bracket {
            upper_limit: None,
            rate,
        }
    }
}

/// Singapore resident income tax rates, YA 2024
pub const BRACKETS: [Bracket; 13] = [
    Bracket::bounded(dec!(20000), dec!(0.00)),
    Bracket::bounded(dec!(30000), dec!(0.02)),
    Bracket::bounded(dec!(40000), dec!(0.035)),
    Bracket::bounded(dec!(80000), dec!(0.07)),
    Bracket::bounded(dec!(120000), dec!(0.115)),
    Bracket::bounded(dec!(160000), dec!(0.15)),
    Bracket::bounded(dec!(200000), dec!(0.18)),
    Bracket::bounded(dec!(240000), dec!(0.19)),
    Bracket::bounded(dec!(280000), dec!(0.195)),
    Bracket::bounded(dec!(320000), dec!(0.20)),
    Bracket::bounded(dec!(500000), dec!(0.22)),
    Bracket::bounded(dec!(1000000), dec!(0.23)),
    // Excess of 1M
    Bracket::unbounded(dec!(0.24)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_limits_strictly_increase() {
        let limits: Vec<Decimal> = BRACKETS.iter().filter_map(|b| b.upper_limit).collect();
        assert_eq!(limits.len(), BRACKETS.len() - 1);
        assert!(limits.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn only_last_bracket_is_unbounded() {
        let (last, rest) = BRACKETS.split_last().unwrap();
        assert_eq!(last.upper_limit, None);
        assert_eq!(last.rate, dec!(0.24));
        assert!(rest.iter().all(|b| b.upper_limit.is_some()));
    }

    #[test]
    fn rates_never_decrease() {
        assert!(BRACKETS.windows(2).all(|w| w[0].rate <= w[1].rate));
    }

    #[test]
    fn first_bracket_is_tax_free() {
        assert_eq!(BRACKETS[0].upper_limit, Some(dec!(20000)));
        assert_eq!(BRACKETS[0].rate, Decimal::ZERO);
    }
}
