use crate::tax::sg::{Bracket, BRACKETS};
use crate::tax::{checked, ensure_non_negative, TaxError};
use rust_decimal::Decimal;

/// Portion of income falling within a single bracket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSlice {
    /// Income level the slice starts at
    pub lower: Decimal,
    /// Upper limit of the bracket, `None` for the top bracket
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
    /// Income taxed within this slice
    pub amount: Decimal,
    pub tax: Decimal,
}

/// Result of walking the bracket table for one annual income
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub income: Decimal,
    pub slices: Vec<BracketSlice>,
    tax: Decimal,
}

impl TaxBreakdown {
    /// Sum of per-slice taxes
    pub fn total_tax(&self) -> Decimal {
        self.tax
    }

    /// Sum of per-slice taxable amounts, always equal to `income`
    pub fn taxed_income(&self) -> Option<Decimal> {
        self.slices
            .iter()
            .try_fold(Decimal::ZERO, |total, s| total.checked_add(s.amount))
    }

    /// Rate applied to the last dollar of income
    pub fn marginal_rate(&self) -> Decimal {
        self.slices.last().map_or(Decimal::ZERO, |s| s.rate)
    }

    pub fn effective_rate(&self) -> Decimal {
        if self.income.is_zero() {
            Decimal::ZERO
        } else {
            self.total_tax() / self.income
        }
    }
}

/// Calculate income tax payable on an annual income
pub fn calculate_tax(annual_income: Decimal) -> Result<Decimal, TaxError> {
    tax_breakdown(annual_income).map(|breakdown| breakdown.total_tax())
}

/// Split an annual income into contiguous bracket slices.
///
/// Brackets are consumed in order of increasing upper limit. Every bracket the
/// income exceeds contributes its full width; the first bracket whose limit is
/// not exceeded contributes the remainder and ends the walk.
pub fn tax_breakdown(annual_income: Decimal) -> Result<TaxBreakdown, TaxError> {
    let income = ensure_non_negative("annual income", annual_income)?;
    let slices = walk_brackets(income, &BRACKETS)?;
    let tax = checked(
        "tax payable",
        slices
            .iter()
            .try_fold(Decimal::ZERO, |total, s| total.checked_add(s.tax)),
    )?;
    let breakdown = TaxBreakdown { income, slices, tax };
    debug_assert_eq!(breakdown.taxed_income(), Some(income));
    log::debug!(
        "Income {} split into {} slice(s), tax {}",
        income,
        breakdown.slices.len(),
        breakdown.total_tax()
    );
    Ok(breakdown)
}

fn walk_brackets(income: Decimal, brackets: &[Bracket]) -> Result<Vec<BracketSlice>, TaxError> {
    brackets
        .iter()
        .scan((Decimal::ZERO, false), |(previous_limit, done), bracket| {
            if *done {
                return None;
            }
            let upper = match bracket.upper_limit {
                Some(limit) if income > limit => limit,
                _ => {
                    *done = true;
                    income
                }
            };
            let sliced = checked("annual income", upper.checked_sub(*previous_limit)).and_then(
                |amount| {
                    checked("annual income", amount.checked_mul(bracket.rate))
                        .map(|tax| (amount, tax))
                },
            );
            let (amount, tax) = match sliced {
                Ok(sliced) => sliced,
                Err(err) => {
                    *done = true;
                    return Some(Err(err));
                }
            };
            let slice = BracketSlice {
                lower: *previous_limit,
                upper_limit: bracket.upper_limit,
                rate: bracket.rate,
                amount,
                tax,
            };
            log::debug!(
                "Slice {} - {:?} @ {}: {} taxed {}",
                slice.lower,
                slice.upper_limit,
                slice.rate,
                slice.amount,
                slice.tax
            );
            *previous_limit = upper;
            Some(Ok(slice))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tax(income: Decimal) -> Decimal {
        calculate_tax(income).unwrap()
    }

    #[test]
    fn zero_income_pays_no_tax() {
        assert_eq!(tax(dec!(0)), dec!(0));
    }

    #[test]
    fn income_within_first_bracket_is_tax_free() {
        assert_eq!(tax(dec!(15000)), dec!(0));
        assert_eq!(tax(dec!(20000)), dec!(0));
    }

    #[test]
    fn second_bracket() {
        assert_eq!(tax(dec!(30000)), dec!(200.00));
    }

    #[test]
    fn third_bracket() {
        assert_eq!(tax(dec!(40000)), dec!(550.00));
    }

    #[test]
    fn partial_fourth_bracket() {
        // 550 to 40k, then 20k at 7%
        assert_eq!(tax(dec!(60000)), dec!(1950.00));
    }

    #[test]
    fn cumulative_tax_at_bracket_limits() {
        let expected = [
            (dec!(80000), dec!(3350)),
            (dec!(120000), dec!(7950)),
            (dec!(160000), dec!(13950)),
            (dec!(200000), dec!(21150)),
            (dec!(240000), dec!(28750)),
            (dec!(280000), dec!(36550)),
            (dec!(320000), dec!(44550)),
            (dec!(500000), dec!(84150)),
            (dec!(1000000), dec!(199150)),
        ];
        for (income, expected_tax) in expected {
            assert_eq!(tax(income), expected_tax, "income {income}");
        }
    }

    #[test]
    fn excess_over_one_million_taxed_at_top_rate() {
        assert_eq!(tax(dec!(1200000)), dec!(247150.00));
    }

    #[test]
    fn fractional_income() {
        // 0.50 over the tax free threshold at 2%
        assert_eq!(tax(dec!(20000.50)), dec!(0.01));
    }

    #[test]
    fn negative_income_rejected() {
        assert_eq!(
            calculate_tax(dec!(-1)),
            Err(TaxError::NegativeAmount {
                field: "annual income",
                value: dec!(-1)
            })
        );
    }

    #[test]
    fn tax_is_non_negative_and_monotonic() {
        let mut previous = Decimal::ZERO;
        let mut income = Decimal::ZERO;
        while income <= dec!(1500000) {
            let t = tax(income);
            assert!(t >= Decimal::ZERO, "negative tax at {income}");
            assert!(t >= previous, "tax decreased at {income}");
            previous = t;
            income += dec!(2500);
        }
    }

    #[test]
    fn slices_partition_income() {
        for income in [
            dec!(0),
            dec!(1),
            dec!(20000),
            dec!(20001),
            dec!(39999.99),
            dec!(320000),
            dec!(999999.99),
            dec!(1000000),
            dec!(5000000),
        ] {
            let breakdown = tax_breakdown(income).unwrap();
            assert_eq!(breakdown.taxed_income(), Some(income), "income {income}");

            let mut expected_lower = Decimal::ZERO;
            for slice in &breakdown.slices {
                assert_eq!(slice.lower, expected_lower);
                assert!(slice.amount >= Decimal::ZERO);
                assert_eq!(slice.tax, slice.amount * slice.rate);
                expected_lower += slice.amount;
            }
        }
    }

    #[test]
    fn walk_stops_at_first_unexceeded_bracket() {
        let breakdown = tax_breakdown(dec!(30000)).unwrap();
        assert_eq!(breakdown.slices.len(), 2);
        assert_eq!(breakdown.slices[1].upper_limit, Some(dec!(30000)));
        assert_eq!(breakdown.slices[1].amount, dec!(10000));

        let breakdown = tax_breakdown(dec!(30000.01)).unwrap();
        assert_eq!(breakdown.slices.len(), 3);
        assert_eq!(breakdown.slices[2].amount, dec!(0.01));
    }

    #[test]
    fn top_bracket_reached_above_one_million() {
        let breakdown = tax_breakdown(dec!(1200000)).unwrap();
        assert_eq!(breakdown.slices.len(), BRACKETS.len());
        let top = breakdown.slices.last().unwrap();
        assert_eq!(top.upper_limit, None);
        assert_eq!(top.amount, dec!(200000));
        assert_eq!(top.tax, dec!(48000.00));
        assert_eq!(breakdown.marginal_rate(), dec!(0.24));
    }

    #[test]
    fn effective_rate() {
        let breakdown = tax_breakdown(dec!(40000)).unwrap();
        assert_eq!(breakdown.effective_rate(), dec!(0.01375));
        assert_eq!(tax_breakdown(dec!(0)).unwrap().effective_rate(), dec!(0));
    }

    #[test]
    fn largest_income_is_taxed_without_overflow() {
        let breakdown = tax_breakdown(Decimal::MAX).unwrap();
        assert_eq!(breakdown.taxed_income(), Some(Decimal::MAX));
        assert!(breakdown.total_tax() < Decimal::MAX);
        assert_eq!(breakdown.marginal_rate(), dec!(0.24));
    }

    #[test]
    fn custom_table_walk() {
        let brackets = [
            Bracket {
                upper_limit: Some(dec!(100)),
                rate: dec!(0.1),
            },
            Bracket {
                upper_limit: None,
                rate: dec!(0.5),
            },
        ];
        let slices = walk_brackets(dec!(150), &brackets).unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices.iter().map(|s| s.tax).sum::<Decimal>(), dec!(35));
    }

    #[test]
    fn slice_tax_overflow_is_an_error() {
        let brackets = [Bracket {
            upper_limit: None,
            rate: dec!(2),
        }];
        assert_eq!(
            walk_brackets(Decimal::MAX, &brackets),
            Err(TaxError::AmountTooLarge {
                field: "annual income"
            })
        );
    }
}
