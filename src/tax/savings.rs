use crate::tax::income::calculate_tax;
use crate::tax::{checked, ensure_non_negative, TaxError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Share of annual salary set aside for stock purchases when opted in
pub const STOCK_INVESTMENT_RATE: Decimal = dec!(0.15);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Yearly and monthly savings after tax, stock purchases and living expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetIncomeReport {
    pub annual_salary: Decimal,
    pub tax_payable: Decimal,
    pub stock_deduction: Decimal,
    pub net_annual_income: Decimal,
    pub final_yearly_savings: Decimal,
    pub net_monthly_income: Decimal,
    pub final_monthly_savings: Decimal,
}

impl NetIncomeReport {
    /// Labelled values in display order
    pub fn entries(&self) -> [(&'static str, Decimal); 7] {
        [
            ("Annual Salary (Before Tax)", self.annual_salary),
            ("Tax Payable", self.tax_payable),
            ("Stock Deduction", self.stock_deduction),
            ("Net Annual Income", self.net_annual_income),
            ("Final Yearly Savings", self.final_yearly_savings),
            ("Net Monthly Income", self.net_monthly_income),
            ("Final Monthly Savings", self.final_monthly_savings),
        ]
    }
}

/// Calculate net income and savings from monthly figures
pub fn net_income(
    monthly_salary: Decimal,
    rent: Decimal,
    utilities: Decimal,
    invest_in_stocks: bool,
) -> Result<NetIncomeReport, TaxError> {
    let monthly_salary = ensure_non_negative("monthly salary", monthly_salary)?;
    let rent = ensure_non_negative("rent", rent)?;
    let utilities = ensure_non_negative("utilities", utilities)?;

    let annual_salary = checked(
        "monthly salary",
        monthly_salary.checked_mul(MONTHS_PER_YEAR),
    )?;
    let tax_payable = calculate_tax(annual_salary)?;

    let stock_deduction = if invest_in_stocks {
        checked(
            "stock deduction",
            STOCK_INVESTMENT_RATE.checked_mul(annual_salary),
        )?
    } else {
        Decimal::ZERO
    };
    let net_annual_income = checked(
        "net annual income",
        annual_salary
            .checked_sub(tax_payable)
            .and_then(|net| net.checked_sub(stock_deduction)),
    )?;

    let yearly_expenses = checked(
        "rent and utilities",
        rent.checked_add(utilities)
            .and_then(|monthly| monthly.checked_mul(MONTHS_PER_YEAR)),
    )?;
    let final_yearly_savings = checked(
        "final yearly savings",
        net_annual_income.checked_sub(yearly_expenses),
    )?;

    log::info!(
        "Annual salary {}, tax {}, stock deduction {}, yearly expenses {}",
        annual_salary,
        tax_payable,
        stock_deduction,
        yearly_expenses
    );

    Ok(NetIncomeReport {
        annual_salary,
        tax_payable,
        stock_deduction,
        net_annual_income,
        final_yearly_savings,
        net_monthly_income: net_annual_income / MONTHS_PER_YEAR,
        final_monthly_savings: final_yearly_savings / MONTHS_PER_YEAR,
    })
}
