use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::schedule::{advance, months_after, BALANCE_EPSILON};
use crate::types::{LoanAccount, Schedule};

/// equated monthly installment for a principal amortized over a term
///
/// EMI = P * r * (1+r)^n / ((1+r)^n - 1), evaluated through the discount
/// factor (1+r)^-n so very long terms at high rates cannot overflow the
/// decimal range. a zero rate divides the principal evenly instead.
pub fn monthly_installment(principal: Money, annual_rate: Rate, term_months: u32) -> Money {
    if term_months == 0 {
        return principal;
    }
    let monthly = annual_rate.monthly_rate().as_decimal();
    if monthly.is_zero() {
        return principal / Decimal::from(term_months);
    }

    let base = Decimal::ONE + monthly;
    let mut discount = Decimal::ONE;
    for _ in 0..term_months {
        discount /= base;
    }
    let annuity = Decimal::ONE - discount;
    Money::from_decimal(principal.as_decimal() * monthly / annuity)
}

/// generate the amortization schedule for a loan
///
/// one row per month from the month after the start date, each splitting
/// the EMI into interest on the open balance and principal, until the
/// balance reaches zero or the term runs out.
pub fn compute_schedule(account: &LoanAccount) -> Result<Schedule> {
    account.validate()?;

    let emi = monthly_installment(account.principal, account.annual_rate, account.term_months);
    let first_interest = Money::from_decimal(
        account.principal.as_decimal() * account.annual_rate.monthly_rate().as_decimal(),
    );
    if !account.annual_rate.is_zero() && !(emi - first_interest).is_positive() {
        return Err(EngineError::Validation {
            field: "annual_rate",
            reason: format!(
                "monthly payment {emi} cannot retire principal at {} over {} months",
                account.annual_rate, account.term_months
            ),
        });
    }

    let mut rows = Vec::with_capacity(account.term_months as usize);
    let mut balance = account.principal;
    for number in 1..=account.term_months {
        let date = months_after(account.start_date, number)?;
        let row = advance(
            number,
            date,
            account.annual_rate,
            emi,
            Money::ZERO,
            balance,
            number == account.term_months,
        );
        balance = row.ending_balance;
        rows.push(row);
        if balance <= BALANCE_EPSILON {
            break;
        }
    }

    Ok(Schedule::from_rows(rows))
}
