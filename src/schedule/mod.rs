pub mod calculator;
pub mod extra;
pub mod rate_change;

pub use calculator::{compute_schedule, monthly_installment};
pub use extra::{apply_extra_payments, ExtraPaymentMap};
pub use rate_change::{apply_rate_change, RateChangeOutcome};

use chrono::{Months, NaiveDate};

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::types::{Installment, LoanAccount};

/// balances at or below one minor unit count as paid off
pub(crate) const BALANCE_EPSILON: Money = Money::CENT;

/// date shifted by whole calendar months, clamped to month end
pub(crate) fn months_after(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| EngineError::Validation {
            field: "start_date",
            reason: format!("{date} plus {months} months leaves the supported calendar"),
        })
}

/// advance the balance recurrence by one row
///
/// interest accrues on the beginning balance at the row's monthly rate,
/// principal is the scheduled payment net of interest and never exceeds
/// the balance, and the extra amount is capped at whatever balance the
/// principal leaves behind. on the last row of a generation window the
/// row settles the full balance outright, provided the leftover after a
/// normal split is within one scheduled payment; a larger leftover is
/// the caller's signal to extend the schedule instead. a payoff row
/// never strands a balance at or below the epsilon.
pub(crate) fn advance(
    number: u32,
    date: NaiveDate,
    rate: Rate,
    scheduled: Money,
    requested_extra: Money,
    balance: Money,
    window_end: bool,
) -> Installment {
    let interest =
        Money::from_decimal(balance.as_decimal() * rate.monthly_rate().as_decimal());
    let mut principal = (scheduled - interest).max(Money::ZERO).min(balance);
    if window_end && balance - principal <= scheduled {
        principal = balance;
    }
    let extra = requested_extra.min(balance - principal).max(Money::ZERO);
    let mut ending = (balance - principal - extra).max(Money::ZERO);
    if ending.is_positive() && ending <= BALANCE_EPSILON {
        principal += ending;
        ending = Money::ZERO;
    }

    Installment {
        payment_number: number,
        payment_date: date,
        annual_rate: rate,
        beginning_balance: balance,
        scheduled_payment: scheduled,
        extra_payment: extra,
        principal_component: principal,
        interest_component: interest,
        ending_balance: ending,
        is_paid: false,
        paid_date: None,
        paid_amount: None,
    }
}

/// append rows until the balance is cleared, one month past the last row
/// at a time
///
/// used when a regenerated window leaves a balance behind. each new row
/// carries the given scheduled payment with no extra; the final one pays
/// whatever remains. bails out if a payment cannot retire any principal
/// or the schedule would grow by more than a full maximum term.
pub(crate) fn extend_to_payoff(
    rows: &mut Vec<Installment>,
    scheduled: Money,
    rate: Rate,
) -> Result<()> {
    let cap = rows.len() + LoanAccount::MAX_TERM_MONTHS as usize;
    loop {
        let last = match rows.last() {
            Some(row) => row,
            None => return Ok(()),
        };
        let balance = last.ending_balance;
        if balance <= BALANCE_EPSILON {
            return Ok(());
        }
        if rows.len() >= cap {
            return Err(EngineError::Validation {
                field: "schedule",
                reason: format!(
                    "scheduled payment {scheduled} cannot amortize remaining balance {balance} \
                     within {} additional installments",
                    LoanAccount::MAX_TERM_MONTHS
                ),
            });
        }
        let number = last.payment_number + 1;
        let date = months_after(last.payment_date, 1)?;
        let row = advance(number, date, rate, scheduled, Money::ZERO, balance, false);
        // a payment that cannot touch principal would never terminate
        if !row.principal_component.is_positive() {
            return Err(EngineError::Validation {
                field: "schedule",
                reason: format!(
                    "scheduled payment {scheduled} does not cover interest on balance {balance}"
                ),
            });
        }
        rows.push(row);
    }
}
