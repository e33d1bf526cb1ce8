use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::schedule::{advance, extend_to_payoff, monthly_installment, BALANCE_EPSILON};
use crate::types::{Installment, Schedule};

/// outcome of a rate change request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateChangeOutcome {
    /// unpaid rows re-amortized at the new rate
    Recalculated(Schedule),
    /// every installment is already paid; nothing to recalculate
    FullyPaid,
}

impl RateChangeOutcome {
    pub fn is_fully_paid(&self) -> bool {
        matches!(self, RateChangeOutcome::FullyPaid)
    }

    pub fn schedule(self) -> Option<Schedule> {
        match self {
            RateChangeOutcome::Recalculated(schedule) => Some(schedule),
            RateChangeOutcome::FullyPaid => None,
        }
    }
}

/// re-amortize the unpaid remainder of a schedule at a new annual rate
///
/// paid rows stay exactly as recorded. the remainder keeps its payment
/// numbers, dates, and recorded extras; a new EMI solved for the
/// remaining balance over the remaining term replaces the old one. a
/// request matching the current rate keeps the recorded EMI, so it
/// reproduces the remaining rows bit for bit.
pub fn apply_rate_change(schedule: &Schedule, new_rate: Rate) -> Result<RateChangeOutcome> {
    if new_rate.as_decimal() <= Decimal::ZERO
        || new_rate.as_percentage() > Decimal::ONE_HUNDRED
    {
        return Err(EngineError::Validation {
            field: "new_rate",
            reason: format!("must be above 0% and at most 100%, got {new_rate}"),
        });
    }

    let transition = match schedule.transition_index() {
        Some(index) => index,
        None => return Ok(RateChangeOutcome::FullyPaid),
    };
    let rows = schedule.rows();

    // a paid row past the first unpaid one cannot be regenerated
    if let Some(frozen) = rows[transition..].iter().find(|row| row.is_paid) {
        return Err(EngineError::ImmutableHistory {
            payment_number: frozen.payment_number,
        });
    }

    let remaining_balance = if transition == 0 {
        rows[0].beginning_balance
    } else {
        rows[transition - 1].ending_balance
    };
    let remaining_term = (rows.len() - transition) as u32;
    let current_rate = rows[transition].annual_rate;

    let emi = if new_rate == current_rate {
        rows[transition].scheduled_payment
    } else {
        monthly_installment(remaining_balance, new_rate, remaining_term)
    };
    let first_interest = Money::from_decimal(
        remaining_balance.as_decimal() * new_rate.monthly_rate().as_decimal(),
    );
    if !(emi - first_interest).is_positive() {
        return Err(EngineError::Validation {
            field: "new_rate",
            reason: format!(
                "monthly payment {emi} cannot retire balance {remaining_balance} at {new_rate} \
                 over {remaining_term} months"
            ),
        });
    }

    let last_index = rows.len() - 1;
    let mut out: Vec<Installment> = rows[..transition].to_vec();
    let mut balance = remaining_balance;

    for (offset, row) in rows[transition..].iter().enumerate() {
        let new_row = advance(
            row.payment_number,
            row.payment_date,
            new_rate,
            emi,
            row.extra_payment,
            balance,
            transition + offset == last_index,
        );
        balance = new_row.ending_balance;
        out.push(new_row);
        if balance <= BALANCE_EPSILON {
            break;
        }
    }

    // rounding can leave a balance past the solved term; stretch it out
    if let Some(last) = out.last() {
        if last.ending_balance > BALANCE_EPSILON {
            extend_to_payoff(&mut out, emi, new_rate)?;
        }
    }

    Ok(RateChangeOutcome::Recalculated(Schedule::from_rows(out)))
}
