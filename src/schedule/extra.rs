use std::collections::BTreeMap;

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::schedule::{advance, extend_to_payoff, BALANCE_EPSILON};
use crate::types::{Installment, Schedule};

/// extra principal keyed by 1-based payment number
pub type ExtraPaymentMap = BTreeMap<u32, Money>;

/// record extra principal against unpaid installments
///
/// each mapped row's extra amount is set to the given value; rows not in
/// the map keep whatever extra they already carry. the EMI is untouched.
/// the balance recurrence is re-propagated from the first mapped row,
/// dropping rows past the new payoff. assigning a smaller extra than a
/// row already carries lengthens the schedule again, up to one month at
/// a time past the current end.
pub fn apply_extra_payments(schedule: &Schedule, extras: &ExtraPaymentMap) -> Result<Schedule> {
    for (&payment_number, &amount) in extras {
        let index = schedule.index_of(payment_number)?;
        if schedule.rows()[index].is_paid {
            return Err(EngineError::ImmutableHistory { payment_number });
        }
        if amount.is_negative() {
            return Err(EngineError::Validation {
                field: "extra_payment",
                reason: format!(
                    "must not be negative, got {amount} for installment {payment_number}"
                ),
            });
        }
    }

    let first_touched = match extras.keys().next() {
        Some(&payment_number) => schedule.index_of(payment_number)?,
        None => return Ok(schedule.clone()),
    };

    let rows = schedule.rows();

    // re-propagation runs through every later row; none may be frozen
    if let Some(frozen) = rows[first_touched..].iter().find(|row| row.is_paid) {
        return Err(EngineError::ImmutableHistory {
            payment_number: frozen.payment_number,
        });
    }

    let last_index = rows.len() - 1;
    let mut out: Vec<Installment> = rows[..first_touched].to_vec();
    let mut balance = rows[first_touched].beginning_balance;

    for (offset, row) in rows[first_touched..].iter().enumerate() {
        let requested = extras
            .get(&row.payment_number)
            .copied()
            .unwrap_or(row.extra_payment);
        let new_row = advance(
            row.payment_number,
            row.payment_date,
            row.annual_rate,
            row.scheduled_payment,
            requested,
            balance,
            first_touched + offset == last_index,
        );
        balance = new_row.ending_balance;
        out.push(new_row);
        if balance <= BALANCE_EPSILON {
            break;
        }
    }

    // only a reduced extra can leave a balance behind the old end
    if let Some(last) = out.last() {
        if last.ending_balance > BALANCE_EPSILON {
            let scheduled = last.scheduled_payment;
            let rate = last.annual_rate;
            extend_to_payoff(&mut out, scheduled, rate)?;
        }
    }

    Ok(Schedule::from_rows(out))
}
