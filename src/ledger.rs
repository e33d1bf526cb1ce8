use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::types::Schedule;

/// record an installment as paid
///
/// the row must exist, be unpaid, and be due: its payment date must not
/// lie after today. the paid date defaults to today, the paid amount to
/// the planned payment (scheduled plus extra). amortization figures are
/// left untouched; only the payment record changes.
pub fn mark_paid(
    schedule: &Schedule,
    payment_number: u32,
    paid_date: Option<NaiveDate>,
    paid_amount: Option<Money>,
    time_provider: &SafeTimeProvider,
) -> Result<Schedule> {
    let index = schedule.index_of(payment_number)?;
    let row = &schedule.rows()[index];
    if row.is_paid {
        return Err(EngineError::ImmutableHistory { payment_number });
    }
    let today = time_provider.now().date_naive();
    if row.payment_date > today {
        return Err(EngineError::MarkFutureInstallment {
            payment_number,
            payment_date: row.payment_date,
            today,
        });
    }
    let date = paid_date.unwrap_or(today);
    let amount = paid_amount.unwrap_or_else(|| row.planned_payment());

    let mut rows = schedule.rows().to_vec();
    rows[index].is_paid = true;
    rows[index].paid_date = Some(date);
    rows[index].paid_amount = Some(amount);
    Ok(Schedule::from_rows(rows))
}

/// erase the payment record of an installment
///
/// the exact inverse of [`mark_paid`], allowed at any time. a row that
/// was never paid comes back unchanged.
pub fn mark_unpaid(schedule: &Schedule, payment_number: u32) -> Result<Schedule> {
    let index = schedule.index_of(payment_number)?;
    let mut rows = schedule.rows().to_vec();
    rows[index].is_paid = false;
    rows[index].paid_date = None;
    rows[index].paid_amount = None;
    Ok(Schedule::from_rows(rows))
}

/// running totals over the paid rows of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidSummary {
    pub paid_count: u32,
    pub total_paid: Money,
    pub interest_paid: Money,
}

impl PaidSummary {
    pub fn of(schedule: &Schedule) -> Self {
        let mut summary = PaidSummary {
            paid_count: 0,
            total_paid: Money::ZERO,
            interest_paid: Money::ZERO,
        };
        for row in schedule.rows().iter().filter(|row| row.is_paid) {
            summary.paid_count += 1;
            summary.total_paid += row.paid_amount.unwrap_or_else(|| row.planned_payment());
            summary.interest_paid += row.interest_component;
        }
        summary
    }
}
