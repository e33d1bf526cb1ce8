use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::Schedule;

/// lifetime figures for a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub installment_count: u32,
    /// EMI in effect; the final recorded one once everything is paid
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_extra: Money,
    /// everything the borrower pays over the life of the loan
    pub total_cost: Money,
    pub first_payment_date: NaiveDate,
    pub final_payment_date: NaiveDate,
}

impl ScheduleSummary {
    /// totals over every row; None for an empty schedule
    pub fn of(schedule: &Schedule) -> Option<Self> {
        let first = schedule.rows().first()?;
        let last = schedule.rows().last()?;

        let mut total_extra = Money::ZERO;
        let mut total_cost = Money::ZERO;
        for row in schedule.rows() {
            total_extra += row.extra_payment;
            total_cost += row.principal_component + row.interest_component + row.extra_payment;
        }

        Some(ScheduleSummary {
            installment_count: schedule.len() as u32,
            monthly_payment: schedule.current_emi().unwrap_or(last.scheduled_payment),
            total_interest: total_interest(schedule),
            total_extra,
            total_cost,
            first_payment_date: first.payment_date,
            final_payment_date: last.payment_date,
        })
    }
}

/// what an alternative schedule saves against a baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsReport {
    pub months_saved: u32,
    pub interest_saved: Money,
}

impl SavingsReport {
    /// compare two schedules of the same loan
    ///
    /// months saved clamps at zero when the alternative runs longer;
    /// interest saved goes negative when the alternative costs more.
    pub fn between(baseline: &Schedule, alternative: &Schedule) -> Self {
        SavingsReport {
            months_saved: baseline.len().saturating_sub(alternative.len()) as u32,
            interest_saved: total_interest(baseline) - total_interest(alternative),
        }
    }
}

fn total_interest(schedule: &Schedule) -> Money {
    schedule
        .rows()
        .iter()
        .fold(Money::ZERO, |acc, row| acc + row.interest_component)
}
