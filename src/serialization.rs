/// persistence support for schedules
use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::ledger::PaidSummary;
use crate::summary::ScheduleSummary;
use crate::types::{LoanAccount, LoanId, Schedule};

/// a schedule stamped for storage
///
/// the rows serialize as a plain array, so a saved document can be
/// reloaded and handed straight back to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDocument {
    pub loan_id: LoanId,
    pub saved_at: DateTime<Utc>,
    pub rows: Schedule,
}

impl ScheduleDocument {
    pub fn capture(
        loan_id: LoanId,
        schedule: &Schedule,
        time_provider: &SafeTimeProvider,
    ) -> Self {
        Self {
            loan_id,
            saved_at: time_provider.now(),
            rows: schedule.clone(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// parse a document written by [`to_json_pretty`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// serializable view of a loan and where its schedule stands
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanOverview {
    pub loan_id: LoanId,
    pub principal: Money,
    pub contract_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub current_rate: Option<Rate>,
    pub outstanding_balance: Money,
    pub paid: PaidSummary,
    pub schedule: Option<ScheduleSummary>,
}

impl LoanOverview {
    pub fn from_account(loan_id: LoanId, account: &LoanAccount, schedule: &Schedule) -> Self {
        LoanOverview {
            loan_id,
            principal: account.principal,
            contract_rate: account.annual_rate,
            term_months: account.term_months,
            start_date: account.start_date,
            current_rate: schedule.current_rate(),
            outstanding_balance: schedule.outstanding_balance(),
            paid: PaidSummary::of(schedule),
            schedule: ScheduleSummary::of(schedule),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::mark_paid;
    use crate::schedule::compute_schedule;
    use chrono::TimeZone;
    use hourglass_rs::TimeSource;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn account() -> LoanAccount {
        LoanAccount::new(
            Money::from_major(10_000),
            Rate::from_percent(dec!(5.51)),
            12,
            NaiveDate::from_ymd_opt(2025, 4, 23).unwrap(),
        )
    }

    fn clock(year: i32, month: u32, day: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_document_round_trip() {
        let schedule = compute_schedule(&account()).unwrap();
        let time = clock(2025, 6, 1);
        let loan_id = Uuid::new_v4();

        let document = ScheduleDocument::capture(loan_id, &schedule, &time);
        assert_eq!(
            document.saved_at,
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
        );

        let json = document.to_json_pretty().unwrap();
        let restored = ScheduleDocument::from_json(&json).unwrap();
        assert_eq!(restored.loan_id, loan_id);
        assert_eq!(restored.saved_at, document.saved_at);
        assert_eq!(restored.rows, schedule);
    }

    #[test]
    fn test_rows_serialize_as_a_plain_array() {
        let schedule = compute_schedule(&account()).unwrap();
        let time = clock(2025, 6, 1);
        let document = ScheduleDocument::capture(Uuid::new_v4(), &schedule, &time);

        let value: serde_json::Value =
            serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();
        let rows = value["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0]["payment_number"], 1);
        assert_eq!(rows[0]["payment_date"], "2025-05-23");
        // money travels as strings, never as binary floats
        assert!(rows[0]["beginning_balance"].is_string());
        assert_eq!(rows[0]["is_paid"], false);
    }

    #[test]
    fn test_overview_reflects_paid_progress() {
        let account = account();
        let schedule = compute_schedule(&account).unwrap();
        let time = clock(2025, 8, 1);
        let mut paid = schedule.clone();
        for number in 1..=3 {
            paid = mark_paid(&paid, number, None, None, &time).unwrap();
        }

        let overview = LoanOverview::from_account(Uuid::new_v4(), &account, &paid);
        assert_eq!(overview.paid.paid_count, 3);
        assert_eq!(overview.current_rate, Some(Rate::from_percent(dec!(5.51))));
        assert_eq!(overview.outstanding_balance, paid.outstanding_balance());
        assert_eq!(overview.schedule.as_ref().unwrap().installment_count, 12);

        let value: serde_json::Value =
            serde_json::from_str(&overview.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["paid"]["paid_count"], 3);
        assert_eq!(value["term_months"], 12);
    }
}
