use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// unique identifier for loans
pub type LoanId = Uuid;

/// caller-owned loan terms; the engine reads these and never mutates them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAccount {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
}

impl LoanAccount {
    pub const MAX_TERM_MONTHS: u32 = 1200;

    pub fn new(principal: Money, annual_rate: Rate, term_months: u32, start_date: NaiveDate) -> Self {
        LoanAccount {
            principal,
            annual_rate,
            term_months,
            start_date,
        }
    }

    /// check the terms are within supported bounds
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(EngineError::Validation {
                field: "principal",
                reason: format!("must be positive, got {}", self.principal),
            });
        }
        if self.annual_rate.is_negative() {
            return Err(EngineError::Validation {
                field: "annual_rate",
                reason: format!("must not be negative, got {}", self.annual_rate),
            });
        }
        if self.term_months < 1 || self.term_months > Self::MAX_TERM_MONTHS {
            return Err(EngineError::Validation {
                field: "term_months",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    Self::MAX_TERM_MONTHS,
                    self.term_months
                ),
            });
        }
        Ok(())
    }
}

/// one row of an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position in the schedule
    pub payment_number: u32,
    /// start date plus payment_number calendar months
    pub payment_date: NaiveDate,
    /// annual rate in effect for this row
    pub annual_rate: Rate,
    pub beginning_balance: Money,
    /// the EMI in effect when this row was last computed
    pub scheduled_payment: Money,
    pub extra_payment: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub ending_balance: Money,
    pub is_paid: bool,
    pub paid_date: Option<NaiveDate>,
    pub paid_amount: Option<Money>,
}

impl Installment {
    /// scheduled payment plus extra, the default amount recorded when paid
    pub fn planned_payment(&self) -> Money {
        self.scheduled_payment + self.extra_payment
    }
}

/// an amortization schedule; serializes as the plain row array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Schedule {
    rows: Vec<Installment>,
}

impl Schedule {
    pub(crate) fn from_rows(rows: Vec<Installment>) -> Self {
        Schedule { rows }
    }

    pub fn rows(&self) -> &[Installment] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// look up a row by its 1-based payment number
    pub fn get(&self, payment_number: u32) -> Option<&Installment> {
        let index = (payment_number as usize).checked_sub(1)?;
        self.rows.get(index)
    }

    /// row index for a payment number, or RowNotFound
    pub(crate) fn index_of(&self, payment_number: u32) -> Result<usize> {
        match (payment_number as usize).checked_sub(1) {
            Some(index) if index < self.rows.len() => Ok(index),
            _ => Err(EngineError::RowNotFound {
                payment_number,
                row_count: self.rows.len(),
            }),
        }
    }

    /// index of the first unpaid row, if any
    pub fn transition_index(&self) -> Option<usize> {
        self.rows.iter().position(|row| !row.is_paid)
    }

    pub fn is_fully_paid(&self) -> bool {
        self.transition_index().is_none()
    }

    /// balance still owed: the beginning balance of the first unpaid row
    pub fn outstanding_balance(&self) -> Money {
        match self.transition_index() {
            Some(index) => self.rows[index].beginning_balance,
            None => Money::ZERO,
        }
    }

    /// annual rate in effect for the unpaid remainder
    pub fn current_rate(&self) -> Option<Rate> {
        self.transition_index().map(|index| self.rows[index].annual_rate)
    }

    /// EMI in effect for the unpaid remainder
    pub fn current_emi(&self) -> Option<Money> {
        self.transition_index()
            .map(|index| self.rows[index].scheduled_payment)
    }

    pub fn final_payment_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|row| row.payment_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn terms() -> LoanAccount {
        LoanAccount::new(
            Money::from_major(10_000),
            Rate::from_percent(dec!(5.51)),
            120,
            NaiveDate::from_ymd_opt(2025, 4, 23).unwrap(),
        )
    }

    #[test]
    fn test_validate_accepts_good_terms() {
        assert!(terms().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_principal() {
        let mut account = terms();
        account.principal = Money::ZERO;
        let err = account.validate().unwrap_err();
        assert!(matches!(err, EngineError::Validation { field: "principal", .. }));
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut account = terms();
        account.annual_rate = Rate::from_percent(dec!(-1));
        let err = account.validate().unwrap_err();
        assert!(matches!(err, EngineError::Validation { field: "annual_rate", .. }));
    }

    #[test]
    fn test_validate_rejects_term_out_of_bounds() {
        let mut account = terms();
        account.term_months = 0;
        assert!(account.validate().is_err());

        account.term_months = 1201;
        assert!(account.validate().is_err());

        account.term_months = 1200;
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_zero_rate_is_valid() {
        let mut account = terms();
        account.annual_rate = Rate::ZERO;
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_row_lookup_is_one_based() {
        let schedule = crate::schedule::compute_schedule(&terms()).unwrap();
        assert_eq!(schedule.get(1).unwrap().payment_number, 1);
        assert_eq!(schedule.get(120).unwrap().payment_number, 120);
        assert!(schedule.get(0).is_none());
        assert!(schedule.get(121).is_none());
    }

    #[test]
    fn test_index_of_reports_row_count() {
        let schedule = crate::schedule::compute_schedule(&terms()).unwrap();
        let err = schedule.index_of(500).unwrap_err();
        match err {
            EngineError::RowNotFound {
                payment_number,
                row_count,
            } => {
                assert_eq!(payment_number, 500);
                assert_eq!(row_count, 120);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_transition_and_outstanding() {
        let schedule = crate::schedule::compute_schedule(&terms()).unwrap();
        assert_eq!(schedule.transition_index(), Some(0));
        assert_eq!(schedule.outstanding_balance(), Money::from_major(10_000));
        assert!(!schedule.is_fully_paid());
        assert_eq!(schedule.current_rate(), Some(Rate::from_percent(dec!(5.51))));
    }
}
