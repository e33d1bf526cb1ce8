use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation failed for {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("installment {payment_number} not found: schedule has {row_count} rows")]
    RowNotFound {
        payment_number: u32,
        row_count: usize,
    },

    #[error("installment {payment_number} is already paid: paid history is immutable")]
    ImmutableHistory {
        payment_number: u32,
    },

    #[error("installment {payment_number} is not due until {payment_date}: today is {today}")]
    MarkFutureInstallment {
        payment_number: u32,
        payment_date: NaiveDate,
        today: NaiveDate,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
