pub mod decimal;
pub mod errors;
pub mod ledger;
pub mod schedule;
pub mod serialization;
pub mod summary;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{EngineError, Result};
pub use ledger::{mark_paid, mark_unpaid, PaidSummary};
pub use schedule::{
    apply_extra_payments, apply_rate_change, compute_schedule, monthly_installment,
    ExtraPaymentMap, RateChangeOutcome,
};
pub use serialization::{LoanOverview, ScheduleDocument};
pub use summary::{SavingsReport, ScheduleSummary};
pub use types::{Installment, LoanAccount, LoanId, Schedule};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
