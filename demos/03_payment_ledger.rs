/// payment ledger - record, inspect, and undo installment payments
use chrono::{NaiveDate, TimeZone, Utc};
use loan_engine_rs::{
    compute_schedule, mark_paid, mark_unpaid, LoanAccount, Money, PaidSummary, Rate,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== payment ledger ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap(),
    ));

    let account = LoanAccount::new(
        Money::from_major(10_000),
        Rate::from_percent(dec!(5.51)),
        120,
        NaiveDate::from_ymd_opt(2025, 4, 23).unwrap(),
    );
    let mut schedule = compute_schedule(&account)?;

    // two payments on autopilot: today's date, the planned amount
    schedule = mark_paid(&schedule, 1, None, None, &time)?;
    schedule = mark_paid(&schedule, 2, None, None, &time)?;

    // the third was paid early and rounded up by hand
    schedule = mark_paid(
        &schedule,
        3,
        Some(NaiveDate::from_ymd_opt(2025, 7, 20).unwrap()),
        Some(Money::from_major(110)),
        &time,
    )?;

    let summary = PaidSummary::of(&schedule);
    println!("{} payments recorded", summary.paid_count);
    println!("total paid:    ${}", summary.total_paid);
    println!("interest paid: ${}", summary.interest_paid);

    // month four is not due yet, the ledger refuses it
    if let Err(err) = mark_paid(&schedule, 4, None, None, &time) {
        println!("\nrejected: {}", err);
    }

    // bookkeeping mistake? unmarking restores the row exactly
    schedule = mark_unpaid(&schedule, 3)?;
    println!(
        "\nafter undo: {} payments recorded",
        PaidSummary::of(&schedule).paid_count
    );

    Ok(())
}
