/// json state - save schedules and loan overviews for storage or debugging
use chrono::{NaiveDate, TimeZone, Utc};
use loan_engine_rs::{
    compute_schedule, mark_paid, LoanAccount, LoanOverview, Money, Rate, SafeTimeProvider,
    ScheduleDocument, TimeSource, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json state ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap(),
    ));

    let account = LoanAccount::new(
        Money::from_major(3_000),
        Rate::from_percent(dec!(6.0)),
        6,
        NaiveDate::from_ymd_opt(2025, 4, 23).unwrap(),
    );
    let mut schedule = compute_schedule(&account)?;
    schedule = mark_paid(&schedule, 1, None, None, &time)?;

    // the whole schedule, stamped and ready for storage
    let loan_id = Uuid::new_v4();
    let document = ScheduleDocument::capture(loan_id, &schedule, &time);
    let json = document.to_json_pretty()?;
    println!("schedule document:");
    println!("------------------");
    println!("{}\n", json);

    // a saved document loads back losslessly
    let restored = ScheduleDocument::from_json(&json)?;
    assert_eq!(restored.rows, schedule);
    println!("document round-trips losslessly\n");

    // a compact overview for dashboards
    let overview = LoanOverview::from_account(loan_id, &account, &schedule);
    println!("loan overview:");
    println!("--------------");
    println!("{}", overview.to_json_pretty()?);

    Ok(())
}
