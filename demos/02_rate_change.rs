/// rate change - re-amortize the unpaid remainder at a new rate
use chrono::{NaiveDate, TimeZone, Utc};
use loan_engine_rs::{
    apply_rate_change, compute_schedule, mark_paid, LoanAccount, Money, Rate, RateChangeOutcome,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== rate change ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(),
    ));

    let account = LoanAccount::new(
        Money::from_major(10_000),
        Rate::from_percent(dec!(5.51)),
        120,
        NaiveDate::from_ymd_opt(2025, 4, 23).unwrap(),
    );
    let mut schedule = compute_schedule(&account)?;
    println!(
        "original payment at 5.51%: ${}",
        schedule.get(1).unwrap().scheduled_payment
    );

    // a year of payments lands in the ledger
    for number in 1..=12 {
        schedule = mark_paid(&schedule, number, None, None, &time)?;
    }
    println!("after one year the balance is ${}", schedule.outstanding_balance());

    // the bank raises the rate to 7%
    match apply_rate_change(&schedule, Rate::from_percent(dec!(7.0)))? {
        RateChangeOutcome::Recalculated(changed) => {
            let thirteenth = changed.get(13).unwrap();
            println!("\nnew payment at 7%: ${}", thirteenth.scheduled_payment);
            println!("term stays at {} installments", changed.len());

            // the paid year is untouched, the rest re-amortized
            assert_eq!(&changed.rows()[..12], &schedule.rows()[..12]);
            println!("\nrows around the transition:");
            for row in &changed.rows()[10..14] {
                println!(
                    "{:>3} | {} | {:>7}% | {:>8} | paid: {}",
                    row.payment_number,
                    row.payment_date,
                    row.annual_rate.as_percentage(),
                    row.scheduled_payment,
                    row.is_paid,
                );
            }
        }
        RateChangeOutcome::FullyPaid => {
            println!("nothing left to recalculate");
        }
    }

    Ok(())
}
