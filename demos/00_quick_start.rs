/// quick start - minimal example to get started
use chrono::NaiveDate;
use loan_engine_rs::{compute_schedule, LoanAccount, Money, Rate, ScheduleSummary};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a $10,000 loan at 5.51% over ten years
    let account = LoanAccount::new(
        Money::from_major(10_000),
        Rate::from_percent(dec!(5.51)),
        120,
        NaiveDate::from_ymd_opt(2025, 4, 23).unwrap(),
    );

    let schedule = compute_schedule(&account)?;
    let summary = ScheduleSummary::of(&schedule).unwrap();

    println!("monthly payment: ${}", summary.monthly_payment);
    println!("installments:    {}", summary.installment_count);
    println!("total interest:  ${}", summary.total_interest);
    println!("last payment on: {}", summary.final_payment_date);

    // first three rows of the schedule
    println!("\n  # | date       | principal | interest | balance");
    for row in schedule.rows().iter().take(3) {
        println!(
            "{:>3} | {} | {:>9} | {:>8} | {:>9}",
            row.payment_number,
            row.payment_date,
            row.principal_component,
            row.interest_component,
            row.ending_balance,
        );
    }

    Ok(())
}
