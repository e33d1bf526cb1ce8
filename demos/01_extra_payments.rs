/// extra payments - accelerate payoff with one-off principal payments
use chrono::NaiveDate;
use loan_engine_rs::{
    apply_extra_payments, compute_schedule, ExtraPaymentMap, LoanAccount, Money, Rate,
    SavingsReport,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== extra payments ===\n");

    let account = LoanAccount::new(
        Money::from_major(10_000),
        Rate::from_percent(dec!(5.51)),
        120,
        NaiveDate::from_ymd_opt(2025, 4, 23).unwrap(),
    );
    let base = compute_schedule(&account)?;
    println!("baseline: {} installments", base.len());

    // put $2,000 extra toward principal in month 12
    let mut extras = ExtraPaymentMap::new();
    extras.insert(12, Money::from_major(2_000));
    let accelerated = apply_extra_payments(&base, &extras)?;

    let twelfth = accelerated.get(12).unwrap();
    println!(
        "\nmonth 12 pays {} + {} extra, balance drops to {}",
        twelfth.scheduled_payment, twelfth.extra_payment, twelfth.ending_balance
    );
    println!("accelerated: {} installments", accelerated.len());

    let savings = SavingsReport::between(&base, &accelerated);
    println!(
        "saves {} months and ${} of interest",
        savings.months_saved, savings.interest_saved
    );

    // the monthly payment itself never moves
    assert_eq!(
        base.get(1).unwrap().scheduled_payment,
        accelerated.get(1).unwrap().scheduled_payment
    );

    // changed your mind? assign zero to clear the extra again
    extras.insert(12, Money::ZERO);
    let restored = apply_extra_payments(&accelerated, &extras)?;
    println!("\ncleared again: {} installments", restored.len());

    Ok(())
}
