/// quick start - open a crediario and print its schedule
use crediario_ledger::chrono::NaiveDate;
use crediario_ledger::{document, Account, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // R$ 1.200,00 in 3 installments
    let mut account = Account::builder()
        .customer_name("Maria Souza")
        .description("sofá retrátil")
        .principal(Money::from_str_exact("1200.00")?)
        .installments(3)
        .purchase_date(NaiveDate::from_ymd_opt(2025, 1, 15).ok_or("bad date")?)
        .build()?;

    for installment in &account.installments {
        println!(
            "  {}x  due {}  R$ {:.2}",
            installment.sequence_number,
            installment.due_date,
            installment.amount.as_decimal()
        );
    }

    // customer pays the first one
    account.toggle_installment_paid(1, NaiveDate::from_ymd_opt(2025, 1, 15).ok_or("bad date")?)?;
    println!("\npending: R$ {:.2}", account.pending_balance().as_decimal());

    println!("{}", document::to_json_pretty(&account)?);

    Ok(())
}
