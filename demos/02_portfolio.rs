/// portfolio - pending balance and overdue/upcoming buckets across customers
use chrono::{NaiveDate, TimeZone, Utc};
use crediario_ledger::{
    InMemoryAccountStore, Ledger, LedgerConfig, Money, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    ));
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or("bad date");

    let config = LedgerConfig::from_json(r#"{ "upcoming_window_days": 15 }"#)?;
    let mut ledger = Ledger::new(InMemoryAccountStore::new(), config)?;

    let ana = ledger.open_account("Ana", Money::from_major(900), 3, date(2025, 3, 20)?, &time)?;
    ledger.toggle_installment_paid(ana.id, 1, &time)?;
    ledger.open_account("Bruno", Money::from_major(250), 5, date(2025, 5, 10)?, &time)?;
    let carla = ledger.open_account("Carla", Money::from_major(120), 1, date(2025, 1, 5)?, &time)?;
    ledger.toggle_installment_paid(carla.id, 1, &time)?;
    ledger.close_account(carla.id, &time)?;

    let summary = ledger.pending_summary(&time)?;
    println!("total pending: R$ {:.2}", summary.total_pending.as_decimal());
    println!("overdue:");
    for account in &summary.overdue_accounts {
        println!("  {} (R$ {:.2})", account.customer_name, account.pending_balance().as_decimal());
    }
    println!("upcoming:");
    for account in &summary.upcoming_accounts {
        println!("  {}", account.customer_name);
    }

    println!("\nevents:");
    for event in ledger.events.take_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
