/// time control - deterministic due-date status with a test clock
use chrono::{Duration, TimeZone, Utc};
use crediario_ledger::{
    AccountScope, InMemoryAccountStore, Ledger, LedgerConfig, Money, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut ledger = Ledger::new(InMemoryAccountStore::new(), LedgerConfig::default())?;
    let today = time.now().date_naive();
    let account = ledger.open_account("João Lima", Money::from_major(600), 3, today, &time)?;

    for week in 0..8 {
        let board = ledger.due_board(AccountScope::Open, &time)?;
        for (group, status) in &board {
            println!("  {}  next due {:<10}  {:?}", time.now().format("%Y-%m-%d"), group.label(), status);
        }

        // pays the first installment late, in the fourth week
        if week == 3 {
            ledger.toggle_installment_paid(account.id, 1, &time)?;
            println!("  ✓ installment 1 paid");
        }

        controller.advance(Duration::days(7));
    }

    Ok(())
}
