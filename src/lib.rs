pub mod account;
pub mod config;
pub mod decimal;
pub mod document;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod schedule;
pub mod store;
pub mod summary;
pub mod types;

// re-export key types
pub use account::{Account, AccountBuilder, Installment};
pub use config::LedgerConfig;
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use events::{EventStore, LedgerEvent};
pub use ledger::Ledger;
pub use schedule::{add_months, generate_schedule, parse_installment_count};
pub use store::{AccountStore, InMemoryAccountStore};
pub use summary::{
    classify_due_status, compute_pending_summary, group_by_next_due_date, next_due_key,
    DueDateGroup, PendingSummary,
};
pub use types::{AccountId, AccountScope, DueDateKey, DueStatus, ALL_PAID_LABEL};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
