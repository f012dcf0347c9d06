use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::account::Account;
use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::schedule::days_until;
use crate::types::{AccountId, DueDateKey, DueStatus};

/// pending balance of a set of open accounts and the accounts needing attention
#[derive(Debug, Clone, Serialize)]
pub struct PendingSummary {
    pub total_pending: Money,
    pub overdue_accounts: Vec<Account>,
    pub upcoming_accounts: Vec<Account>,
}

impl PendingSummary {
    pub fn overdue_ids(&self) -> Vec<AccountId> {
        self.overdue_accounts.iter().map(|a| a.id).collect()
    }

    pub fn upcoming_ids(&self) -> Vec<AccountId> {
        self.upcoming_accounts.iter().map(|a| a.id).collect()
    }
}

/// accounts sharing the same next due date
#[derive(Debug, Clone, Serialize)]
pub struct DueDateGroup {
    pub key: DueDateKey,
    pub accounts: Vec<Account>,
}

impl DueDateGroup {
    pub fn label(&self) -> String {
        self.key.label()
    }
}

/// account list deduplicated by id, keeping first-seen order
struct AccountSet {
    seen: HashSet<AccountId>,
    accounts: Vec<Account>,
}

impl AccountSet {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            accounts: Vec::new(),
        }
    }

    fn insert(&mut self, account: &Account) {
        if self.seen.insert(account.id) {
            self.accounts.push(account.clone());
        }
    }
}

/// total pending balance plus overdue and upcoming buckets
///
/// Expects open accounts; closed ones are filtered by the caller. Each unpaid
/// installment is classified on its own, so an account with one late and one
/// nearly-due installment lands in both buckets.
pub fn compute_pending_summary<'a, I>(
    accounts: I,
    today: NaiveDate,
    config: &LedgerConfig,
) -> PendingSummary
where
    I: IntoIterator<Item = &'a Account>,
{
    let mut total_pending = Money::ZERO;
    let mut overdue = AccountSet::new();
    let mut upcoming = AccountSet::new();

    for account in accounts {
        for installment in account.unpaid() {
            total_pending += installment.amount;

            let days = days_until(installment.due_date, today);
            if days < 0 {
                overdue.insert(account);
            } else if days <= config.upcoming_window_days {
                upcoming.insert(account);
            }
        }
    }

    PendingSummary {
        total_pending,
        overdue_accounts: overdue.accounts,
        upcoming_accounts: upcoming.accounts,
    }
}

/// grouping key of an account: due date of its first unpaid installment
pub fn next_due_key(account: &Account) -> DueDateKey {
    account
        .next_unpaid()
        .map(|installment| DueDateKey::Date(installment.due_date))
        .unwrap_or(DueDateKey::AllPaid)
}

/// group accounts by next due date, earliest first and `AllPaid` last
pub fn group_by_next_due_date<'a, I>(accounts: I) -> Vec<DueDateGroup>
where
    I: IntoIterator<Item = &'a Account>,
{
    let mut groups: BTreeMap<DueDateKey, Vec<Account>> = BTreeMap::new();
    for account in accounts {
        groups
            .entry(next_due_key(account))
            .or_default()
            .push(account.clone());
    }

    groups
        .into_iter()
        .map(|(key, accounts)| DueDateGroup { key, accounts })
        .collect()
}

/// traffic-light status of a group key relative to `today`
pub fn classify_due_status(key: DueDateKey, today: NaiveDate, config: &LedgerConfig) -> DueStatus {
    match key {
        DueDateKey::AllPaid => DueStatus::Ok,
        DueDateKey::Date(due) => {
            let days = days_until(due, today);
            if days < 0 {
                DueStatus::Overdue
            } else if days <= config.upcoming_window_days {
                DueStatus::Warning
            } else {
                DueStatus::Ok
            }
        }
    }
}
