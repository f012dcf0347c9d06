use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use tracing::{debug, info, warn};

use crate::account::Account;
use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{EventStore, LedgerEvent};
use crate::store::AccountStore;
use crate::summary::{
    classify_due_status, compute_pending_summary, group_by_next_due_date, DueDateGroup,
    PendingSummary,
};
use crate::types::{AccountId, AccountScope, DueDateKey, DueStatus};

/// installment ledger over an injected account store
///
/// Every mutating call is a fetch, a pure in-memory change and a full write
/// back. The clock is passed per call so tests can pin "today".
pub struct Ledger<S: AccountStore> {
    pub config: LedgerConfig,
    pub events: EventStore,
    store: S,
}

impl<S: AccountStore> Ledger<S> {
    pub fn new(store: S, config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            events: EventStore::new(),
            store,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// open a credit account and persist it with its full schedule
    pub fn open_account(
        &mut self,
        customer_name: &str,
        principal: Money,
        installment_count: u32,
        purchase_date: NaiveDate,
        time_provider: &SafeTimeProvider,
    ) -> Result<Account> {
        if installment_count > self.config.max_installments {
            warn!(
                installment_count,
                max = self.config.max_installments,
                "rejected account: too many installments"
            );
            return Err(LedgerError::invalid_input(format!(
                "installment count {} exceeds the maximum of {}",
                installment_count, self.config.max_installments
            )));
        }

        let account = Account::open(customer_name, principal, installment_count, purchase_date)
            .map_err(|e| {
                warn!(error = %e, "rejected account");
                e
            })?;
        self.store.save_account(&account)?;

        self.events.emit(LedgerEvent::AccountOpened {
            account_id: account.id,
            customer_name: account.customer_name.clone(),
            principal,
            installment_count,
            purchase_date,
            timestamp: time_provider.now(),
        });
        info!(
            account_id = %account.id,
            %principal,
            installment_count,
            "opened credit account"
        );

        Ok(account)
    }

    /// open an account with a purchase date of today
    pub fn open_account_now(
        &mut self,
        customer_name: &str,
        principal: Money,
        installment_count: u32,
    ) -> Result<Account> {
        let time = SafeTimeProvider::new(TimeSource::System);
        let today = time.now().date_naive();
        self.open_account(customer_name, principal, installment_count, today, &time)
    }

    pub fn account(&self, account_id: AccountId) -> Result<Account> {
        self.store.fetch_account(account_id)
    }

    /// toggle one installment between paid and unpaid
    ///
    /// A payment is stamped with the clock's UTC date (`now().date_naive()`),
    /// not the local calendar date.
    pub fn toggle_installment_paid(
        &mut self,
        account_id: AccountId,
        sequence_number: u32,
        time_provider: &SafeTimeProvider,
    ) -> Result<Account> {
        let now = time_provider.now();
        let today = now.date_naive();

        let mut account = self.store.fetch_account(account_id)?;
        let paid = account
            .toggle_installment_paid(sequence_number, today)
            .map_err(|e| {
                warn!(%account_id, error = %e, "toggle rejected");
                e
            })?;
        self.store.save_account(&account)?;

        let amount = account.installment(sequence_number)?.amount;
        let event = if paid {
            LedgerEvent::InstallmentPaid {
                account_id,
                sequence_number,
                amount,
                payment_date: today,
                timestamp: now,
            }
        } else {
            LedgerEvent::InstallmentReverted {
                account_id,
                sequence_number,
                amount,
                timestamp: now,
            }
        };
        self.events.emit(event);
        info!(%account_id, sequence_number, paid, "installment toggled");

        Ok(account)
    }

    pub fn toggle_installment_paid_now(
        &mut self,
        account_id: AccountId,
        sequence_number: u32,
    ) -> Result<Account> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.toggle_installment_paid(account_id, sequence_number, &time)
    }

    /// close an account
    ///
    /// Not guarded by installment state; screens only offer it once every
    /// installment is paid. `closed_date` is the clock's UTC date.
    pub fn close_account(
        &mut self,
        account_id: AccountId,
        time_provider: &SafeTimeProvider,
    ) -> Result<Account> {
        let now = time_provider.now();
        let mut account = self.store.fetch_account(account_id)?;
        account.close(now.date_naive());
        self.store.save_account(&account)?;

        let pending_balance = account.pending_balance();
        if !pending_balance.is_zero() {
            warn!(%account_id, %pending_balance, "closing account with unpaid installments");
        }
        self.events.emit(LedgerEvent::AccountClosed {
            account_id,
            closed_date: now.date_naive(),
            pending_balance,
            timestamp: now,
        });
        info!(%account_id, "account closed");

        Ok(account)
    }

    pub fn reopen_account(
        &mut self,
        account_id: AccountId,
        time_provider: &SafeTimeProvider,
    ) -> Result<Account> {
        let mut account = self.store.fetch_account(account_id)?;
        account.reopen();
        self.store.save_account(&account)?;

        self.events.emit(LedgerEvent::AccountReopened {
            account_id,
            timestamp: time_provider.now(),
        });
        info!(%account_id, "account reopened");

        Ok(account)
    }

    /// pending balance with overdue and upcoming accounts, open accounts only
    pub fn pending_summary(&self, time_provider: &SafeTimeProvider) -> Result<PendingSummary> {
        let today = time_provider.now().date_naive();
        let accounts = self.store.fetch_all_accounts(AccountScope::Open)?;
        let summary = compute_pending_summary(&accounts, today, &self.config);

        debug!(
            %today,
            total_pending = %summary.total_pending,
            overdue = summary.overdue_accounts.len(),
            upcoming = summary.upcoming_accounts.len(),
            "computed pending summary"
        );
        Ok(summary)
    }

    /// accounts in `scope` grouped by next due date
    pub fn next_due_groups(&self, scope: AccountScope) -> Result<Vec<DueDateGroup>> {
        let accounts = self.store.fetch_all_accounts(scope)?;
        Ok(group_by_next_due_date(&accounts))
    }

    /// status color of a group key as of the clock's current date
    pub fn due_status(&self, key: DueDateKey, time_provider: &SafeTimeProvider) -> DueStatus {
        classify_due_status(key, time_provider.now().date_naive(), &self.config)
    }

    /// group accounts and attach each group's status in one pass
    pub fn due_board(
        &self,
        scope: AccountScope,
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<(DueDateGroup, DueStatus)>> {
        let groups = self.next_due_groups(scope)?;
        Ok(groups
            .into_iter()
            .map(|group| {
                let status = self.due_status(group.key, time_provider);
                (group, status)
            })
            .collect())
    }

    /// timestamp of the most recent event, if any
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.events.events().last().map(|event| match event {
            LedgerEvent::AccountOpened { timestamp, .. }
            | LedgerEvent::InstallmentPaid { timestamp, .. }
            | LedgerEvent::InstallmentReverted { timestamp, .. }
            | LedgerEvent::AccountClosed { timestamp, .. }
            | LedgerEvent::AccountReopened { timestamp, .. } => *timestamp,
        })
    }
}
