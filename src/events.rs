use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::AccountId;

/// all events that can be emitted by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    AccountOpened {
        account_id: AccountId,
        customer_name: String,
        principal: Money,
        installment_count: u32,
        purchase_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    InstallmentPaid {
        account_id: AccountId,
        sequence_number: u32,
        amount: Money,
        payment_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    InstallmentReverted {
        account_id: AccountId,
        sequence_number: u32,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    AccountClosed {
        account_id: AccountId,
        closed_date: NaiveDate,
        // close is not guarded, so record whether anything was still owed
        pending_balance: Money,
        timestamp: DateTime<Utc>,
    },
    AccountReopened {
        account_id: AccountId,
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEvent {
    pub fn account_id(&self) -> AccountId {
        match self {
            LedgerEvent::AccountOpened { account_id, .. }
            | LedgerEvent::InstallmentPaid { account_id, .. }
            | LedgerEvent::InstallmentReverted { account_id, .. }
            | LedgerEvent::AccountClosed { account_id, .. }
            | LedgerEvent::AccountReopened { account_id, .. } => *account_id,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LedgerEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// events recorded for one account, oldest first
    pub fn for_account(&self, account_id: AccountId) -> impl Iterator<Item = &LedgerEvent> {
        self.events
            .iter()
            .filter(move |event| event.account_id() == account_id)
    }
}
