use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::account::Account;
use crate::document::{from_document, to_document};
use crate::errors::{LedgerError, Result};
use crate::types::{AccountId, AccountScope};

/// persistence seam for credit accounts
///
/// Writes replace the whole account; there is no conflict detection, so the
/// last writer wins.
pub trait AccountStore {
    fn fetch_account(&self, id: AccountId) -> Result<Account>;

    fn fetch_all_accounts(&self, scope: AccountScope) -> Result<Vec<Account>>;

    fn save_account(&mut self, account: &Account) -> Result<()>;
}

/// in-process store keeping each account as a document tree
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    documents: BTreeMap<AccountId, Value>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// raw stored document, as the remote store would hold it
    pub fn document(&self, id: AccountId) -> Option<&Value> {
        self.documents.get(&id)
    }
}

impl AccountStore for InMemoryAccountStore {
    fn fetch_account(&self, id: AccountId) -> Result<Account> {
        let document = self
            .documents
            .get(&id)
            .ok_or(LedgerError::AccountNotFound { id })?;
        from_document(document.clone())
    }

    fn fetch_all_accounts(&self, scope: AccountScope) -> Result<Vec<Account>> {
        let accounts = self
            .documents
            .values()
            .map(|document| from_document(document.clone()))
            .collect::<Result<Vec<_>>>()?;

        let accounts: Vec<Account> = accounts
            .into_iter()
            .filter(|account| scope.includes(account.closed))
            .collect();
        debug!(?scope, count = accounts.len(), "fetched accounts");
        Ok(accounts)
    }

    fn save_account(&mut self, account: &Account) -> Result<()> {
        let document = to_document(account)?;
        self.documents.insert(account.id, document);
        debug!(account_id = %account.id, "saved account");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn account(name: &str) -> Account {
        Account::open(
            name,
            Money::from_major(100),
            2,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_save_and_fetch() {
        let mut store = InMemoryAccountStore::new();
        let acc = account("Maria");
        store.save_account(&acc).unwrap();

        assert_eq!(store.fetch_account(acc.id).unwrap(), acc);
        assert!(store.document(acc.id).is_some());
    }

    #[test]
    fn test_missing_account() {
        let store = InMemoryAccountStore::new();
        let id = Uuid::new_v4();
        let err = store.fetch_account(id).unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound { id: missing } if missing == id));
    }

    #[test]
    fn test_scope() {
        let mut store = InMemoryAccountStore::new();
        let open = account("Aberta");
        let mut closed = account("Fechada");
        closed.close(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        store.save_account(&open).unwrap();
        store.save_account(&closed).unwrap();

        let open_ids: Vec<_> = store
            .fetch_all_accounts(AccountScope::Open)
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(open_ids, vec![open.id]);

        let closed_ids: Vec<_> = store
            .fetch_all_accounts(AccountScope::Closed)
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(closed_ids, vec![closed.id]);

        assert_eq!(store.fetch_all_accounts(AccountScope::All).unwrap().len(), 2);
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = InMemoryAccountStore::new();
        let acc = account("Maria");
        store.save_account(&acc).unwrap();

        let mut first = store.fetch_account(acc.id).unwrap();
        let mut second = store.fetch_account(acc.id).unwrap();
        first
            .toggle_installment_paid(1, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
            .unwrap();
        second.close(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());

        store.save_account(&first).unwrap();
        store.save_account(&second).unwrap();

        let stored = store.fetch_account(acc.id).unwrap();
        assert!(stored.closed);
        assert!(!stored.installments[0].paid);
        assert_eq!(store.len(), 1);
    }
}
