use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::schedule::generate_schedule;
use crate::types::AccountId;

/// one scheduled payment of a credit account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub sequence_number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub paid: bool,
    pub payment_date: Option<NaiveDate>,
}

impl Installment {
    pub fn new(sequence_number: u32, due_date: NaiveDate, amount: Money) -> Self {
        Self {
            sequence_number,
            due_date,
            amount,
            paid: false,
            payment_date: None,
        }
    }

    /// flip paid state; paying stamps `today`, reverting clears the stamp
    pub fn toggle_paid(&mut self, today: NaiveDate) -> bool {
        if self.paid {
            self.paid = false;
            self.payment_date = None;
        } else {
            self.paid = true;
            self.payment_date = Some(today);
        }
        self.paid
    }
}

/// installment-credit sale ("crediário")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub principal: Money,
    pub installment_count: u32,
    pub purchase_date: NaiveDate,
    pub installments: Vec<Installment>,
    pub closed: bool,
    pub closed_date: Option<NaiveDate>,
}

impl Account {
    /// open a new account with its full schedule
    pub fn open(
        customer_name: impl Into<String>,
        principal: Money,
        installment_count: u32,
        purchase_date: NaiveDate,
    ) -> Result<Self> {
        let customer_name = customer_name.into();
        if customer_name.trim().is_empty() {
            return Err(LedgerError::invalid_input("customer name is required"));
        }

        let installments = generate_schedule(principal, installment_count, purchase_date)?;

        Ok(Self {
            id: Uuid::new_v4(),
            customer_name,
            description: None,
            principal,
            installment_count,
            purchase_date,
            installments,
            closed: false,
            closed_date: None,
        })
    }

    pub fn builder<'a>() -> AccountBuilder<'a> {
        AccountBuilder::new()
    }

    /// look up an installment by its 1-based sequence number
    pub fn installment(&self, sequence_number: u32) -> Result<&Installment> {
        self.installment_index(sequence_number)
            .map(|idx| &self.installments[idx])
    }

    /// toggle the paid flag of one installment, returning the new flag
    pub fn toggle_installment_paid(&mut self, sequence_number: u32, today: NaiveDate) -> Result<bool> {
        let idx = self.installment_index(sequence_number)?;
        Ok(self.installments[idx].toggle_paid(today))
    }

    /// mark the account closed; callers only offer this once everything is paid
    pub fn close(&mut self, today: NaiveDate) {
        self.closed = true;
        self.closed_date = Some(today);
    }

    pub fn reopen(&mut self) {
        self.closed = false;
        self.closed_date = None;
    }

    /// first installment (lowest sequence number) still unpaid
    pub fn next_unpaid(&self) -> Option<&Installment> {
        self.unpaid().min_by_key(|i| i.sequence_number)
    }

    pub fn unpaid(&self) -> impl Iterator<Item = &Installment> {
        self.installments.iter().filter(|i| !i.paid)
    }

    /// sum of unpaid installment amounts
    pub fn pending_balance(&self) -> Money {
        self.unpaid().map(|i| i.amount).sum()
    }

    pub fn paid_total(&self) -> Money {
        self.installments
            .iter()
            .filter(|i| i.paid)
            .map(|i| i.amount)
            .sum()
    }

    pub fn paid_count(&self) -> usize {
        self.installments.iter().filter(|i| i.paid).count()
    }

    pub fn all_paid(&self) -> bool {
        self.installments.iter().all(|i| i.paid)
    }

    /// check the schedule is dense `1..=installment_count` in order
    pub fn validate_schedule(&self) -> Result<()> {
        if self.installment_count == 0 {
            return Err(LedgerError::invalid_input(format!(
                "account {} has no installments",
                self.id
            )));
        }
        if self.installments.len() != self.installment_count as usize {
            return Err(LedgerError::invalid_input(format!(
                "account {} lists {} installments, expected {}",
                self.id,
                self.installments.len(),
                self.installment_count
            )));
        }
        for (expected, installment) in (1..).zip(&self.installments) {
            if installment.sequence_number != expected {
                return Err(LedgerError::invalid_input(format!(
                    "account {} has installment {} at position {}",
                    self.id, installment.sequence_number, expected
                )));
            }
        }
        Ok(())
    }

    fn installment_index(&self, sequence_number: u32) -> Result<usize> {
        self.installments
            .iter()
            .position(|i| i.sequence_number == sequence_number)
            .ok_or(LedgerError::InstallmentNotFound {
                account_id: self.id,
                sequence_number,
            })
    }
}

/// builder for opening accounts from form input
#[derive(Default)]
pub struct AccountBuilder<'a> {
    customer_name: Option<String>,
    description: Option<String>,
    principal: Option<Money>,
    installment_count: Option<u32>,
    purchase_date: Option<NaiveDate>,
    time_provider: Option<&'a SafeTimeProvider>,
}

impl<'a> AccountBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(mut self, time: &'a SafeTimeProvider) -> Self {
        self.time_provider = Some(time);
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn installments(mut self, count: u32) -> Self {
        self.installment_count = Some(count);
        self
    }

    pub fn purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    /// build, defaulting the purchase date to the UTC date of the stored clock
    /// (system clock when none was set)
    pub fn build(self) -> Result<Account> {
        let purchase_date = match (self.purchase_date, self.time_provider) {
            (Some(date), _) => date,
            (None, Some(time)) => time.now().date_naive(),
            (None, None) => {
                SafeTimeProvider::new(hourglass_rs::TimeSource::System)
                    .now()
                    .date_naive()
            }
        };

        let customer_name = self
            .customer_name
            .ok_or_else(|| LedgerError::invalid_input("customer name is required"))?;
        let principal = self
            .principal
            .ok_or_else(|| LedgerError::invalid_input("principal is required"))?;
        let installment_count = self
            .installment_count
            .ok_or_else(|| LedgerError::invalid_input("installment count is required"))?;

        let mut account = Account::open(customer_name, principal, installment_count, purchase_date)?;
        account.description = self.description.filter(|d| !d.trim().is_empty());
        Ok(account)
    }
}
