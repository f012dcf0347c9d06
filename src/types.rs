use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a credit account
pub type AccountId = Uuid;

/// label used for accounts with no unpaid installment left
pub const ALL_PAID_LABEL: &str = "AllPaid";

/// traffic-light status of a due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueStatus {
    /// nothing due soon, or nothing due at all
    Ok,
    /// due within the upcoming window
    Warning,
    /// due date already passed
    Overdue,
}

/// grouping key for the next unpaid installment of an account
///
/// Ordering puts every date before `AllPaid`, which is what the portfolio
/// view sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DueDateKey {
    Date(NaiveDate),
    AllPaid,
}

impl DueDateKey {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DueDateKey::Date(date) => Some(*date),
            DueDateKey::AllPaid => None,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DueDateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueDateKey::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DueDateKey::AllPaid => f.write_str(ALL_PAID_LABEL),
        }
    }
}

/// which accounts a store query should return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccountScope {
    #[default]
    Open,
    Closed,
    All,
}

impl AccountScope {
    pub fn includes(&self, closed: bool) -> bool {
        match self {
            AccountScope::Open => !closed,
            AccountScope::Closed => closed,
            AccountScope::All => true,
        }
    }
}
