use thiserror::Error;

use crate::types::AccountId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("installment {sequence_number} not found in account {account_id}")]
    InstallmentNotFound {
        account_id: AccountId,
        sequence_number: u32,
    },

    #[error("account not found: {id}")]
    AccountNotFound {
        id: AccountId,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LedgerError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        LedgerError::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
