//! nested key-value document shape of an account, as kept by a document store
use serde_json::Value;

use crate::account::Account;
use crate::errors::Result;

/// serialize an account into its document tree
pub fn to_document(account: &Account) -> Result<Value> {
    Ok(serde_json::to_value(account)?)
}

/// rebuild an account from a stored document tree
///
/// Documents whose installments are not dense `1..=installment_count` in
/// order are rejected with `InvalidInput`.
pub fn from_document(document: Value) -> Result<Account> {
    let account: Account = serde_json::from_value(document)?;
    account.validate_schedule()?;
    Ok(account)
}

/// pretty-printed json, for logs and debugging screens
pub fn to_json_pretty(account: &Account) -> Result<String> {
    Ok(serde_json::to_string_pretty(account)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::errors::LedgerError;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_document_layout() {
        let purchase = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let mut account =
            Account::open("Maria", Money::from_str_exact("1200.00").unwrap(), 3, purchase).unwrap();
        account
            .toggle_installment_paid(1, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
            .unwrap();

        let doc = to_document(&account).unwrap();

        assert_eq!(doc["customer_name"], json!("Maria"));
        assert_eq!(doc["purchase_date"], json!("2025-01-15"));
        assert_eq!(doc["closed"], json!(false));
        assert_eq!(doc["closed_date"], Value::Null);
        assert!(doc.get("description").is_none());

        let first = &doc["installments"][0];
        assert_eq!(first["sequence_number"], json!(1));
        assert_eq!(first["due_date"], json!("2025-01-15"));
        assert_eq!(first["paid"], json!(true));
        assert_eq!(first["payment_date"], json!("2025-01-20"));
        assert_eq!(doc["installments"][2]["due_date"], json!("2025-03-15"));

        assert_eq!(from_document(doc).unwrap(), account);
    }

    #[test]
    fn test_reordered_installments_rejected() {
        let purchase = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let account = Account::open("Maria", Money::from_major(200), 2, purchase).unwrap();

        let mut doc = to_document(&account).unwrap();
        if let Some(installments) = doc["installments"].as_array_mut() {
            installments.reverse();
        }

        let err = from_document(doc).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput { .. }));
    }

    #[test]
    fn test_installment_count_mismatch_rejected() {
        let purchase = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let account = Account::open("Maria", Money::from_major(300), 3, purchase).unwrap();

        let mut doc = to_document(&account).unwrap();
        doc["installment_count"] = json!(4);

        let err = from_document(doc).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput { .. }));
    }

    #[test]
    fn test_malformed_document() {
        let err = from_document(json!({ "customer_name": "Maria" })).unwrap_err();
        assert!(matches!(err, LedgerError::Serialization(_)));
    }
}
