use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::account::Installment;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

/// generate the installment schedule of a credit sale
///
/// The first installment falls due on the purchase date and each following one
/// a calendar month later. Every installment carries `principal / count`; the
/// split residual is not moved onto the last installment.
pub fn generate_schedule(
    principal: Money,
    installment_count: u32,
    purchase_date: NaiveDate,
) -> Result<Vec<Installment>> {
    if !principal.is_positive() {
        return Err(LedgerError::invalid_input(format!(
            "principal must be positive, got {}",
            principal
        )));
    }

    let amount = principal
        .split_even(installment_count)
        .ok_or_else(|| LedgerError::invalid_input("installment count must be at least 1"))?;

    let installments = (1..=installment_count)
        .map(|sequence_number| {
            let due_date = add_months(purchase_date, sequence_number - 1).ok_or_else(|| {
                LedgerError::InvalidDate {
                    message: format!(
                        "installment {} of {} overflows the calendar",
                        sequence_number, purchase_date
                    ),
                }
            })?;
            Ok(Installment::new(sequence_number, due_date, amount))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        %principal,
        installment_count,
        %purchase_date,
        %amount,
        "generated installment schedule"
    );

    Ok(installments)
}

/// parse an installment count typed into a form
pub fn parse_installment_count(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let count: i64 = trimmed.parse().map_err(|_| {
        LedgerError::invalid_input(format!("installment count {:?} is not an integer", trimmed))
    })?;

    u32::try_from(count)
        .ok()
        .filter(|count| *count > 0)
        .ok_or_else(|| {
            LedgerError::invalid_input(format!(
                "installment count must be a positive integer, got {}",
                count
            ))
        })
}

/// add calendar months to a date
///
/// The month field is incremented with year rollover; a day that does not exist
/// in the target month spills into the next one (jan 31 + 1 month = mar 3).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(i64::from(date.year()) + total / 12).ok()?;
    let month = (total % 12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(date.day0())))
}

/// whole days from `today` until `date`, negative when already past
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}
