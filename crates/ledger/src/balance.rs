//! Pure balance arithmetic: maps a posting's kind and amount to the signed
//! wallet-balance change.
//!
//! Everything here is side-effect free; the posting/removal side effects live
//! in `ops::transactions`, which is the only writer of wallet balances.

use crate::{LedgerError, ResultLedger, TransactionKind};

/// Returns the signed balance delta implied by posting `amount_minor` of the
/// given kind.
///
/// `Income` and `LoanReceived` increase the wallet, `Expense` and `LoanGiven`
/// decrease it. The amount is always stored positive; the sign is derived
/// here and nowhere else.
///
/// A zero amount is accepted (it posts and leaves the balance unchanged);
/// negative amounts are rejected with `InvalidAmount`.
pub fn signed_delta(kind: TransactionKind, amount_minor: i64) -> ResultLedger<i64> {
    if amount_minor < 0 {
        return Err(LedgerError::InvalidAmount(format!(
            "amount_minor must be >= 0, got {amount_minor}"
        )));
    }
    match kind {
        TransactionKind::Income | TransactionKind::LoanReceived => Ok(amount_minor),
        TransactionKind::Expense | TransactionKind::LoanGiven => Ok(-amount_minor),
    }
}

/// Returns the delta that undoes a previously posted transaction.
///
/// Used when a posting is deleted: applying it restores the wallet to its
/// pre-post balance exactly.
pub fn reverse_delta(kind: TransactionKind, amount_minor: i64) -> ResultLedger<i64> {
    signed_delta(kind, amount_minor).map(|delta| -delta)
}

/// Returns `true` if the kind accumulates into the income side of reports.
///
/// The reporting engine classifies with the same rule `signed_delta` uses for
/// signs, so a report recomputed from the log always agrees with the cached
/// wallet balances.
#[must_use]
pub const fn is_inflow(kind: TransactionKind) -> bool {
    matches!(
        kind,
        TransactionKind::Income | TransactionKind::LoanReceived
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_and_loan_received_are_positive() {
        assert_eq!(signed_delta(TransactionKind::Income, 1050).unwrap(), 1050);
        assert_eq!(
            signed_delta(TransactionKind::LoanReceived, 200).unwrap(),
            200
        );
    }

    #[test]
    fn expense_and_loan_given_are_negative() {
        assert_eq!(signed_delta(TransactionKind::Expense, 1050).unwrap(), -1050);
        assert_eq!(signed_delta(TransactionKind::LoanGiven, 200).unwrap(), -200);
    }

    #[test]
    fn reverse_negates() {
        for kind in [
            TransactionKind::Income,
            TransactionKind::Expense,
            TransactionKind::LoanGiven,
            TransactionKind::LoanReceived,
        ] {
            let delta = signed_delta(kind, 730).unwrap();
            assert_eq!(reverse_delta(kind, 730).unwrap(), -delta);
        }
    }

    #[test]
    fn zero_amount_is_accepted() {
        assert_eq!(signed_delta(TransactionKind::Expense, 0).unwrap(), 0);
        assert_eq!(reverse_delta(TransactionKind::Income, 0).unwrap(), 0);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = signed_delta(TransactionKind::Income, -1).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidAmount("amount_minor must be >= 0, got -1".to_string())
        );
    }

    #[test]
    fn classification_matches_sign() {
        for kind in [
            TransactionKind::Income,
            TransactionKind::Expense,
            TransactionKind::LoanGiven,
            TransactionKind::LoanReceived,
        ] {
            let delta = signed_delta(kind, 1).unwrap();
            assert_eq!(is_inflow(kind), delta > 0);
        }
    }
}
