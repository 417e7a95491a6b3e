//! Payment state machine
//!
//! Transaction-level state driven by reconciliation outcomes:
//! Due -> Partial -> Paid. Paid is terminal.

use rust_decimal::Decimal;
use shared::transaction::{PaymentState, PaymentStatus};

/// Advance the payment state after a reconciliation
///
/// * Exact or Overpaid -> Paid
/// * Underpaid with a positive cumulative tendered amount -> Partial
/// * No money tendered at all -> state unchanged (stays Due)
/// * Paid never transitions away
pub fn advance_state(
    current: PaymentState,
    status: PaymentStatus,
    cumulative_tendered: Decimal,
) -> PaymentState {
    if current == PaymentState::Paid {
        return PaymentState::Paid;
    }

    match status {
        PaymentStatus::Exact | PaymentStatus::Overpaid => PaymentState::Paid,
        PaymentStatus::Underpaid => {
            if cumulative_tendered > Decimal::ZERO {
                PaymentState::Partial
            } else {
                current
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_due_to_partial_on_underpayment() {
        let state = advance_state(PaymentState::Due, PaymentStatus::Underpaid, dec("10"));
        assert_eq!(state, PaymentState::Partial);
    }

    #[test]
    fn test_due_to_paid_on_exact() {
        let state = advance_state(PaymentState::Due, PaymentStatus::Exact, dec("50"));
        assert_eq!(state, PaymentState::Paid);
    }

    #[test]
    fn test_due_to_paid_on_overpayment() {
        let state = advance_state(PaymentState::Due, PaymentStatus::Overpaid, dec("60"));
        assert_eq!(state, PaymentState::Paid);
    }

    #[test]
    fn test_partial_to_paid() {
        let state = advance_state(PaymentState::Partial, PaymentStatus::Exact, dec("50"));
        assert_eq!(state, PaymentState::Paid);
    }

    #[test]
    fn test_partial_stays_partial_while_underpaid() {
        let state = advance_state(PaymentState::Partial, PaymentStatus::Underpaid, dec("30"));
        assert_eq!(state, PaymentState::Partial);
    }

    #[test]
    fn test_no_tender_stays_due() {
        let state = advance_state(PaymentState::Due, PaymentStatus::Underpaid, Decimal::ZERO);
        assert_eq!(state, PaymentState::Due);
    }

    #[test]
    fn test_paid_is_terminal() {
        // No transition leaves Paid, whatever the reconciliation says
        let state = advance_state(PaymentState::Paid, PaymentStatus::Underpaid, dec("1"));
        assert_eq!(state, PaymentState::Paid);
    }

    #[test]
    fn test_zero_total_exact_tender_reaches_paid() {
        // A zero-tender payment against a zero total reconciles as Exact
        let state = advance_state(PaymentState::Due, PaymentStatus::Exact, Decimal::ZERO);
        assert_eq!(state, PaymentState::Paid);
    }
}
