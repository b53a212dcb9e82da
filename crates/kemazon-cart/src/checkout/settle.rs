//! Applying the payment provider's verdict to the cart.

use kemazon_storage::StoragePort;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::event::CartEvent;
use crate::store::CartStore;

/// Payment status reported when the buyer returns from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Approved,
    Pending,
    InProcess,
    Rejected,
    /// Any status this build does not recognise, kept verbatim.
    Other(String),
}

impl PaymentStatus {
    /// Status as the provider spells it in the return URL.
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Approved => "approved",
            PaymentStatus::Pending => "pending",
            PaymentStatus::InProcess => "in_process",
            PaymentStatus::Rejected => "rejected",
            PaymentStatus::Other(s) => s,
        }
    }

    /// Whether the payment went through.
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentStatus::Approved)
    }
}

impl FromStr for PaymentStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "approved" => PaymentStatus::Approved,
            "pending" => PaymentStatus::Pending,
            "in_process" => PaymentStatus::InProcess,
            "rejected" => PaymentStatus::Rejected,
            _ => PaymentStatus::Other(s.trim().to_string()),
        })
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clear the cart if, and only if, the payment was approved.
pub fn settle<S: StoragePort>(store: &mut CartStore<S>, status: &PaymentStatus) -> Option<CartEvent> {
    if !status.is_approved() {
        tracing::info!(status = %status, "payment not approved, keeping cart");
        return None;
    }
    tracing::info!(lines = store.lines().len(), "payment approved, clearing cart");
    Some(store.clear())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ProductSnapshot;
    use crate::money::Money;
    use kemazon_storage::MemoryStore;

    fn store_with_one_line() -> CartStore<MemoryStore> {
        let mut store = CartStore::initialize(MemoryStore::new(), "settle_test");
        store.add_line(ProductSnapshot::new("1", "A", Money::from_major(10)));
        store
    }

    #[test]
    fn test_parse_status() {
        assert_eq!("approved".parse(), Ok(PaymentStatus::Approved));
        assert_eq!("IN_PROCESS".parse(), Ok(PaymentStatus::InProcess));
        assert_eq!(
            "charged_back".parse(),
            Ok(PaymentStatus::Other("charged_back".to_string()))
        );
    }

    #[test]
    fn test_settle_approved_clears() {
        let mut store = store_with_one_line();
        let event = settle(&mut store, &PaymentStatus::Approved);
        assert_eq!(event, Some(CartEvent::Cleared { lines_removed: 1 }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_settle_other_statuses_keep_cart() {
        let mut store = store_with_one_line();
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::InProcess,
            PaymentStatus::Rejected,
            PaymentStatus::Other("null".to_string()),
        ] {
            assert!(settle(&mut store, &status).is_none());
        }
        assert_eq!(store.derived_count(), 1);
    }
}
