use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a rental line item
pub type LineItemId = Uuid;

/// rented asset kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// storage unit
    Unit,
    /// pallet space
    Pallet,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Unit => f.write_str("unit"),
            AssetKind::Pallet => f.write_str("pallet"),
        }
    }
}

/// payment status of a line item
///
/// variants are ordered by rollup priority, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// settled
    Paid,
    /// awaiting payment
    Unpaid,
    /// past due
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Overdue => "overdue",
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
