use std::collections::BTreeMap;

use crate::types::PaymentStatus;

impl PaymentStatus {
    /// worst-case status across items: overdue > unpaid > paid
    ///
    /// an empty set has nothing owed and rolls up to paid
    pub fn rollup<I>(statuses: I) -> PaymentStatus
    where
        I: IntoIterator<Item = PaymentStatus>,
    {
        statuses.into_iter().max().unwrap_or(PaymentStatus::Paid)
    }
}

/// number of items per status
pub fn count_by_status<I>(statuses: I) -> BTreeMap<PaymentStatus, usize>
where
    I: IntoIterator<Item = PaymentStatus>,
{
    let mut counts = BTreeMap::new();
    for status in statuses {
        *counts.entry(status).or_insert(0) += 1;
    }
    counts
}
