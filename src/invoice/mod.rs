pub mod aggregator;
pub mod serialization;
pub mod status;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::period::{BillingResult, RentalPeriod};
use crate::types::{AssetKind, LineItemId, PaymentStatus};

pub use aggregator::InvoiceAggregator;
pub use serialization::{InvoiceLineView, InvoiceView};
pub use status::count_by_status;

/// sentinel shown when line items do not share one date range
pub const MIXED_PERIOD: &str = "Mixed";

/// one rented unit or pallet as fetched by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalLineItem {
    pub id: LineItemId,
    pub kind: AssetKind,
    pub display_name: String,
    pub monthly_price: Money,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub payment_status: PaymentStatus,
}

impl RentalLineItem {
    pub fn new(kind: AssetKind, display_name: impl Into<String>, monthly_price: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            display_name: display_name.into(),
            monthly_price,
            start_date: None,
            end_date: None,
            payment_status: PaymentStatus::Unpaid,
        }
    }

    pub fn with_id(mut self, id: LineItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = status;
        self
    }

    /// the priced period, `None` unless both dates are known
    pub fn period(&self) -> Option<RentalPeriod> {
        match (self.start_date, self.end_date) {
            (Some(start_date), Some(end_date)) => Some(RentalPeriod {
                start_date,
                end_date,
                monthly_price: Some(self.monthly_price),
            }),
            _ => None,
        }
    }
}

/// date range shown on a consolidated invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeriodDisplay {
    Range {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    /// items disagree on start or end
    Mixed,
    /// no dates known
    Unspecified,
}

impl PeriodDisplay {
    /// derive the display from line items
    ///
    /// a combined range is never synthesized from differing items
    pub fn from_items(items: &[RentalLineItem]) -> Self {
        let Some(first) = items.first() else {
            return PeriodDisplay::Unspecified;
        };

        let uniform = items
            .iter()
            .all(|item| item.start_date == first.start_date && item.end_date == first.end_date);
        if !uniform {
            return PeriodDisplay::Mixed;
        }

        match (first.start_date, first.end_date) {
            (Some(start_date), Some(end_date)) => PeriodDisplay::Range { start_date, end_date },
            _ => PeriodDisplay::Unspecified,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, PeriodDisplay::Mixed)
    }

    /// start and end as display strings
    pub fn labels(&self) -> (String, String) {
        match self {
            PeriodDisplay::Range { start_date, end_date } => {
                (start_date.to_string(), end_date.to_string())
            }
            PeriodDisplay::Mixed => (MIXED_PERIOD.to_string(), MIXED_PERIOD.to_string()),
            PeriodDisplay::Unspecified => (String::new(), String::new()),
        }
    }
}

/// billed quantities for one line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub item: RentalLineItem,
    pub months_due: u32,
    /// `monthly_price * months_due` rounded on its own; the invoice subtotal
    /// rounds the exact sum once, so line totals may not add up to it
    pub line_total: Money,
    /// absent when the item has no period information
    pub billing: Option<BillingResult>,
}

/// one invoice covering all rentals of a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedInvoice {
    pub line_items: Vec<InvoiceLine>,
    pub per_item_months_due: Vec<u32>,
    pub subtotal_ex_vat: Money,
    pub vat_rate: Rate,
    pub vat_amount: Money,
    pub grand_total: Money,
    pub status_rollup: PaymentStatus,
    pub period_display: PeriodDisplay,
    /// sum of per-item pro-rata figures, for audit only
    pub prorated_subtotal: Money,
}

impl ConsolidatedInvoice {
    pub fn is_settled(&self) -> bool {
        self.status_rollup.is_settled()
    }

    pub fn total_months_due(&self) -> u32 {
        self.per_item_months_due.iter().sum()
    }

    /// get json representation
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}
