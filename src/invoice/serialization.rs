/// flattened, display-ready views of a consolidated invoice
use serde::{Deserialize, Serialize};

use crate::types::{AssetKind, LineItemId, PaymentStatus};

use super::ConsolidatedInvoice;

/// serializable summary of an invoice with amounts fixed to a scale
#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceView {
    pub period_start: String,
    pub period_end: String,
    pub status: PaymentStatus,
    pub lines: Vec<InvoiceLineView>,
    pub subtotal_ex_vat: String,
    pub vat_rate_percent: String,
    pub vat_amount: String,
    pub grand_total: String,
    pub prorated_subtotal: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceLineView {
    pub id: LineItemId,
    pub kind: AssetKind,
    pub display_name: String,
    pub status: PaymentStatus,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub monthly_price: String,
    pub months_due: u32,
    pub full_months: Option<u32>,
    pub line_total: String,
}

impl InvoiceView {
    pub fn from_invoice(invoice: &ConsolidatedInvoice, scale: u32) -> Self {
        let (period_start, period_end) = invoice.period_display.labels();

        InvoiceView {
            period_start,
            period_end,
            status: invoice.status_rollup,
            lines: invoice
                .line_items
                .iter()
                .map(|line| InvoiceLineView {
                    id: line.item.id,
                    kind: line.item.kind,
                    display_name: line.item.display_name.clone(),
                    status: line.item.payment_status,
                    start_date: line.item.start_date.map(|d| d.to_string()),
                    end_date: line.item.end_date.map(|d| d.to_string()),
                    monthly_price: line.item.monthly_price.to_fixed(scale),
                    months_due: line.months_due,
                    full_months: line.billing.as_ref().map(|b| b.full_months),
                    line_total: line.line_total.to_fixed(scale),
                })
                .collect(),
            subtotal_ex_vat: invoice.subtotal_ex_vat.to_fixed(scale),
            vat_rate_percent: invoice.vat_rate.as_percentage().normalize().to_string(),
            vat_amount: invoice.vat_amount.to_fixed(scale),
            grand_total: invoice.grand_total.to_fixed(scale),
            prorated_subtotal: invoice.prorated_subtotal.to_fixed(scale),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
