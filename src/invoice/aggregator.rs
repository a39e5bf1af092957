use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::BillingConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::period::BillingPeriodCalculator;
use crate::rounding::AmountRounder;
use crate::types::PaymentStatus;

use super::{ConsolidatedInvoice, InvoiceLine, PeriodDisplay, RentalLineItem};

/// combines a customer's rentals into one invoice
#[derive(Debug, Clone)]
pub struct InvoiceAggregator {
    config: BillingConfig,
    rounder: AmountRounder,
    calculator: BillingPeriodCalculator,
}

impl InvoiceAggregator {
    pub fn new(config: BillingConfig) -> Result<Self> {
        config.validate()?;
        let rounder = config.rounder()?;
        Ok(Self {
            config,
            rounder,
            calculator: BillingPeriodCalculator::new(rounder),
        })
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// build the consolidated invoice
    ///
    /// each item bills `max(1, occupied_months)` full months; an item without
    /// period information bills exactly one. fails on the first invalid period.
    pub fn aggregate(&self, items: &[RentalLineItem]) -> Result<ConsolidatedInvoice> {
        let mut lines = Vec::with_capacity(items.len());
        let mut raw_subtotal = Decimal::ZERO;
        let mut raw_prorated = Decimal::ZERO;

        for item in items {
            let billing = match item.period() {
                Some(period) => Some(self.calculator.calculate(&period)?),
                None => {
                    warn!(
                        item_id = %item.id,
                        name = %item.display_name,
                        "line item has no rental period, billing one month"
                    );
                    None
                }
            };

            let months_due = billing.as_ref().map_or(1, |b| b.months_due());
            let charge = item.monthly_price.times(Decimal::from(months_due));
            raw_subtotal += charge;

            if let Some(prorated) = billing.as_ref().and_then(|b| b.prorated_subtotal) {
                raw_prorated += prorated.as_decimal();
            }

            lines.push(InvoiceLine {
                item: item.clone(),
                months_due,
                line_total: Money::from_decimal(self.rounder.round(charge)),
                billing,
            });
        }

        let subtotal_ex_vat = Money::from_decimal(self.rounder.round(raw_subtotal));
        let (vat_rate, vat_amount) = if self.config.vat_enabled {
            let vat = subtotal_ex_vat.times(self.config.vat_rate.as_decimal());
            (self.config.vat_rate, Money::from_decimal(self.rounder.round(vat)))
        } else {
            (Rate::ZERO, Money::ZERO)
        };
        let grand_total = subtotal_ex_vat + vat_amount;

        let status_rollup = PaymentStatus::rollup(items.iter().map(|i| i.payment_status));
        let period_display = PeriodDisplay::from_items(items);

        debug!(
            items = items.len(),
            %subtotal_ex_vat,
            %vat_amount,
            %grand_total,
            status = %status_rollup,
            "invoice aggregated"
        );

        Ok(ConsolidatedInvoice {
            per_item_months_due: lines.iter().map(|l| l.months_due).collect(),
            line_items: lines,
            subtotal_ex_vat,
            vat_rate,
            vat_amount,
            grand_total,
            status_rollup,
            period_display,
            prorated_subtotal: Money::from_decimal(self.rounder.round(raw_prorated)),
        })
    }
}

/// one-shot aggregation with an explicit configuration
pub fn aggregate(items: &[RentalLineItem], config: &BillingConfig) -> Result<ConsolidatedInvoice> {
    InvoiceAggregator::new(*config)?.aggregate(items)
}
