pub mod config;
pub mod decimal;
pub mod errors;
pub mod invoice;
pub mod period;
pub mod rounding;
pub mod types;

// re-export key types
pub use config::BillingConfig;
pub use decimal::{Money, Rate};
pub use errors::{BillingError, Result};
pub use invoice::{
    ConsolidatedInvoice, InvoiceAggregator, InvoiceLine, PeriodDisplay, RentalLineItem,
    MIXED_PERIOD,
};
pub use period::{
    occupied_days, BillingPeriodCalculator, BillingResult, MonthRecord, MonthWindow,
    RentalPeriod,
};
pub use rounding::{round, AmountRounder, RoundingMode};
pub use types::{AssetKind, LineItemId, PaymentStatus};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
