/// quick start - bill two storage units and a pallet on one invoice
use rental_billing_rs::chrono::NaiveDate;
use rental_billing_rs::invoice::InvoiceView;
use rental_billing_rs::{
    AssetKind, BillingConfig, InvoiceAggregator, Money, PaymentStatus, Rate, RentalLineItem,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("info");

    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid date");

    let items = vec![
        RentalLineItem::new(AssetKind::Unit, "Unit A1", Money::from_major(100))
            .with_dates(date(2025, 1, 1)?, date(2025, 1, 31)?)
            .with_status(PaymentStatus::Paid),
        RentalLineItem::new(AssetKind::Unit, "Unit B4", Money::from_major(100))
            .with_dates(date(2025, 1, 15)?, date(2025, 2, 10)?),
        RentalLineItem::new(AssetKind::Pallet, "Pallet 12", Money::from_major(100))
            .with_status(PaymentStatus::Overdue),
    ];

    // 19% vat, half-up rounding to cents
    let config = BillingConfig::standard_vat(Rate::from_percentage(19));
    let invoice = InvoiceAggregator::new(config)?.aggregate(&items)?;

    println!("{}", InvoiceView::from_invoice(&invoice, config.decimal_scale).to_json_pretty()?);

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
