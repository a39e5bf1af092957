use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::rounding::AmountRounder;

use super::overlap::MonthWindow;
use super::RentalPeriod;

/// occupancy of a single calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRecord {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub days_in_month: u32,
    pub occupied_days: u32,
    /// display only, amounts are prorated from the exact day ratio
    pub occupancy_fraction: Decimal,
    pub prorated_amount: Option<Money>,
}

impl MonthRecord {
    /// the whole calendar month lies inside the period
    pub fn is_full(&self) -> bool {
        self.occupied_days == self.days_in_month
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied_days > 0
    }
}

/// month-by-month breakdown of a rental period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingResult {
    /// months entirely covered by the period (informational)
    pub full_months: u32,
    /// months with at least one occupied day, the billed quantity
    pub occupied_months: u32,
    pub months: Vec<MonthRecord>,
    /// theoretical pro-rata total, never the invoiced amount
    pub prorated_subtotal: Option<Money>,
}

impl BillingResult {
    pub fn total_occupied_days(&self) -> u32 {
        self.months.iter().map(|m| m.occupied_days).sum()
    }

    /// months actually charged; a period always bills at least one
    pub fn months_due(&self) -> u32 {
        self.occupied_months.max(1)
    }

    /// lenient charge: every touched month billed at the full price
    pub fn billed_amount(&self, monthly_price: Money) -> Money {
        monthly_price * Decimal::from(self.months_due())
    }
}

/// walks a rental period one calendar month at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct BillingPeriodCalculator {
    rounder: AmountRounder,
}

impl BillingPeriodCalculator {
    pub fn new(rounder: AmountRounder) -> Self {
        Self { rounder }
    }

    pub fn rounder(&self) -> &AmountRounder {
        &self.rounder
    }

    /// calculate the breakdown for a period
    pub fn calculate(&self, period: &RentalPeriod) -> Result<BillingResult> {
        self.calculate_range(period.start_date, period.end_date, period.monthly_price)
    }

    /// calculate the breakdown for an explicit date range
    pub fn calculate_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        monthly_price: Option<Money>,
    ) -> Result<BillingResult> {
        if end_date < start_date {
            return Err(BillingError::InvalidPeriod { start_date, end_date });
        }

        let last = MonthWindow::containing(end_date);
        let mut window = Some(MonthWindow::containing(start_date));

        let mut months = Vec::new();
        let mut full_months = 0;
        let mut occupied_months = 0;
        let mut raw_subtotal = Decimal::ZERO;

        while let Some(current) = window.filter(|w| *w <= last) {
            let occupied_days = current.overlap_days(start_date, end_date);
            let days_in_month = current.days_in_month();

            // multiply before dividing so exact midpoints survive
            let prorated_amount = monthly_price.map(|price| {
                let exact = price.times(Decimal::from(occupied_days)) / Decimal::from(days_in_month);
                let amount = self.rounder.round(exact);
                raw_subtotal += amount;
                Money::from_decimal(amount)
            });

            let record = MonthRecord {
                year: current.year(),
                month: current.month(),
                label: current.label(),
                days_in_month,
                occupied_days,
                occupancy_fraction: Decimal::from(occupied_days) / Decimal::from(days_in_month),
                prorated_amount,
            };

            if record.is_full() {
                full_months += 1;
            }
            if record.is_occupied() {
                occupied_months += 1;
            }
            months.push(record);

            window = current.next();
        }

        let prorated_subtotal =
            monthly_price.map(|_| Money::from_decimal(self.rounder.round(raw_subtotal)));

        debug!(
            %start_date,
            %end_date,
            months = months.len(),
            full_months,
            occupied_months,
            prorated_subtotal = ?prorated_subtotal,
            "billing period calculated"
        );

        Ok(BillingResult {
            full_months,
            occupied_months,
            months,
            prorated_subtotal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::RoundingMode;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calculator() -> BillingPeriodCalculator {
        BillingPeriodCalculator::default()
    }

    #[test]
    fn test_single_full_month() {
        let result = calculator()
            .calculate_range(date(2025, 1, 1), date(2025, 1, 31), None)
            .unwrap();

        assert_eq!(result.full_months, 1);
        assert_eq!(result.occupied_months, 1);
        assert_eq!(result.months.len(), 1);
        assert_eq!(result.months[0].label, "January 2025");
        assert_eq!(result.months[0].occupancy_fraction, Decimal::ONE);
        assert!(result.prorated_subtotal.is_none());
        assert!(result.months[0].prorated_amount.is_none());
    }

    #[test]
    fn test_partial_months() {
        let result = calculator()
            .calculate_range(date(2025, 1, 15), date(2025, 2, 10), None)
            .unwrap();

        assert_eq!(result.full_months, 0);
        assert_eq!(result.occupied_months, 2);

        let jan = &result.months[0];
        assert_eq!((jan.occupied_days, jan.days_in_month), (17, 31));
        let feb = &result.months[1];
        assert_eq!((feb.occupied_days, feb.days_in_month), (10, 28));
        assert_eq!(feb.occupancy_fraction, Decimal::from(10) / Decimal::from(28));
    }

    #[test]
    fn test_month_boundary_straddle() {
        let result = calculator()
            .calculate_range(date(2025, 3, 31), date(2025, 4, 1), None)
            .unwrap();

        assert_eq!(result.full_months, 0);
        assert_eq!(result.occupied_months, 2);
        assert_eq!(result.total_occupied_days(), 2);
    }

    #[test]
    fn test_one_day_period() {
        let result = calculator()
            .calculate_range(date(2025, 6, 10), date(2025, 6, 10), None)
            .unwrap();

        assert_eq!(result.months.len(), 1);
        assert_eq!(result.months[0].occupied_days, 1);
        assert_eq!(result.occupied_months, 1);
        assert_eq!(result.full_months, 0);
    }

    #[test]
    fn test_whole_months_across_year_end() {
        let result = calculator()
            .calculate_range(date(2024, 11, 1), date(2025, 2, 28), None)
            .unwrap();

        assert_eq!(result.full_months, 4);
        assert_eq!(result.occupied_months, 4);
        let labels: Vec<_> = result.months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["November 2024", "December 2024", "January 2025", "February 2025"]
        );
    }

    #[test]
    fn test_invalid_period() {
        let err = calculator()
            .calculate_range(date(2025, 2, 1), date(2025, 1, 1), None)
            .unwrap_err();
        assert!(matches!(err, BillingError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_prorated_amounts() {
        let period = RentalPeriod::new(date(2025, 1, 15), date(2025, 2, 10))
            .unwrap()
            .with_price(Money::from_major(100));
        let result = calculator().calculate(&period).unwrap();

        // 100 * 17/31 = 54.838..., 100 * 10/28 = 35.714...
        assert_eq!(result.months[0].prorated_amount, Some(Money::from_decimal(dec!(54.84))));
        assert_eq!(result.months[1].prorated_amount, Some(Money::from_decimal(dec!(35.71))));
        assert_eq!(result.prorated_subtotal, Some(Money::from_decimal(dec!(90.55))));

        // pro-rata stays below the lenient charge
        assert_eq!(result.billed_amount(Money::from_major(100)), Money::from_major(200));
    }

    #[test]
    fn test_rounding_mode_applies_per_month() {
        // 0.15 * 15/30 = 0.075, a midpoint at two places
        let period = RentalPeriod::new(date(2025, 4, 16), date(2025, 4, 30))
            .unwrap()
            .with_price(Money::from_decimal(dec!(0.15)));

        let half_up = BillingPeriodCalculator::new(
            AmountRounder::new(RoundingMode::HalfUp, 2).unwrap(),
        );
        let half_down = BillingPeriodCalculator::new(
            AmountRounder::new(RoundingMode::HalfDown, 2).unwrap(),
        );
        let bankers = BillingPeriodCalculator::new(
            AmountRounder::new(RoundingMode::Bankers, 2).unwrap(),
        );

        let amount = |c: BillingPeriodCalculator| c.calculate(&period).unwrap().months[0].prorated_amount;
        assert_eq!(amount(half_up), Some(Money::from_decimal(dec!(0.08))));
        assert_eq!(amount(half_down), Some(Money::from_decimal(dec!(0.07))));
        assert_eq!(amount(bankers), Some(Money::from_decimal(dec!(0.08))));
    }

    #[test]
    fn test_idempotent() {
        let period = RentalPeriod::new(date(2024, 2, 10), date(2024, 5, 3))
            .unwrap()
            .with_price(Money::from_decimal(dec!(79.90)));
        let calc = calculator();
        assert_eq!(calc.calculate(&period).unwrap(), calc.calculate(&period).unwrap());
    }

    #[test]
    fn test_midpoint_with_repeating_fraction() {
        let one_day = |price: Decimal, mode: RoundingMode| {
            let calc = BillingPeriodCalculator::new(AmountRounder::new(mode, 2).unwrap());
            calc.calculate_range(date(2025, 2, 3), date(2025, 2, 3), Some(Money::from_decimal(price)))
                .unwrap()
                .months[0]
                .prorated_amount
        };

        // 28.14 * 1/28 = 1.005 exactly, though 1/28 repeats
        assert_eq!(one_day(dec!(28.14), RoundingMode::HalfUp), Some(Money::from_decimal(dec!(1.01))));
        assert_eq!(one_day(dec!(28.14), RoundingMode::HalfDown), Some(Money::from_decimal(dec!(1.00))));
        assert_eq!(one_day(dec!(28.14), RoundingMode::Bankers), Some(Money::from_decimal(dec!(1.00))));

        // 10.385 * 3/31 = 1.005 exactly
        let calc = BillingPeriodCalculator::new(AmountRounder::new(RoundingMode::HalfDown, 2).unwrap());
        let result = calc
            .calculate_range(date(2025, 1, 29), date(2025, 1, 31), Some(Money::from_decimal(dec!(10.385))))
            .unwrap();
        assert_eq!(result.months[0].prorated_amount, Some(Money::from_decimal(dec!(1.00))));
        assert_eq!(result.prorated_subtotal, Some(Money::from_decimal(dec!(1.00))));
    }
}
