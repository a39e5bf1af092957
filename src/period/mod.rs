pub mod calculator;
pub mod overlap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{BillingError, Result};

pub use calculator::{BillingPeriodCalculator, BillingResult, MonthRecord};
pub use overlap::{occupied_days, MonthWindow};

/// a rental's occupancy, both endpoints inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_price: Option<Money>,
}

impl RentalPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        let period = Self {
            start_date,
            end_date,
            monthly_price: None,
        };
        period.validate()?;
        Ok(period)
    }

    pub fn with_price(mut self, monthly_price: Money) -> Self {
        self.monthly_price = Some(monthly_price);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.end_date < self.start_date {
            return Err(BillingError::InvalidPeriod {
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        Ok(())
    }

    /// number of occupied days, endpoints included
    pub fn total_days(&self) -> u32 {
        ((self.end_date - self.start_date).num_days() + 1).max(0) as u32
    }
}
