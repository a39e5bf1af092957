use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::{Money, MONEY_PRECISION};
use crate::errors::{BillingError, Result};

/// default number of retained decimal digits (cents)
pub const DEFAULT_SCALE: u32 = 2;

/// largest scale a rounder accepts, bounded by the precision of [`Money`]
pub const MAX_SCALE: u32 = MONEY_PRECISION;

/// how a midpoint is resolved at the target scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoundingMode {
    /// half away from zero: 2.345 -> 2.35, -2.345 -> -2.35
    #[default]
    HalfUp,
    /// half toward zero: 2.345 -> 2.34
    HalfDown,
    /// half to even: 2.345 -> 2.34, 2.355 -> 2.36
    Bankers,
}

impl RoundingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::HalfUp => "half_up",
            RoundingMode::HalfDown => "half_down",
            RoundingMode::Bankers => "bankers",
        }
    }

    fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::Bankers => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "half_up" => Ok(RoundingMode::HalfUp),
            "half_down" => Ok(RoundingMode::HalfDown),
            "bankers" | "half_even" => Ok(RoundingMode::Bankers),
            _ => Err(BillingError::InvalidRoundingMode {
                message: format!("unknown mode '{}'", s),
            }),
        }
    }
}

impl TryFrom<String> for RoundingMode {
    type Error = BillingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RoundingMode> for String {
    fn from(mode: RoundingMode) -> Self {
        mode.as_str().to_string()
    }
}

/// round `value` to `scale` decimal places using `mode`
pub fn round(value: Decimal, mode: RoundingMode, scale: u32) -> Result<Decimal> {
    check_scale(scale)?;
    Ok(value.round_dp_with_strategy(scale, mode.strategy()))
}

fn check_scale(scale: u32) -> Result<()> {
    if scale > MAX_SCALE {
        return Err(BillingError::InvalidRoundingMode {
            message: format!("scale {} exceeds maximum of {}", scale, MAX_SCALE),
        });
    }
    Ok(())
}

/// a validated rounding policy, applied to per-month amounts and totals alike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRounder {
    mode: RoundingMode,
    scale: u32,
}

impl AmountRounder {
    pub fn new(mode: RoundingMode, scale: u32) -> Result<Self> {
        check_scale(scale)?;
        Ok(Self { mode, scale })
    }

    /// build from host-supplied mode name
    pub fn parse(mode: &str, scale: u32) -> Result<Self> {
        Self::new(mode.parse()?, scale)
    }

    pub fn mode(&self) -> RoundingMode {
        self.mode
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.scale, self.mode.strategy())
    }

    pub fn round_money(&self, value: Money) -> Money {
        Money::from_decimal(self.round(value.as_decimal()))
    }
}

impl Default for AmountRounder {
    fn default() -> Self {
        Self {
            mode: RoundingMode::HalfUp,
            scale: DEFAULT_SCALE,
        }
    }
}
