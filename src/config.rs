use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use crate::decimal::Rate;
use crate::errors::{BillingError, Result};
use crate::rounding::{AmountRounder, RoundingMode, DEFAULT_SCALE, MAX_SCALE};

/// settings keys read by [`BillingConfig::from_settings`]
pub const KEY_VAT_ENABLED: &str = "vat_enabled";
pub const KEY_VAT_RATE: &str = "vat_rate";
pub const KEY_ROUNDING_MODE: &str = "rounding_mode";
pub const KEY_DECIMAL_SCALE: &str = "decimal_scale";

/// billing configuration injected by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub vat_enabled: bool,
    /// vat as a fraction, 19% is stored as 0.19
    pub vat_rate: Rate,
    pub rounding_mode: RoundingMode,
    pub decimal_scale: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            vat_enabled: false,
            vat_rate: Rate::ZERO,
            rounding_mode: RoundingMode::HalfUp,
            decimal_scale: DEFAULT_SCALE,
        }
    }
}

impl BillingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// vat charged at `rate`, half-up rounding to cents
    pub fn standard_vat(rate: Rate) -> Self {
        Self::new().with_vat(rate)
    }

    pub fn with_vat(mut self, rate: Rate) -> Self {
        self.vat_enabled = true;
        self.vat_rate = rate;
        self
    }

    pub fn without_vat(mut self) -> Self {
        self.vat_enabled = false;
        self
    }

    pub fn with_rounding(mut self, mode: RoundingMode, scale: u32) -> Self {
        self.rounding_mode = mode;
        self.decimal_scale = scale;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.decimal_scale > MAX_SCALE {
            return Err(BillingError::InvalidRoundingMode {
                message: format!(
                    "scale {} exceeds maximum of {}",
                    self.decimal_scale, MAX_SCALE
                ),
            });
        }

        let percent = self.vat_rate.as_percentage();
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(BillingError::InvalidConfiguration {
                message: format!("vat rate {} is outside 0..=100 percent", self.vat_rate),
            });
        }

        Ok(())
    }

    /// rounder for this configuration
    pub fn rounder(&self) -> Result<AmountRounder> {
        AmountRounder::new(self.rounding_mode, self.decimal_scale)
    }

    /// parse the host's flat key/value settings, missing keys keep defaults
    ///
    /// `vat_rate` is a percentage, e.g. "19" or "7.7"
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = settings.get(KEY_VAT_ENABLED) {
            config.vat_enabled = parse_flag(KEY_VAT_ENABLED, raw)?;
        }

        if let Some(raw) = settings.get(KEY_VAT_RATE).filter(|raw| !raw.trim().is_empty()) {
            let percent = Decimal::from_str(raw.trim()).map_err(|e| {
                BillingError::InvalidConfiguration {
                    message: format!("{} '{}': {}", KEY_VAT_RATE, raw, e),
                }
            })?;
            config.vat_rate = Rate::from_percentage_decimal(percent);
        }

        if let Some(raw) = settings.get(KEY_ROUNDING_MODE).filter(|raw| !raw.trim().is_empty()) {
            config.rounding_mode = raw.parse()?;
        }

        if let Some(raw) = settings.get(KEY_DECIMAL_SCALE).filter(|raw| !raw.trim().is_empty()) {
            config.decimal_scale = raw.trim().parse().map_err(|_| {
                BillingError::InvalidRoundingMode {
                    message: format!("{} '{}' is not a non-negative integer", KEY_DECIMAL_SCALE, raw),
                }
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// parse from json, e.g. `{"vat_enabled": true, "vat_rate": "0.19"}`
    ///
    /// an unknown `rounding_mode` is reported as `InvalidRoundingMode`
    pub fn from_json(json: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(json).map_err(invalid_json)?;

        let mode = match value.as_object_mut().and_then(|o| o.remove(KEY_ROUNDING_MODE)) {
            Some(Value::String(raw)) => Some(raw.parse::<RoundingMode>()?),
            Some(Value::Null) | None => None,
            Some(other) => {
                return Err(BillingError::InvalidRoundingMode {
                    message: format!("unknown mode '{}'", other),
                })
            }
        };

        let mut config: Self = serde_json::from_value(value).map_err(invalid_json)?;
        if let Some(mode) = mode {
            config.rounding_mode = mode;
        }
        config.validate()?;
        Ok(config)
    }
}

fn invalid_json(e: serde_json::Error) -> BillingError {
    BillingError::InvalidConfiguration {
        message: e.to_string(),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(BillingError::InvalidConfiguration {
            message: format!("{} '{}' is not a boolean", key, raw),
        }),
    }
}
