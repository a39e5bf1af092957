use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    #[error("invalid period: end date {end_date} is before start date {start_date}")]
    InvalidPeriod {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },

    #[error("invalid rounding mode: {message}")]
    InvalidRoundingMode {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, BillingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BillingError::InvalidPeriod {
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid period: end date 2025-01-01 is before start date 2025-02-01"
        );

        let err = BillingError::InvalidRoundingMode {
            message: "unknown mode 'ceiling'".to_string(),
        };
        assert_eq!(err.to_string(), "invalid rounding mode: unknown mode 'ceiling'");
    }
}
