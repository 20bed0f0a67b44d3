use crate::domain::market::Observation;
use rust_decimal::Decimal;
use tracing::warn;

/// Centralized validator for daily market data integrity.
///
/// Rejects rows that are physically impossible (non-positive prices, inverted
/// ranges, negative volume).
pub struct StrictObservationValidator;

impl StrictObservationValidator {
    /// Validates one observation. Returns true if valid, false otherwise.
    pub fn validate(ticker: &str, obs: &Observation) -> bool {
        if obs.open <= Decimal::ZERO
            || obs.high <= Decimal::ZERO
            || obs.low <= Decimal::ZERO
            || obs.close <= Decimal::ZERO
        {
            warn!(
                "Validation FAILED: {} on {} has non-positive price component(s)",
                ticker, obs.date
            );
            return false;
        }

        if obs.low > obs.high {
            warn!(
                "Validation FAILED: {} on {} has low {} > high {}",
                ticker, obs.date, obs.low, obs.high
            );
            return false;
        }

        if obs.volume < Decimal::ZERO {
            warn!(
                "Validation FAILED: {} on {} has negative volume: {}",
                ticker, obs.date, obs.volume
            );
            return false;
        }

        true
    }

    /// Keeps only the rows that pass `validate`.
    pub fn retain_valid(ticker: &str, observations: Vec<Observation>) -> Vec<Observation> {
        observations
            .into_iter()
            .filter(|o| Self::validate(ticker, o))
            .collect()
    }
}
