//! Account balance and runtime estimate.

use std::fmt;

/// Balance and current spend reported by the control plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountStatus {
    /// Credit left, in USD.
    pub balance: f64,
    /// Current spend, in USD per hour.
    pub burn_rate_per_hour: f64,
}

/// How long the balance lasts at the current burn rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuntimeEstimate {
    Hours(f64),
    /// Nothing is being spent, so the balance never runs out.
    Unbounded,
}

impl AccountStatus {
    /// Estimate remaining runtime without ever producing NaN or infinity.
    #[must_use]
    pub fn estimated_runtime(&self) -> RuntimeEstimate {
        if !self.burn_rate_per_hour.is_finite() || self.burn_rate_per_hour <= 0.0 {
            return RuntimeEstimate::Unbounded;
        }
        if !self.balance.is_finite() || self.balance <= 0.0 {
            return RuntimeEstimate::Hours(0.0);
        }
        let hours = self.balance / self.burn_rate_per_hour;
        if hours.is_finite() {
            RuntimeEstimate::Hours(hours)
        } else {
            RuntimeEstimate::Unbounded
        }
    }
}

impl fmt::Display for RuntimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hours(h) => write!(f, "{h:.1} hrs"),
            Self::Unbounded => f.write_str("unbounded (no active spend)"),
        }
    }
}
