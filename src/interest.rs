//! Interest-rate capability used when present-value work is layered on top
//! of the probability engine.

use crate::periodicity::Periodicity;
use bon::bon;

/// A per-period interest rate, possibly varying with the time offset.
///
/// The discount factor is derived from the rate:
///
/// # Formula
/// ```text
/// v(t) = (1 + i(t))⁻ᵗ
/// ```
pub trait InterestRate {
    /// Per-period rate in force at time offset `t`.
    fn rate(&self, t: f64) -> f64;

    /// Period length the rate is quoted in.
    fn periodicity(&self) -> Periodicity;

    /// Compound discount factor to time offset `t`.
    fn discount_factor(&self, t: f64) -> f64 {
        (1.0 + self.rate(t)).powf(-t)
    }

    /// Element-wise [`rate`](InterestRate::rate) over a slice of offsets.
    fn rate_vec(&self, t: &[f64]) -> Vec<f64> {
        t.iter().map(|&t| self.rate(t)).collect()
    }

    /// Element-wise [`discount_factor`](InterestRate::discount_factor) over a
    /// slice of offsets.
    fn discount_factor_vec(&self, t: &[f64]) -> Vec<f64> {
        t.iter().map(|&t| self.discount_factor(t)).collect()
    }
}

/// A time-invariant interest rate.
///
/// # Example
/// ```rust
/// # use lifetab::prelude::*;
/// let interest = ConstantInterest::builder().rate(0.01).build();
/// assert_eq!(interest.rate(7.0), 0.01);
/// assert!((interest.discount_factor(1.0) - 1.0 / 1.01).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantInterest {
    rate: f64,
    periodicity: Periodicity,
}

#[bon]
impl ConstantInterest {
    #[builder]
    pub fn new(rate: f64, #[builder(default)] periodicity: Periodicity) -> Self {
        Self { rate, periodicity }
    }
}

impl ConstantInterest {
    /// Re-quote this rate in a new periodicity, preserving the annual
    /// accumulation.
    pub fn with_periodicity(&self, periodicity: Periodicity) -> Self {
        Self {
            rate: rescale_interest(self.rate, self.periodicity, periodicity),
            periodicity,
        }
    }
}

impl InterestRate for ConstantInterest {
    fn rate(&self, _t: f64) -> f64 {
        self.rate
    }

    fn periodicity(&self) -> Periodicity {
        self.periodicity
    }
}

/// Convert a per-period rate quoted in `from` periods into the equivalent
/// rate per `to` period.
///
/// # Formula
/// ```text
/// i_new = (1 + i)^(from_ppy / to_ppy) − 1
/// ```
/// so compounding over a year is unchanged: a 1% annual rate becomes
/// ~0.082954% monthly.
pub fn rescale_interest(rate: f64, from: Periodicity, to: Periodicity) -> f64 {
    (1.0 + rate).powf(from.periods_per(to)) - 1.0
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_constant_rate_ignores_time() {
        let interest = ConstantInterest::builder().rate(0.03).build();
        assert_eq!(interest.rate(0.0), 0.03);
        assert_eq!(interest.rate(120.0), 0.03);
        assert_eq!(interest.periodicity(), Periodicity::Annual);
    }

    #[test]
    fn test_discount_factor_compounds() {
        let interest = ConstantInterest::builder().rate(0.01).build();
        let expected = [1.0, 0.99009901, 0.98029605, 0.97059015, 0.96098034];
        for (t, &exp) in expected.iter().enumerate() {
            assert_abs_diff_eq!(interest.discount_factor(t as f64), exp, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_discount_factor_vec_preserves_order() {
        let interest = ConstantInterest::builder().rate(0.05).build();
        let t = [0.0, 1.0, 2.0];
        let factors = interest.discount_factor_vec(&t);
        for (i, &ti) in t.iter().enumerate() {
            assert_eq!(factors[i], interest.discount_factor(ti));
        }
    }

    #[test]
    fn test_rescale_annual_to_monthly() {
        let monthly = rescale_interest(0.01, Periodicity::Annual, Periodicity::Monthly);
        assert_abs_diff_eq!(monthly, 0.00082954, epsilon = 1e-8);
        // Twelve monthly periods accumulate back to the annual rate
        assert_abs_diff_eq!((1.0 + monthly).powi(12) - 1.0, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_with_periodicity_round_trip() {
        let annual = ConstantInterest::builder().rate(0.04).build();
        let monthly = annual.with_periodicity(Periodicity::Monthly);
        assert_eq!(monthly.periodicity(), Periodicity::Monthly);
        let back = monthly.with_periodicity(Periodicity::Annual);
        assert_abs_diff_eq!(back.rate(0.0), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_monthly_discounting_matches_original_quote() {
        let monthly = ConstantInterest::builder()
            .rate(rescale_interest(0.01, Periodicity::Annual, Periodicity::Monthly))
            .periodicity(Periodicity::Monthly)
            .build();
        assert_abs_diff_eq!(monthly.discount_factor(1.0), 0.99917115, epsilon = 1e-8);
        assert_abs_diff_eq!(monthly.discount_factor(4.0), 0.99668872, epsilon = 1e-8);
    }
}
