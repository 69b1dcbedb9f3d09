//! Stateless transforms applied to raw rate vectors before a table is built.
//!
//! Rates must be loaded *before* their periodicity is rescaled; the transforms
//! never run inside a table, they prepare the input for one.

use crate::LifetabResult;
use crate::error::TableError;
use crate::periodicity::Periodicity;
use log::debug;

/// Multiply every rate by `percent / 100`, capping each result at 1.0.
///
/// A percentage of 0 returns the input unchanged, and a rate that already
/// equals 1.0 stays 1.0 whatever the percentage: a certain decrement remains
/// certain under de-loading.
///
/// Fails with `InvalidArgument` when `percent` is negative.
///
/// # Example
/// ```rust
/// # use lifetab::prelude::*;
/// let loaded = apply_loading(&[0.25, 0.5, 1.0], 150.0)?;
/// assert_eq!(loaded, vec![0.375, 0.75, 1.0]);
/// # LifetabResult::Ok(())
/// ```
pub fn apply_loading(rates: &[f64], percent: f64) -> LifetabResult<Vec<f64>> {
    if percent < 0.0 {
        return Err(TableError::InvalidArgument(format!(
            "loading percentage must not be negative, got {percent}"
        )));
    }
    if percent == 0.0 {
        return Ok(rates.to_vec());
    }
    let loaded = rates
        .iter()
        .map(|&q| {
            if q < 1.0 {
                (q * percent / 100.0).min(1.0)
            } else {
                1.0
            }
        })
        .collect();
    Ok(loaded)
}

/// Convert a rate vector quoted in periods of `from` into one quoted in
/// periods of `to`.
///
/// Splitting a period into `k` sub-periods assumes a constant force of
/// decrement within the original period: each rate `q` becomes
/// `1 − (1−q)^(1/k)`, repeated across the `k` sub-periods that compose it.
/// Merging `k` sub-periods back into one coarser period inverts that
/// (`q` becomes `1 − (1−q)^k`) and is only possible when the merged
/// sub-period rates are identical; merging a vector whose sub-period rates
/// vary would lose information and fails with `InvalidArgument`.
///
/// Frequencies whose ratio is not a whole number of periods cannot be
/// converted in either direction.
pub fn rescale_rates(
    rates: &[f64],
    from: Periodicity,
    to: Periodicity,
) -> LifetabResult<Vec<f64>> {
    let from_ppy = from.periods_per_year();
    let to_ppy = to.periods_per_year();
    if to_ppy > from_ppy {
        check_integral_ratio(to_ppy, from_ppy, from, to)?;
        debug!("splitting rate vector {from:?} -> {to:?}");
        Ok(split_periods(rates, (to_ppy / from_ppy) as usize))
    } else if from_ppy > to_ppy {
        check_integral_ratio(from_ppy, to_ppy, from, to)?;
        debug!("merging rate vector {from:?} -> {to:?}");
        merge_periods(rates, (from_ppy / to_ppy) as usize)
    } else {
        Ok(rates.to_vec())
    }
}

// ================================================
// PRIVATE FUNCTIONS
// ================================================

fn check_integral_ratio(
    finer: u32,
    coarser: u32,
    from: Periodicity,
    to: Periodicity,
) -> LifetabResult<()> {
    if finer % coarser != 0 {
        return Err(TableError::InvalidArgument(format!(
            "cannot convert between {from:?} and {to:?}: one period of the \
             coarser frequency must hold a whole number of the finer periods"
        )));
    }
    Ok(())
}

/// Each original period maps to `k` repeated copies of its fractionated rate.
fn split_periods(rates: &[f64], k: usize) -> Vec<f64> {
    let exponent = 1.0 / k as f64;
    let mut out = Vec::with_capacity(rates.len() * k);
    for &q in rates {
        let fractionated = 1.0 - (1.0 - q).powf(exponent);
        for _ in 0..k {
            out.push(fractionated);
        }
    }
    out
}

fn merge_periods(rates: &[f64], k: usize) -> LifetabResult<Vec<f64>> {
    let merged_len = rates.len().div_ceil(k);
    let mut out = Vec::with_capacity(merged_len);
    for i in 0..merged_len {
        let idx = (i * k).min(rates.len() - 1);
        for j in 1..k {
            let next = idx + j;
            if next >= rates.len() {
                break;
            }
            if rates[next] != rates[idx] {
                return Err(TableError::InvalidArgument(
                    "cannot merge periods whose sub-period rates are not constant \
                     without losing information"
                        .into(),
                ));
            }
        }
        out.push(1.0 - (1.0 - rates[idx]).powi(k as i32));
    }
    Ok(out)
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_loading_scales_and_caps() {
        let loaded = apply_loading(&[0.1, 0.4, 0.9], 200.0).unwrap();
        assert_abs_diff_eq!(loaded[0], 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(loaded[1], 0.8, epsilon = 1e-12);
        assert_eq!(loaded[2], 1.0);
    }

    #[test]
    fn test_loading_zero_percent_is_identity() {
        let rates = vec![0.1, 0.2, 0.3];
        assert_eq!(apply_loading(&rates, 0.0).unwrap(), rates);
    }

    #[test]
    fn test_loading_keeps_certain_decrement() {
        // De-loading halves every rate except an exact 1.0
        let loaded = apply_loading(&[0.1, 0.3, 0.5, 1.0], 50.0).unwrap();
        assert_abs_diff_eq!(loaded[0], 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(loaded[1], 0.15, epsilon = 1e-12);
        assert_abs_diff_eq!(loaded[2], 0.25, epsilon = 1e-12);
        assert_eq!(loaded[3], 1.0);
    }

    #[test]
    fn test_loading_rejects_negative_percent() {
        assert!(apply_loading(&[0.1], -5.0).is_err());
    }

    #[test]
    fn test_split_repeats_fractionated_rate() {
        let out = rescale_rates(&[0.19], Periodicity::Annual, Periodicity::Monthly).unwrap();
        assert_eq!(out.len(), 12);
        let expected = 1.0 - (1.0 - 0.19_f64).powf(1.0 / 12.0);
        for q in &out {
            assert_abs_diff_eq!(*q, expected, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_split_preserves_period_survival() {
        // Surviving 12 monthly sub-periods must equal surviving the annual period
        let out = rescale_rates(&[0.19], Periodicity::Annual, Periodicity::Monthly).unwrap();
        let survival: f64 = out.iter().map(|q| 1.0 - q).product();
        assert_abs_diff_eq!(survival, 0.81, epsilon = 1e-12);
    }

    #[test]
    fn test_merge_requires_constant_sub_rates() {
        let err = rescale_rates(
            &[0.01, 0.02, 0.01, 0.01],
            Periodicity::Semiannual,
            Periodicity::Annual,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_merge_compounds_constant_sub_rates() {
        let out = rescale_rates(
            &[0.1, 0.1, 0.2, 0.2],
            Periodicity::Semiannual,
            Periodicity::Annual,
        )
        .unwrap();
        assert_eq!(out.len(), 2);
        assert_abs_diff_eq!(out[0], 1.0 - 0.9 * 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], 1.0 - 0.8 * 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_same_periodicity_is_identity() {
        let rates = vec![0.1, 0.2];
        assert_eq!(
            rescale_rates(&rates, Periodicity::Monthly, Periodicity::Monthly).unwrap(),
            rates
        );
    }

    #[test]
    fn test_round_trip_restores_rates() {
        let rates = vec![0.1, 0.3, 0.5, 1.0];
        let split = rescale_rates(&rates, Periodicity::Annual, Periodicity::Quarterly).unwrap();
        let merged = rescale_rates(&split, Periodicity::Quarterly, Periodicity::Annual).unwrap();
        assert_eq!(merged.len(), rates.len());
        for (a, b) in merged.iter().zip(&rates) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_non_integral_ratio_rejected() {
        // 1.5 bimonthly periods per quarter
        assert!(rescale_rates(&[0.1], Periodicity::Quarterly, Periodicity::Bimonthly).is_err());
        assert!(rescale_rates(&[0.1, 0.1], Periodicity::Bimonthly, Periodicity::Quarterly).is_err());
    }
}
