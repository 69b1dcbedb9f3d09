//! The query contract shared by every table variant.
//!
//! One trait, three implementations ([`crate::life_table::LifeTable`],
//! [`crate::joint_life::JointLifeTable`],
//! [`crate::multi_decrement::MultiDecrementTable`]); each variant owns its
//! composition rule, there is no shared state between them.

use crate::LifetabResult;
use crate::base_table::BaseTable;
use crate::error::TableError;
use crate::periodicity::Periodicity;

/// Survival and decrement queries over a vector of ages, one age per
/// underlying life or cause.
///
/// Every query validates that `ages` carries exactly
/// `lives() * decrements()` entries and fails with `InvalidArgument`
/// otherwise. All methods are read-only; a table never changes after
/// construction.
pub trait DecrementTable {
    /// Number of lives the table composes.
    fn lives(&self) -> usize;

    /// Number of decrement causes the table composes.
    fn decrements(&self) -> usize;

    /// Period length shared by every component table.
    fn periodicity(&self) -> Periodicity;

    /// Probability of decrement between `x + t` and `x + t + 1`.
    fn qx(&self, ages: &[u32], t: u32) -> LifetabResult<f64>;

    /// Probability of surviving `t` periods from the given ages.
    fn tpx(&self, ages: &[u32], t: u32) -> LifetabResult<f64>;

    /// Maximum number of whole future periods before certain closure;
    /// infinite for plateau tables.
    fn max_future_time(&self, ages: &[u32]) -> LifetabResult<f64>;

    /// Probability of surviving `t` periods and then decrementing in the
    /// following period.
    fn t_qx(&self, ages: &[u32], t: u32) -> LifetabResult<f64> {
        Ok(self.tpx(ages, t)? * self.qx(ages, t)?)
    }

    /// Element-wise [`qx`](DecrementTable::qx) over a slice of durations.
    fn qx_vec(&self, ages: &[u32], t: &[u32]) -> LifetabResult<Vec<f64>> {
        t.iter().map(|&t| self.qx(ages, t)).collect()
    }

    /// Element-wise [`tpx`](DecrementTable::tpx) over a slice of durations.
    fn tpx_vec(&self, ages: &[u32], t: &[u32]) -> LifetabResult<Vec<f64>> {
        t.iter().map(|&t| self.tpx(ages, t)).collect()
    }

    /// Element-wise [`t_qx`](DecrementTable::t_qx) over a slice of durations.
    fn t_qx_vec(&self, ages: &[u32], t: &[u32]) -> LifetabResult<Vec<f64>> {
        t.iter().map(|&t| self.t_qx(ages, t)).collect()
    }

    /// True when the table never closes and must be extrapolated
    /// indefinitely with its final rates.
    fn is_plateau(&self) -> LifetabResult<bool> {
        let zeros = vec![0; self.lives() * self.decrements()];
        Ok(self.max_future_time(&zeros)?.is_infinite())
    }
}

/// Checks that the ages vector carries one entry per composed life/cause.
pub(crate) fn validate_ages_arity(
    ages: &[u32],
    expected: usize,
    unit: &str,
) -> LifetabResult<()> {
    if ages.len() != expected {
        return Err(TableError::InvalidArgument(format!(
            "ages must carry one entry per {unit} (expected {expected}, got {})",
            ages.len()
        )));
    }
    Ok(())
}

/// Checks that all component tables share one periodicity and returns it.
pub(crate) fn shared_periodicity(tables: &[BaseTable]) -> LifetabResult<Periodicity> {
    let Some(first) = tables.first() else {
        return Err(TableError::InvalidArgument(
            "at least one component table must be supplied".into(),
        ));
    };
    let periodicity = first.periodicity();
    if tables.iter().any(|t| t.periodicity() != periodicity) {
        return Err(TableError::InvalidArgument(
            "all component tables must share the same periodicity".into(),
        ));
    }
    Ok(periodicity)
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn base(rates: Vec<f64>, periodicity: Periodicity) -> BaseTable {
        BaseTable::builder()
            .rates(rates)
            .periodicity(periodicity)
            .build()
            .unwrap()
    }

    #[test]
    fn test_validate_ages_arity() {
        assert!(validate_ages_arity(&[30, 40], 2, "life").is_ok());
        assert!(validate_ages_arity(&[30], 2, "life").is_err());
        assert!(validate_ages_arity(&[30, 40, 50], 2, "life").is_err());
    }

    #[test]
    fn test_shared_periodicity_accepts_uniform_tables() {
        let tables = vec![
            base(vec![0.1], Periodicity::Monthly),
            base(vec![0.2], Periodicity::Monthly),
        ];
        assert_eq!(shared_periodicity(&tables).unwrap(), Periodicity::Monthly);
    }

    #[test]
    fn test_shared_periodicity_rejects_mixed_tables() {
        let tables = vec![
            base(vec![0.1], Periodicity::Monthly),
            base(vec![0.2], Periodicity::Annual),
        ];
        assert!(shared_periodicity(&tables).is_err());
    }

    #[test]
    fn test_shared_periodicity_rejects_empty() {
        assert!(shared_periodicity(&[]).is_err());
    }
}
