//! Single-life, single-decrement table: the plain mortality-table case.

use crate::LifetabResult;
use crate::base_table::{BaseTable, DEFAULT_RADIX};
use crate::periodicity::Periodicity;
use crate::table::{DecrementTable, validate_ages_arity};
use bon::bon;

/// A table for one life subject to one cause of decrement.
///
/// Queries delegate to the wrapped [`BaseTable`] with the single entry of
/// `ages`. This is also the building block the multiple-lives and
/// multiple-decrement variants are composed from.
///
/// # Example
/// ```rust
/// # use lifetab::prelude::*;
/// let table = LifeTable::builder()
///     .rates(vec![0.0, 0.2, 0.3, 0.4, 0.5, 1.0])
///     .build()?;
/// assert!((table.tpx(&[0], 5)? - 0.168).abs() < 1e-12);
/// assert_eq!(table.max_future_time(&[0])?, 6.0);
/// # LifetabResult::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LifeTable {
    base: BaseTable,
}

#[bon]
impl LifeTable {
    /// Build a table from a raw rate vector; see [`BaseTable::builder`] for
    /// the validation rules.
    #[builder]
    pub fn new(
        rates: Vec<f64>,
        #[builder(default = DEFAULT_RADIX)] radix: f64,
        #[builder(default)] periodicity: Periodicity,
    ) -> LifetabResult<Self> {
        let base = BaseTable::builder()
            .rates(rates)
            .radix(radix)
            .periodicity(periodicity)
            .build()?;
        Ok(Self { base })
    }
}

impl LifeTable {
    /// Wrap an already-built [`BaseTable`].
    pub fn from_base(base: BaseTable) -> Self {
        Self { base }
    }

    /// The wrapped single-decrement table.
    pub fn base(&self) -> &BaseTable {
        &self.base
    }

    /// Rebuild with rates rescaled to a new periodicity.
    pub fn with_periodicity(&self, periodicity: Periodicity) -> LifetabResult<Self> {
        Ok(Self {
            base: self.base.with_periodicity(periodicity)?,
        })
    }
}

impl DecrementTable for LifeTable {
    fn lives(&self) -> usize {
        1
    }

    fn decrements(&self) -> usize {
        1
    }

    fn periodicity(&self) -> Periodicity {
        self.base.periodicity()
    }

    fn qx(&self, ages: &[u32], t: u32) -> LifetabResult<f64> {
        validate_ages_arity(ages, 1, "life")?;
        Ok(self.base.qx(ages[0], t))
    }

    fn tpx(&self, ages: &[u32], t: u32) -> LifetabResult<f64> {
        validate_ages_arity(ages, 1, "life")?;
        Ok(self.base.tpx(ages[0], t))
    }

    fn max_future_time(&self, ages: &[u32]) -> LifetabResult<f64> {
        validate_ages_arity(ages, 1, "life")?;
        Ok(self.base.max_future_time(ages[0]))
    }
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn table() -> LifeTable {
        LifeTable::builder()
            .rates(vec![0.0, 0.2, 0.3, 0.4, 0.5, 1.0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_delegates_to_base() {
        let table = table();
        assert_abs_diff_eq!(table.tpx(&[0], 5).unwrap(), 0.168, epsilon = 1e-12);
        assert_eq!(table.qx(&[0], 10).unwrap(), 1.0);
        assert_eq!(table.max_future_time(&[0]).unwrap(), 6.0);
        assert!(!table.is_plateau().unwrap());
    }

    #[test]
    fn test_ages_arity_enforced() {
        let table = table();
        assert!(table.qx(&[], 0).is_err());
        assert!(table.tpx(&[0, 1], 0).is_err());
        assert!(table.max_future_time(&[0, 1]).is_err());
    }

    #[test]
    fn test_vectorized_queries_preserve_order() {
        let table = table();
        let t = [0, 1, 2, 3];
        let tpx = table.tpx_vec(&[0], &t).unwrap();
        assert_eq!(tpx.len(), 4);
        for (i, &ti) in t.iter().enumerate() {
            assert_eq!(tpx[i], table.tpx(&[0], ti).unwrap());
        }
    }

    #[test]
    fn test_t_qx_combines_survival_and_decrement() {
        let table = table();
        let t_qx = table.t_qx(&[0], 2).unwrap();
        let expected = table.tpx(&[0], 2).unwrap() * table.qx(&[0], 2).unwrap();
        assert_abs_diff_eq!(t_qx, expected, epsilon = 1e-15);
    }

    #[test]
    fn test_plateau_detection() {
        let plateau = LifeTable::builder().rates(vec![0.1]).build().unwrap();
        assert!(plateau.is_plateau().unwrap());
        assert!(plateau.max_future_time(&[0]).unwrap().is_infinite());
    }
}
