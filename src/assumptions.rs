//! Valuation assumption sets: a decrement table paired with an interest
//! basis, validated for mutual compatibility.

use crate::LifetabResult;
use crate::error::TableError;
use crate::interest::InterestRate;
use crate::periodicity::Periodicity;
use crate::table::DecrementTable;
use bon::bon;

/// A decrement table and an interest basis that are safe to use together.
///
/// Construction enforces the two compatibility rules downstream valuation
/// relies on: table and interest must be quoted in the same periodicity, and
/// the table must close (a plateau table has no finite horizon to value
/// over).
///
/// # Example
/// ```rust
/// # use lifetab::prelude::*;
/// let table = LifeTable::builder().rates(vec![0.1, 0.5, 1.0]).build()?;
/// let interest = ConstantInterest::builder().rate(0.03).build();
/// let assumptions = Assumptions::builder()
///     .table(table)
///     .interest(interest)
///     .build()?;
/// assert_eq!(assumptions.periodicity(), Periodicity::Annual);
/// # LifetabResult::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct Assumptions<T, J>
where
    T: DecrementTable,
    J: InterestRate,
{
    table: T,
    interest: J,
}

#[bon]
impl<T, J> Assumptions<T, J>
where
    T: DecrementTable,
    J: InterestRate,
{
    /// Pair a table with an interest basis.
    ///
    /// Fails with `InvalidArgument` when the periodicities differ or the
    /// table is plateau-closed.
    #[builder]
    pub fn new(table: T, interest: J) -> LifetabResult<Self> {
        if table.periodicity() != interest.periodicity() {
            return Err(TableError::InvalidArgument(
                "table and interest must be quoted in the same periodicity".into(),
            ));
        }
        if table.is_plateau()? {
            return Err(TableError::InvalidArgument(
                "a plateau table has no finite horizon and cannot back a valuation".into(),
            ));
        }
        Ok(Self { table, interest })
    }
}

impl<T, J> Assumptions<T, J>
where
    T: DecrementTable,
    J: InterestRate,
{
    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn interest(&self) -> &J {
        &self.interest
    }

    /// Periodicity shared by the table and the interest basis.
    pub fn periodicity(&self) -> Periodicity {
        self.table.periodicity()
    }
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::ConstantInterest;
    use crate::life_table::LifeTable;

    fn closed_table() -> LifeTable {
        LifeTable::builder().rates(vec![0.1, 0.5, 1.0]).build().unwrap()
    }

    #[test]
    fn test_compatible_pair_builds() {
        let assumptions = Assumptions::builder()
            .table(closed_table())
            .interest(ConstantInterest::builder().rate(0.03).build())
            .build()
            .unwrap();
        assert_eq!(assumptions.periodicity(), Periodicity::Annual);
        assert_eq!(assumptions.interest().rate(0.0), 0.03);
    }

    #[test]
    fn test_mismatched_periodicity_rejected() {
        let monthly_interest = ConstantInterest::builder()
            .rate(0.001)
            .periodicity(Periodicity::Monthly)
            .build();
        let result = Assumptions::builder()
            .table(closed_table())
            .interest(monthly_interest)
            .build();
        assert!(matches!(result, Err(TableError::InvalidArgument(_))));
    }

    #[test]
    fn test_plateau_table_rejected() {
        let plateau = LifeTable::builder().rates(vec![0.1]).build().unwrap();
        let result = Assumptions::builder()
            .table(plateau)
            .interest(ConstantInterest::builder().rate(0.03).build())
            .build();
        assert!(matches!(result, Err(TableError::InvalidArgument(_))));
    }
}
