//! Multiple-lives composition: joint and last-survivor statuses over
//! independent single-life tables.

use crate::LifetabResult;
use crate::base_table::BaseTable;
use crate::life_table::LifeTable;
use crate::periodicity::Periodicity;
use crate::table::{DecrementTable, shared_periodicity, validate_ages_arity};
use bon::bon;

/// How a group of lives fails as a unit.
///
/// `Joint` status ends at the first decrement among the group: every life
/// must remain. `LastSurvivor` status persists while at least one life
/// remains and only ends when all lives have decremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JointStatus {
    Joint,
    #[default]
    LastSurvivor,
}

/// A table composing N independent lives under a joint-status policy.
///
/// `ages` carries one entry per life, in the order the component tables were
/// supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct JointLifeTable {
    tables: Vec<BaseTable>,
    status: JointStatus,
    periodicity: Periodicity,
}

#[bon]
impl JointLifeTable {
    /// Compose single-life tables into a multiple-lives table.
    ///
    /// Fails with `InvalidArgument` when no table is supplied or the
    /// components do not share one periodicity.
    #[builder]
    pub fn new(
        tables: Vec<LifeTable>,
        #[builder(default)] status: JointStatus,
    ) -> LifetabResult<Self> {
        let tables: Vec<BaseTable> = tables.into_iter().map(|t| t.base().clone()).collect();
        let periodicity = shared_periodicity(&tables)?;
        Ok(Self {
            tables,
            status,
            periodicity,
        })
    }
}

impl JointLifeTable {
    /// The configured joint-status policy.
    pub fn status(&self) -> JointStatus {
        self.status
    }

    /// The component single-decrement tables, one per life.
    pub fn tables(&self) -> &[BaseTable] {
        &self.tables
    }

    /// Rebuild with every component rescaled to a new periodicity.
    pub fn with_periodicity(&self, periodicity: Periodicity) -> LifetabResult<Self> {
        let tables = self
            .tables
            .iter()
            .map(|t| t.with_periodicity(periodicity))
            .collect::<LifetabResult<Vec<_>>>()?;
        Ok(Self {
            tables,
            status: self.status,
            periodicity,
        })
    }
}

impl DecrementTable for JointLifeTable {
    fn lives(&self) -> usize {
        self.tables.len()
    }

    fn decrements(&self) -> usize {
        1
    }

    fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Probability the group status fails between `t` and `t + 1`.
    ///
    /// # Formula
    /// ```text
    /// Joint:          qₓᵧ = 1 − ∏ᵢ (1 − qᵢ)
    /// Last survivor:  qₓ̄ᵧ̄ = ∏ᵢ qᵢ
    /// ```
    fn qx(&self, ages: &[u32], t: u32) -> LifetabResult<f64> {
        validate_ages_arity(ages, self.tables.len(), "life")?;
        match self.status {
            JointStatus::Joint => {
                let all_survive: f64 = self
                    .tables
                    .iter()
                    .zip(ages)
                    .map(|(table, &x)| 1.0 - table.qx(x, t))
                    .product();
                Ok(1.0 - all_survive)
            }
            JointStatus::LastSurvivor => Ok(self
                .tables
                .iter()
                .zip(ages)
                .map(|(table, &x)| table.qx(x, t))
                .product()),
        }
    }

    /// Probability the group status survives `t` periods.
    ///
    /// Under joint status this is the product of the marginal survivals.
    /// Under last-survivor status the group outlives any single member, so
    /// survival is accumulated period by period from the group's own
    /// decrement probability:
    ///
    /// # Formula
    /// ```text
    /// ₜpₓ̄ᵧ̄ = ∏ᵢ₌₁..ₜ (1 − qₓ̄ᵧ̄(ages, i−1))
    /// ```
    fn tpx(&self, ages: &[u32], t: u32) -> LifetabResult<f64> {
        validate_ages_arity(ages, self.tables.len(), "life")?;
        match self.status {
            JointStatus::Joint => Ok(self
                .tables
                .iter()
                .zip(ages)
                .map(|(table, &x)| table.tpx(x, t))
                .product()),
            JointStatus::LastSurvivor => {
                let mut lx = 1.0;
                for i in 1..=t {
                    lx *= 1.0 - self.qx(ages, i - 1)?;
                }
                Ok(lx)
            }
        }
    }

    /// Joint status closes at the first component's horizon, last-survivor
    /// status at the last one's.
    fn max_future_time(&self, ages: &[u32]) -> LifetabResult<f64> {
        validate_ages_arity(ages, self.tables.len(), "life")?;
        let horizons = self
            .tables
            .iter()
            .zip(ages)
            .map(|(table, &x)| table.max_future_time(x));
        let horizon = match self.status {
            JointStatus::Joint => horizons.fold(f64::INFINITY, f64::min),
            JointStatus::LastSurvivor => horizons.fold(0.0, f64::max),
        };
        Ok(horizon)
    }
}
