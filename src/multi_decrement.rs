//! Multiple-decrement composition: up to three competing causes acting on
//! one life.
//!
//! Each cause is supplied as its own single-decrement table of *absolute*
//! (independent) rates. Queries convert those to *dependent* rates — the
//! probability of failing from a cause while the other causes also compete —
//! with the standard combinatorial approximation before any per-cause
//! probability is reported.

use crate::LifetabResult;
use crate::base_table::BaseTable;
use crate::error::TableError;
use crate::life_table::LifeTable;
use crate::periodicity::Periodicity;
use crate::table::{DecrementTable, shared_periodicity, validate_ages_arity};
use bon::bon;

/// Largest number of competing causes the conversion supports.
pub const MAX_CAUSES: usize = 3;

/// Convert absolute decrement rates into dependent ones, padding missing
/// causes with zero rates.
///
/// # Formula
/// ```text
/// q⁽ʲ⁾ = q'ⱼ · (1 − ½(q'ₖ + q'ₗ) + ⅓·q'ₖ·q'ₗ)
/// ```
/// for each cause `j` with the other two causes `k`, `l`.
pub fn absolute_to_dependent(absolute: &[f64]) -> LifetabResult<[f64; MAX_CAUSES]> {
    if absolute.len() > MAX_CAUSES {
        return Err(TableError::InvalidArgument(format!(
            "at most {MAX_CAUSES} decrement causes are supported, got {}",
            absolute.len()
        )));
    }
    let mut q = [0.0; MAX_CAUSES];
    q[..absolute.len()].copy_from_slice(absolute);
    Ok([
        dependent_rate(q[0], q[1], q[2]),
        dependent_rate(q[1], q[2], q[0]),
        dependent_rate(q[2], q[0], q[1]),
    ])
}

fn dependent_rate(own: f64, other_a: f64, other_b: f64) -> f64 {
    own * (1.0 - 0.5 * (other_a + other_b) + (other_a * other_b) / 3.0)
}

/// A table for one life subject to up to three competing causes of
/// decrement, each with its own absolute rate table.
///
/// `ages` carries one entry per cause — each cause may have a different base
/// age (e.g. a mortality table entered at age 50 alongside a cancellation
/// table entered at duration 0).
#[derive(Debug, Clone, PartialEq)]
pub struct MultiDecrementTable {
    tables: Vec<BaseTable>,
    labels: Vec<String>,
    main_cause: Option<usize>,
    periodicity: Periodicity,
}

#[bon]
impl MultiDecrementTable {
    /// Compose cause tables into a multiple-decrement table.
    ///
    /// Causes may be labeled; unlabeled causes are addressable by their
    /// position rendered as a string. An optional main cause (given by label
    /// or position) redirects [`DecrementTable::t_qx`] to that cause alone.
    ///
    /// Fails with `InvalidArgument` when no table or more than
    /// [`MAX_CAUSES`] tables are supplied, when labels do not line up with
    /// the causes, when the main cause does not name a cause, or when the
    /// components do not share one periodicity.
    #[builder]
    pub fn new(
        tables: Vec<LifeTable>,
        labels: Option<Vec<String>>,
        main_cause: Option<String>,
    ) -> LifetabResult<Self> {
        let tables: Vec<BaseTable> = tables.into_iter().map(|t| t.base().clone()).collect();
        if tables.len() > MAX_CAUSES {
            return Err(TableError::InvalidArgument(format!(
                "at most {MAX_CAUSES} decrement causes are supported, got {}",
                tables.len()
            )));
        }
        let periodicity = shared_periodicity(&tables)?;

        let labels = match labels {
            Some(labels) => {
                if labels.len() != tables.len() {
                    return Err(TableError::InvalidArgument(format!(
                        "expected one label per cause ({}), got {}",
                        tables.len(),
                        labels.len()
                    )));
                }
                labels
            }
            None => (0..tables.len()).map(|i| i.to_string()).collect(),
        };
        if labels
            .iter()
            .enumerate()
            .any(|(i, label)| labels[..i].contains(label))
        {
            return Err(TableError::InvalidArgument(
                "cause labels must be distinct".into(),
            ));
        }

        let main_cause = match main_cause {
            Some(name) => Some(resolve_cause(&labels, &name).map_err(|_| {
                TableError::InvalidArgument(format!(
                    "main cause {name:?} must be one of {labels:?}"
                ))
            })?),
            None => None,
        };

        Ok(Self {
            tables,
            labels,
            main_cause,
            periodicity,
        })
    }
}

impl MultiDecrementTable {
    /// Cause labels, in the order the tables were supplied.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the configured main cause, if any.
    pub fn main_cause(&self) -> Option<usize> {
        self.main_cause
    }

    pub fn has_main_cause(&self) -> bool {
        self.main_cause.is_some()
    }

    /// The component cause tables.
    pub fn tables(&self) -> &[BaseTable] {
        &self.tables
    }

    /// Resolve a cause label (or position rendered as a string) to its index.
    pub fn cause_index(&self, label: &str) -> LifetabResult<usize> {
        resolve_cause(&self.labels, label)
    }

    /// Dependent probability of failing from cause `j` between `x + t` and
    /// `x + t + 1`, with every cause evaluated at its own age.
    ///
    /// Fails with `OutOfRange` when `j` is not a configured cause.
    pub fn qx_j(&self, ages: &[u32], t: u32, j: usize) -> LifetabResult<f64> {
        validate_ages_arity(ages, self.tables.len(), "decrement cause")?;
        self.check_cause(j)?;
        let absolute: Vec<f64> = self
            .tables
            .iter()
            .zip(ages)
            .map(|(table, &x)| table.qx(x, t))
            .collect();
        Ok(absolute_to_dependent(&absolute)?[j])
    }

    /// Element-wise [`qx_j`](Self::qx_j) over a slice of durations.
    pub fn qx_j_vec(&self, ages: &[u32], t: &[u32], j: usize) -> LifetabResult<Vec<f64>> {
        t.iter().map(|&t| self.qx_j(ages, t, j)).collect()
    }

    /// Probability of surviving every cause for `t` periods and then failing
    /// from cause `j` in the following period.
    pub fn t_qx_j(&self, ages: &[u32], t: u32, j: usize) -> LifetabResult<f64> {
        Ok(self.tpx(ages, t)? * self.qx_j(ages, t, j)?)
    }

    /// Element-wise [`t_qx_j`](Self::t_qx_j) over a slice of durations.
    pub fn t_qx_j_vec(&self, ages: &[u32], t: &[u32], j: usize) -> LifetabResult<Vec<f64>> {
        t.iter().map(|&t| self.t_qx_j(ages, t, j)).collect()
    }

    fn check_cause(&self, j: usize) -> LifetabResult<()> {
        if j >= self.tables.len() {
            return Err(TableError::OutOfRange(format!(
                "cause index {j} exceeds the {} configured causes",
                self.tables.len()
            )));
        }
        Ok(())
    }
}

impl DecrementTable for MultiDecrementTable {
    fn lives(&self) -> usize {
        1
    }

    fn decrements(&self) -> usize {
        self.tables.len()
    }

    fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Probability of decrement from any cause: the sum of the dependent
    /// per-cause probabilities.
    fn qx(&self, ages: &[u32], t: u32) -> LifetabResult<f64> {
        let mut total = 0.0;
        for j in 0..self.tables.len() {
            total += self.qx_j(ages, t, j)?;
        }
        Ok(total)
    }

    /// Probability of surviving every cause: causes act as independent
    /// competing risks, so the absolute survivals multiply.
    fn tpx(&self, ages: &[u32], t: u32) -> LifetabResult<f64> {
        validate_ages_arity(ages, self.tables.len(), "decrement cause")?;
        Ok(self
            .tables
            .iter()
            .zip(ages)
            .map(|(table, &x)| table.tpx(x, t))
            .product())
    }

    /// Once any cause's absolute table is exhausted its rate is undefined,
    /// so the composite closes at the earliest component horizon.
    fn max_future_time(&self, ages: &[u32]) -> LifetabResult<f64> {
        validate_ages_arity(ages, self.tables.len(), "decrement cause")?;
        Ok(self
            .tables
            .iter()
            .zip(ages)
            .map(|(table, &x)| table.max_future_time(x))
            .fold(f64::INFINITY, f64::min))
    }

    /// With a main cause configured, reports that cause's deferred
    /// probability; otherwise the all-causes value.
    fn t_qx(&self, ages: &[u32], t: u32) -> LifetabResult<f64> {
        match self.main_cause {
            Some(j) => self.t_qx_j(ages, t, j),
            None => Ok(self.tpx(ages, t)? * self.qx(ages, t)?),
        }
    }
}

fn resolve_cause(labels: &[String], label: &str) -> LifetabResult<usize> {
    if let Some(index) = labels.iter().position(|l| l == label) {
        return Ok(index);
    }
    Err(TableError::OutOfRange(format!(
        "{label:?} does not name a configured cause"
    )))
}
