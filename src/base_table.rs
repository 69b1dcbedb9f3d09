//! Single-decrement table: one rate vector, its survivorship counts, and
//! bounded probability queries.
//!
//! A [`BaseTable`] is built once from a vector of periodic decrement
//! probabilities and is immutable afterwards. Construction derives the
//! survivor-count vector by forward recurrence from a radix and records where
//! (or whether) the table closes:
//!
//! - a **closed** table reaches a survivor count of exactly zero; queries past
//!   that point clamp to the last defined period;
//! - a **plateau** table never reaches zero because no rate equals 1; beyond
//!   its defined horizon the final rate is compounded indefinitely.
//!
//! Both policies are load-bearing for downstream valuation: querying past the
//! horizon returns the boundary value, it does not fail.

use crate::LifetabResult;
use crate::params::TableParams;
use crate::periodicity::Periodicity;
use crate::rate_adjust::rescale_rates;
use bon::bon;
use log::debug;

/// Starting survivor count used when no radix is supplied.
pub const DEFAULT_RADIX: f64 = 10_000.0;

/// A single-decrement table over discrete periods.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTable {
    /// Periodic decrement probabilities; index 0 is the first period after
    /// the table's base age.
    rates: Vec<f64>,

    /// Survivor counts, one entry longer than `rates`. Entries after the
    /// first exact zero are all zero.
    survivors: Vec<f64>,

    /// Index of the last period with a positive survivor count, or `None`
    /// when the table never closes (plateau).
    terminal_index: Option<usize>,

    /// Period length the rates are quoted in.
    periodicity: Periodicity,
}

#[bon]
impl BaseTable {
    /// Build a table from a raw rate vector.
    ///
    /// Fails with `InvalidArgument` when the vector is empty, any rate falls
    /// outside [0, 1], or the radix is not a positive finite count.
    #[builder]
    pub fn new(
        rates: Vec<f64>,
        #[builder(default = DEFAULT_RADIX)] radix: f64,
        #[builder(default)] periodicity: Periodicity,
    ) -> LifetabResult<Self> {
        let params = TableParams { rates, radix };
        params.validate_all()?;
        let TableParams { rates, radix } = params;

        let mut survivors = vec![0.0; rates.len() + 1];
        survivors[0] = radix;
        let mut terminal_index = None;
        for i in 1..survivors.len() {
            survivors[i] = survivors[i - 1] * (1.0 - rates[i - 1]);
            if survivors[i] == 0.0 {
                terminal_index = Some(i - 1);
                break;
            }
        }

        debug!(
            "built decrement table: {} periods, {}",
            rates.len(),
            match terminal_index {
                Some(w) => format!("closes after index {w}"),
                None => "plateau closure".to_string(),
            }
        );

        Ok(Self {
            rates,
            survivors,
            terminal_index,
            periodicity,
        })
    }
}

impl BaseTable {
    /// Number of periods the table defines rates for.
    pub fn periods(&self) -> usize {
        self.rates.len()
    }

    /// The raw rate vector.
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Period length the rates are quoted in.
    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Index of the last period with a positive survivor count, or `None`
    /// for a plateau table.
    pub fn terminal_index(&self) -> Option<usize> {
        self.terminal_index
    }

    /// True when the survivor recurrence never reaches zero and the table is
    /// extrapolated indefinitely with its final rate.
    pub fn is_plateau(&self) -> bool {
        self.terminal_index.is_none()
    }

    /// Maximum number of whole future periods a life aged `x` can survive
    /// before certain closure.
    ///
    /// Returns `f64::INFINITY` for a plateau table.
    pub fn max_future_time(&self, x: u32) -> f64 {
        match self.terminal_index {
            Some(w) => (w as f64 - f64::from(x) + 1.0).max(0.0),
            None => f64::INFINITY,
        }
    }

    /// Expected survivor count at index `x` (`lₓ`).
    ///
    /// `x` is capped at the table's defined horizon. A plateau table makes up
    /// the difference by compounding its final rate once per excess period.
    pub fn lx(&self, x: u32) -> f64 {
        let cap = self.max_future_time(0).min(self.rates.len() as f64);
        let x_capped = f64::from(x).min(cap) as usize;
        let lx = self.survivors[x_capped];
        if self.is_plateau() && (x as usize) > x_capped {
            let excess = x as usize - x_capped;
            let last = self.rates[self.rates.len() - 1];
            return lx * (1.0 - last).powi(excess as i32);
        }
        lx
    }

    /// Probability of decrement between ages `x + t` and `x + t + 1` (`qₓ₊ₜ`).
    ///
    /// Both `x` and `t` are clamped to the table's valid index range, so a
    /// query beyond the horizon returns the rate at the last valid index.
    pub fn qx(&self, x: u32, t: u32) -> f64 {
        let upper_x = self.max_future_time(0).min((self.rates.len() - 1) as f64);
        let x = f64::from(x).min(upper_x) as usize;
        let upper_t = self
            .max_future_time(x as u32)
            .min((self.rates.len() - x - 1) as f64);
        let t = f64::from(t).min(upper_t) as usize;
        self.rates[x + t]
    }

    /// Probability that a life aged `x` survives `t` periods (`ₜpₓ`).
    ///
    /// # Formula
    /// ```text
    /// ₜpₓ = lₓ₊ₜ / lₓ
    /// ```
    /// with `ₒpₓ = 1`, and 0 once the survivor count at `x` is exhausted.
    pub fn tpx(&self, x: u32, t: u32) -> f64 {
        if t == 0 {
            return 1.0;
        }
        let lx = self.lx(x);
        if lx == 0.0 {
            return 0.0;
        }
        self.lx(x + t) / lx
    }

    /// Deferred decrement probability (`ₜ|qₓ`): survive `t` periods from age
    /// `x`, then decrement in the following period.
    pub fn t_qx(&self, x: u32, t: u32) -> f64 {
        self.qx(x, t) * self.tpx(x, t)
    }

    /// Rebuild this table with its rates rescaled to a new periodicity,
    /// keeping the radix.
    pub fn with_periodicity(&self, periodicity: Periodicity) -> LifetabResult<Self> {
        let rates = rescale_rates(&self.rates, self.periodicity, periodicity)?;
        BaseTable::builder()
            .rates(rates)
            .radix(self.survivors[0])
            .periodicity(periodicity)
            .build()
    }
}
