//! Period lengths a rate vector can be quoted in.

/// Granularity of the discrete periods underlying a rate vector or an
/// interest rate.
///
/// Two tables can only be composed when they share a periodicity, and rate
/// vectors are rescaled between periodicities with
/// [`crate::rate_adjust::rescale_rates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Periodicity {
    Daily,
    Weekly,
    Semimonthly,
    Monthly,
    Bimonthly,
    Quarterly,
    FourMonthly,
    Semiannual,
    #[default]
    Annual,
}

impl Periodicity {
    /// Number of periods of this granularity in one year.
    ///
    /// Weekly counts 48 periods (four per month), matching the table
    /// conventions used by the supervisory filings this library targets.
    pub fn periods_per_year(self) -> u32 {
        match self {
            Periodicity::Daily => 365,
            Periodicity::Weekly => 48,
            Periodicity::Semimonthly => 24,
            Periodicity::Monthly => 12,
            Periodicity::Bimonthly => 6,
            Periodicity::Quarterly => 4,
            Periodicity::FourMonthly => 3,
            Periodicity::Semiannual => 2,
            Periodicity::Annual => 1,
        }
    }

    /// How many periods of this granularity fit in one period of `other`.
    ///
    /// The ratio is fractional when the granularities are incommensurable,
    /// e.g. 1.5 bimonthly periods per quarter.
    pub fn periods_per(self, other: Periodicity) -> f64 {
        f64::from(self.periods_per_year()) / f64::from(other.periods_per_year())
    }

    /// True when this granularity slices the year into more periods than `other`.
    pub fn is_finer_than(self, other: Periodicity) -> bool {
        self.periods_per_year() > other.periods_per_year()
    }
}
