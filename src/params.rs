use bon::Builder;
use garde::Validate;

// =======================================
// TABLE CONSTRUCTION PARAMETER STRUCT
// =======================================
#[derive(Debug, Clone, Validate, Builder)]
#[garde(allow_unvalidated)]
pub struct TableParams {
    // Periodic decrement probabilities, index 0 is the first period after
    // the table's base age
    #[garde(custom(validate_rates))]
    pub rates: Vec<f64>,

    // Starting survivor count the recurrence is seeded with
    #[garde(custom(validate_radix))]
    pub radix: f64,
}

impl TableParams {
    /// Validate with cross-field validation using Result<(), garde::Report>
    pub fn validate_all(&self) -> Result<(), garde::Report> {
        // All constraints are per-field; garde's built-in pass is enough
        self.validate()
    }
}

// =======================================
// PRIVATE FUNCTIONS
// =======================================

/// Custom validation function for the rate vector
fn validate_rates(rates: &Vec<f64>, _context: &()) -> garde::Result {
    if rates.is_empty() {
        return Err(garde::Error::new("rates must contain at least one period"));
    }
    if rates.iter().any(|q| !q.is_finite() || *q < 0.0 || *q > 1.0) {
        return Err(garde::Error::new(
            "every rate must be a probability between 0.0 and 1.0",
        ));
    }
    Ok(())
}

/// Custom validation function for the radix field
fn validate_radix(radix: &f64, _context: &()) -> garde::Result {
    if !radix.is_finite() || *radix <= 0.0 {
        return Err(garde::Error::new(
            "radix must be a positive, finite survivor count",
        ));
    }
    Ok(())
}
