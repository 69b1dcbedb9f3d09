//! # Lifetab Prelude
//!
//! Conveniently re-exports the most common types and functions for decrement
//! table calculations. Import this module to access all primary Lifetab
//! features with a single `use` statement.
//!
//! ## Example
//!
//! ```rust
//! # use lifetab::prelude::*;
//! let table = LifeTable::builder()
//!     .rates(vec![0.1, 0.3, 0.5, 1.0])
//!     .build()?;
//! let survival = table.tpx(&[0], 2)?;
//! println!("2-period survival: {survival:.6}");
//! # LifetabResult::Ok(())
//! ```

// Package Result type for Lifetab functions
pub use crate::LifetabResult;

// Error taxonomy
pub use crate::error::TableError;

// Core single-decrement table and its radix default
pub use crate::base_table::{BaseTable, DEFAULT_RADIX};

// The query contract shared by every variant
pub use crate::table::DecrementTable;

// Table variants
pub use crate::joint_life::{JointLifeTable, JointStatus};
pub use crate::life_table::LifeTable;
pub use crate::multi_decrement::{MAX_CAUSES, MultiDecrementTable, absolute_to_dependent};

// Rate preparation
pub use crate::periodicity::Periodicity;
pub use crate::rate_adjust::{apply_loading, rescale_rates};

// Interest basis
pub use crate::interest::{ConstantInterest, InterestRate, rescale_interest};

// Valuation assumption sets
pub use crate::assumptions::Assumptions;
