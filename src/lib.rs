//! # Lifetab
//!
//! A type-safe Rust library for actuarial decrement tables and survival probabilities.
//!
//! ## Features
//! - **Single-decrement tables**: periodic decrement rates turned into survivorship counts
//!   with bounded, extrapolation-aware probability queries
//! - **Multiple lives**: joint and last-survivor statuses composed from independent lives
//! - **Multiple decrements**: up to three competing causes acting on one life, with
//!   absolute-to-dependent rate conversion
//! - **Rate preparation**: percentage loading and periodicity rescaling of raw rate vectors
//! - **Interest**: constant periodic rates with compound discount factors
//! - **Builder Pattern**: constructors use builders with parameter validation
//!
//! ## Quick Start
//!
//! ```rust
//! use lifetab::prelude::*;
//!
//! // A six-period table that closes with a certain decrement
//! let table = LifeTable::builder()
//!     .rates(vec![0.0, 0.2, 0.3, 0.4, 0.5, 1.0])
//!     .build()?;
//!
//! // Probability of surviving 5 periods from the table's base age
//! let survival = table.tpx(&[0], 5)?;
//!
//! // Probability of decrement in the period following age 2
//! let decrement = table.qx(&[2], 0)?;
//!
//! println!("5-period survival: {survival:.6}");
//! println!("qx at age 2: {decrement:.6}");
//! # LifetabResult::Ok(())
//! ```
//!
//! ## Notes
//! - All probabilities follow standard actuarial notation (`qx`, `tpx`, `t·qx`, `lx`)
//! - Queries take one age per underlying life or cause
//! - Queries beyond a table's horizon resolve by clamping or plateau extension,
//!   never by failing

pub type LifetabResult<T> = Result<T, error::TableError>;
pub mod assumptions;
pub mod base_table;
pub mod error;
pub mod interest;
pub mod joint_life;
pub mod life_table;
pub mod multi_decrement;
pub mod params;
pub mod periodicity;
pub mod prelude;
pub mod rate_adjust;
pub mod table;
