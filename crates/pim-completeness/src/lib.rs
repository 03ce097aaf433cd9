//! Completeness of products against their family requirements.
//!
//! [`CompletenessCalculator`] expands the family's required attributes over
//! each channel locale and asks a [`ChainedChecker`] whether the applicable
//! value is filled. [`calculate_batch`] runs it across many products on the
//! blocking pool.

pub mod batch;
pub mod calculator;
pub mod chained;
pub mod checker;
pub mod error;

pub use batch::calculate_batch;
pub use calculator::CompletenessCalculator;
pub use chained::ChainedChecker;
pub use checker::{BackendChecker, ValueCompleteChecker};
pub use error::CompletenessError;
