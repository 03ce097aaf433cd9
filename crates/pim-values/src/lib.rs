//! Product value factories: raw JSON data in, validated [`ProductValue`] out.
//!
//! [`ProductValueFactory`] routes on the attribute type to one
//! [`ValueFactory`] per type family. Option and reference-data factories
//! resolve codes through the repositories of `pim-core`, governed by an
//! [`UnresolvedCodes`] policy.
//!
//! [`ProductValue`]: pim_core::ProductValue

pub mod factory;
pub mod option;
pub mod reference_data;
pub mod resolve;
pub mod scalar;
pub mod structured;

#[cfg(test)]
mod test_support;

pub use factory::{ProductValueFactory, ValueFactory};
pub use option::{OptionValueFactory, OptionsValueFactory};
pub use reference_data::{ReferenceDataCollectionValueFactory, ReferenceDataValueFactory};
pub use resolve::{resolve_codes, NoneResolved, UnresolvedCodes};
pub use scalar::{BooleanValueFactory, DateValueFactory, NumberValueFactory, TextValueFactory};
pub use structured::{MediaValueFactory, MetricValueFactory, PriceCollectionValueFactory};
