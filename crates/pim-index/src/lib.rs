//! Search-engine side of the catalog.
//!
//! Product values are normalized into an [`IndexDocument`] at
//! `values.<code>-<type>.<locale>.<scope>`, and filter criteria become query
//! clauses against the same paths through a [`ProductQueryBuilder`].

pub mod document;
pub mod error;
pub mod filter;
pub mod normalizer;
pub mod operator;
pub mod product_query;
pub mod search;
pub mod sorter;

pub use document::IndexDocument;
pub use error::IndexError;
pub use filter::{
    escape_query_string, AttributeFilter, BooleanFilter, DateFilter, FamilyFilter, FieldFilter,
    Filter, FilterOptions, IdentifierFilter, MediaFilter, NumberFilter, OptionFilter, PriceFilter,
    StringFilter,
};
pub use normalizer::{
    IndexingNormalizer, ProductIndexNormalizer, ValueCollectionNormalizer, INDEXING_FORMAT,
};
pub use operator::Operator;
pub use product_query::{FilterContext, ProductQueryBuilder};
pub use search::SearchQueryBuilder;
pub use sorter::{AttributeSorter, Direction};
