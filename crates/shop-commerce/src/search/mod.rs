//! Search module.
//!
//! Catalog filtering: independently optional clauses combined with AND.

mod filter;
mod query;

pub use filter::Filter;
pub use query::SearchQuery;
