//! Parsing and checking of cast search query strings.

pub mod builder;
pub mod help;
pub mod text_match;
pub mod validate;

pub use builder::{BuiltQuery, Filters, QueryBuilder, QueryFilters};
pub use help::search_help;
pub use text_match::text_match_condition;
pub use validate::{validate_query, validate_query_with, ValidationError, ValidationOptions, ValidationReport};
