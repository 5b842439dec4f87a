//! Declarative query building blocks shared by every record collection.
//!
//! A [`Predicate`] describes which records match; [`Sort`] and [`Page`]
//! shape the result set; the aggregation helpers fold matched amounts.

pub mod aggregation;
pub mod pagination;
pub mod predicate;

pub use aggregation::{group_amounts, sum_amounts, GroupTotal};
pub use pagination::{Page, Sort, SortDirection};
pub use predicate::{Condition, Filterable, Predicate, PredicateBuilder, Scalar};
