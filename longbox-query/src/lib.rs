//! # longbox-query
//!
//! Turns typed search criteria into a parameterized relational predicate:
//! WHERE text, bound literals, and the join plan. The dynamic JSON boundary
//! for `advanced_search` is validated here into a closed criterion union;
//! unknown fields fail loudly, nothing passes through untyped.

pub mod builder;
pub mod criteria;

pub use builder::build_predicate;
pub use criteria::{Criteria, Criterion, TextMatch};
