//! Aggregates, value objects and the search model, independent of Diesel.

pub mod cast_member;
pub mod category;
pub mod genre;
pub mod search;
pub mod types;
pub mod validation;
