//! Diesel row models and their conversions to domain aggregates.

pub mod cast_member;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod genre;
