//! Type-safe wrappers and enums for NBA database values.

pub mod season;
pub mod stat;

pub use season::SeasonYear;
pub use stat::StatCategory;
