//! Core data models for regional rate analysis.

mod analysis;
mod rates;
mod region;

pub use analysis::*;
pub use rates::*;
pub use region::*;
